use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ClassService;
use crate::middlewares::RequireJWT;
use crate::models::classes::requests::JoinClassRequest;
use crate::models::classes::responses::JoinClassResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn join_class(
    service: &ClassService,
    req: &HttpRequest,
    join_data: JoinClassRequest,
) -> ActixResult<HttpResponse> {
    let uid = match RequireJWT::extract_user_id(req) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing user id",
            )));
        }
    };

    let storage = service.get_storage(req);

    let class = match storage.get_class_by_code(&join_data.code).await {
        Ok(Some(class)) => class,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ClassCodeInvalid,
                "Invalid class code",
            )));
        }
        Err(e) => {
            error!("Failed to query class by code: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to query class",
                )),
            );
        }
    };

    match storage.enroll_student(class.id, uid).await {
        Ok(()) => {
            info!("Student {} joined class {}", uid, class.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                JoinClassResponse { class_id: class.id },
                "Joined class successfully",
            )))
        }
        Err(e) if matches!(e, crate::errors::SmartClassError::Conflict(_)) => {
            Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ClassAlreadyJoined,
                "Already joined this class",
            )))
        }
        Err(e) => {
            error!("Failed to join class {}: {}", class.id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to join class",
                )),
            )
        }
    }
}
