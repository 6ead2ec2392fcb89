use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::ClassService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_class_by_code(
    service: &ClassService,
    req: &HttpRequest,
    code: String,
) -> ActixResult<HttpResponse> {
    match service.get_storage(req).get_class_by_code(&code).await {
        Ok(Some(class)) => Ok(HttpResponse::Ok().json(ApiResponse::success(class, "OK"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassCodeInvalid,
            "Invalid class code",
        ))),
        Err(e) => {
            error!("Failed to query class by code: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to query class",
                )),
            )
        }
    }
}
