use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::AssignmentService;
use crate::middlewares::RequireJWT;
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_assignment(
    service: &AssignmentService,
    req: &HttpRequest,
    assignment_data: CreateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let user = match RequireJWT::extract_user_claims(req) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing user",
            )));
        }
    };

    if assignment_data.title.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "Assignment title must not be empty",
        )));
    }
    if let Some(points) = assignment_data.points
        && points < 0
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "points must be non-negative",
        )));
    }

    let storage = service.get_storage(req);

    // 班级必须存在且归创建者所有；管理员可跨教师创建。
    // 归属不成立时统一返回 404，不区分「不存在」和「无权限」。
    let class = match user.role {
        UserRole::Admin => storage.get_class_by_id(assignment_data.class_id).await,
        _ => {
            storage
                .get_class_owned_by(assignment_data.class_id, user.id)
                .await
        }
    };

    match class {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ClassNotFound,
                "Class not found or not owned by you",
            )));
        }
        Err(e) => {
            error!("Failed to verify class ownership: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error",
                )),
            );
        }
    }

    match storage.create_assignment(user.id, assignment_data).await {
        Ok(assignment) => {
            info!(
                "Assignment {} created by {} in class {}",
                assignment.id, user.id, assignment.class_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                assignment,
                "Assignment created successfully",
            )))
        }
        Err(e) => {
            error!("Assignment creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::AssignmentCreationFailed,
                    "Assignment creation failed",
                )),
            )
        }
    }
}
