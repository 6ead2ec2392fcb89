use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::ClassService;
use crate::middlewares::RequireJWT;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

/// 角色决定可见范围：教师看自己创建的，学生看自己加入的，管理员看全部
pub async fn list_classes(service: &ClassService, req: &HttpRequest) -> ActixResult<HttpResponse> {
    let user = match RequireJWT::extract_user_claims(req) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing user",
            )));
        }
    };

    let storage = service.get_storage(req);

    let result = match user.role {
        UserRole::Teacher => storage.list_classes_for_teacher(user.id).await,
        UserRole::Student => storage.list_classes_for_student(user.id).await,
        UserRole::Admin => storage.list_all_classes().await,
    };

    match result {
        Ok(classes) => Ok(HttpResponse::Ok().json(ApiResponse::success(classes, "OK"))),
        Err(e) => {
            error!("Failed to list classes: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to list classes",
                )),
            )
        }
    }
}
