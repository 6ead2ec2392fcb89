use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::AuthService;
use crate::models::users::requests::{CreateUserRequest, RegisterRequest};
use crate::models::users::responses::AuthResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_name, validate_password_simple};

pub async fn register(
    service: &AuthService,
    req: &HttpRequest,
    register_data: RegisterRequest,
) -> ActixResult<HttpResponse> {
    // 入参校验
    if let Err(msg) = validate_name(&register_data.name) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
    }
    if let Err(msg) = validate_email(&register_data.email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
    }
    if let Err(msg) = validate_password_simple(&register_data.password) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
    }

    let storage = service.get_storage(req);

    // 邮箱唯一性检查
    match storage.get_user_by_email(&register_data.email).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::UserAlreadyExists,
                "Email already registered",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            error!("Failed to check existing email: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error",
                )),
            );
        }
    }

    let password_hash = match hash_password(&register_data.password) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Password hashing failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error",
                )),
            );
        }
    };

    let create_request = CreateUserRequest {
        name: register_data.name,
        email: register_data.email,
        password_hash,
        role: register_data.role,
    };

    match storage.create_user(create_request).await {
        Ok(user) => match user.generate_access_token() {
            Ok(token) => {
                info!("User {} registered successfully", user.id);
                Ok(HttpResponse::Created().json(ApiResponse::success(
                    AuthResponse { user, token },
                    "Registered successfully",
                )))
            }
            Err(e) => {
                error!("Token generation failed after registration: {}", e);
                Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        "Internal server error",
                    )),
                )
            }
        },
        Err(e) if e.is_unique_violation() => {
            // 并发注册时唯一索引兜底
            Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::UserAlreadyExists,
                "Email already registered",
            )))
        }
        Err(e) => {
            error!("User creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error",
                )),
            )
        }
    }
}
