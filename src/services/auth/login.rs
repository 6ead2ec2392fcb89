use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::AuthService;
use crate::models::users::entities::UserStatus;
use crate::models::users::requests::LoginRequest;
use crate::models::users::responses::AuthResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::password::verify_password;

pub async fn login(
    service: &AuthService,
    req: &HttpRequest,
    login_data: LoginRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(req);

    let user = match storage.get_user_by_email(&login_data.email).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            // 和密码错误返回同一个响应，不暴露邮箱是否存在
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::InvalidCredentials,
                "Invalid email or password",
            )));
        }
        Err(e) => {
            error!("Failed to query user for login: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error",
                )),
            );
        }
    };

    if !verify_password(&login_data.password, &user.password_hash) {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::InvalidCredentials,
            "Invalid email or password",
        )));
    }

    if user.status != UserStatus::Active {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Account is inactive",
        )));
    }

    match user.generate_access_token() {
        Ok(token) => {
            info!("User {} logged in", user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                AuthResponse { user, token },
                "Login successful",
            )))
        }
        Err(e) => {
            error!("Token generation failed for login: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error",
                )),
            )
        }
    }
}
