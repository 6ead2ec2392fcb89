use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuthService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};

pub async fn profile(_service: &AuthService, req: &HttpRequest) -> ActixResult<HttpResponse> {
    match RequireJWT::extract_user_claims(req) {
        Some(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(user, "OK"))),
        None => Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized: missing user",
        ))),
    }
}
