use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::AssignmentService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_by_class(
    service: &AssignmentService,
    req: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    match service
        .get_storage(req)
        .list_assignments_by_class(class_id)
        .await
    {
        Ok(assignments) => Ok(HttpResponse::Ok().json(ApiResponse::success(assignments, "OK"))),
        Err(e) => {
            error!("Failed to list assignments for class {}: {}", class_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to list assignments",
                )),
            )
        }
    }
}
