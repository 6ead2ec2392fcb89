use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::AssignmentService;
use crate::models::assignments::requests::UpdateStatusRequest;
use crate::models::{ApiResponse, ErrorCode};

/// 更新作业状态
///
/// status 是类型化枚举，非法取值在反序列化阶段就被拒绝，
/// 不会以原样字符串落库。
pub async fn update_status(
    service: &AssignmentService,
    req: &HttpRequest,
    assignment_id: i64,
    status_data: UpdateStatusRequest,
) -> ActixResult<HttpResponse> {
    match service
        .get_storage(req)
        .update_assignment_status(assignment_id, status_data.status)
        .await
    {
        Ok(Some(assignment)) => {
            info!(
                "Assignment {} status changed to {}",
                assignment_id, assignment.status
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "Status updated")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            "Assignment not found",
        ))),
        Err(e) => {
            error!(
                "Failed to update status for assignment {}: {}",
                assignment_id, e
            );
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to update assignment status",
                )),
            )
        }
    }
}
