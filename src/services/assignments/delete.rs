use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::fs;
use tracing::{error, info, warn};

use super::AssignmentService;
use crate::models::{ApiResponse, ErrorCode};

/// 删除作业
///
/// 提交与附件行由外键级联删除；附件文件随后尽力清理，
/// 清理失败只告警，不影响删除结果。
pub async fn delete_assignment(
    service: &AssignmentService,
    req: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    match service
        .get_storage(req)
        .delete_assignment(assignment_id)
        .await
    {
        Ok(Some(paths)) => {
            for path in &paths {
                if let Err(e) = fs::remove_file(path) {
                    warn!("Failed to remove attachment file {}: {}", path, e);
                }
            }
            info!(
                "Assignment {} deleted ({} attachment files)",
                assignment_id,
                paths.len()
            );
            Ok(HttpResponse::NoContent().finish())
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            "Assignment not found",
        ))),
        Err(e) => {
            error!("Failed to delete assignment {}: {}", assignment_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to delete assignment",
                )),
            )
        }
    }
}
