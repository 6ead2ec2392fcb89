use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::AssignmentService;
use crate::models::assignments::responses::AssignmentWithClassName;
use crate::models::{ApiResponse, ErrorCode};

/// 学生已提交过的作业，带班级显示名称
///
/// 班级名称通过第二次查询在内存中拼接；班级已被删除时
/// 退化为 "Unknown Class"。
pub async fn list_by_student(
    service: &AssignmentService,
    req: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(req);

    let assignments = match storage.list_assignments_with_submission_by(student_id).await {
        Ok(assignments) => assignments,
        Err(e) => {
            error!(
                "Failed to list assignments for student {}: {}",
                student_id, e
            );
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to list assignments",
                )),
            );
        }
    };

    let mut class_ids: Vec<i64> = assignments.iter().map(|a| a.class_id).collect();
    class_ids.sort_unstable();
    class_ids.dedup();

    let class_names: HashMap<i64, String> = match storage.get_classes_by_ids(&class_ids).await {
        Ok(classes) => classes.into_iter().map(|c| (c.id, c.name)).collect(),
        Err(e) => {
            error!("Failed to resolve class names: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to resolve class names",
                )),
            );
        }
    };

    let annotated: Vec<AssignmentWithClassName> = assignments
        .into_iter()
        .map(|assignment| {
            let class_name = class_names
                .get(&assignment.class_id)
                .cloned()
                .unwrap_or_else(|| "Unknown Class".to_string());
            AssignmentWithClassName {
                assignment,
                class_name,
            }
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(annotated, "OK")))
}
