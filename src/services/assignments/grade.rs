use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::AssignmentService;
use crate::models::assignments::requests::GradeRequest;
use crate::models::{ApiResponse, ErrorCode};

/// 评分
///
/// grade 必须存在且非负，服务端不设上限。重复评分覆盖分数，
/// 状态停留在 graded。
pub async fn grade(
    service: &AssignmentService,
    req: &HttpRequest,
    assignment_id: i64,
    student_id: i64,
    grade_data: GradeRequest,
) -> ActixResult<HttpResponse> {
    let grade_value = match grade_data.grade {
        Some(g) if g >= 0.0 => g,
        _ => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::InvalidGrade,
                "grade must be a non-negative number",
            )));
        }
    };

    match service
        .get_storage(req)
        .grade_submission(assignment_id, student_id, grade_value, grade_data.feedback)
        .await
    {
        Ok(Some(submission)) => {
            info!(
                "Submission for assignment {} by student {} graded: {}",
                assignment_id, student_id, grade_value
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "Graded successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubmissionNotFound,
            "Submission not found",
        ))),
        Err(e) => {
            error!(
                "Failed to grade submission for assignment {}: {}",
                assignment_id, e
            );
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to grade submission",
                )),
            )
        }
    }
}
