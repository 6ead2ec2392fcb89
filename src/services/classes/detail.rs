use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::ClassService;
use crate::models::classes::responses::{ClassDetail, ClassMember};
use crate::models::{ApiResponse, ErrorCode};

/// 班级详情：基本信息 + 教师 + 学生名单 + 作业列表
pub async fn get_class(
    service: &ClassService,
    req: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(req);

    let class = match storage.get_class_by_id(class_id).await {
        Ok(Some(class)) => class,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ClassNotFound,
                "Class not found",
            )));
        }
        Err(e) => {
            error!("Failed to query class {}: {}", class_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to query class",
                )),
            );
        }
    };

    // 教师信息缺失时退化为 None，不让详情请求整体失败
    let teacher = match storage.get_user_by_id(class.teacher_id).await {
        Ok(user) => user.map(ClassMember::from),
        Err(e) => {
            error!("Failed to query teacher for class {}: {}", class_id, e);
            None
        }
    };

    let students = match storage.list_class_students(class_id).await {
        Ok(users) => users.into_iter().map(ClassMember::from).collect(),
        Err(e) => {
            error!("Failed to query students for class {}: {}", class_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to query class students",
                )),
            );
        }
    };

    let assignments = match storage.list_assignments_by_class(class_id).await {
        Ok(assignments) => assignments,
        Err(e) => {
            error!("Failed to query assignments for class {}: {}", class_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to query class assignments",
                )),
            );
        }
    };

    let detail = ClassDetail {
        class,
        teacher,
        students,
        assignments,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(detail, "OK")))
}
