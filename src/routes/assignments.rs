use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::assignments::requests::{
    CreateAssignmentRequest, GradeRequest, UpdateStatusRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::AssignmentService;

// 懒加载的全局 ASSIGNMENT_SERVICE 实例
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

// HTTP处理程序
pub async fn create_assignment(
    req: HttpRequest,
    assignment_data: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .create_assignment(&req, assignment_data.into_inner())
        .await
}

pub async fn list_by_class(
    req: HttpRequest,
    class_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .list_by_class(&req, class_id.into_inner())
        .await
}

pub async fn list_by_student(
    req: HttpRequest,
    student_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .list_by_student(&req, student_id.into_inner())
        .await
}

pub async fn get_assignment(
    req: HttpRequest,
    assignment_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .get_assignment(&req, assignment_id.into_inner())
        .await
}

pub async fn submit(
    req: HttpRequest,
    assignment_id: web::Path<i64>,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .submit(&req, assignment_id.into_inner(), payload)
        .await
}

pub async fn list_submissions(
    req: HttpRequest,
    assignment_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .list_submissions(&req, assignment_id.into_inner())
        .await
}

pub async fn grade(
    req: HttpRequest,
    path: web::Path<(i64, i64)>,
    grade_data: web::Json<GradeRequest>,
) -> ActixResult<HttpResponse> {
    let (assignment_id, student_id) = path.into_inner();
    ASSIGNMENT_SERVICE
        .grade(&req, assignment_id, student_id, grade_data.into_inner())
        .await
}

pub async fn update_status(
    req: HttpRequest,
    assignment_id: web::Path<i64>,
    status_data: web::Json<UpdateStatusRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .update_status(&req, assignment_id.into_inner(), status_data.into_inner())
        .await
}

pub async fn delete_assignment(
    req: HttpRequest,
    assignment_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .delete_assignment(&req, assignment_id.into_inner())
        .await
}

pub async fn download_attachment(
    req: HttpRequest,
    path: web::Path<(i64, i64, String)>,
) -> ActixResult<HttpResponse> {
    let (assignment_id, student_id, filename) = path.into_inner();
    ASSIGNMENT_SERVICE
        .download_attachment(&req, assignment_id, student_id, filename)
        .await
}

// 配置路由
pub fn configure_assignments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/assignments")
            .wrap(middlewares::RequireJWT)
            .service(
                // 教师/管理员创建作业
                web::resource("").route(
                    web::post()
                        .to(create_assignment)
                        .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                ),
            )
            .service(web::resource("/class/{class_id}").route(web::get().to(list_by_class)))
            .service(web::resource("/student/{student_id}").route(web::get().to(list_by_student)))
            .service(
                // 学生提交作业（multipart）
                web::resource("/{assignment_id}/submit").route(
                    web::post()
                        .to(submit)
                        .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                ),
            )
            .service(
                // 教师/管理员查看作业的全部提交
                web::resource("/{assignment_id}/submissions").route(
                    web::get()
                        .to(list_submissions)
                        .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                ),
            )
            .service(
                web::resource("/{assignment_id}/status").route(
                    web::patch()
                        .to(update_status)
                        .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                ),
            )
            .service(
                web::resource("/{assignment_id}/submissions/{student_id}/grade").route(
                    web::post()
                        .to(grade)
                        .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                ),
            )
            .service(
                web::resource(
                    "/{assignment_id}/submissions/{student_id}/attachments/{filename}",
                )
                .route(web::get().to(download_attachment)),
            )
            .service(
                web::resource("/{assignment_id}")
                    .route(web::get().to(get_assignment))
                    .route(
                        web::delete()
                            .to(delete_assignment)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::dev::Service;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpMessage, test};
    use std::fs;
    use std::sync::Arc;

    use crate::config::AppConfig;
    use crate::models::ErrorCode;
    use crate::models::classes::requests::CreateClassRequest;
    use crate::models::submissions::entities::SubmissionStatus;
    use crate::models::users::entities::User;
    use crate::models::users::requests::CreateUserRequest;
    use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage};

    const BOUNDARY: &str = "handler-test-boundary";

    struct Fixture {
        storage: Arc<dyn Storage>,
        student: User,
        assignment_id: i64,
    }

    async fn setup() -> Fixture {
        let storage = SeaOrmStorage::new_with_url(":memory:", 1, 5)
            .await
            .expect("in-memory storage should initialize");

        let teacher = storage
            .create_user(CreateUserRequest {
                name: "T1".to_string(),
                email: "t1@example.com".to_string(),
                password_hash: "$argon2id$fake-hash".to_string(),
                role: UserRole::Teacher,
            })
            .await
            .unwrap();
        let student = storage
            .create_user(CreateUserRequest {
                name: "S1".to_string(),
                email: "s1@example.com".to_string(),
                password_hash: "$argon2id$fake-hash".to_string(),
                role: UserRole::Student,
            })
            .await
            .unwrap();
        let class = storage
            .create_class(
                teacher.id,
                CreateClassRequest {
                    name: "Math 101".to_string(),
                    description: None,
                    schedule: None,
                },
            )
            .await
            .unwrap();
        let assignment = storage
            .create_assignment(
                teacher.id,
                CreateAssignmentRequest {
                    class_id: class.id,
                    title: "HW1".to_string(),
                    description: "Read chapter 3".to_string(),
                    due_date: chrono::Utc::now() + chrono::Duration::days(7),
                    points: None,
                    status: None,
                },
            )
            .await
            .unwrap();

        Fixture {
            storage: Arc::new(storage),
            student,
            assignment_id: assignment.id,
        }
    }

    /// 拼 multipart 请求体：(字段名, 文件名, 内容)
    fn multipart_body(parts: &[(&str, Option<&str>, Vec<u8>)]) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, filename, data) in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match filename {
                Some(f) => body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{f}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                ),
                None => body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                ),
            }
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    /// 上传目录里指定字节数的文件个数，用独特的字节数当标记
    fn staged_files_with_size(size: u64) -> usize {
        match fs::read_dir(&AppConfig::get().upload.dir) {
            Ok(entries) => entries
                .filter_map(|e| e.ok())
                .filter(|e| e.metadata().map(|m| m.len() == size).unwrap_or(false))
                .count(),
            Err(_) => 0,
        }
    }

    #[actix_web::test]
    async fn test_negative_grade_rejected_and_status_unchanged() {
        let f = setup().await;
        f.storage
            .create_submission(f.assignment_id, f.student.id, "answer".to_string(), vec![])
            .await
            .unwrap();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(f.storage.clone()))
                .service(
                    web::resource("/api/assignments/{assignment_id}/submissions/{student_id}/grade")
                        .route(web::post().to(grade)),
                ),
        )
        .await;

        let req = test::TestRequest::post()
            .uri(&format!(
                "/api/assignments/{}/submissions/{}/grade",
                f.assignment_id, f.student.id
            ))
            .set_json(serde_json::json!({"grade": -1}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], ErrorCode::InvalidGrade as i32);

        // 状态与分数都原样保留
        let stored = f
            .storage
            .get_submission(f.assignment_id, f.student.id)
            .await
            .unwrap()
            .expect("submission should exist");
        assert_eq!(stored.status, SubmissionStatus::Submitted);
        assert!(stored.grade.is_none());
    }

    #[actix_web::test]
    async fn test_submit_rejects_sixth_attachment_before_persistence() {
        let f = setup().await;
        let user = f.student.clone();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(f.storage.clone()))
                .wrap_fn(move |req, srv| {
                    req.extensions_mut().insert(user.clone());
                    srv.call(req)
                })
                .service(
                    web::resource("/api/assignments/{assignment_id}/submit")
                        .route(web::post().to(submit)),
                ),
        )
        .await;

        // 标记字节数，用来确认暂存文件被清掉
        let marker = vec![b'a'; 3141];
        let mut parts: Vec<(&str, Option<&str>, Vec<u8>)> =
            vec![("content", None, b"six files".to_vec())];
        for _ in 0..6 {
            parts.push(("attachments", Some("notes.txt"), marker.clone()));
        }

        let req = test::TestRequest::post()
            .uri(&format!("/api/assignments/{}/submit", f.assignment_id))
            .insert_header((
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(multipart_body(&parts))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], ErrorCode::FileCountExceeded as i32);

        // 没有半份提交落库，暂存文件也清理干净
        assert!(
            f.storage
                .get_submission(f.assignment_id, f.student.id)
                .await
                .unwrap()
                .is_none()
        );
        assert_eq!(staged_files_with_size(3141), 0);
    }

    #[actix_web::test]
    async fn test_submit_rejects_oversize_attachment_before_persistence() {
        let f = setup().await;
        let user = f.student.clone();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(f.storage.clone()))
                .wrap_fn(move |req, srv| {
                    req.extensions_mut().insert(user.clone());
                    srv.call(req)
                })
                .service(
                    web::resource("/api/assignments/{assignment_id}/submit")
                        .route(web::post().to(submit)),
                ),
        )
        .await;

        let max_size = AppConfig::get().upload.max_size;
        // 先放一个正常大小的标记文件，再放超限文件
        let parts: Vec<(&str, Option<&str>, Vec<u8>)> = vec![
            ("content", None, b"too big".to_vec()),
            ("attachments", Some("small.txt"), vec![b'b'; 2718]),
            ("attachments", Some("huge.bin"), vec![b'c'; max_size + 1]),
        ];

        let req = test::TestRequest::post()
            .uri(&format!("/api/assignments/{}/submit", f.assignment_id))
            .insert_header((
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(multipart_body(&parts))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], ErrorCode::FileSizeExceeded as i32);

        // 拒绝发生在落库之前，先暂存的标记文件也被一并删除
        assert!(
            f.storage
                .get_submission(f.assignment_id, f.student.id)
                .await
                .unwrap()
                .is_none()
        );
        assert_eq!(staged_files_with_size(2718), 0);
    }
}
