use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::services::DashboardService;

// 懒加载的全局 DASHBOARD_SERVICE 实例
static DASHBOARD_SERVICE: Lazy<DashboardService> = Lazy::new(DashboardService::new_lazy);

// HTTP处理程序
pub async fn overview(req: HttpRequest, role: web::Path<String>) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.overview(&req, role.into_inner()).await
}

// 配置路由
pub fn configure_dashboard_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/dashboard")
            .wrap(middlewares::RequireJWT)
            .service(web::resource("/{role}").route(web::get().to(overview))),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};
    use std::sync::Arc;

    use crate::models::classes::requests::CreateClassRequest;
    use crate::models::users::entities::UserRole;
    use crate::models::users::requests::CreateUserRequest;
    use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage};

    async fn seeded_storage() -> Arc<dyn Storage> {
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
        for (name, email) in [("S1", "s1@example.com"), ("S2", "s2@example.com")] {
            storage
                .create_user(CreateUserRequest {
                    name: name.to_string(),
                    email: email.to_string(),
                    password_hash: "$argon2id$fake-hash".to_string(),
                    role: UserRole::Student,
                })
                .await
                .unwrap();
        }
        storage
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

        Arc::new(storage)
    }

    #[actix_web::test]
    async fn test_unknown_role_rejected() {
        let app = test::init_service(
            App::new().service(web::resource("/api/dashboard/{role}").route(web::get().to(overview))),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/dashboard/professor")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_teacher_overview_counts() {
        let storage = seeded_storage().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .service(web::resource("/api/dashboard/{role}").route(web::get().to(overview))),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/dashboard/teacher")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["classes"], 1);
        assert_eq!(body["data"]["students"], 2);
    }

    #[actix_web::test]
    async fn test_admin_overview_counts() {
        let storage = seeded_storage().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .service(web::resource("/api/dashboard/{role}").route(web::get().to(overview))),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/dashboard/admin")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["total_users"], 3);
        assert_eq!(body["data"]["total_classes"], 1);
        assert_eq!(body["data"]["system_stats"]["active_users"], 3);
    }
}
