use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::classes::requests::{CreateClassRequest, JoinClassRequest};
use crate::models::users::entities::UserRole;
use crate::services::ClassService;

// 懒加载的全局 CLASS_SERVICE 实例
static CLASS_SERVICE: Lazy<ClassService> = Lazy::new(ClassService::new_lazy);

// HTTP处理程序
pub async fn list_classes(req: HttpRequest) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.list_classes(&req).await
}

pub async fn create_class(
    req: HttpRequest,
    class_data: web::Json<CreateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .create_class(&req, class_data.into_inner())
        .await
}

pub async fn get_class(req: HttpRequest, class_id: web::Path<i64>) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.get_class(&req, class_id.into_inner()).await
}

pub async fn get_class_by_code(
    req: HttpRequest,
    code: web::Path<String>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .get_class_by_code(&req, code.into_inner())
        .await
}

pub async fn join_class(
    req: HttpRequest,
    join_data: web::Json<JoinClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.join_class(&req, join_data.into_inner()).await
}

// 配置路由
pub fn configure_classes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/classes")
            .wrap(middlewares::RequireJWT)
            .service(
                // 按请求者角色列出班级；教师/管理员创建班级
                web::resource("").route(web::get().to(list_classes)).route(
                    web::post()
                        .to(create_class)
                        .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                ),
            )
            .service(
                // 学生使用邀请码加入班级
                web::resource("/join").route(
                    web::post()
                        .to(join_class)
                        .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                ),
            )
            .service(web::resource("/code/{code}").route(web::get().to(get_class_by_code)))
            .service(web::resource("/{class_id}").route(web::get().to(get_class))),
    );
}
