use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::str::FromStr;
use std::sync::Arc;
use tracing::error;

use super::DashboardService;
use crate::errors::Result;
use crate::models::dashboard::responses::{
    AdminOverview, DashboardOverview, StudentOverview, SystemStats, TeacherOverview,
};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 仪表盘概览
///
/// 路径参数里的角色决定统计口径，和登录身份无关。
/// 未知角色返回 400。
pub async fn overview(
    service: &DashboardService,
    req: &HttpRequest,
    role: String,
) -> ActixResult<HttpResponse> {
    let role = match UserRole::from_str(&role) {
        Ok(role) => role,
        Err(_) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationError,
                "Invalid role",
            )));
        }
    };

    let storage = service.get_storage(req);

    match collect_overview(&storage, &role).await {
        Ok(data) => Ok(HttpResponse::Ok().json(ApiResponse::success(data, "OK"))),
        Err(e) => {
            error!("Failed to build {} dashboard: {}", role, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to build dashboard",
                )),
            )
        }
    }
}

async fn collect_overview(
    storage: &Arc<dyn Storage>,
    role: &UserRole,
) -> Result<DashboardOverview> {
    let overview = match role {
        UserRole::Student => DashboardOverview::Student(StudentOverview {
            classes: storage.count_classes().await?,
            assignments: storage.count_assignments().await?,
            upcoming_deadlines: storage
                .count_assignments_due_after(chrono::Utc::now().timestamp())
                .await?,
        }),
        UserRole::Teacher => DashboardOverview::Teacher(TeacherOverview {
            classes: storage.count_classes().await?,
            students: storage.count_users_with_role(&UserRole::Student).await?,
        }),
        UserRole::Admin => DashboardOverview::Admin(AdminOverview {
            total_users: storage.count_users().await?,
            total_classes: storage.count_classes().await?,
            system_stats: SystemStats {
                active_users: storage.count_active_users().await?,
            },
        }),
    };

    Ok(overview)
}
