pub mod login;
pub mod profile;
pub mod register;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::users::requests::{LoginRequest, RegisterRequest};
use crate::storage::Storage;

pub struct AuthService {
    storage: Option<Arc<dyn Storage>>,
}

impl AuthService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 注册
    pub async fn register(
        &self,
        req: &HttpRequest,
        register_data: RegisterRequest,
    ) -> ActixResult<HttpResponse> {
        register::register(self, req, register_data).await
    }

    // 登录
    pub async fn login(
        &self,
        req: &HttpRequest,
        login_data: LoginRequest,
    ) -> ActixResult<HttpResponse> {
        login::login(self, req, login_data).await
    }

    // 获取当前用户信息
    pub async fn profile(&self, req: &HttpRequest) -> ActixResult<HttpResponse> {
        profile::profile(self, req).await
    }
}
