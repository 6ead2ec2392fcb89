use serde::{Deserialize, Serialize};

use crate::models::users::entities::User;

/// 登录/注册响应：用户信息 + 访问令牌
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}
