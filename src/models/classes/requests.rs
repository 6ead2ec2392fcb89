use serde::Deserialize;

/// 创建班级请求
#[derive(Debug, Deserialize)]
pub struct CreateClassRequest {
    pub name: String,
    pub description: Option<String>,
    pub schedule: Option<String>,
}

/// 加入班级请求
#[derive(Debug, Deserialize)]
pub struct JoinClassRequest {
    pub code: String,
}
