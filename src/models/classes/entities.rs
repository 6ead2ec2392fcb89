use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Class {
    // 班级ID
    pub id: i64,
    // 班级名称
    pub name: String,
    // 班级描述
    pub description: Option<String>,
    // 邀请码
    pub code: String,
    // 教师ID
    pub teacher_id: i64,
    // 课程安排（可选的自由文本）
    pub schedule: Option<String>,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
}
