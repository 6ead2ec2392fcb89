use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::assignments::entities::AssignmentStatus;

/// 创建作业请求
#[derive(Debug, Deserialize)]
pub struct CreateAssignmentRequest {
    pub class_id: i64,
    pub title: String,
    pub description: String,
    pub due_date: DateTime<Utc>, // ISO 8601 格式，如 "2026-01-24T12:00:00Z"
    pub points: Option<i64>,     // 缺省为 100
    pub status: Option<AssignmentStatus>, // 缺省为 draft
}

/// 更新作业状态请求
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: AssignmentStatus,
}

/// 评分请求
///
/// grade 用 Option 建模，缺失和为负都按 InvalidGrade 拒绝。
#[derive(Debug, Deserialize)]
pub struct GradeRequest {
    pub grade: Option<f64>,
    pub feedback: Option<String>,
}
