use serde::{Deserialize, Serialize};

// 仪表盘概览，按角色返回不同的统计口径
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DashboardOverview {
    Student(StudentOverview),
    Teacher(TeacherOverview),
    Admin(AdminOverview),
}

/// 学生视角：班级数、作业数、未到截止时间的作业数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentOverview {
    pub classes: u64,
    pub assignments: u64,
    pub upcoming_deadlines: u64,
}

/// 教师视角：班级数与学生总数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherOverview {
    pub classes: u64,
    pub students: u64,
}

/// 管理员视角：全局用户与班级规模
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminOverview {
    pub total_users: u64,
    pub total_classes: u64,
    pub system_stats: SystemStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemStats {
    pub active_users: u64,
}
