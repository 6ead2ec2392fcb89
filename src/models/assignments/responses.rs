use serde::{Deserialize, Serialize};

use crate::models::assignments::entities::Assignment;

/// 学生视角的作业列表项，附带班级显示名称
#[derive(Debug, Serialize, Deserialize)]
pub struct AssignmentWithClassName {
    #[serde(flatten)]
    pub assignment: Assignment,
    pub class_name: String,
}
