use serde::{Deserialize, Serialize};

use crate::models::assignments::entities::Assignment;
use crate::models::classes::entities::Class;
use crate::models::users::entities::User;

/// 班级详情：基本信息 + 教师 + 学生名单 + 作业列表
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassDetail {
    #[serde(flatten)]
    pub class: Class,
    pub teacher: Option<ClassMember>,
    pub students: Vec<ClassMember>,
    pub assignments: Vec<Assignment>,
}

/// 班级成员摘要（只暴露姓名和邮箱）
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassMember {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<User> for ClassMember {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// 加入班级响应
#[derive(Debug, Serialize, Deserialize)]
pub struct JoinClassResponse {
    pub class_id: i64,
}
