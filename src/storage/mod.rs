use std::sync::Arc;

use crate::models::{
    assignments::{
        entities::{Assignment, AssignmentStatus},
        requests::CreateAssignmentRequest,
    },
    classes::{entities::Class, requests::CreateClassRequest},
    submissions::{
        entities::{Attachment, Submission},
        responses::SubmissionWithStudent,
    },
    users::{
        entities::{User, UserRole},
        requests::CreateUserRequest,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// 班级管理方法
    // 创建班级，邀请码在存储层生成并保证唯一
    async fn create_class(&self, teacher_id: i64, class: CreateClassRequest) -> Result<Class>;
    // 通过ID获取班级信息
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>>;
    // 通过邀请码获取班级信息
    async fn get_class_by_code(&self, code: &str) -> Result<Option<Class>>;
    // 获取指定教师名下的班级
    async fn get_class_owned_by(&self, class_id: i64, teacher_id: i64) -> Result<Option<Class>>;
    // 列出教师创建的班级
    async fn list_classes_for_teacher(&self, teacher_id: i64) -> Result<Vec<Class>>;
    // 列出学生加入的班级
    async fn list_classes_for_student(&self, student_id: i64) -> Result<Vec<Class>>;
    // 列出全部班级（管理员视角）
    async fn list_all_classes(&self) -> Result<Vec<Class>>;
    // 批量按ID获取班级
    async fn get_classes_by_ids(&self, class_ids: &[i64]) -> Result<Vec<Class>>;
    // 学生加入班级，重复加入由唯一索引拒绝
    async fn enroll_student(&self, class_id: i64, student_id: i64) -> Result<()>;
    // 列出班级学生名单
    async fn list_class_students(&self, class_id: i64) -> Result<Vec<User>>;

    /// 作业管理方法
    // 创建作业
    async fn create_assignment(
        &self,
        created_by: i64,
        assignment: CreateAssignmentRequest,
    ) -> Result<Assignment>;
    // 通过ID获取作业
    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>>;
    // 列出班级下全部作业
    async fn list_assignments_by_class(&self, class_id: i64) -> Result<Vec<Assignment>>;
    // 列出学生已提交过的作业
    async fn list_assignments_with_submission_by(&self, student_id: i64)
    -> Result<Vec<Assignment>>;
    // 更新作业状态
    async fn update_assignment_status(
        &self,
        id: i64,
        status: AssignmentStatus,
    ) -> Result<Option<Assignment>>;
    // 删除作业，返回被级联删除的附件存储路径供文件清理
    async fn delete_assignment(&self, id: i64) -> Result<Option<Vec<String>>>;

    /// 提交管理方法
    // 创建提交（提交行与附件行在同一事务内写入）
    async fn create_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        content: String,
        attachments: Vec<Attachment>,
    ) -> Result<Submission>;
    // 获取某学生对某作业的提交
    async fn get_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>>;
    // 列出作业的全部提交，附带学生姓名与邮箱
    async fn list_submissions_with_students(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<SubmissionWithStudent>>;
    // 评分，只允许 submitted -> graded 单向迁移
    async fn grade_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        grade: f64,
        feedback: Option<String>,
    ) -> Result<Option<Submission>>;
    // 按 (作业, 学生, 存储文件名) 三元组查附件
    async fn get_attachment(
        &self,
        assignment_id: i64,
        student_id: i64,
        filename: &str,
    ) -> Result<Option<Attachment>>;

    /// 仪表盘统计方法
    // 班级总数
    async fn count_classes(&self) -> Result<u64>;
    // 作业总数
    async fn count_assignments(&self) -> Result<u64>;
    // 截止时间晚于给定时间戳的作业数
    async fn count_assignments_due_after(&self, after: i64) -> Result<u64>;
    // 用户总数
    async fn count_users(&self) -> Result<u64>;
    // 指定角色的用户数
    async fn count_users_with_role(&self, role: &UserRole) -> Result<u64>;
    // 活跃用户数
    async fn count_active_users(&self) -> Result<u64>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
