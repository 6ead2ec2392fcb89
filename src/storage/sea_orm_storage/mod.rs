//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod classes;
mod submissions;
mod users;

use crate::config::AppConfig;
use crate::errors::{Result, SmartClassError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 按全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::new_with_url(
            &config.database.url,
            config.database.pool_size,
            config.database.timeout,
        )
        .await
    }

    /// 按显式连接参数创建存储实例（测试用内存库走这里）
    pub async fn new_with_url(url: &str, pool_size: u32, timeout: u64) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, pool_size, timeout).await?
        } else {
            Self::connect_generic(&db_url, pool_size, timeout).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| SmartClassError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SmartClassError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| SmartClassError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(
        url: &str,
        pool_size: u32,
        timeout: u64,
    ) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(timeout))
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| SmartClassError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SmartClassError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    // 班级模块
    async fn create_class(&self, teacher_id: i64, class: CreateClassRequest) -> Result<Class> {
        self.create_class_impl(teacher_id, class).await
    }

    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>> {
        self.get_class_by_id_impl(class_id).await
    }

    async fn get_class_by_code(&self, code: &str) -> Result<Option<Class>> {
        self.get_class_by_code_impl(code).await
    }

    async fn get_class_owned_by(&self, class_id: i64, teacher_id: i64) -> Result<Option<Class>> {
        self.get_class_owned_by_impl(class_id, teacher_id).await
    }

    async fn list_classes_for_teacher(&self, teacher_id: i64) -> Result<Vec<Class>> {
        self.list_classes_for_teacher_impl(teacher_id).await
    }

    async fn list_classes_for_student(&self, student_id: i64) -> Result<Vec<Class>> {
        self.list_classes_for_student_impl(student_id).await
    }

    async fn list_all_classes(&self) -> Result<Vec<Class>> {
        self.list_all_classes_impl().await
    }

    async fn get_classes_by_ids(&self, class_ids: &[i64]) -> Result<Vec<Class>> {
        self.get_classes_by_ids_impl(class_ids).await
    }

    async fn enroll_student(&self, class_id: i64, student_id: i64) -> Result<()> {
        self.enroll_student_impl(class_id, student_id).await
    }

    async fn list_class_students(&self, class_id: i64) -> Result<Vec<User>> {
        self.list_class_students_impl(class_id).await
    }

    // 作业模块
    async fn create_assignment(
        &self,
        created_by: i64,
        assignment: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        self.create_assignment_impl(created_by, assignment).await
    }

    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(id).await
    }

    async fn list_assignments_by_class(&self, class_id: i64) -> Result<Vec<Assignment>> {
        self.list_assignments_by_class_impl(class_id).await
    }

    async fn list_assignments_with_submission_by(
        &self,
        student_id: i64,
    ) -> Result<Vec<Assignment>> {
        self.list_assignments_with_submission_by_impl(student_id)
            .await
    }

    async fn update_assignment_status(
        &self,
        id: i64,
        status: AssignmentStatus,
    ) -> Result<Option<Assignment>> {
        self.update_assignment_status_impl(id, status).await
    }

    async fn delete_assignment(&self, id: i64) -> Result<Option<Vec<String>>> {
        self.delete_assignment_impl(id).await
    }

    // 提交模块
    async fn create_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        content: String,
        attachments: Vec<Attachment>,
    ) -> Result<Submission> {
        self.create_submission_impl(assignment_id, student_id, content, attachments)
            .await
    }

    async fn get_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        self.get_submission_impl(assignment_id, student_id).await
    }

    async fn list_submissions_with_students(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<SubmissionWithStudent>> {
        self.list_submissions_with_students_impl(assignment_id)
            .await
    }

    async fn grade_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        grade: f64,
        feedback: Option<String>,
    ) -> Result<Option<Submission>> {
        self.grade_submission_impl(assignment_id, student_id, grade, feedback)
            .await
    }

    async fn get_attachment(
        &self,
        assignment_id: i64,
        student_id: i64,
        filename: &str,
    ) -> Result<Option<Attachment>> {
        self.get_attachment_impl(assignment_id, student_id, filename)
            .await
    }

    // 仪表盘统计模块
    async fn count_classes(&self) -> Result<u64> {
        self.count_classes_impl().await
    }

    async fn count_assignments(&self) -> Result<u64> {
        self.count_assignments_impl().await
    }

    async fn count_assignments_due_after(&self, after: i64) -> Result<u64> {
        self.count_assignments_due_after_impl(after).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    async fn count_users_with_role(&self, role: &UserRole) -> Result<u64> {
        self.count_users_with_role_impl(role).await
    }

    async fn count_active_users(&self) -> Result<u64> {
        self.count_active_users_impl().await
    }
}
