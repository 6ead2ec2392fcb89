//! 班级与班级成员存储操作

use super::SeaOrmStorage;
use crate::entity::class_students;
use crate::entity::classes::{ActiveModel, Column, Entity as Classes};
use crate::entity::users;
use crate::errors::{Result, SmartClassError};
use crate::models::{
    classes::{entities::Class, requests::CreateClassRequest},
    users::entities::User,
};
use crate::utils::random_code::{
    CLASS_CODE_LEN, CLASS_CODE_LEN_EXTENDED, CLASS_CODE_MAX_ATTEMPTS, generate_class_code,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set,
};
use tracing::warn;

impl SeaOrmStorage {
    /// 创建班级，邀请码在有限次重试内保证唯一
    ///
    /// 6 位码空间内连续撞码 CLASS_CODE_MAX_ATTEMPTS 次后升级到 8 位。
    pub async fn create_class_impl(&self, teacher_id: i64, req: CreateClassRequest) -> Result<Class> {
        let now = chrono::Utc::now().timestamp();

        for (round, len) in [CLASS_CODE_LEN, CLASS_CODE_LEN_EXTENDED].into_iter().enumerate() {
            for _ in 0..CLASS_CODE_MAX_ATTEMPTS {
                let code = generate_class_code(len);

                let model = ActiveModel {
                    teacher_id: Set(teacher_id),
                    name: Set(req.name.clone()),
                    description: Set(req.description.clone()),
                    code: Set(code),
                    schedule: Set(req.schedule.clone()),
                    created_at: Set(now),
                    ..Default::default()
                };

                match model.insert(&self.db).await {
                    Ok(result) => return Ok(result.into_class()),
                    Err(e) => {
                        let err = SmartClassError::database_operation(format!("创建班级失败: {e}"));
                        if err.is_unique_violation() {
                            warn!(
                                "Class code collision (round {}), retrying with a fresh code",
                                round + 1
                            );
                            continue;
                        }
                        return Err(err);
                    }
                }
            }
        }

        Err(SmartClassError::database_operation(
            "创建班级失败: 邀请码重试次数耗尽",
        ))
    }

    /// 通过 ID 获取班级
    pub async fn get_class_by_id_impl(&self, class_id: i64) -> Result<Option<Class>> {
        let result = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| SmartClassError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 通过邀请码获取班级
    pub async fn get_class_by_code_impl(&self, code: &str) -> Result<Option<Class>> {
        let result = Classes::find()
            .filter(Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(|e| SmartClassError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 查指定教师名下的班级，用于作业创建前的归属校验
    pub async fn get_class_owned_by_impl(
        &self,
        class_id: i64,
        teacher_id: i64,
    ) -> Result<Option<Class>> {
        let result = Classes::find_by_id(class_id)
            .filter(Column::TeacherId.eq(teacher_id))
            .one(&self.db)
            .await
            .map_err(|e| SmartClassError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 列出教师创建的班级
    pub async fn list_classes_for_teacher_impl(&self, teacher_id: i64) -> Result<Vec<Class>> {
        let result = Classes::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| SmartClassError::database_operation(format!("查询班级列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_class()).collect())
    }

    /// 列出学生加入的班级
    pub async fn list_classes_for_student_impl(&self, student_id: i64) -> Result<Vec<Class>> {
        let result = Classes::find()
            .join(JoinType::InnerJoin, crate::entity::classes::Relation::ClassStudents.def())
            .filter(class_students::Column::StudentId.eq(student_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| SmartClassError::database_operation(format!("查询班级列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_class()).collect())
    }

    /// 列出全部班级
    pub async fn list_all_classes_impl(&self) -> Result<Vec<Class>> {
        let result = Classes::find()
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| SmartClassError::database_operation(format!("查询班级列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_class()).collect())
    }

    /// 批量按 ID 获取班级
    pub async fn get_classes_by_ids_impl(&self, class_ids: &[i64]) -> Result<Vec<Class>> {
        if class_ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = Classes::find()
            .filter(Column::Id.is_in(class_ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| SmartClassError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_class()).collect())
    }

    /// 学生加入班级
    ///
    /// UNIQUE(class_id, student_id) 索引兜底并发重复加入，
    /// 调用方按 Conflict 处理唯一冲突。
    pub async fn enroll_student_impl(&self, class_id: i64, student_id: i64) -> Result<()> {
        let now = chrono::Utc::now().timestamp();

        let model = class_students::ActiveModel {
            class_id: Set(class_id),
            student_id: Set(student_id),
            joined_at: Set(now),
            ..Default::default()
        };

        model.insert(&self.db).await.map_err(|e| {
            let err = SmartClassError::database_operation(format!("加入班级失败: {e}"));
            if err.is_unique_violation() {
                SmartClassError::conflict("Already joined this class")
            } else {
                err
            }
        })?;

        Ok(())
    }

    /// 列出班级学生名单
    pub async fn list_class_students_impl(&self, class_id: i64) -> Result<Vec<User>> {
        let result = users::Entity::find()
            .join(JoinType::InnerJoin, users::Relation::ClassStudents.def())
            .filter(class_students::Column::ClassId.eq(class_id))
            .order_by_asc(users::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| SmartClassError::database_operation(format!("查询班级学生失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_user()).collect())
    }

    /// 班级总数
    pub async fn count_classes_impl(&self) -> Result<u64> {
        Classes::find()
            .count(&self.db)
            .await
            .map_err(|e| SmartClassError::database_operation(format!("统计班级数失败: {e}")))
    }
}
