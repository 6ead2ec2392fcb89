//! 作业存储操作

use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::entity::{attachments, submissions};
use crate::errors::{Result, SmartClassError};
use crate::models::assignments::{
    entities::{Assignment, AssignmentStatus},
    requests::CreateAssignmentRequest,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set,
};

/// points 缺省值
const DEFAULT_POINTS: i64 = 100;

impl SeaOrmStorage {
    /// 创建作业
    ///
    /// points 缺省取 100，status 缺省取 draft。班级归属校验在服务层完成。
    pub async fn create_assignment_impl(
        &self,
        created_by: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();
        let points = req.points.unwrap_or(DEFAULT_POINTS);
        if points < 0 {
            return Err(SmartClassError::validation("points must be non-negative"));
        }
        let status = req.status.unwrap_or(AssignmentStatus::Draft);

        let model = ActiveModel {
            class_id: Set(req.class_id),
            created_by: Set(created_by),
            title: Set(req.title),
            description: Set(req.description),
            due_date: Set(req.due_date.timestamp()),
            points: Set(points),
            status: Set(status.to_string()),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SmartClassError::database_operation(format!("创建作业失败: {e}")))?;

        Ok(result.into_assignment())
    }

    /// 通过 ID 获取作业
    pub async fn get_assignment_by_id_impl(&self, id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SmartClassError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 列出班级下全部作业
    pub async fn list_assignments_by_class_impl(&self, class_id: i64) -> Result<Vec<Assignment>> {
        let result = Assignments::find()
            .filter(Column::ClassId.eq(class_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| SmartClassError::database_operation(format!("查询作业列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_assignment()).collect())
    }

    /// 列出学生已提交过的作业
    pub async fn list_assignments_with_submission_by_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<Assignment>> {
        let result = Assignments::find()
            .join(
                JoinType::InnerJoin,
                crate::entity::assignments::Relation::Submissions.def(),
            )
            .filter(submissions::Column::StudentId.eq(student_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| SmartClassError::database_operation(format!("查询作业列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_assignment()).collect())
    }

    /// 更新作业状态
    pub async fn update_assignment_status_impl(
        &self,
        id: i64,
        status: AssignmentStatus,
    ) -> Result<Option<Assignment>> {
        let existing = self.get_assignment_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            status: Set(status.to_string()),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| SmartClassError::database_operation(format!("更新作业状态失败: {e}")))?;

        self.get_assignment_by_id_impl(id).await
    }

    /// 删除作业
    ///
    /// 提交与附件行由外键级联删除；附件的存储路径在删除前收集，
    /// 返回给调用方做尽力而为的文件清理。
    pub async fn delete_assignment_impl(&self, id: i64) -> Result<Option<Vec<String>>> {
        let existing = self.get_assignment_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let paths: Vec<String> = attachments::Entity::find()
            .join(
                JoinType::InnerJoin,
                attachments::Relation::Submission.def(),
            )
            .filter(submissions::Column::AssignmentId.eq(id))
            .all(&self.db)
            .await
            .map_err(|e| SmartClassError::database_operation(format!("查询附件失败: {e}")))?
            .into_iter()
            .map(|m| m.path)
            .collect();

        Assignments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SmartClassError::database_operation(format!("删除作业失败: {e}")))?;

        Ok(Some(paths))
    }

    /// 作业总数
    pub async fn count_assignments_impl(&self) -> Result<u64> {
        Assignments::find()
            .count(&self.db)
            .await
            .map_err(|e| SmartClassError::database_operation(format!("统计作业数失败: {e}")))
    }

    /// 截止时间晚于给定时间戳的作业数
    pub async fn count_assignments_due_after_impl(&self, after: i64) -> Result<u64> {
        Assignments::find()
            .filter(Column::DueDate.gt(after))
            .count(&self.db)
            .await
            .map_err(|e| SmartClassError::database_operation(format!("统计作业数失败: {e}")))
    }
}
