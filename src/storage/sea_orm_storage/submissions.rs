//! 提交与附件存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::entity::{attachments, users};
use crate::errors::{Result, SmartClassError};
use crate::models::submissions::{
    entities::{Attachment, Submission, SubmissionStatus},
    responses::SubmissionWithStudent,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建提交
    ///
    /// 提交行和附件行在同一事务内写入。UNIQUE(assignment_id, student_id)
    /// 索引兜底并发重复提交，调用方按 Conflict 处理唯一冲突。
    pub async fn create_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
        content: String,
        attachments: Vec<Attachment>,
    ) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();

        let txn = self.db.begin().await.map_err(|e| {
            SmartClassError::database_operation(format!("开启事务失败: {e}"))
        })?;

        let model = ActiveModel {
            assignment_id: Set(assignment_id),
            student_id: Set(student_id),
            content: Set(content),
            status: Set(SubmissionStatus::Submitted.to_string()),
            grade: Set(None),
            feedback: Set(None),
            submitted_at: Set(now),
            graded_at: Set(None),
            ..Default::default()
        };

        let inserted = model.insert(&txn).await.map_err(|e| {
            let err = SmartClassError::database_operation(format!("创建提交失败: {e}"));
            if err.is_unique_violation() {
                SmartClassError::conflict("Already submitted this assignment")
            } else {
                err
            }
        })?;

        for attachment in &attachments {
            let att_model = attachments::ActiveModel {
                submission_id: Set(inserted.id),
                filename: Set(attachment.filename.clone()),
                original_name: Set(attachment.original_name.clone()),
                path: Set(attachment.path.clone()),
                size: Set(attachment.size),
                ..Default::default()
            };
            att_model.insert(&txn).await.map_err(|e| {
                SmartClassError::database_operation(format!("写入附件元数据失败: {e}"))
            })?;
        }

        txn.commit().await.map_err(|e| {
            SmartClassError::database_operation(format!("提交事务失败: {e}"))
        })?;

        Ok(inserted.into_submission(attachments))
    }

    /// 获取某学生对某作业的提交
    pub async fn get_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| SmartClassError::database_operation(format!("查询提交失败: {e}")))?;

        match result {
            Some(model) => {
                let attachments = self.load_attachments(model.id).await?;
                Ok(Some(model.into_submission(attachments)))
            }
            None => Ok(None),
        }
    }

    /// 列出作业的全部提交，附带学生姓名与邮箱
    ///
    /// 学生账号已被删除时退化为占位字符串，不让整个请求失败。
    pub async fn list_submissions_with_students_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<SubmissionWithStudent>> {
        let rows = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .find_also_related(users::Entity)
            .order_by_desc(Column::SubmittedAt)
            .all(&self.db)
            .await
            .map_err(|e| SmartClassError::database_operation(format!("查询提交列表失败: {e}")))?;

        let submission_ids: Vec<i64> = rows.iter().map(|(s, _)| s.id).collect();
        let mut attachment_map = self.load_attachments_grouped(&submission_ids).await?;

        Ok(rows
            .into_iter()
            .map(|(submission, student)| {
                let attachments = attachment_map.remove(&submission.id).unwrap_or_default();
                let (student_name, student_email) = match student {
                    Some(user) => (user.name, user.email),
                    None => ("Unknown Student".to_string(), "Unknown Email".to_string()),
                };
                SubmissionWithStudent {
                    submission: submission.into_submission(attachments),
                    student_name,
                    student_email,
                }
            })
            .collect())
    }

    /// 评分
    ///
    /// 不存在的提交返回 None。重复评分覆盖分数与评语，
    /// 状态始终落在 graded，不会退回 submitted。
    pub async fn grade_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
        grade: f64,
        feedback: Option<String>,
    ) -> Result<Option<Submission>> {
        let existing = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| SmartClassError::database_operation(format!("查询提交失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            id: Set(existing.id),
            grade: Set(Some(grade)),
            feedback: Set(feedback),
            status: Set(SubmissionStatus::Graded.to_string()),
            graded_at: Set(Some(now)),
            ..Default::default()
        };

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| SmartClassError::database_operation(format!("评分失败: {e}")))?;

        let attachments = self.load_attachments(updated.id).await?;
        Ok(Some(updated.into_submission(attachments)))
    }

    /// 按 (作业, 学生, 存储文件名) 三元组查附件
    ///
    /// 文件名必须出现在该学生对该作业的提交的附件清单里，
    /// 防止拿着别人的文件名越权下载。
    pub async fn get_attachment_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
        filename: &str,
    ) -> Result<Option<Attachment>> {
        let submission = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| SmartClassError::database_operation(format!("查询提交失败: {e}")))?;

        let Some(submission) = submission else {
            return Ok(None);
        };

        let result = attachments::Entity::find()
            .filter(attachments::Column::SubmissionId.eq(submission.id))
            .filter(attachments::Column::Filename.eq(filename))
            .one(&self.db)
            .await
            .map_err(|e| SmartClassError::database_operation(format!("查询附件失败: {e}")))?;

        Ok(result.map(|m| m.into_attachment()))
    }

    /// 加载单个提交的附件
    async fn load_attachments(&self, submission_id: i64) -> Result<Vec<Attachment>> {
        let result = attachments::Entity::find()
            .filter(attachments::Column::SubmissionId.eq(submission_id))
            .all(&self.db)
            .await
            .map_err(|e| SmartClassError::database_operation(format!("查询附件失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_attachment()).collect())
    }

    /// 批量加载附件并按提交分组
    async fn load_attachments_grouped(
        &self,
        submission_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<Attachment>>> {
        if submission_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let result = attachments::Entity::find()
            .filter(attachments::Column::SubmissionId.is_in(submission_ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| SmartClassError::database_operation(format!("查询附件失败: {e}")))?;

        let mut map: HashMap<i64, Vec<Attachment>> = HashMap::new();
        for model in result {
            map.entry(model.submission_id)
                .or_default()
                .push(model.into_attachment());
        }
        Ok(map)
    }
}
