use serde::{Deserialize, Serialize};

use crate::models::submissions::entities::Submission;

/// 教师视角的提交列表项，附带学生身份信息
///
/// 学生账号被删除时退化为占位字符串，不让整个请求失败。
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmissionWithStudent {
    #[serde(flatten)]
    pub submission: Submission,
    pub student_name: String,
    pub student_email: String,
}
