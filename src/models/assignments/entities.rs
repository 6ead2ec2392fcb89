use serde::{Deserialize, Serialize};

/// 作业状态
///
/// 状态字段是受限的枚举，非法取值在反序列化阶段即被拒绝，
/// 不会以任意字符串形式落库。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Draft,    // 草稿
    Active,   // 进行中
    Archived, // 已归档
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignmentStatus::Draft => write!(f, "draft"),
            AssignmentStatus::Active => write!(f, "active"),
            AssignmentStatus::Archived => write!(f, "archived"),
        }
    }
}

impl std::str::FromStr for AssignmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(AssignmentStatus::Draft),
            "active" => Ok(AssignmentStatus::Active),
            "archived" => Ok(AssignmentStatus::Archived),
            _ => Err(format!("Invalid assignment status: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    // 唯一 ID
    pub id: i64,
    // 关联的班级 ID
    pub class_id: i64,
    // 作业标题
    pub title: String,
    // 作业描述
    pub description: String,
    // 截止时间
    pub due_date: chrono::DateTime<chrono::Utc>,
    // 分值，创建时保证非负
    pub points: i64,
    // 作业状态
    pub status: AssignmentStatus,
    // 创建者（教师）ID
    pub created_by: i64,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for s in ["draft", "active", "archived"] {
            let status: AssignmentStatus = s.parse().unwrap();
            assert_eq!(status.to_string(), s);
        }
    }

    #[test]
    fn test_invalid_status_rejected() {
        assert!("published".parse::<AssignmentStatus>().is_err());
        assert!(serde_json::from_str::<AssignmentStatus>("\"open\"").is_err());
    }
}
