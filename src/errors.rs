//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_smartclass_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum SmartClassError {
            $($variant(String),)*
        }

        impl SmartClassError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(SmartClassError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(SmartClassError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(SmartClassError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl SmartClassError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        SmartClassError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_smartclass_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    FileOperation("E006", "File Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    Conflict("E010", "Resource Conflict"),
    DateParse("E011", "Date Parse Error"),
    Authentication("E012", "Authentication Error"),
    Authorization("E013", "Authorization Error"),
}

impl SmartClassError {
    /// 数据库唯一约束冲突（重复提交、重复加入班级等由唯一索引兜底）
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, SmartClassError::DatabaseOperation(msg)
            if msg.contains("UNIQUE constraint failed")
                || msg.contains("duplicate key value")
                || msg.contains("Duplicate entry"))
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for SmartClassError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SmartClassError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for SmartClassError {
    fn from(err: sea_orm::DbErr) -> Self {
        SmartClassError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for SmartClassError {
    fn from(err: std::io::Error) -> Self {
        SmartClassError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for SmartClassError {
    fn from(err: serde_json::Error) -> Self {
        SmartClassError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for SmartClassError {
    fn from(err: chrono::ParseError) -> Self {
        SmartClassError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SmartClassError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SmartClassError::cache_connection("test").code(), "E001");
        assert_eq!(SmartClassError::database_config("test").code(), "E003");
        assert_eq!(SmartClassError::validation("test").code(), "E007");
        assert_eq!(SmartClassError::authentication("test").code(), "E012");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            SmartClassError::not_found("test").error_type(),
            "Resource Not Found"
        );
        assert_eq!(
            SmartClassError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = SmartClassError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_unique_violation() {
        let err = SmartClassError::database_operation(
            "UNIQUE constraint failed: submissions.assignment_id, submissions.student_id",
        );
        assert!(err.is_unique_violation());
        assert!(!SmartClassError::database_operation("timeout").is_unique_violation());
    }

    #[test]
    fn test_format_simple() {
        let err = SmartClassError::validation("Invalid grade");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid grade"));
    }
}
