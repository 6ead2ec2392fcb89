pub mod assignments;
pub mod classes;
pub mod common;
pub mod dashboard;
pub mod submissions;
pub mod users;

pub use common::response::ApiResponse;

/// 业务错误码，和 HTTP 状态码一起返回给客户端
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    InternalServerError = 1005,
    ValidationError = 1006,

    // 用户
    UserAlreadyExists = 2001,
    UserNotFound = 2002,
    InvalidCredentials = 2003,

    // 班级
    ClassNotFound = 3001,
    ClassCodeInvalid = 3002,
    ClassAlreadyJoined = 3003,
    ClassCreationFailed = 3004,
    ClassPermissionDenied = 3005,

    // 作业与提交
    AssignmentNotFound = 4001,
    AssignmentCreationFailed = 4002,
    AlreadySubmitted = 4003,
    SubmissionNotFound = 4004,
    InvalidGrade = 4005,
    InvalidStatus = 4006,
    SubmissionFailed = 4007,

    // 文件
    FileNotFound = 5001,
    FileUploadFailed = 5002,
    FileSizeExceeded = 5003,
    FileCountExceeded = 5004,
}

/// 程序启动时间，用于统计预处理耗时
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
