pub mod activities;
pub mod assignments;
pub mod attendance;
pub mod auth;
pub mod common;
pub mod curricula;
pub mod dashboard;
pub mod feed;
pub mod quizzes;
pub mod tasks;
pub mod users;

pub use common::response::ApiResponse;

/// 业务错误码，随 ApiResponse 一起返回
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    InternalServerError = 1005,
    Conflict = 1009,
    UpstreamServiceError = 1502,

    // 认证
    AuthFailed = 2000,
    RegisterFailed = 2001,

    // 用户
    UserNotFound = 2100,
    UserEmailInvalid = 2101,
    UserEmailAlreadyExists = 2102,
    UserPasswordInvalid = 2103,
    UserNameInvalid = 2104,
    UserUpdateFailed = 2105,

    // 测验
    QuizNotFound = 3000,
    QuizInvalid = 3001,
    QuizAlreadySubmitted = 3002,
    QuizGenerationFailed = 3003,

    // 课程
    CurriculumNotFound = 4000,
    CurriculumGenerationFailed = 4001,

    // 待办
    TaskNotFound = 5000,

    // 考勤
    AttendanceInvalid = 6000,
    AttendanceSaveFailed = 6001,
}
