pub mod activities;
pub mod assignments;
pub mod attendance;
pub mod auth;
pub mod curricula;
pub mod dashboard;
pub mod feed;
pub mod quizzes;
pub mod tasks;

pub use activities::ActivityService;
pub use assignments::AssignmentService;
pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use curricula::CurriculumService;
pub use dashboard::DashboardService;
pub use feed::FeedService;
pub use quizzes::QuizService;
pub use tasks::TaskService;

use actix_web::{HttpRequest, HttpResponse};

use crate::middlewares::RequireJWT;
use crate::models::auth::entities::SessionUser;
use crate::models::{ApiResponse, ErrorCode};

/// 取出 RequireJWT 写入的会话用户，缺失时给出 401 响应
pub(crate) fn current_user(request: &HttpRequest) -> Result<SessionUser, HttpResponse> {
    RequireJWT::extract_session(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized: missing user id",
        ))
    })
}
