pub mod activities;

pub mod assignments;

pub mod attendance;

pub mod auth;

pub mod curricula;

pub mod quizzes;

pub mod student;

pub mod tasks;

pub mod teacher;

pub use activities::configure_activities_routes;
pub use assignments::configure_assignments_routes;
pub use attendance::configure_attendance_routes;
pub use auth::configure_auth_routes;
pub use curricula::configure_curricula_routes;
pub use quizzes::configure_quizzes_routes;
pub use student::configure_student_routes;
pub use tasks::configure_tasks_routes;
pub use teacher::configure_teacher_routes;

use actix_web::web;

/// 注册全部 API 路由
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_auth_routes)
        .configure(configure_quizzes_routes)
        .configure(configure_student_routes)
        .configure(configure_teacher_routes)
        .configure(configure_attendance_routes)
        .configure(configure_tasks_routes)
        .configure(configure_activities_routes)
        .configure(configure_assignments_routes)
        .configure(configure_curricula_routes);
}
