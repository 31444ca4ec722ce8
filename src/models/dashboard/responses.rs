use serde::Serialize;
use ts_rs::TS;

use crate::models::feed::entities::FeedItem;

// 按科目统计的进度
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct SubjectProgress {
    pub subject: String,
    pub completed: i64,
    pub avg_score: i64,
}

// 最近成绩
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct RecentGrade {
    pub id: i64,
    pub title: String,
    pub subject: String,
    pub score: i32,
    pub total_points: i32,
    pub percentage: i64,
    pub date: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct StudentDashboardResponse {
    pub student_name: String,
    pub active_assignments: i64,
    pub completed_assignments: i64,
    pub avg_score: i64,
    pub subject_progress: Vec<SubjectProgress>,
    pub pending_items: Vec<FeedItem>,
    pub recent_grades: Vec<RecentGrade>,
}

// 班级概况
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct ClassOverview {
    pub class_name: String,
    pub student_count: i64,
    pub subject: String,
    pub progress: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub enum RecentActivityKind {
    Submission,
    QuizCreated,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct RecentActivity {
    pub kind: RecentActivityKind,
    pub description: String,
    pub at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct TeacherDashboardResponse {
    pub total_classes: i64,
    pub total_students: i64,
    pub active_quizzes: i64,
    pub avg_attendance: i64,
    pub classes_overview: Vec<ClassOverview>,
    pub recent_activity: Vec<RecentActivity>,
}
