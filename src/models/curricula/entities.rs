use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 课程大纲
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/curriculum.ts")]
pub struct Curriculum {
    pub id: i64,
    pub teacher_id: i64,
    pub title: String,
    pub subject: String,
    pub grade: String,
    pub duration: Option<String>,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lesson_plan: Option<LessonPlan>,
}

// 教案，与课程大纲一对一
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/curriculum.ts")]
pub struct LessonPlan {
    pub id: i64,
    pub curriculum_id: i64,
    pub teacher_id: i64,
    pub title: String,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
