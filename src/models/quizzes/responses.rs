use serde::Serialize;
use ts_rs::TS;

use super::entities::{AnswerMap, Question, Quiz};

// 生成结果（未保存）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct GeneratedQuizResponse {
    pub questions: Vec<Question>,
}

// 教师测验列表项，附带提交数
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuizSummary {
    #[serde(flatten)]
    #[ts(flatten)]
    pub quiz: Quiz,
    pub submission_count: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuizListResponse {
    pub items: Vec<QuizSummary>,
}

// 带学生信息的提交记录
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuizResultItem {
    pub submission_id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub student_email: String,
    pub answers: AnswerMap,
    pub score: i32,
    pub total_points: i32,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuizResultsResponse {
    pub quiz_id: i64,
    pub title: String,
    pub items: Vec<QuizResultItem>,
}
