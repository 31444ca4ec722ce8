use serde::Deserialize;
use ts_rs::TS;

use super::entities::{AnswerMap, Difficulty, Question, QuizType};

// 生成测验请求（只生成，不入库）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct GenerateQuizRequest {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub topics: Vec<String>,
    pub difficulty: Difficulty,
    pub question_count: i64,
    #[serde(default)]
    pub quiz_type: QuizType,
}

// 创建测验请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct CreateQuizRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub questions: Vec<Question>,
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
}

// 提交测验请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct SubmitQuizRequest {
    #[serde(default)]
    pub answers: AnswerMap,
}
