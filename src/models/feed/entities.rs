use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::quizzes::entities::{AnswerMap, Question};

// 学习流条目类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "../frontend/src/types/generated/feed.ts")]
pub enum FeedItemType {
    Assignment,
    Quiz,
    Activity,
}

// 条目状态。作业沿用自身状态，测验只有 PENDING / COMPLETED
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "../frontend/src/types/generated/feed.ts")]
pub enum FeedItemStatus {
    Pending,
    Submitted,
    Graded,
    Completed,
}

/// 学习流中的一条
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/feed.ts")]
pub struct FeedItem {
    pub id: i64,
    pub item_type: FeedItemType,
    pub title: String,
    pub subject: String,
    pub description: Option<String>,
    pub due_date: chrono::DateTime<chrono::Utc>,
    pub status: FeedItemStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_points: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<Question>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_answers: Option<AnswerMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl FeedItem {
    pub fn is_pending(&self) -> bool {
        self.status == FeedItemStatus::Pending
    }
}
