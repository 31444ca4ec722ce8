use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 互动活动（外部链接，不可提交）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/activity.ts")]
pub struct Activity {
    pub id: i64,
    pub teacher_id: i64,
    pub class_name: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
