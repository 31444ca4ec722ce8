use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 给整个班级布置作业
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct CreateAssignmentRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subject: String,
    pub description: Option<String>,
    #[serde(default)]
    pub class_name: String,
    pub due_date: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct CreateAssignmentResponse {
    pub created: i64,
}
