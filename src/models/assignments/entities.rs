use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 作业状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub enum AssignmentStatus {
    Pending,
    Submitted,
    Graded,
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignmentStatus::Pending => write!(f, "PENDING"),
            AssignmentStatus::Submitted => write!(f, "SUBMITTED"),
            AssignmentStatus::Graded => write!(f, "GRADED"),
        }
    }
}

impl std::str::FromStr for AssignmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(AssignmentStatus::Pending),
            "SUBMITTED" => Ok(AssignmentStatus::Submitted),
            "GRADED" => Ok(AssignmentStatus::Graded),
            _ => Err(format!("Invalid assignment status: {s}")),
        }
    }
}

// 布置给单个学生的作业
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Assignment {
    pub id: i64,
    pub student_id: i64,
    pub title: String,
    pub subject: String,
    pub description: Option<String>,
    pub due_date: chrono::DateTime<chrono::Utc>,
    pub status: AssignmentStatus,
    pub score: Option<i32>,
    pub total_points: Option<i32>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
