use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Curriculum;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/curriculum.ts")]
pub struct GenerateCurriculumRequest {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub topic: String,
    pub duration: Option<String>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/curriculum.ts")]
pub struct CurriculumListResponse {
    pub items: Vec<Curriculum>,
}
