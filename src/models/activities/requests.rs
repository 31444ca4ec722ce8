use serde::Deserialize;
use ts_rs::TS;

pub const DEFAULT_ACTIVITY_DESCRIPTION: &str = "Interactive Activity";

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/activity.ts")]
pub struct CreateActivityRequest {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub class_name: String,
}
