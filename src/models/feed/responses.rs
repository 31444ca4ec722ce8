use serde::Serialize;
use ts_rs::TS;

use super::entities::FeedItem;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/feed.ts")]
pub struct LearnerFeedResponse {
    pub items: Vec<FeedItem>,
}
