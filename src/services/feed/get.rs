use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::debug;

use super::FeedService;
use super::build::{FeedSources, build_feed};
use crate::errors::error_response;
use crate::models::feed::responses::LearnerFeedResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;

pub async fn get_feed(service: &FeedService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let session = match current_user(request) {
        Ok(session) => session,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);

    let student = match storage.get_user_by_id(session.id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(HttpResponse::NotFound()
                .json(ApiResponse::error_empty(ErrorCode::UserNotFound, "Student not found")));
        }
        Err(e) => return Ok(error_response(&e)),
    };

    let sources = match FeedSources::load(&storage, &student).await {
        Ok(sources) => sources,
        Err(e) => return Ok(error_response(&e)),
    };

    let items = build_feed(sources);
    debug!("Built feed with {} items for student {}", items.len(), student.id);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        LearnerFeedResponse { items },
        "Feed retrieved successfully",
    )))
}
