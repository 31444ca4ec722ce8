use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::QuizService;
use crate::errors::error_response;
use crate::models::ApiResponse;
use crate::models::quizzes::responses::QuizListResponse;
use crate::services::current_user;

pub async fn list_quizzes(
    service: &QuizService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let session = match current_user(request) {
        Ok(session) => session,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);
    match storage.list_quizzes_by_teacher(session.id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            QuizListResponse { items },
            "Quizzes retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
