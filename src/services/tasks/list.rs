use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TaskService;
use crate::errors::error_response;
use crate::models::ApiResponse;
use crate::models::tasks::responses::TaskListResponse;
use crate::services::current_user;

pub async fn list_tasks(service: &TaskService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let session = match current_user(request) {
        Ok(session) => session,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);
    match storage.list_tasks_by_user(session.id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            TaskListResponse { items },
            "Tasks retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
