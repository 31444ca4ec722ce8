use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TaskService;
use crate::errors::error_response;
use crate::models::tasks::requests::CreateTaskRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;

pub async fn create_task(
    service: &TaskService,
    request: &HttpRequest,
    mut task_data: CreateTaskRequest,
) -> ActixResult<HttpResponse> {
    let session = match current_user(request) {
        Ok(session) => session,
        Err(resp) => return Ok(resp),
    };

    task_data.text = task_data.text.trim().to_string();
    if task_data.text.is_empty() {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, "Task text is required")));
    }

    let storage = service.get_storage(request);
    match storage.create_task(session.id, task_data).await {
        Ok(task) => {
            info!("Task {} created by user {}", task.id, session.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(task, "Task created successfully")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
