use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TaskService;
use crate::errors::error_response;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;

pub async fn delete_task(
    service: &TaskService,
    request: &HttpRequest,
    task_id: i64,
) -> ActixResult<HttpResponse> {
    let session = match current_user(request) {
        Ok(session) => session,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);
    match storage.delete_task(task_id, session.id).await {
        Ok(true) => {
            info!("Task {} deleted by user {}", task_id, session.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Task deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::TaskNotFound, "Task not found"))),
        Err(e) => Ok(error_response(&e)),
    }
}
