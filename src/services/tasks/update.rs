use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TaskService;
use crate::errors::error_response;
use crate::models::tasks::requests::UpdateTaskRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;

pub async fn update_task(
    service: &TaskService,
    request: &HttpRequest,
    task_id: i64,
    update_data: UpdateTaskRequest,
) -> ActixResult<HttpResponse> {
    let session = match current_user(request) {
        Ok(session) => session,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);
    match storage
        .update_task_completion(task_id, session.id, update_data.completed)
        .await
    {
        Ok(Some(task)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(task, "Task updated successfully")))
        }
        // 不存在或不属于当前用户
        Ok(None) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::TaskNotFound, "Task not found"))),
        Err(e) => Ok(error_response(&e)),
    }
}
