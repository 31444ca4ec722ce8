use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::tasks::requests::{CreateTaskRequest, UpdateTaskRequest};
use crate::services::TaskService;

static TASK_SERVICE: Lazy<TaskService> = Lazy::new(TaskService::new_lazy);

pub async fn list_tasks(req: HttpRequest) -> ActixResult<HttpResponse> {
    TASK_SERVICE.list_tasks(&req).await
}

pub async fn create_task(
    req: HttpRequest,
    task_data: web::Json<CreateTaskRequest>,
) -> ActixResult<HttpResponse> {
    TASK_SERVICE.create_task(&req, task_data.into_inner()).await
}

pub async fn update_task(
    req: HttpRequest,
    path: web::Path<i64>,
    update_data: web::Json<UpdateTaskRequest>,
) -> ActixResult<HttpResponse> {
    TASK_SERVICE
        .update_task(&req, path.into_inner(), update_data.into_inner())
        .await
}

pub async fn delete_task(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    TASK_SERVICE.delete_task(&req, path.into_inner()).await
}

// 配置路由，学生和教师都可使用
pub fn configure_tasks_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/tasks")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_tasks))
                    .route(web::post().to(create_task)),
            )
            .service(
                web::resource("/{task_id}")
                    .route(web::put().to(update_task))
                    .route(web::delete().to(delete_task)),
            ),
    );
}
