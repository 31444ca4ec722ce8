pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::tasks::requests::{CreateTaskRequest, UpdateTaskRequest};
use crate::storage::Storage;

pub struct TaskService {
    storage: Option<Arc<dyn Storage>>,
}

impl TaskService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn list_tasks(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_tasks(self, request).await
    }

    pub async fn create_task(
        &self,
        request: &HttpRequest,
        task_data: CreateTaskRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_task(self, request, task_data).await
    }

    pub async fn update_task(
        &self,
        request: &HttpRequest,
        task_id: i64,
        update_data: UpdateTaskRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_task(self, request, task_id, update_data).await
    }

    pub async fn delete_task(&self, request: &HttpRequest, task_id: i64) -> ActixResult<HttpResponse> {
        delete::delete_task(self, request, task_id).await
    }
}
