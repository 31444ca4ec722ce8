pub mod create;
pub mod generate;
pub mod grading;
pub mod list;
pub mod results;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::ai::GenerationService;
use crate::models::quizzes::requests::{CreateQuizRequest, GenerateQuizRequest, SubmitQuizRequest};
use crate::storage::Storage;

pub struct QuizService {
    storage: Option<Arc<dyn Storage>>,
    generator: Option<Arc<dyn GenerationService>>,
}

impl QuizService {
    pub fn new_lazy() -> Self {
        Self {
            storage: None,
            generator: None,
        }
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

    pub(crate) fn get_generator(&self, request: &HttpRequest) -> Arc<dyn GenerationService> {
        if let Some(generator) = &self.generator {
            generator.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn GenerationService>>>()
                .expect("Generation service not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 生成测验（不入库）
    pub async fn generate_quiz(
        &self,
        request: &HttpRequest,
        generate_request: GenerateQuizRequest,
    ) -> ActixResult<HttpResponse> {
        generate::generate_quiz(self, request, generate_request).await
    }

    // 创建测验
    pub async fn create_quiz(
        &self,
        request: &HttpRequest,
        quiz_data: CreateQuizRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_quiz(self, request, quiz_data).await
    }

    // 教师的测验列表
    pub async fn list_quizzes(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_quizzes(self, request).await
    }

    // 测验成绩
    pub async fn get_results(
        &self,
        request: &HttpRequest,
        quiz_id: i64,
    ) -> ActixResult<HttpResponse> {
        results::get_results(self, request, quiz_id).await
    }

    // 学生提交
    pub async fn submit_quiz(
        &self,
        request: &HttpRequest,
        quiz_id: i64,
        submission: SubmitQuizRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_quiz(self, request, quiz_id, submission).await
    }
}
