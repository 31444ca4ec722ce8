//! 外部生成服务网关
//!
//! 测验、课程大纲、教案都交给外部 AI 服务生成，这里只负责组装请求、
//! 校验响应并把题目规整成内部格式。单次调用，不重试。

mod client;
pub mod normalize;

pub use client::HttpGenerationClient;

use crate::errors::Result;
use crate::models::quizzes::{entities::Question, requests::GenerateQuizRequest};

#[async_trait::async_trait]
pub trait GenerationService: Send + Sync {
    /// 生成测验题目（已规整，未入库）
    async fn generate_quiz(&self, req: &GenerateQuizRequest) -> Result<Vec<Question>>;

    /// 生成课程大纲正文
    async fn generate_curriculum(
        &self,
        target_class: i64,
        subject: &str,
        topics: &[String],
    ) -> Result<String>;

    /// 生成教案正文
    async fn generate_lesson_plan(&self, target_class: i64, subject: &str) -> Result<String>;
}
