use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, error};

use super::GenerationService;
use super::normalize::parse_quiz_content;
use crate::config::AppConfig;
use crate::errors::{LearnHubError, Result};
use crate::models::quizzes::{entities::Question, requests::GenerateQuizRequest};

/// 上游错误正文最多保留的字符数
const MAX_UPSTREAM_DETAIL: usize = 500;

#[derive(Debug, Serialize)]
struct QuizGenerationPayload<'a> {
    quiz_type: String,
    total_questions: i64,
    subject: &'a str,
    difficulty: String,
    topics: &'a [String],
}

#[derive(Debug, Deserialize)]
struct QuizGenerationReply {
    /// 通常是一段包含 JSON 的文本，也兼容直接返回对象
    quiz_content: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct CurriculumPayload<'a> {
    target_class: i64,
    subject: &'a str,
    topics: &'a [String],
}

#[derive(Debug, Deserialize)]
struct CurriculumReply {
    curriculum: String,
}

#[derive(Debug, Serialize)]
struct LessonPlanPayload<'a> {
    target_class: i64,
    subject: &'a str,
}

#[derive(Debug, Deserialize)]
struct LessonPlanReply {
    lesson_plan: String,
}

/// 基于 reqwest 的生成服务客户端
#[derive(Clone)]
pub struct HttpGenerationClient {
    http: Client,
    quiz_url: String,
    curriculum_url: String,
    lesson_plan_url: String,
}

impl HttpGenerationClient {
    /// 按全局配置创建客户端
    pub fn from_config() -> Result<Self> {
        let config = AppConfig::get();
        Self::new(
            config.ai_endpoint(&config.ai.quiz_path),
            config.ai_endpoint(&config.ai.curriculum_path),
            config.ai_endpoint(&config.ai.lesson_plan_path),
            Duration::from_secs(config.ai.timeout_secs),
        )
    }

    pub fn new(
        quiz_url: String,
        curriculum_url: String,
        lesson_plan_url: String,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LearnHubError::upstream(format!("创建 HTTP 客户端失败: {e}")))?;

        Ok(Self {
            http,
            quiz_url,
            curriculum_url,
            lesson_plan_url,
        })
    }

    /// POST JSON 并解析响应；不可达、超时、非 2xx 都算 generation failed
    async fn post_json<P, R>(&self, url: &str, payload: &P) -> Result<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        debug!("调用生成服务: {}", url);

        let response = self
            .http
            .post(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                error!("生成服务不可达 {}: {}", url, e);
                LearnHubError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail: String = body.chars().take(MAX_UPSTREAM_DETAIL).collect();
            error!("生成服务返回 {} {}: {}", status, url, detail);
            return Err(LearnHubError::upstream(format!(
                "generation failed: upstream returned {status}: {detail}"
            )));
        }

        response.json::<R>().await.map_err(|e| {
            error!("生成服务响应格式错误 {}: {}", url, e);
            LearnHubError::upstream(format!("malformed AI response: {e}"))
        })
    }
}

#[async_trait::async_trait]
impl GenerationService for HttpGenerationClient {
    async fn generate_quiz(&self, req: &GenerateQuizRequest) -> Result<Vec<Question>> {
        let payload = QuizGenerationPayload {
            quiz_type: req.quiz_type.to_string(),
            total_questions: req.question_count,
            subject: req.subject.trim(),
            difficulty: req.difficulty.to_string(),
            topics: &req.topics,
        };

        let reply: QuizGenerationReply = self.post_json(&self.quiz_url, &payload).await?;
        match reply.quiz_content {
            serde_json::Value::String(text) => parse_quiz_content(&text),
            other => parse_quiz_content(&other.to_string()),
        }
    }

    async fn generate_curriculum(
        &self,
        target_class: i64,
        subject: &str,
        topics: &[String],
    ) -> Result<String> {
        let payload = CurriculumPayload {
            target_class,
            subject,
            topics,
        };
        let reply: CurriculumReply = self.post_json(&self.curriculum_url, &payload).await?;
        Ok(reply.curriculum)
    }

    async fn generate_lesson_plan(&self, target_class: i64, subject: &str) -> Result<String> {
        let payload = LessonPlanPayload {
            target_class,
            subject,
        };
        let reply: LessonPlanReply = self.post_json(&self.lesson_plan_url, &payload).await?;
        Ok(reply.lesson_plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quizzes::entities::{Difficulty, QuizType};

    #[test]
    fn test_quiz_payload_shape() {
        let topics = vec!["fractions".to_string()];
        let payload = QuizGenerationPayload {
            quiz_type: QuizType::Objective.to_string(),
            total_questions: 5,
            subject: "Math",
            difficulty: Difficulty::Easy.to_string(),
            topics: &topics,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "quiz_type": "objective",
                "total_questions": 5,
                "subject": "Math",
                "difficulty": "easy",
                "topics": ["fractions"],
            })
        );
    }

    #[actix_web::test]
    async fn test_unreachable_upstream_is_upstream_error() {
        // 端口 9 (discard) 通常不监听
        let client = HttpGenerationClient::new(
            "http://127.0.0.1:9/quiz".into(),
            "http://127.0.0.1:9/curriculum".into(),
            "http://127.0.0.1:9/lesson".into(),
            Duration::from_secs(2),
        )
        .unwrap();

        let err = client
            .generate_lesson_plan(7, "Science")
            .await
            .unwrap_err();
        assert!(matches!(err, LearnHubError::Upstream(_)));
    }
}
