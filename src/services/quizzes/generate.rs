use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::QuizService;
use crate::models::quizzes::{requests::GenerateQuizRequest, responses::GeneratedQuizResponse};
use crate::models::{ApiResponse, ErrorCode};

pub const MAX_QUESTION_COUNT: i64 = 20;

pub async fn generate_quiz(
    service: &QuizService,
    request: &HttpRequest,
    generate_request: GenerateQuizRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_generate_request(&generate_request) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::QuizInvalid, msg)));
    }

    let generator = service.get_generator(request);
    match generator.generate_quiz(&generate_request).await {
        // 没有选项的题目在归一化时被丢弃，全部丢弃时视为生成失败
        Ok(questions) if questions.is_empty() => {
            error!(
                "Generation for subject {} ({}) produced no multiple-choice questions",
                generate_request.subject.trim(),
                generate_request.quiz_type
            );
            Ok(HttpResponse::BadGateway().json(ApiResponse::error_empty(
                ErrorCode::QuizGenerationFailed,
                "Generation returned no usable multiple-choice questions",
            )))
        }
        Ok(questions) => {
            info!(
                "Generated {} questions for subject {}",
                questions.len(),
                generate_request.subject.trim()
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                GeneratedQuizResponse { questions },
                "Quiz generated successfully",
            )))
        }
        Err(e) => {
            error!("Quiz generation failed: {}", e);
            Ok(HttpResponse::build(e.status_code())
                .json(ApiResponse::error_empty(ErrorCode::QuizGenerationFailed, e.message())))
        }
    }
}

/// 科目非空，至少一个非空主题，题量 1..=20
pub fn validate_generate_request(req: &GenerateQuizRequest) -> Result<(), String> {
    if req.subject.trim().is_empty() {
        return Err("Subject is required".to_string());
    }
    if !req.topics.iter().any(|t| !t.trim().is_empty()) {
        return Err("At least one topic is required".to_string());
    }
    if !(1..=MAX_QUESTION_COUNT).contains(&req.question_count) {
        return Err(format!(
            "Question count must be between 1 and {MAX_QUESTION_COUNT}"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quizzes::entities::{Difficulty, QuizType};

    fn request() -> GenerateQuizRequest {
        GenerateQuizRequest {
            subject: "Math".into(),
            topics: vec!["fractions".into()],
            difficulty: Difficulty::Easy,
            question_count: 5,
            quiz_type: QuizType::Objective,
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(validate_generate_request(&request()).is_ok());
    }

    #[test]
    fn test_blank_subject_or_topics() {
        let mut req = request();
        req.subject = "   ".into();
        assert!(validate_generate_request(&req).is_err());

        let mut req = request();
        req.topics = vec![" ".into(), "".into()];
        assert!(validate_generate_request(&req).is_err());
    }

    #[test]
    fn test_question_count_bounds() {
        for (count, ok) in [(0, false), (1, true), (20, true), (21, false)] {
            let mut req = request();
            req.question_count = count;
            assert_eq!(validate_generate_request(&req).is_ok(), ok, "count {count}");
        }
    }
}
