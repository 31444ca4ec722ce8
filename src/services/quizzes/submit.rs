use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::QuizService;
use super::grading::grade;
use crate::errors::{LearnHubError, error_response};
use crate::models::quizzes::requests::SubmitQuizRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;

const ALREADY_SUBMITTED: &str = "Quiz already submitted";

pub async fn submit_quiz(
    service: &QuizService,
    request: &HttpRequest,
    quiz_id: i64,
    submission: SubmitQuizRequest,
) -> ActixResult<HttpResponse> {
    let session = match current_user(request) {
        Ok(session) => session,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);

    // 1. 加载测验
    let quiz = match storage.get_quiz_by_id(quiz_id).await {
        Ok(Some(quiz)) => quiz,
        Ok(None) => {
            return Ok(HttpResponse::NotFound()
                .json(ApiResponse::error_empty(ErrorCode::QuizNotFound, "Quiz not found")));
        }
        Err(e) => return Ok(error_response(&e)),
    };

    // 2. 重复提交预检，并发情况由唯一索引兜底
    match storage.get_quiz_submission(quiz.id, session.id).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::QuizAlreadySubmitted,
                ALREADY_SUBMITTED,
            )));
        }
        Ok(None) => {}
        Err(e) => return Ok(error_response(&e)),
    }

    // 3. 批改并保存
    let (score, total_points) = grade(&quiz.questions, &submission.answers);
    match storage
        .create_quiz_submission(quiz.id, session.id, &submission.answers, score, total_points)
        .await
    {
        Ok(saved) => {
            info!(
                "Student {} submitted quiz {}: {}/{}",
                session.id, quiz.id, score, total_points
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(saved, "Quiz submitted successfully")))
        }
        Err(LearnHubError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::QuizAlreadySubmitted, ALREADY_SUBMITTED),
        )),
        Err(e) => {
            error!("Failed to save submission for quiz {}: {}", quiz.id, e);
            Ok(error_response(&e))
        }
    }
}
