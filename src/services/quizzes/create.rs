use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::QuizService;
use crate::errors::error_response;
use crate::models::quizzes::requests::CreateQuizRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;
use crate::utils::validate::require_non_blank;

pub async fn create_quiz(
    service: &QuizService,
    request: &HttpRequest,
    quiz_data: CreateQuizRequest,
) -> ActixResult<HttpResponse> {
    let session = match current_user(request) {
        Ok(session) => session,
        Err(resp) => return Ok(resp),
    };

    if let Err(msg) = validate_quiz(&quiz_data) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::QuizInvalid, msg)));
    }

    let storage = service.get_storage(request);
    match storage.create_quiz(session.id, trim_quiz(quiz_data)).await {
        Ok(quiz) => {
            info!(
                "Quiz {} created by teacher {} for class {}",
                quiz.id, session.id, quiz.class_name
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(quiz, "Quiz created successfully")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

/// 必填字段非空，至少一题，每题正确答案下标有效
pub fn validate_quiz(quiz: &CreateQuizRequest) -> Result<(), String> {
    require_non_blank("Title", &quiz.title)?;
    require_non_blank("Subject", &quiz.subject)?;
    require_non_blank("Class name", &quiz.class_name)?;

    if quiz.questions.is_empty() {
        return Err("Quiz must contain at least one question".to_string());
    }
    if let Some(i) = quiz.questions.iter().position(|q| !q.is_well_formed()) {
        return Err(format!(
            "Question {} must have text, options and a valid correct answer",
            i + 1
        ));
    }
    Ok(())
}

/// 班级名与学生档案按字面匹配，入库前去掉首尾空白
fn trim_quiz(mut quiz: CreateQuizRequest) -> CreateQuizRequest {
    quiz.title = quiz.title.trim().to_string();
    quiz.subject = quiz.subject.trim().to_string();
    quiz.class_name = quiz.class_name.trim().to_string();
    quiz
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quizzes::entities::Question;

    fn quiz() -> CreateQuizRequest {
        CreateQuizRequest {
            title: "Weekly check".into(),
            subject: "Math".into(),
            class_name: "10-A".into(),
            questions: vec![Question {
                text: "2+2?".into(),
                options: vec!["3".into(), "4".into()],
                correct: 1,
                explanation: None,
            }],
            due_date: None,
        }
    }

    #[test]
    fn test_valid_quiz() {
        assert!(validate_quiz(&quiz()).is_ok());
    }

    #[test]
    fn test_missing_fields_rejected() {
        let mut q = quiz();
        q.title = " ".into();
        assert_eq!(validate_quiz(&q).unwrap_err(), "Title is required");

        let mut q = quiz();
        q.class_name.clear();
        assert!(validate_quiz(&q).is_err());

        let mut q = quiz();
        q.questions.clear();
        assert!(validate_quiz(&q).is_err());
    }

    #[test]
    fn test_bad_correct_index_rejected() {
        let mut q = quiz();
        q.questions[0].correct = 2;
        let msg = validate_quiz(&q).unwrap_err();
        assert!(msg.starts_with("Question 1"));
    }

    #[test]
    fn test_trim_quiz_fields() {
        let mut q = quiz();
        q.title = " Weekly check\t".into();
        q.subject = "Math ".into();
        q.class_name = " 10-A ".into();
        let q = trim_quiz(q);
        assert_eq!(q.title, "Weekly check");
        assert_eq!(q.subject, "Math");
        assert_eq!(q.class_name, "10-A");
    }
}
