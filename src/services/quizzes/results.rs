use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::QuizService;
use crate::errors::error_response;
use crate::models::quizzes::entities::QuizSubmission;
use crate::models::quizzes::responses::{QuizResultItem, QuizResultsResponse};
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;

pub async fn get_results(
    service: &QuizService,
    request: &HttpRequest,
    quiz_id: i64,
) -> ActixResult<HttpResponse> {
    let session = match current_user(request) {
        Ok(session) => session,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);

    let quiz = match storage.get_quiz_by_id(quiz_id).await {
        Ok(Some(quiz)) => quiz,
        Ok(None) => {
            return Ok(HttpResponse::NotFound()
                .json(ApiResponse::error_empty(ErrorCode::QuizNotFound, "Quiz not found")));
        }
        Err(e) => return Ok(error_response(&e)),
    };

    // 只有出题教师能看成绩
    if quiz.teacher_id != session.id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "You can only view results of your own quizzes",
        )));
    }

    let submissions = match storage.list_submissions_for_quizzes(&[quiz.id]).await {
        Ok(list) => list,
        Err(e) => return Ok(error_response(&e)),
    };

    let student_ids: Vec<i64> = submissions.iter().map(|s| s.student_id).collect();
    let students = match storage.get_users_by_ids(&student_ids).await {
        Ok(users) => users,
        Err(e) => return Ok(error_response(&e)),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        QuizResultsResponse {
            quiz_id: quiz.id,
            title: quiz.title,
            items: join_students(submissions, &students),
        },
        "Quiz results retrieved successfully",
    )))
}

/// 为每条提交补上学生姓名和邮箱，保持提交顺序
fn join_students(submissions: Vec<QuizSubmission>, students: &[User]) -> Vec<QuizResultItem> {
    let by_id: HashMap<i64, &User> = students.iter().map(|u| (u.id, u)).collect();

    submissions
        .into_iter()
        .map(|s| {
            let (name, email) = by_id
                .get(&s.student_id)
                .map(|u| (u.name.clone(), u.email.clone()))
                .unwrap_or_default();
            QuizResultItem {
                submission_id: s.id,
                student_id: s.student_id,
                student_name: name,
                student_email: email,
                answers: s.answers,
                score: s.score,
                total_points: s.total_points,
                submitted_at: s.submitted_at,
            }
        })
        .collect()
}
