use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AssignmentService;
use crate::errors::error_response;
use crate::models::assignments::requests::{CreateAssignmentRequest, CreateAssignmentResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;
use crate::utils::validate::require_non_blank;

pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    mut assignment_data: CreateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let session = match current_user(request) {
        Ok(session) => session,
        Err(resp) => return Ok(resp),
    };

    for (field, value) in [
        ("Title", &assignment_data.title),
        ("Subject", &assignment_data.subject),
        ("Class name", &assignment_data.class_name),
    ] {
        if let Err(msg) = require_non_blank(field, value) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
        }
    }
    assignment_data.title = assignment_data.title.trim().to_string();
    assignment_data.subject = assignment_data.subject.trim().to_string();
    assignment_data.class_name = assignment_data.class_name.trim().to_string();

    let storage = service.get_storage(request);

    let students = match storage
        .list_students_by_class(&assignment_data.class_name)
        .await
    {
        Ok(list) => list,
        Err(e) => return Ok(error_response(&e)),
    };
    if students.is_empty() {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            format!("No students found in class {}", assignment_data.class_name),
        )));
    }

    let student_ids: Vec<i64> = students.iter().map(|s| s.id).collect();
    match storage
        .create_assignments(&student_ids, &assignment_data)
        .await
    {
        Ok(created) => {
            info!(
                "Teacher {} assigned '{}' to {} students in {}",
                session.id, assignment_data.title, created, assignment_data.class_name
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                CreateAssignmentResponse { created },
                "Assignment created successfully",
            )))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
