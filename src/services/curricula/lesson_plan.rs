use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{CurriculumService, target_class};
use crate::errors::{LearnHubError, error_response};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;

pub async fn generate_lesson_plan(
    service: &CurriculumService,
    request: &HttpRequest,
    curriculum_id: i64,
) -> ActixResult<HttpResponse> {
    let session = match current_user(request) {
        Ok(session) => session,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);

    let curriculum = match storage.get_curriculum_by_id(curriculum_id).await {
        Ok(Some(curriculum)) => curriculum,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CurriculumNotFound,
                "Curriculum not found",
            )));
        }
        Err(e) => return Ok(error_response(&e)),
    };

    if curriculum.teacher_id != session.id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "You can only generate lesson plans for your own curricula",
        )));
    }

    // 已有教案直接返回，不再调用生成服务
    if let Some(plan) = curriculum.lesson_plan {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(plan, "Lesson plan already exists")));
    }

    let generator = service.get_generator(request);
    let content = match generator
        .generate_lesson_plan(target_class(&curriculum.grade), &curriculum.subject)
        .await
    {
        Ok(content) => content,
        Err(e) => {
            error!("Lesson plan generation failed for curriculum {}: {}", curriculum.id, e);
            return Ok(HttpResponse::build(e.status_code()).json(ApiResponse::error_empty(
                ErrorCode::CurriculumGenerationFailed,
                e.message(),
            )));
        }
    };

    let title = format!("Lesson Plan for {}", curriculum.title);
    match storage
        .create_lesson_plan(curriculum.id, session.id, title, content)
        .await
    {
        Ok(plan) => {
            info!("Lesson plan {} created for curriculum {}", plan.id, curriculum.id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(plan, "Lesson plan generated successfully")))
        }
        // 并发生成时另一请求已写入，返回已有教案
        Err(LearnHubError::Conflict(_)) => match storage.get_curriculum_by_id(curriculum.id).await {
            Ok(Some(c)) => match c.lesson_plan {
                Some(plan) => Ok(HttpResponse::Ok()
                    .json(ApiResponse::success(plan, "Lesson plan already exists"))),
                None => Ok(error_response(&LearnHubError::conflict(
                    "Lesson plan already exists",
                ))),
            },
            Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CurriculumNotFound,
                "Curriculum not found",
            ))),
            Err(e) => Ok(error_response(&e)),
        },
        Err(e) => Ok(error_response(&e)),
    }
}
