use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{CurriculumService, target_class};
use crate::errors::error_response;
use crate::models::curricula::requests::GenerateCurriculumRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;
use crate::utils::validate::require_non_blank;

pub async fn generate_curriculum(
    service: &CurriculumService,
    request: &HttpRequest,
    mut generate_request: GenerateCurriculumRequest,
) -> ActixResult<HttpResponse> {
    let session = match current_user(request) {
        Ok(session) => session,
        Err(resp) => return Ok(resp),
    };

    for (field, value) in [
        ("Subject", &generate_request.subject),
        ("Grade", &generate_request.grade),
        ("Topic", &generate_request.topic),
    ] {
        if let Err(msg) = require_non_blank(field, value) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
        }
    }
    generate_request.subject = generate_request.subject.trim().to_string();
    generate_request.grade = generate_request.grade.trim().to_string();
    generate_request.topic = generate_request.topic.trim().to_string();

    let topics = split_topics(&generate_request.topic);
    let generator = service.get_generator(request);
    let content = match generator
        .generate_curriculum(
            target_class(&generate_request.grade),
            &generate_request.subject,
            &topics,
        )
        .await
    {
        Ok(content) => content,
        Err(e) => {
            error!("Curriculum generation failed: {}", e);
            return Ok(HttpResponse::build(e.status_code()).json(ApiResponse::error_empty(
                ErrorCode::CurriculumGenerationFailed,
                e.message(),
            )));
        }
    };

    let title = format!("{} - {}", generate_request.topic, generate_request.subject);
    let storage = service.get_storage(request);
    match storage
        .create_curriculum(session.id, &generate_request, title, content)
        .await
    {
        Ok(curriculum) => {
            info!("Curriculum {} created by teacher {}", curriculum.id, session.id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(curriculum, "Curriculum generated successfully")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

/// 主题按逗号拆分
fn split_topics(topic: &str) -> Vec<String> {
    topic
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::split_topics;

    #[test]
    fn test_split_topics() {
        assert_eq!(split_topics("Fractions"), vec!["Fractions"]);
        assert_eq!(
            split_topics(" Fractions, Decimals ,,"),
            vec!["Fractions", "Decimals"]
        );
    }
}
