use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ActivityService;
use crate::errors::error_response;
use crate::models::activities::requests::CreateActivityRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;
use crate::utils::validate::require_non_blank;

pub async fn create_activity(
    service: &ActivityService,
    request: &HttpRequest,
    activity_data: CreateActivityRequest,
) -> ActixResult<HttpResponse> {
    let session = match current_user(request) {
        Ok(session) => session,
        Err(resp) => return Ok(resp),
    };

    let activity_data = match normalize(activity_data) {
        Ok(data) => data,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
        }
    };

    let storage = service.get_storage(request);
    match storage.create_activity(session.id, activity_data).await {
        Ok(activity) => {
            info!(
                "Activity {} created by teacher {} for class {}",
                activity.id, session.id, activity.class_name
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(activity, "Activity created successfully")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

/// 标题、链接、班级必填，链接必须是 http(s)
fn normalize(mut req: CreateActivityRequest) -> Result<CreateActivityRequest, String> {
    require_non_blank("Title", &req.title)?;
    require_non_blank("URL", &req.url)?;
    require_non_blank("Class name", &req.class_name)?;

    req.title = req.title.trim().to_string();
    req.url = req.url.trim().to_string();
    req.class_name = req.class_name.trim().to_string();

    if !(req.url.starts_with("http://") || req.url.starts_with("https://")) {
        return Err("URL must start with http:// or https://".to_string());
    }
    Ok(req)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(url: &str) -> CreateActivityRequest {
        CreateActivityRequest {
            title: " Virtual lab ".into(),
            description: None,
            url: url.into(),
            class_name: "10-A".into(),
        }
    }

    #[test]
    fn test_normalize_trims() {
        let req = normalize(request("https://lab.example.com ")).unwrap();
        assert_eq!(req.title, "Virtual lab");
        assert_eq!(req.url, "https://lab.example.com");
    }

    #[test]
    fn test_rejects_bad_url_and_blank_fields() {
        assert!(normalize(request("ftp://lab")).is_err());
        assert!(normalize(request("  ")).is_err());
        let mut req = request("https://lab.example.com");
        req.class_name.clear();
        assert!(normalize(req).is_err());
    }
}
