use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use crate::errors::error_response;
use crate::models::auth::{requests::UpdateProfileRequest, responses::UserInfoResponse};
use crate::models::users::{entities::UserRole, requests::UpdateUserRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;
use crate::utils::validate::validate_name;

use super::AuthService;
use super::register::{non_blank, trim_all};

pub async fn handle_me(service: &AuthService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let user_id = match current_user(request) {
        Ok(session) => session.id,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);
    match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserInfoResponse { user },
            "User information retrieved successfully",
        ))),
        // 令牌有效但账号已不存在
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn handle_update_profile(
    service: &AuthService,
    update_data: UpdateProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let session = match current_user(request) {
        Ok(session) => session,
        Err(resp) => return Ok(resp),
    };

    if let Some(name) = &update_data.name
        && let Err(msg) = validate_name(name)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserNameInvalid, msg)));
    }

    let storage = service.get_storage(request);
    match storage
        .update_user_profile(session.id, build_profile_update(update_data, session.role))
        .await
    {
        Ok(Some(user)) => {
            info!("User {} updated profile", user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                UserInfoResponse { user },
                "Profile updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => {
            error!("Failed to update profile of user {}: {}", session.id, e);
            Ok(HttpResponse::build(e.status_code()).json(ApiResponse::error_empty(
                ErrorCode::UserUpdateFailed,
                format!("Profile update failed: {}", e.message()),
            )))
        }
    }
}

/// 只保留当前角色可改的字段；空白字符串清空可选字段
fn build_profile_update(req: UpdateProfileRequest, role: UserRole) -> UpdateUserRequest {
    let clearable = |value: Option<String>| value.map(|v| non_blank(Some(v)));

    let mut update = UpdateUserRequest {
        name: req.name.map(|n| n.trim().to_string()),
        school: clearable(req.school),
        phone: clearable(req.phone),
        bio: clearable(req.bio),
        ..Default::default()
    };

    match role {
        UserRole::Student => {
            update.grade = clearable(req.grade);
            update.class_name = clearable(req.class_name);
            update.roll_no = clearable(req.roll_no);
        }
        UserRole::Teacher => {
            update.experience = clearable(req.experience);
            update.subjects = req.subjects.map(trim_all);
            update.classes_taught = req.classes_taught.map(trim_all);
        }
    }
    update
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> UpdateProfileRequest {
        UpdateProfileRequest {
            name: Some(" Arnold P. ".into()),
            school: Some("  ".into()),
            phone: Some(" 555-0199 ".into()),
            class_name: Some(" 7B ".into()),
            subjects: Some(vec!["Art".into(), " ".into()]),
            experience: Some("2 years".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_student_cannot_touch_teaching_fields() {
        let update = build_profile_update(request(), UserRole::Student);
        assert_eq!(update.name.as_deref(), Some("Arnold P."));
        assert_eq!(update.school, Some(None));
        assert_eq!(update.phone, Some(Some("555-0199".to_string())));
        assert_eq!(update.class_name, Some(Some("7B".to_string())));
        assert_eq!(update.subjects, None);
        assert_eq!(update.experience, None);
        // 未提供的字段保持不变
        assert_eq!(update.bio, None);
    }

    #[test]
    fn test_teacher_cannot_move_into_a_class() {
        let update = build_profile_update(request(), UserRole::Teacher);
        assert_eq!(update.class_name, None);
        assert_eq!(update.subjects, Some(vec!["Art".to_string()]));
        assert_eq!(update.experience, Some(Some("2 years".to_string())));
    }

    #[test]
    fn test_sensitive_fields_are_not_part_of_the_request() {
        let req: UpdateProfileRequest = serde_json::from_value(serde_json::json!({
            "email": "new@school.edu",
            "role": "TEACHER",
            "password": "Hijack3dPass",
            "bio": "Likes frogs"
        }))
        .unwrap();
        let update = build_profile_update(req, UserRole::Student);
        assert_eq!(update.bio, Some(Some("Likes frogs".to_string())));
        assert_eq!(update.name, None);
    }
}
