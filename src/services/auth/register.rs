use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use crate::errors::LearnHubError;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::requests::RegisterRequest,
    users::{entities::UserRole, requests::CreateUserRequest},
};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_name, validate_password};

use super::AuthService;

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 1. 字段校验
    if let Err(msg) = validate_email(register_request.email.trim()) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
    }
    if let Err(msg) = validate_name(&register_request.name) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserNameInvalid, msg)));
    }
    if let Err(msg) = validate_password(&register_request.password) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserPasswordInvalid, msg)));
    }

    let storage = service.get_storage(request);

    // 2. 邮箱查重（唯一索引兜底并发注册）
    match storage
        .get_user_by_email(register_request.email.trim())
        .await
    {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserEmailAlreadyExists,
                "Email already registered",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            error!("Failed to check email before register: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    format!("Register failed: {}", e.message()),
                )),
            );
        }
    }

    // 3. 哈希密码
    let password_hash = match hash_password(&register_request.password) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Password hashing failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    "Register failed, unable to hash password",
                )),
            );
        }
    };

    // 4. 创建用户
    match storage
        .create_user(build_create_request(register_request, password_hash))
        .await
    {
        Ok(user) => {
            info!("User {} registered as {}", user.email, user.role);
            Ok(HttpResponse::Created().json(ApiResponse::success(user, "Registration successful")))
        }
        Err(LearnHubError::Conflict(msg)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::UserEmailAlreadyExists, msg),
        )),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::RegisterFailed,
                format!("Register failed: {}", e.message()),
            )),
        ),
    }
}

/// 按角色保留对应字段：学生记年级/班级/学号，教师记科目/任教班级
fn build_create_request(req: RegisterRequest, password_hash: String) -> CreateUserRequest {
    let RegisterRequest {
        email,
        name,
        role,
        school,
        grade,
        class_name,
        roll_no,
        subjects,
        classes_taught,
        phone,
        bio,
        experience,
        ..
    } = req;

    let (grade, class_name, roll_no, subjects, classes_taught, experience) = match role {
        UserRole::Student => (
            non_blank(grade),
            non_blank(class_name),
            non_blank(roll_no),
            Vec::new(),
            Vec::new(),
            None,
        ),
        UserRole::Teacher => (
            None,
            None,
            None,
            trim_all(subjects),
            trim_all(classes_taught),
            non_blank(experience),
        ),
    };

    CreateUserRequest {
        email: email.trim().to_string(),
        password_hash,
        role,
        name: name.trim().to_string(),
        school: non_blank(school),
        grade,
        class_name,
        roll_no,
        classes_taught,
        subjects,
        phone: non_blank(phone),
        bio: non_blank(bio),
        experience,
    }
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn trim_all(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(role: UserRole) -> RegisterRequest {
        RegisterRequest {
            email: " ana@school.edu ".into(),
            password: "irrelevant".into(),
            name: " Ana ".into(),
            role,
            school: Some("  ".into()),
            grade: Some("10".into()),
            class_name: Some(" 10-A ".into()),
            roll_no: Some("07".into()),
            subjects: vec!["Math".into(), " ".into()],
            classes_taught: vec!["10-A".into()],
            phone: Some(" 555-0101 ".into()),
            bio: None,
            experience: Some("3 years".into()),
        }
    }

    #[test]
    fn test_student_keeps_class_fields_only() {
        let req = build_create_request(request(UserRole::Student), "hash".into());
        assert_eq!(req.email, "ana@school.edu");
        assert_eq!(req.name, "Ana");
        assert_eq!(req.school, None);
        assert_eq!(req.class_name.as_deref(), Some("10-A"));
        assert_eq!(req.roll_no.as_deref(), Some("07"));
        assert!(req.subjects.is_empty());
        assert!(req.classes_taught.is_empty());
        assert_eq!(req.phone.as_deref(), Some("555-0101"));
        assert_eq!(req.experience, None);
    }

    #[test]
    fn test_teacher_keeps_teaching_fields_only() {
        let req = build_create_request(request(UserRole::Teacher), "hash".into());
        assert_eq!(req.class_name, None);
        assert_eq!(req.grade, None);
        assert_eq!(req.subjects, vec!["Math".to_string()]);
        assert_eq!(req.classes_taught, vec!["10-A".to_string()]);
        assert_eq!(req.experience.as_deref(), Some("3 years"));
    }
}
