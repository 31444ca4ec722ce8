use std::sync::Arc;

use actix_web::{App, http::StatusCode, test, web};
use serde_json::{Value, json};

use rust_learnhub::ai::GenerationService;
use rust_learnhub::errors::Result;
use rust_learnhub::models::quizzes::{
    entities::{Question, QuizType},
    requests::GenerateQuizRequest,
};
use rust_learnhub::routes;
use rust_learnhub::storage::Storage;
use rust_learnhub::storage::sea_orm_storage::SeaOrmStorage;

/// 固定返回内容的生成服务
struct FixedGenerator;

#[async_trait::async_trait]
impl GenerationService for FixedGenerator {
    async fn generate_quiz(&self, req: &GenerateQuizRequest) -> Result<Vec<Question>> {
        // 主观题没有选项，归一化后一题不剩
        if req.quiz_type == QuizType::Subjective {
            return Ok(Vec::new());
        }
        Ok((0..req.question_count)
            .map(|i| Question {
                text: format!("{} question {}", req.subject, i + 1),
                options: vec!["yes".into(), "no".into()],
                correct: 0,
                explanation: None,
            })
            .collect())
    }

    async fn generate_curriculum(
        &self,
        target_class: i64,
        subject: &str,
        topics: &[String],
    ) -> Result<String> {
        Ok(format!("Class {target_class} {subject}: {}", topics.join(" / ")))
    }

    async fn generate_lesson_plan(&self, target_class: i64, subject: &str) -> Result<String> {
        Ok(format!("Plan for class {target_class} {subject}"))
    }
}

macro_rules! init_app {
    () => {{
        let storage: Arc<dyn Storage> = Arc::new(
            SeaOrmStorage::connect("sqlite::memory:", 1, 5)
                .await
                .expect("in-memory storage"),
        );
        let generator: Arc<dyn GenerationService> = Arc::new(FixedGenerator);
        test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .app_data(web::Data::new(generator))
                .configure(routes::configure_api_routes),
        )
        .await
    }};
}

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

/// 注册后登录，返回 (用户ID, token)
macro_rules! register_and_login {
    ($app:expr, $body:expr) => {{
        let body: Value = $body;
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "email": body["email"], "password": body["password"] }))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let login: Value = test::read_body_json(resp).await;
        (
            login["data"]["user"]["id"].as_i64().expect("user id"),
            login["data"]["access_token"]
                .as_str()
                .expect("access token")
                .to_string(),
        )
    }};
}

fn teacher_body() -> Value {
    json!({
        "email": "teacher@school.edu",
        "password": "Teach3rPass",
        "name": "Ms. Frizzle",
        "role": "TEACHER",
        "school": "Walkerville Elementary",
        "subjects": ["Science"],
        "classes_taught": ["7A"]
    })
}

fn student_body() -> Value {
    json!({
        "email": "arnold@school.edu",
        "password": "Stud3ntPass",
        "name": "Arnold",
        "role": "STUDENT",
        "grade": "Class 7",
        "class_name": "7A",
        "roll_no": "01"
    })
}

#[actix_web::test]
async fn test_protected_routes_require_session() {
    let app = init_app!();

    for uri in [
        "/api/v1/auth/me",
        "/api/v1/quizzes",
        "/api/v1/student/feed",
        "/api/v1/teacher/dashboard",
        "/api/v1/tasks",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }

    let req = test::TestRequest::get()
        .uri("/api/v1/student/feed")
        .insert_header(bearer("not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_login_rejects_bad_password() {
    let app = init_app!();
    let _ = register_and_login!(app, student_body());

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": "arnold@school.edu", "password": "WrongPass1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid email or password");

    // 同一邮箱不能再注册
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(student_body())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn test_roles_are_enforced() {
    let app = init_app!();
    let (_, teacher_token) = register_and_login!(app, teacher_body());
    let (student_id, student_token) = register_and_login!(app, student_body());

    let req = test::TestRequest::get()
        .uri("/api/v1/teacher/dashboard")
        .insert_header(bearer(&student_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/api/v1/student/dashboard")
        .insert_header(bearer(&teacher_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(&student_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["user"]["id"].as_i64(), Some(student_id));
    assert!(body["data"]["user"].get("password_hash").is_none());
}

#[actix_web::test]
async fn test_quiz_lifecycle() {
    let app = init_app!();
    let (_, teacher_token) = register_and_login!(app, teacher_body());
    let (student_id, student_token) = register_and_login!(app, student_body());

    // 生成只返回题目
    let req = test::TestRequest::post()
        .uri("/api/v1/quizzes/generate")
        .insert_header(bearer(&teacher_token))
        .set_json(json!({
            "subject": "Science",
            "topics": ["Plants"],
            "difficulty": "easy",
            "question_count": 3
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let generated: Value = test::read_body_json(resp).await;
    let questions = generated["data"]["questions"].clone();
    assert_eq!(questions.as_array().map(Vec::len), Some(3));

    let req = test::TestRequest::post()
        .uri("/api/v1/quizzes")
        .insert_header(bearer(&teacher_token))
        .set_json(json!({
            "title": "Plants 101",
            "subject": "Science",
            "class_name": "7A",
            "questions": questions
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    let quiz_id = created["data"]["id"].as_i64().expect("quiz id");

    // 第 1、2 题答对，第 3 题答错
    let submit_uri = format!("/api/v1/quizzes/{quiz_id}/submit");
    let req = test::TestRequest::post()
        .uri(&submit_uri)
        .insert_header(bearer(&student_token))
        .set_json(json!({ "answers": { "0": 0, "1": 0, "2": 1 } }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let submitted: Value = test::read_body_json(resp).await;
    assert_eq!(submitted["data"]["score"], 2);
    assert_eq!(submitted["data"]["total_points"], 3);

    let req = test::TestRequest::post()
        .uri(&submit_uri)
        .insert_header(bearer(&student_token))
        .set_json(json!({ "answers": { "0": 0, "1": 0, "2": 0 } }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/quizzes/{quiz_id}/results"))
        .insert_header(bearer(&teacher_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let results: Value = test::read_body_json(resp).await;
    let items = results["data"]["items"].as_array().cloned().unwrap_or_default();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["student_id"].as_i64(), Some(student_id));
    assert_eq!(items[0]["student_name"], "Arnold");

    let req = test::TestRequest::get()
        .uri("/api/v1/student/feed")
        .insert_header(bearer(&student_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let feed: Value = test::read_body_json(resp).await;
    let quiz_item = feed["data"]["items"]
        .as_array()
        .and_then(|items| items.iter().find(|i| i["item_type"] == "QUIZ").cloned())
        .expect("quiz in feed");
    assert_eq!(quiz_item["status"], "COMPLETED");
    assert_eq!(quiz_item["score"], 2);
}

#[actix_web::test]
async fn test_submit_unknown_quiz_is_not_found() {
    let app = init_app!();
    let (_, student_token) = register_and_login!(app, student_body());

    let req = test::TestRequest::post()
        .uri("/api/v1/quizzes/4242/submit")
        .insert_header(bearer(&student_token))
        .set_json(json!({ "answers": {} }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_assignment_reaches_every_student_in_class() {
    let app = init_app!();
    let (_, teacher_token) = register_and_login!(app, teacher_body());
    let (_, student_token) = register_and_login!(app, student_body());
    let mut classmate = student_body();
    classmate["email"] = json!("phoebe@school.edu");
    classmate["name"] = json!("Phoebe");
    classmate["roll_no"] = json!("02");
    let _ = register_and_login!(app, classmate);

    let req = test::TestRequest::post()
        .uri("/api/v1/assignments")
        .insert_header(bearer(&teacher_token))
        .set_json(json!({
            "title": "Leaf diagram",
            "subject": "Science",
            "class_name": " 7A ",
            "due_date": "2030-01-01T00:00:00Z"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["data"]["created"], 2);

    let req = test::TestRequest::post()
        .uri("/api/v1/assignments")
        .insert_header(bearer(&teacher_token))
        .set_json(json!({
            "title": "Leaf diagram",
            "subject": "Science",
            "class_name": "9Z",
            "due_date": "2030-01-01T00:00:00Z"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // 学生不能布置作业
    let req = test::TestRequest::post()
        .uri("/api/v1/assignments")
        .insert_header(bearer(&student_token))
        .set_json(json!({
            "title": "Leaf diagram",
            "subject": "Science",
            "class_name": "7A",
            "due_date": "2030-01-01T00:00:00Z"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/api/v1/student/feed")
        .insert_header(bearer(&student_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let feed: Value = test::read_body_json(resp).await;
    let assignments: Vec<Value> = feed["data"]["items"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter(|i| i["item_type"] == "ASSIGNMENT")
                .cloned()
                .collect()
        })
        .unwrap_or_default();
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0]["status"], "PENDING");
    assert_eq!(assignments[0]["title"], "Leaf diagram");

    let req = test::TestRequest::get()
        .uri("/api/v1/student/dashboard")
        .insert_header(bearer(&student_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let dashboard: Value = test::read_body_json(resp).await;
    assert_eq!(dashboard["data"]["student_name"], "Arnold");
    assert_eq!(dashboard["data"]["active_assignments"], 1);
    assert_eq!(dashboard["data"]["completed_assignments"], 0);
}

#[actix_web::test]
async fn test_quiz_class_name_is_trimmed_before_matching_students() {
    let app = init_app!();
    let (_, teacher_token) = register_and_login!(app, teacher_body());
    let (_, student_token) = register_and_login!(app, student_body());

    let req = test::TestRequest::post()
        .uri("/api/v1/quizzes")
        .insert_header(bearer(&teacher_token))
        .set_json(json!({
            "title": " Photosynthesis ",
            "subject": "Science",
            "class_name": "7A ",
            "questions": [{ "text": "Plants need?", "options": ["light", "noise"], "correct": 0 }]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["data"]["class_name"], "7A");
    assert_eq!(created["data"]["title"], "Photosynthesis");

    let req = test::TestRequest::get()
        .uri("/api/v1/student/feed")
        .insert_header(bearer(&student_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let feed: Value = test::read_body_json(resp).await;
    let quizzes = feed["data"]["items"]
        .as_array()
        .map(|items| items.iter().filter(|i| i["item_type"] == "QUIZ").count())
        .unwrap_or(0);
    assert_eq!(quizzes, 1);
}

#[actix_web::test]
async fn test_profile_update_keeps_identity_fields() {
    let app = init_app!();
    let (student_id, student_token) = register_and_login!(app, student_body());

    let req = test::TestRequest::put()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(&student_token))
        .set_json(json!({
            "email": "hijack@school.edu",
            "role": "TEACHER",
            "password": "Hijack3dPass",
            "name": "Arnold Perlstein",
            "phone": "555-0134",
            "bio": "Collects rocks",
            "subjects": ["Art"]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let user = &body["data"]["user"];
    assert_eq!(user["id"].as_i64(), Some(student_id));
    assert_eq!(user["name"], "Arnold Perlstein");
    assert_eq!(user["phone"], "555-0134");
    assert_eq!(user["bio"], "Collects rocks");
    assert_eq!(user["email"], "arnold@school.edu");
    assert_eq!(user["role"], "STUDENT");
    assert_eq!(user["class_name"], "7A");
    assert_eq!(user["subjects"], json!([]));

    // 旧密码仍然有效，新密码无效
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": "arnold@school.edu", "password": "Stud3ntPass" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": "hijack@school.edu", "password": "Hijack3dPass" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let req = test::TestRequest::put()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(&student_token))
        .set_json(json!({ "name": "   " }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let req = test::TestRequest::put()
        .uri("/api/v1/auth/me")
        .set_json(json!({ "name": "Nobody" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[actix_web::test]
async fn test_logout_clears_session_cookie() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "auth_token")
        .expect("session cookie is reset");
    assert_eq!(cookie.value(), "");
    assert_eq!(
        cookie.max_age(),
        Some(actix_web::cookie::time::Duration::ZERO)
    );
    assert_eq!(cookie.http_only(), Some(true));
}

#[actix_web::test]
async fn test_generation_without_objective_questions_is_bad_gateway() {
    let app = init_app!();
    let (_, teacher_token) = register_and_login!(app, teacher_body());

    let req = test::TestRequest::post()
        .uri("/api/v1/quizzes/generate")
        .insert_header(bearer(&teacher_token))
        .set_json(json!({
            "subject": "Science",
            "topics": ["Plants"],
            "difficulty": "easy",
            "question_count": 3,
            "quiz_type": "subjective"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 3003);
}
