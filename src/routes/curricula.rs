use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::curricula::requests::GenerateCurriculumRequest;
use crate::services::CurriculumService;

static CURRICULUM_SERVICE: Lazy<CurriculumService> = Lazy::new(CurriculumService::new_lazy);

pub async fn generate_curriculum(
    req: HttpRequest,
    generate_data: web::Json<GenerateCurriculumRequest>,
) -> ActixResult<HttpResponse> {
    CURRICULUM_SERVICE
        .generate_curriculum(&req, generate_data.into_inner())
        .await
}

pub async fn list_curricula(req: HttpRequest) -> ActixResult<HttpResponse> {
    CURRICULUM_SERVICE.list_curricula(&req).await
}

pub async fn generate_lesson_plan(
    req: HttpRequest,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    CURRICULUM_SERVICE
        .generate_lesson_plan(&req, path.into_inner())
        .await
}

// 配置路由
pub fn configure_curricula_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/curricula")
            .wrap(middlewares::RequireRole::teacher())
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_curricula))
            .route("/generate", web::post().to(generate_curriculum))
            .route("/{curriculum_id}/lesson-plan", web::post().to(generate_lesson_plan)),
    );
}
