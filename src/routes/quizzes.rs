use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::quizzes::requests::{CreateQuizRequest, GenerateQuizRequest, SubmitQuizRequest};
use crate::services::QuizService;

// 懒加载的全局 QUIZ_SERVICE 实例
static QUIZ_SERVICE: Lazy<QuizService> = Lazy::new(QuizService::new_lazy);

pub async fn generate_quiz(
    req: HttpRequest,
    generate_data: web::Json<GenerateQuizRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE
        .generate_quiz(&req, generate_data.into_inner())
        .await
}

pub async fn create_quiz(
    req: HttpRequest,
    quiz_data: web::Json<CreateQuizRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.create_quiz(&req, quiz_data.into_inner()).await
}

pub async fn list_quizzes(req: HttpRequest) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.list_quizzes(&req).await
}

pub async fn get_results(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.get_results(&req, path.into_inner()).await
}

pub async fn submit_quiz(
    req: HttpRequest,
    path: web::Path<i64>,
    submission: web::Json<SubmitQuizRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE
        .submit_quiz(&req, path.into_inner(), submission.into_inner())
        .await
}

// 配置路由
pub fn configure_quizzes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/quizzes")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_quizzes))
                    .route(web::post().to(create_quiz))
                    .wrap(middlewares::RequireRole::teacher()),
            )
            .service(
                // 只生成不保存
                web::resource("/generate")
                    .route(web::post().to(generate_quiz))
                    .wrap(middlewares::RequireRole::teacher()),
            )
            .service(
                web::resource("/{quiz_id}/results")
                    .route(web::get().to(get_results))
                    .wrap(middlewares::RequireRole::teacher()),
            )
            .service(
                web::resource("/{quiz_id}/submit")
                    .route(web::post().to(submit_quiz))
                    .wrap(middlewares::RequireRole::student()),
            ),
    );
}
