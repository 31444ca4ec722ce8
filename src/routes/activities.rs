use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::activities::requests::CreateActivityRequest;
use crate::services::ActivityService;

static ACTIVITY_SERVICE: Lazy<ActivityService> = Lazy::new(ActivityService::new_lazy);

pub async fn create_activity(
    req: HttpRequest,
    activity_data: web::Json<CreateActivityRequest>,
) -> ActixResult<HttpResponse> {
    ACTIVITY_SERVICE
        .create_activity(&req, activity_data.into_inner())
        .await
}

// 配置路由
pub fn configure_activities_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/activities")
            .wrap(middlewares::RequireRole::teacher())
            .wrap(middlewares::RequireJWT)
            .route("", web::post().to(create_activity)),
    );
}
