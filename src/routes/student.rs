use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::services::{DashboardService, FeedService};

static FEED_SERVICE: Lazy<FeedService> = Lazy::new(FeedService::new_lazy);
static DASHBOARD_SERVICE: Lazy<DashboardService> = Lazy::new(DashboardService::new_lazy);

pub async fn get_feed(req: HttpRequest) -> ActixResult<HttpResponse> {
    FEED_SERVICE.get_feed(&req).await
}

pub async fn get_dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.student_dashboard(&req).await
}

// 配置路由
pub fn configure_student_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/student")
            .wrap(middlewares::RequireRole::student())
            .wrap(middlewares::RequireJWT)
            .route("/feed", web::get().to(get_feed))
            .route("/dashboard", web::get().to(get_dashboard)),
    );
}
