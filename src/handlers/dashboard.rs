use actix_web::{HttpResponse, ResponseError, Result, web};
use chrono::Utc;
use serde_json::json;

use crate::middlewares::AuthUser;
use crate::models::*;
use crate::services::DashboardService;

#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "dashboard",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "随机幸运卡与今日肯定语", body = DashboardResponse),
        (status = 401, description = "未登录", body = ErrorResponse)
    )
)]
pub async fn get_dashboard(
    service: web::Data<DashboardService>,
    user: AuthUser,
) -> Result<HttpResponse> {
    match service.dashboard(user.id, Utc::now().date_naive()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn dashboard_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/dashboard", web::get().to(get_dashboard));
}
