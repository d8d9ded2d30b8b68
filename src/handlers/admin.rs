use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::middlewares::AuthUser;
use crate::models::*;
use crate::services::{AuthService, CardPoolService, DashboardService};

#[utoipa::path(
    get,
    path = "/admin/luck-cards",
    tag = "admin",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "卡池列表", body = [LuckCardResponse]),
        (status = 403, description = "非管理员", body = ErrorResponse)
    )
)]
pub async fn list_luck_cards(
    auth_service: web::Data<AuthService>,
    card_service: web::Data<CardPoolService>,
    user: AuthUser,
) -> Result<HttpResponse> {
    if let Err(e) = auth_service.require_staff(user.id).await {
        return Ok(e.error_response());
    }
    match card_service.list_cards().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/luck-cards",
    tag = "admin",
    request_body = CreateLuckCardRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "创建成功", body = LuckCardResponse),
        (status = 400, description = "参数错误", body = ErrorResponse),
        (status = 403, description = "非管理员", body = ErrorResponse)
    )
)]
pub async fn create_luck_card(
    auth_service: web::Data<AuthService>,
    card_service: web::Data<CardPoolService>,
    user: AuthUser,
    body: web::Json<CreateLuckCardRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = auth_service.require_staff(user.id).await {
        return Ok(e.error_response());
    }
    match card_service.create_card(body.into_inner()).await {
        Ok(card) => Ok(HttpResponse::Created().json(json!({ "success": true, "data": card }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/affirmations",
    tag = "admin",
    request_body = CreateAffirmationRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "创建成功", body = AffirmationResponse),
        (status = 403, description = "非管理员", body = ErrorResponse)
    )
)]
pub async fn create_affirmation(
    auth_service: web::Data<AuthService>,
    dashboard_service: web::Data<DashboardService>,
    user: AuthUser,
    body: web::Json<CreateAffirmationRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = auth_service.require_staff(user.id).await {
        return Ok(e.error_response());
    }
    match dashboard_service.create_affirmation(body.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Created().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/luck-cards", web::get().to(list_luck_cards))
            .route("/luck-cards", web::post().to(create_luck_card))
            .route("/affirmations", web::post().to(create_affirmation)),
    );
}
