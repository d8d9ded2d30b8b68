use actix_web::{HttpResponse, ResponseError, Result, web};
use chrono::Utc;
use serde_json::json;

use crate::middlewares::AuthUser;
use crate::models::*;
use crate::services::JournalService;

#[utoipa::path(
    get,
    path = "/journal",
    tag = "journal",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "按天分组的日记与连续天数", body = JournalOverviewResponse),
        (status = 401, description = "未登录", body = ErrorResponse)
    )
)]
pub async fn list_entries(
    service: web::Data<JournalService>,
    user: AuthUser,
) -> Result<HttpResponse> {
    match service.overview(user.id, Utc::now().date_naive()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/journal",
    tag = "journal",
    request_body = JournalEntryRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "创建成功", body = JournalEntryResponse),
        (status = 400, description = "标题或内容无效", body = ErrorResponse),
        (status = 401, description = "未登录", body = ErrorResponse)
    )
)]
pub async fn create_entry(
    service: web::Data<JournalService>,
    user: AuthUser,
    body: web::Json<JournalEntryRequest>,
) -> Result<HttpResponse> {
    match service.create_entry(user.id, body.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Created().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/journal/{id}",
    tag = "journal",
    params(("id" = i64, Path, description = "日记 ID")),
    request_body = JournalEntryRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "更新成功", body = JournalEntryResponse),
        (status = 404, description = "日记不存在", body = ErrorResponse)
    )
)]
pub async fn update_entry(
    service: web::Data<JournalService>,
    user: AuthUser,
    path: web::Path<i64>,
    body: web::Json<JournalEntryRequest>,
) -> Result<HttpResponse> {
    match service
        .update_entry(user.id, path.into_inner(), body.into_inner())
        .await
    {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/journal/{id}",
    tag = "journal",
    params(("id" = i64, Path, description = "日记 ID")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "删除成功"),
        (status = 404, description = "日记不存在", body = ErrorResponse)
    )
)]
pub async fn delete_entry(
    service: web::Data<JournalService>,
    user: AuthUser,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.delete_entry(user.id, path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Journal entry deleted."
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn journal_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/journal")
            .route("", web::get().to(list_entries))
            .route("", web::post().to(create_entry))
            .route("/{id}", web::put().to(update_entry))
            .route("/{id}", web::delete().to(delete_entry)),
    );
}
