use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::middlewares::AuthUser;
use crate::models::*;
use crate::services::ReleaseService;

#[utoipa::path(
    get,
    path = "/release",
    tag = "release",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "想法列表（倒序）", body = [ReleaseNoteResponse]),
        (status = 401, description = "未登录", body = ErrorResponse)
    )
)]
pub async fn list_notes(
    service: web::Data<ReleaseService>,
    user: AuthUser,
) -> Result<HttpResponse> {
    match service.list_notes(user.id).await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/release",
    tag = "release",
    request_body = CreateReleaseNoteRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "已记录", body = ReleaseNoteResponse),
        (status = 400, description = "内容为空", body = ErrorResponse)
    )
)]
pub async fn create_note(
    service: web::Data<ReleaseService>,
    user: AuthUser,
    body: web::Json<CreateReleaseNoteRequest>,
) -> Result<HttpResponse> {
    match service.create_note(user.id, body.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Created().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/release/{id}",
    tag = "release",
    params(("id" = i64, Path, description = "想法 ID")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "已放下"),
        (status = 404, description = "不存在", body = ErrorResponse)
    )
)]
pub async fn delete_note(
    service: web::Data<ReleaseService>,
    user: AuthUser,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.delete_note(user.id, path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Thought released."
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn release_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/release")
            .route("", web::get().to(list_notes))
            .route("", web::post().to(create_note))
            .route("/{id}", web::delete().to(delete_note)),
    );
}
