use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::middlewares::AuthUser;
use crate::models::*;
use crate::services::GameService;

#[utoipa::path(
    post,
    path = "/games/bubble-pop/scores",
    tag = "games",
    request_body = SubmitScoreRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "分数已记录", body = GameScoreResponse),
        (status = 400, description = "分数无效", body = ErrorResponse)
    )
)]
pub async fn submit_score(
    service: web::Data<GameService>,
    user: AuthUser,
    body: web::Json<SubmitScoreRequest>,
) -> Result<HttpResponse> {
    match service.submit_score(user.id, body.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success_with_message(data, "Score recorded!"))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/games/bubble-pop/high-scores",
    tag = "games",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "前 5 名", body = [HighScoreEntry])
    )
)]
pub async fn high_scores(service: web::Data<GameService>, _user: AuthUser) -> Result<HttpResponse> {
    match service.high_scores().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn games_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/games/bubble-pop")
            .route("/scores", web::post().to(submit_score))
            .route("/high-scores", web::get().to(high_scores)),
    );
}
