use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use chrono::Utc;

use crate::error::AppError;
use crate::middlewares::AuthUser;
use crate::models::*;
use crate::services::PileDrawService;
use crate::utils::MediaResolver;

#[utoipa::path(
    get,
    path = "/piles",
    tag = "piles",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "今日牌堆（新抽取、已保存结果或空结果）", body = PilesResponse),
        (status = 401, description = "未登录", body = ErrorResponse),
        (status = 405, description = "仅支持 GET", body = ErrorResponse),
        (status = 500, description = "抽卡失败，已回滚", body = ErrorResponse)
    )
)]
/// 抽取今日的三个牌堆:
/// 1. 每个用户每天最多抽 3 次，每次请求消耗一次
/// 2. 次数用完后返回最后一次抽取的结果
/// 3. 卡池不足 3 张时返回空列表，不消耗次数
pub async fn get_piles(
    service: web::Data<PileDrawService>,
    media: web::Data<MediaResolver>,
    user: AuthUser,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let today = Utc::now().date_naive();
    let outcome = match service.draw(user.id, today).await {
        Ok(outcome) => outcome,
        Err(e) => return Ok(AppError::DrawFailed(e.to_string()).error_response()),
    };

    let origin = {
        let info = req.connection_info();
        format!("{}://{}", info.scheme(), info.host())
    };
    Ok(HttpResponse::Ok().json(PilesResponse::from_outcome(
        &outcome,
        &media,
        Some(&origin),
    )))
}

pub async fn method_not_allowed() -> Result<HttpResponse> {
    Ok(AppError::MethodNotAllowed.error_response())
}

pub fn piles_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/piles")
            .route(web::get().to(get_piles))
            .default_service(web::to(method_not_allowed)),
    );
}
