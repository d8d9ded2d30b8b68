pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod games;
pub mod journal;
pub mod piles;
pub mod release;

pub use admin::admin_config;
pub use auth::auth_config;
pub use dashboard::dashboard_config;
pub use games::games_config;
pub use journal::journal_config;
pub use piles::piles_config;
pub use release::release_config;

use crate::error::AppError;
use actix_web::web;

/// `/api/v1` 下的全部路由
pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.configure(auth_config)
        .configure(piles_config)
        .configure(dashboard_config)
        .configure(journal_config)
        .configure(release_config)
        .configure(games_config)
        .configure(admin_config);
}

/// 请求体解析失败时同样返回 {"error": ...}
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(format!("Invalid request body: {err}")).into()
    })
}
