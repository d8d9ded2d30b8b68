use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter
use std::sync::Arc;

use dailysoul_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    handlers,
    middlewares::{AuthMiddleware, create_cors},
    services::*,
    swagger::swagger_config,
    utils::{EntropySource, JwtService, MediaResolver, RandomSource},
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // 加载配置
    let config = Config::from_toml().expect("Failed to load configuration file");

    // 创建数据库连接池
    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    // 运行数据库迁移
    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    let jwt_service = JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expires_in,
        config.jwt.refresh_token_expires_in,
    );
    let media_resolver = MediaResolver::new(&config.media);
    let random: Arc<dyn RandomSource> = Arc::new(EntropySource);
    let cors_allowed_origins = config.server.cors_allowed_origins.clone();

    // 创建服务
    let auth_service = AuthService::new(pool.clone(), jwt_service.clone());
    let pile_draw_service = PileDrawService::new(pool.clone(), random.clone());
    let card_pool_service = CardPoolService::new(pool.clone());
    let dashboard_service = DashboardService::new(pool.clone(), random);
    let journal_service = JournalService::new(pool.clone());
    let release_service = ReleaseService::new(pool.clone());
    let game_service = GameService::new(pool.clone());

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors(&cors_allowed_origins))
            .wrap(AuthMiddleware::new(jwt_service.clone()))
            .app_data(handlers::json_config())
            .app_data(web::Data::new(media_resolver.clone()))
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(pile_draw_service.clone()))
            .app_data(web::Data::new(card_pool_service.clone()))
            .app_data(web::Data::new(dashboard_service.clone()))
            .app_data(web::Data::new(journal_service.clone()))
            .app_data(web::Data::new(release_service.clone()))
            .app_data(web::Data::new(game_service.clone()))
            .configure(swagger_config)
            .service(web::scope("/api/v1").configure(handlers::api_config))
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
