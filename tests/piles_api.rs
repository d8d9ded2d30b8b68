use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use serde_json::{Value, json};
use std::collections::HashSet;
use std::sync::Arc;

use dailysoul_backend::{
    config::{DatabaseConfig, MediaConfig},
    database::{create_pool, run_migrations},
    entities::{luck_card_entity, user_entity},
    handlers,
    middlewares::AuthMiddleware,
    services::*,
    utils::{JwtService, MediaResolver, RandomSource, SeededSource},
};

struct TestContext {
    pool: DatabaseConnection,
    jwt: JwtService,
}

async fn setup() -> TestContext {
    let pool = create_pool(&DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
    })
    .await
    .unwrap();
    run_migrations(&pool).await.unwrap();
    TestContext {
        pool,
        jwt: JwtService::new("test-secret", 3600, 7200),
    }
}

macro_rules! init_app {
    ($ctx:expr) => {{
        let random: Arc<dyn RandomSource> = Arc::new(SeededSource::new(2025));
        test::init_service(
            App::new()
                .wrap(AuthMiddleware::new($ctx.jwt.clone()))
                .app_data(handlers::json_config())
                .app_data(web::Data::new(MediaResolver::new(&MediaConfig::default())))
                .app_data(web::Data::new(AuthService::new(
                    $ctx.pool.clone(),
                    $ctx.jwt.clone(),
                )))
                .app_data(web::Data::new(PileDrawService::new(
                    $ctx.pool.clone(),
                    random.clone(),
                )))
                .app_data(web::Data::new(CardPoolService::new($ctx.pool.clone())))
                .app_data(web::Data::new(DashboardService::new(
                    $ctx.pool.clone(),
                    random,
                )))
                .app_data(web::Data::new(JournalService::new($ctx.pool.clone())))
                .app_data(web::Data::new(ReleaseService::new($ctx.pool.clone())))
                .app_data(web::Data::new(GameService::new($ctx.pool.clone())))
                .service(web::scope("/api/v1").configure(handlers::api_config)),
        )
        .await
    }};
}

async fn create_user(ctx: &TestContext, username: &str, is_staff: bool) -> (i64, String) {
    let user = user_entity::ActiveModel {
        username: Set(username.to_string()),
        email: Set(None),
        password_hash: Set("x".to_string()),
        is_staff: Set(is_staff),
        created_at: Set(Utc::now()),
        updated_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&ctx.pool)
    .await
    .unwrap();
    let token = ctx.jwt.generate_access_token(user.id, username).unwrap();
    (user.id, token)
}

async fn create_cards(ctx: &TestContext, n: usize) {
    for i in 0..n {
        luck_card_entity::ActiveModel {
            message: Set(format!("card {i}")),
            image: Set(if i == 0 {
                None
            } else {
                Some(format!("luck_cards/{i}.jpg"))
            }),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&ctx.pool)
        .await
        .unwrap();
    }
}

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

#[actix_web::test]
async fn test_piles_requires_login() {
    let ctx = setup().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/api/v1/piles").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Authentication required" }));

    let req = test::TestRequest::get()
        .uri("/api/v1/piles")
        .insert_header(bearer("not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_piles_rejects_other_methods_before_auth() {
    let ctx = setup().await;
    let app = init_app!(ctx);

    for req in [
        test::TestRequest::post().uri("/api/v1/piles").to_request(),
        test::TestRequest::delete().uri("/api/v1/piles").to_request(),
    ] {
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Method not allowed" }));
    }
}

#[actix_web::test]
async fn test_daily_draw_flow() {
    let ctx = setup().await;
    create_cards(&ctx, 5).await;
    let (_, token) = create_user(&ctx, "luna", false).await;
    let app = init_app!(ctx);

    let mut last = Value::Null;
    for remaining in [2, 1, 0] {
        let req = test::TestRequest::get()
            .uri("/api/v1/piles")
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;

        assert_eq!(body["remaining_draws"], remaining);
        assert_eq!(body["draw_allowed"], remaining > 0);
        assert_eq!(body["persisted"], true);
        assert!(body.get("message").is_none());

        let piles = body["piles"].as_array().unwrap();
        let ids: Vec<i64> = piles.iter().map(|p| p["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        let messages: HashSet<&str> = piles
            .iter()
            .map(|p| p["message"].as_str().unwrap())
            .collect();
        assert_eq!(messages.len(), 3);
        for pile in piles {
            let url = pile["image_url"].as_str().unwrap();
            assert!(url.starts_with("http://localhost:8080/"), "{url}");
        }
        last = body;
    }

    let req = test::TestRequest::get()
        .uri("/api/v1/piles")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["piles"], last["piles"]);
    assert_eq!(body["remaining_draws"], 0);
    assert_eq!(body["draw_allowed"], false);
    assert_eq!(body["message"], "Maximum draws reached for today");
}

#[actix_web::test]
async fn test_small_pool_returns_empty_piles() {
    let ctx = setup().await;
    create_cards(&ctx, 2).await;
    let (_, token) = create_user(&ctx, "luna", false).await;
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/v1/piles")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        body,
        json!({
            "piles": [],
            "remaining_draws": 3,
            "draw_allowed": true,
            "persisted": false,
            "message": "Not enough cards available"
        })
    );
}

#[actix_web::test]
async fn test_register_login_and_draw() {
    let ctx = setup().await;
    create_cards(&ctx, 3).await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({
            "username": "sol",
            "email": "Sol@Example.com",
            "password1": "quiet-morning-7",
            "password2": "quiet-morning-7"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "username": "sol@example.com", "password": "quiet-morning-7" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let token = body["data"]["access_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/api/v1/piles")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["piles"].as_array().unwrap().len(), 3);
    assert_eq!(body["remaining_draws"], 2);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "username": "sol", "password": "wrong-password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({ "error": "Login failed, please check your credentials." })
    );
}

#[actix_web::test]
async fn test_admin_requires_staff() {
    let ctx = setup().await;
    let (_, user_token) = create_user(&ctx, "luna", false).await;
    let (_, staff_token) = create_user(&ctx, "keeper", true).await;
    let app = init_app!(ctx);

    let card = json!({ "message": "Breathe in, breathe out.", "image": "luck_cards/calm.jpg" });

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/luck-cards")
        .insert_header(bearer(&user_token))
        .set_json(&card)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/luck-cards")
        .insert_header(bearer(&staff_token))
        .set_json(&card)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/luck-cards")
        .insert_header(bearer(&staff_token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_journal_and_release_endpoints() {
    let ctx = setup().await;
    let (_, token) = create_user(&ctx, "luna", false).await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/journal")
        .insert_header(bearer(&token))
        .set_json(json!({ "title": "Evening", "content": "A calm walk." }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::get()
        .uri("/api/v1/journal")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["streak"], 1);
    assert_eq!(body["data"]["days"][0]["entries"][0]["title"], "Evening");

    let req = test::TestRequest::delete()
        .uri("/api/v1/journal/999")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/api/v1/release")
        .insert_header(bearer(&token))
        .set_json(json!({ "content": "   " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({ "error": "Please write something before submitting." })
    );
}
