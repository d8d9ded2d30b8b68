use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::AffirmationCategory;
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::refresh,
        handlers::auth::logout,
        handlers::piles::get_piles,
        handlers::dashboard::get_dashboard,
        handlers::journal::list_entries,
        handlers::journal::create_entry,
        handlers::journal::update_entry,
        handlers::journal::delete_entry,
        handlers::release::list_notes,
        handlers::release::create_note,
        handlers::release::delete_note,
        handlers::games::submit_score,
        handlers::games::high_scores,
        handlers::admin::list_luck_cards,
        handlers::admin::create_luck_card,
        handlers::admin::create_affirmation,
    ),
    components(
        schemas(
            ErrorResponse,
            RegisterRequest,
            LoginRequest,
            UserResponse,
            AuthResponse,
            PileResponse,
            PilesResponse,
            LuckCardResponse,
            CreateLuckCardRequest,
            AffirmationCategory,
            AffirmationResponse,
            CreateAffirmationRequest,
            DashboardResponse,
            JournalEntryResponse,
            JournalDayGroup,
            JournalOverviewResponse,
            JournalEntryRequest,
            ReleaseNoteResponse,
            CreateReleaseNoteRequest,
            SubmitScoreRequest,
            GameScoreResponse,
            HighScoreEntry,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Authentication API"),
        (name = "piles", description = "Daily three-pile card draw"),
        (name = "dashboard", description = "Luck card and daily affirmations"),
        (name = "journal", description = "Journal entries and streak"),
        (name = "release", description = "Write down and let go"),
        (name = "games", description = "Mini-game scores"),
        (name = "admin", description = "Card pool and affirmation maintenance"),
    ),
    info(
        title = "DailySoul Backend API",
        version = "1.0.0",
        description = "DailySoul Backend REST API documentation"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
