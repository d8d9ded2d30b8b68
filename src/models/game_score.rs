use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::game_score_entity;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmitScoreRequest {
    #[schema(example = 1200)]
    pub score: i64,
    #[schema(example = 48)]
    pub bubbles_popped: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GameScoreResponse {
    pub id: i64,
    pub score: i64,
    pub bubbles_popped: i64,
    pub created_at: DateTime<Utc>,
}

impl From<game_score_entity::Model> for GameScoreResponse {
    fn from(m: game_score_entity::Model) -> Self {
        Self {
            id: m.id,
            score: m.score,
            bubbles_popped: m.bubbles_popped,
            created_at: m.created_at,
        }
    }
}

/// 排行榜条目
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HighScoreEntry {
    pub username: String,
    pub score: i64,
    pub bubbles_popped: i64,
    pub created_at: DateTime<Utc>,
}
