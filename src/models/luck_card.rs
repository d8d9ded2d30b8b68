use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::luck_card_entity;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LuckCardResponse {
    pub id: i64,
    pub message: String,
    /// 相对 media 路径
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<luck_card_entity::Model> for LuckCardResponse {
    fn from(m: luck_card_entity::Model) -> Self {
        Self {
            id: m.id,
            message: m.message,
            image: m.image,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateLuckCardRequest {
    #[schema(example = "Today you will find a quiet moment of joy.")]
    pub message: String,
    #[schema(example = "luck_cards/sunrise.jpg")]
    pub image: Option<String>,
}
