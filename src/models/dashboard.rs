use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{AffirmationCategory, affirmation_entity};
use crate::models::LuckCardResponse;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AffirmationResponse {
    pub id: i64,
    pub text: String,
    pub category: AffirmationCategory,
    pub created_at: DateTime<Utc>,
}

impl From<affirmation_entity::Model> for AffirmationResponse {
    fn from(m: affirmation_entity::Model) -> Self {
        Self {
            id: m.id,
            text: m.text,
            category: m.category,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateAffirmationRequest {
    #[schema(example = "I am allowed to rest.")]
    pub text: String,
    #[serde(default)]
    pub category: AffirmationCategory,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardResponse {
    pub date: NaiveDate,
    /// 卡池为空时为 null
    pub luck_card: Option<LuckCardResponse>,
    /// 当天固定的肯定语（最多 5 条）
    pub affirmations: Vec<AffirmationResponse>,
}
