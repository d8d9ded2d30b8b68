use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::release_note_entity;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReleaseNoteResponse {
    pub id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<release_note_entity::Model> for ReleaseNoteResponse {
    fn from(m: release_note_entity::Model) -> Self {
        Self {
            id: m.id,
            content: m.content,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateReleaseNoteRequest {
    #[schema(example = "I keep replaying that meeting.")]
    pub content: String,
}
