use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::journal_entry_entity;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JournalEntryResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<journal_entry_entity::Model> for JournalEntryResponse {
    fn from(m: journal_entry_entity::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            content: m.content,
            created_at: m.created_at,
        }
    }
}

/// 同一天的日记
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JournalDayGroup {
    pub date: NaiveDate,
    pub entries: Vec<JournalEntryResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JournalOverviewResponse {
    /// 按日期倒序
    pub days: Vec<JournalDayGroup>,
    /// 截至今天的连续写日记天数
    pub streak: u32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct JournalEntryRequest {
    #[schema(example = "Morning pages")]
    pub title: String,
    #[schema(example = "Slept well and felt rested.")]
    pub content: String,
}
