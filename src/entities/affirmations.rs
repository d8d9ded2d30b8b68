use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(50))")]
#[serde(rename_all = "kebab-case")]
pub enum AffirmationCategory {
    #[sea_orm(string_value = "self-love")]
    SelfLove,
    #[sea_orm(string_value = "motivation")]
    Motivation,
    #[sea_orm(string_value = "calm")]
    Calm,
    #[sea_orm(string_value = "gratitude")]
    Gratitude,
    #[sea_orm(string_value = "healing")]
    Healing,
}

impl Default for AffirmationCategory {
    fn default() -> Self {
        AffirmationCategory::SelfLove
    }
}

impl std::fmt::Display for AffirmationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AffirmationCategory::SelfLove => write!(f, "self-love"),
            AffirmationCategory::Motivation => write!(f, "motivation"),
            AffirmationCategory::Calm => write!(f, "calm"),
            AffirmationCategory::Gratitude => write!(f, "gratitude"),
            AffirmationCategory::Healing => write!(f, "healing"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "affirmations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub text: String,
    pub category: AffirmationCategory,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::daily_affirmations::Entity> for Entity {
    fn to() -> RelationDef {
        super::daily_affirmation_items::Relation::DailyAffirmation.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::daily_affirmation_items::Relation::Affirmation.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
