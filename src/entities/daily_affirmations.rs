use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;

/// 每日肯定语记录：(user_id, date) 唯一，当天首次访问仪表盘时选定
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "daily_affirmations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::affirmations::Entity> for Entity {
    fn to() -> RelationDef {
        super::daily_affirmation_items::Relation::Affirmation.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::daily_affirmation_items::Relation::DailyAffirmation.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
