use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "daily_affirmation_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub daily_affirmation_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub affirmation_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::daily_affirmations::Entity",
        from = "Column::DailyAffirmationId",
        to = "super::daily_affirmations::Column::Id",
        on_delete = "Cascade"
    )]
    DailyAffirmation,
    #[sea_orm(
        belongs_to = "super::affirmations::Entity",
        from = "Column::AffirmationId",
        to = "super::affirmations::Column::Id",
        on_delete = "Cascade"
    )]
    Affirmation,
}

impl ActiveModelBehavior for ActiveModel {}
