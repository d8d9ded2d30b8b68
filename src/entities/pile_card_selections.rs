use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 抽卡结果实体
/// - 每次抽卡整体替换 (先删后插)，不做局部更新
/// - (daily_draw_id, position) 唯一，position 取 1..=3
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "pile_card_selections")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub daily_draw_id: i64,
    pub card_id: i64,
    pub position: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::daily_pile_draws::Entity",
        from = "Column::DailyDrawId",
        to = "super::daily_pile_draws::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    DailyDraw,
    #[sea_orm(
        belongs_to = "super::luck_cards::Entity",
        from = "Column::CardId",
        to = "super::luck_cards::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Card,
}

impl Related<super::daily_pile_draws::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DailyDraw.def()
    }
}

impl Related<super::luck_cards::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Card.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
