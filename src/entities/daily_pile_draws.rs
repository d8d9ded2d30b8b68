use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 每天最多抽卡次数
pub const MAX_DRAWS_PER_DAY: i32 = 3;

/// 每日抽卡记录实体
/// 说明:
/// - (user_id, date) 唯一，首次访问时惰性创建
/// - draw_count 只在抽卡事务内递增，范围 [0, MAX_DRAWS_PER_DAY]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "daily_pile_draws")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub draw_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Model {
    /// 今日剩余抽卡次数
    pub fn remaining_draws(&self) -> i32 {
        (MAX_DRAWS_PER_DAY - self.draw_count).max(0)
    }

    pub fn is_exhausted(&self) -> bool {
        self.draw_count >= MAX_DRAWS_PER_DAY
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::pile_card_selections::Entity")]
    Selections,
}

impl Related<super::pile_card_selections::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Selections.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
