use crate::entities::{
    MAX_DRAWS_PER_DAY, daily_pile_draw_entity as draws, luck_card_entity as cards,
    pile_card_selection_entity as selections,
};
use crate::error::{AppError, AppResult};
use crate::services::load_pool;
use crate::utils::{RandomSource, sample_without_replacement};
use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};
use std::sync::Arc;

/// 每次抽卡的牌堆数
pub const CARDS_PER_DRAW: usize = 3;

// 每次条件更新失败都说明另一个请求成功递增了一次计数，
// 因此最多失败 MAX_DRAWS_PER_DAY 次，下一轮必然进入终态。
const MAX_DRAW_ATTEMPTS: usize = MAX_DRAWS_PER_DAY as usize + 1;

/// 抽卡接口的四种状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawState {
    /// 卡池不足 3 张，不抽卡也不修改数据
    InsufficientPool,
    /// 今日次数已用完，返回已保存的结果
    QuotaExhaustedWithSelections,
    /// 次数已用完但没有保存的结果（计数与结果不一致），返回临时样本
    QuotaExhaustedInconsistent,
    /// 还有次数，执行一次新的抽卡
    QuotaAvailable,
}

impl DrawState {
    pub fn classify(draw_count: i32, pool_size: usize, has_selections: bool) -> Self {
        if pool_size < CARDS_PER_DRAW {
            DrawState::InsufficientPool
        } else if draw_count >= MAX_DRAWS_PER_DAY {
            if has_selections {
                DrawState::QuotaExhaustedWithSelections
            } else {
                DrawState::QuotaExhaustedInconsistent
            }
        } else {
            DrawState::QuotaAvailable
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            DrawState::InsufficientPool => Some("Not enough cards available"),
            DrawState::QuotaExhaustedWithSelections => Some("Maximum draws reached for today"),
            DrawState::QuotaExhaustedInconsistent => {
                Some("Maximum draws reached for today (no saved selections found)")
            }
            DrawState::QuotaAvailable => None,
        }
    }

    /// 返回的牌堆是否来自已保存的抽卡结果
    pub fn is_persisted(&self) -> bool {
        matches!(
            self,
            DrawState::QuotaExhaustedWithSelections | DrawState::QuotaAvailable
        )
    }
}

/// 落在某个位置上的卡片
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnPile {
    pub position: i32,
    pub card: cards::Model,
}

/// 一次抽卡请求的结果
#[derive(Debug, Clone)]
pub struct PileDrawOutcome {
    pub state: DrawState,
    /// 请求结束时的每日记录（新抽卡后为递增后的记录）
    pub record: draws::Model,
    pub piles: Vec<DrawnPile>,
}

impl PileDrawOutcome {
    pub fn draw_allowed(&self) -> bool {
        !self.record.is_exhausted()
    }
}

/// 获取或创建某用户某天的抽卡记录，返回 (记录, 是否新建)。
/// 并发首次访问时由唯一索引 + ON CONFLICT DO NOTHING 保证只有一条。
pub async fn get_or_create_record<C: ConnectionTrait>(
    db: &C,
    user_id: i64,
    date: NaiveDate,
) -> Result<(draws::Model, bool), DbErr> {
    if let Some(m) = find_record(db, user_id, date).await? {
        return Ok((m, false));
    }

    let now = Utc::now();
    let inserted = draws::Entity::insert(draws::ActiveModel {
        user_id: Set(user_id),
        date: Set(date),
        draw_count: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    })
    .on_conflict(
        OnConflict::columns([draws::Column::UserId, draws::Column::Date])
            .do_nothing()
            .to_owned(),
    )
    .exec_without_returning(db)
    .await?;

    let record = find_record(db, user_id, date)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound("daily pile draw".into()))?;
    Ok((record, inserted == 1))
}

async fn find_record<C: ConnectionTrait>(
    db: &C,
    user_id: i64,
    date: NaiveDate,
) -> Result<Option<draws::Model>, DbErr> {
    draws::Entity::find()
        .filter(draws::Column::UserId.eq(user_id))
        .filter(draws::Column::Date.eq(date))
        .one(db)
        .await
}

#[derive(Clone)]
pub struct PileDrawService {
    pool: DatabaseConnection,
    random: Arc<dyn RandomSource>,
}

impl PileDrawService {
    pub fn new(pool: DatabaseConnection, random: Arc<dyn RandomSource>) -> Self {
        Self { pool, random }
    }

    pub async fn get_or_create_today_record(
        &self,
        user_id: i64,
        today: NaiveDate,
    ) -> AppResult<(draws::Model, bool)> {
        Ok(get_or_create_record(&self.pool, user_id, today).await?)
    }

    /// 读取某条每日记录已保存的抽卡结果（按位置排序）
    pub async fn saved_piles(&self, daily_draw_id: i64) -> AppResult<Vec<DrawnPile>> {
        let rows = selections::Entity::find()
            .filter(selections::Column::DailyDrawId.eq(daily_draw_id))
            .order_by_asc(selections::Column::Position)
            .find_also_related(cards::Entity)
            .all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(sel, card)| {
                card.map(|card| DrawnPile {
                    position: sel.position,
                    card,
                })
            })
            .collect())
    }

    /// 抽卡
    ///
    /// 逻辑:
    /// 1. 获取或创建今日记录，读取卡池
    /// 2. 根据次数 / 卡池大小 / 已保存结果判断状态
    /// 3. 仅在 QuotaAvailable 时开启事务：条件递增计数、删除旧结果、抽样、写入新结果
    /// 4. 条件递增失败（并发抽卡抢先）时回滚并重新判断
    pub async fn draw(&self, user_id: i64, today: NaiveDate) -> AppResult<PileDrawOutcome> {
        let (mut record, created) = self.get_or_create_today_record(user_id, today).await?;
        if created {
            log::debug!("Created daily pile draw record {} for user {user_id}", record.id);
        }

        let pool = load_pool(&self.pool).await?;

        for attempt in 1..=MAX_DRAW_ATTEMPTS {
            let saved = if pool.len() >= CARDS_PER_DRAW && record.is_exhausted() {
                self.saved_piles(record.id).await?
            } else {
                Vec::new()
            };

            let state = DrawState::classify(record.draw_count, pool.len(), !saved.is_empty());
            match state {
                DrawState::InsufficientPool => {
                    return Ok(PileDrawOutcome {
                        state,
                        record,
                        piles: Vec::new(),
                    });
                }
                DrawState::QuotaExhaustedWithSelections => {
                    return Ok(PileDrawOutcome {
                        state,
                        record,
                        piles: saved,
                    });
                }
                DrawState::QuotaExhaustedInconsistent => {
                    log::warn!(
                        "Daily pile draw {} has draw_count {} but no saved selections, returning unsaved sample",
                        record.id,
                        record.draw_count
                    );
                    let piles = self.sample_piles(&pool);
                    return Ok(PileDrawOutcome {
                        state,
                        record,
                        piles,
                    });
                }
                DrawState::QuotaAvailable => {
                    if let Some((updated, piles)) = self.commit_draw(&record, &pool).await? {
                        log::info!(
                            "User {user_id} drew piles ({}/{MAX_DRAWS_PER_DAY}) on {today}",
                            updated.draw_count
                        );
                        return Ok(PileDrawOutcome {
                            state,
                            record: updated,
                            piles,
                        });
                    }

                    log::warn!(
                        "Concurrent draw detected for record {} (attempt {attempt}), re-evaluating",
                        record.id
                    );
                    record = find_record(&self.pool, user_id, today)
                        .await?
                        .ok_or_else(|| DbErr::RecordNotFound("daily pile draw".into()))?;
                }
            }
        }

        Err(AppError::DrawFailed(
            "Draw could not be completed, please retry".into(),
        ))
    }

    /// 在单个事务中完成一次抽卡。
    /// 返回 None 表示计数已被并发请求修改，本次事务已回滚。
    async fn commit_draw(
        &self,
        record: &draws::Model,
        pool: &[cards::Model],
    ) -> AppResult<Option<(draws::Model, Vec<DrawnPile>)>> {
        let txn = self.pool.begin().await?;

        // 乐观检查: 仅当计数仍为读取时的值才递增 (Postgres 上同时持有行锁)
        let result = draws::Entity::update_many()
            .col_expr(
                draws::Column::DrawCount,
                Expr::col(draws::Column::DrawCount).add(1),
            )
            .col_expr(draws::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(draws::Column::Id.eq(record.id))
            .filter(draws::Column::DrawCount.eq(record.draw_count))
            .filter(draws::Column::DrawCount.lt(MAX_DRAWS_PER_DAY))
            .exec(&txn)
            .await?;

        if result.rows_affected != 1 {
            txn.rollback().await?;
            return Ok(None);
        }

        selections::Entity::delete_many()
            .filter(selections::Column::DailyDrawId.eq(record.id))
            .exec(&txn)
            .await?;

        let piles = self.sample_piles(pool);
        let rows = piles.iter().map(|pile| selections::ActiveModel {
            daily_draw_id: Set(record.id),
            card_id: Set(pile.card.id),
            position: Set(pile.position),
            ..Default::default()
        });
        selections::Entity::insert_many(rows)
            .exec_without_returning(&txn)
            .await?;

        let updated = draws::Entity::find_by_id(record.id)
            .one(&txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("daily pile draw".into()))?;

        txn.commit().await?;
        Ok(Some((updated, piles)))
    }

    fn sample_piles(&self, pool: &[cards::Model]) -> Vec<DrawnPile> {
        let mut rng = self.random.rng();
        sample_without_replacement(pool, CARDS_PER_DRAW, &mut rng)
            .into_iter()
            .zip(1..)
            .map(|(card, position)| DrawnPile { position, card })
            .collect()
    }
}
