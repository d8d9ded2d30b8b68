use sea_orm_migration::prelude::*;

use crate::m20251002_000001_create_users::Users;

/// Luck Cards (幸运卡池，管理员维护)
#[derive(DeriveIden)]
enum LuckCards {
    Table,
    Id,
    Message,
    Image,
    CreatedAt,
}

/// Daily Pile Draws (用户每日抽卡次数)
#[derive(DeriveIden)]
enum DailyPileDraws {
    Table,
    Id,
    UserId,
    Date,
    DrawCount,
    CreatedAt,
    UpdatedAt,
}

/// Pile Card Selections (某天某次抽卡落在 1..3 号位的卡片)
#[derive(DeriveIden)]
enum PileCardSelections {
    Table,
    Id,
    DailyDrawId,
    CardId,
    Position,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 约束说明:
/// - daily_pile_draws (user_id, date) 唯一，并发首次访问靠 ON CONFLICT 兜底
/// - draw_count 范围 [0, 3]
/// - pile_card_selections (daily_draw_id, position) 唯一，position 范围 [1, 3]
/// - 卡片被抽中后不允许删除 (RESTRICT)，保证历史抽卡可回溯
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 卡池
        manager
            .create_table(
                Table::create()
                    .table(LuckCards::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LuckCards::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LuckCards::Message).string_len(200).not_null())
                    .col(
                        ColumnDef::new(LuckCards::Image)
                            .string_len(255)
                            .null(), // 相对 media 路径，例如 luck_cards/sun.jpg
                    )
                    .col(
                        ColumnDef::new(LuckCards::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // 每日抽卡记录
        manager
            .create_table(
                Table::create()
                    .table(DailyPileDraws::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DailyPileDraws::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DailyPileDraws::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DailyPileDraws::Date).date().not_null())
                    .col(
                        ColumnDef::new(DailyPileDraws::DrawCount)
                            .integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(DailyPileDraws::DrawCount).between(0, 3)),
                    )
                    .col(
                        ColumnDef::new(DailyPileDraws::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(DailyPileDraws::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_daily_pile_draws_user")
                            .from(DailyPileDraws::Table, DailyPileDraws::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 一个用户一天一条记录
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_daily_pile_draws_user_date_unique")
                    .table(DailyPileDraws::Table)
                    .col(DailyPileDraws::UserId)
                    .col(DailyPileDraws::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 抽中的卡片
        manager
            .create_table(
                Table::create()
                    .table(PileCardSelections::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PileCardSelections::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PileCardSelections::DailyDrawId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PileCardSelections::CardId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PileCardSelections::Position)
                            .integer()
                            .not_null()
                            .check(Expr::col(PileCardSelections::Position).between(1, 3)),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pile_card_selections_daily_draw")
                            .from(PileCardSelections::Table, PileCardSelections::DailyDrawId)
                            .to(DailyPileDraws::Table, DailyPileDraws::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pile_card_selections_card")
                            .from(PileCardSelections::Table, PileCardSelections::CardId)
                            .to(LuckCards::Table, LuckCards::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_pile_card_selections_draw_position_unique")
                    .table(PileCardSelections::Table)
                    .col(PileCardSelections::DailyDrawId)
                    .col(PileCardSelections::Position)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 删除顺序：选择 -> 每日记录 -> 卡池
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(PileCardSelections::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(DailyPileDraws::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().if_exists().table(LuckCards::Table).to_owned())
            .await?;

        Ok(())
    }
}
