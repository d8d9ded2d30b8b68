use sea_orm_migration::prelude::*;

use crate::m20251002_000001_create_users::Users;

#[derive(DeriveIden)]
enum GameScores {
    Table,
    Id,
    UserId,
    Game,
    Score,
    BubblesPopped,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GameScores::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GameScores::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GameScores::UserId).big_integer().not_null())
                    // 目前只有 bubble_pop
                    .col(ColumnDef::new(GameScores::Game).string_len(50).not_null())
                    .col(ColumnDef::new(GameScores::Score).big_integer().not_null())
                    .col(
                        ColumnDef::new(GameScores::BubblesPopped)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(GameScores::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_scores_user")
                            .from(GameScores::Table, GameScores::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 排行榜查询
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_game_scores_game_score")
                    .table(GameScores::Table)
                    .col(GameScores::Game)
                    .col(GameScores::Score)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().if_exists().table(GameScores::Table).to_owned())
            .await
    }
}
