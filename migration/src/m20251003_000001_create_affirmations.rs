use sea_orm_migration::prelude::*;

use crate::m20251002_000001_create_users::Users;

/// 肯定语 (管理员维护)
#[derive(DeriveIden)]
enum Affirmations {
    Table,
    Id,
    Text,
    Category,
    CreatedAt,
}

/// 每日肯定语 (每个用户每天一条)
#[derive(DeriveIden)]
enum DailyAffirmations {
    Table,
    Id,
    UserId,
    Date,
    CreatedAt,
}

/// 每日肯定语与肯定语的多对多关联
#[derive(DeriveIden)]
enum DailyAffirmationItems {
    Table,
    DailyAffirmationId,
    AffirmationId,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// category 取值: self-love / motivation / calm / gratitude / healing
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Affirmations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Affirmations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Affirmations::Text).text().not_null())
                    .col(
                        ColumnDef::new(Affirmations::Category)
                            .string_len(50)
                            .not_null()
                            .default("self-love"),
                    )
                    .col(
                        ColumnDef::new(Affirmations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DailyAffirmations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DailyAffirmations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DailyAffirmations::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DailyAffirmations::Date).date().not_null())
                    .col(
                        ColumnDef::new(DailyAffirmations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_daily_affirmations_user")
                            .from(DailyAffirmations::Table, DailyAffirmations::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // (user_id, date) 唯一
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_daily_affirmations_user_date_unique")
                    .table(DailyAffirmations::Table)
                    .col(DailyAffirmations::UserId)
                    .col(DailyAffirmations::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DailyAffirmationItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DailyAffirmationItems::DailyAffirmationId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DailyAffirmationItems::AffirmationId)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(DailyAffirmationItems::DailyAffirmationId)
                            .col(DailyAffirmationItems::AffirmationId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_daily_affirmation_items_daily")
                            .from(
                                DailyAffirmationItems::Table,
                                DailyAffirmationItems::DailyAffirmationId,
                            )
                            .to(DailyAffirmations::Table, DailyAffirmations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_daily_affirmation_items_affirmation")
                            .from(
                                DailyAffirmationItems::Table,
                                DailyAffirmationItems::AffirmationId,
                            )
                            .to(Affirmations::Table, Affirmations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 删除顺序：关联 -> 每日 -> 肯定语
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(DailyAffirmationItems::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(DailyAffirmations::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(Affirmations::Table)
                    .to_owned(),
            )
            .await
    }
}
