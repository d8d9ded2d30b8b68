use sea_orm_migration::prelude::*;

use crate::m20251002_000001_create_users::Users;

#[derive(DeriveIden)]
enum JournalEntries {
    Table,
    Id,
    UserId,
    Title,
    Content,
    CreatedAt,
}

/// 释放记录 (写下并放下的负面想法)
#[derive(DeriveIden)]
enum ReleaseNotes {
    Table,
    Id,
    UserId,
    Content,
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
                    .table(JournalEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(JournalEntries::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(JournalEntries::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(JournalEntries::Title)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(JournalEntries::Content).text().not_null())
                    .col(
                        ColumnDef::new(JournalEntries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_journal_entries_user")
                            .from(JournalEntries::Table, JournalEntries::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_journal_entries_user_created")
                    .table(JournalEntries::Table)
                    .col(JournalEntries::UserId)
                    .col(JournalEntries::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ReleaseNotes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ReleaseNotes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ReleaseNotes::UserId).big_integer().not_null())
                    .col(ColumnDef::new(ReleaseNotes::Content).text().not_null())
                    .col(
                        ColumnDef::new(ReleaseNotes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_release_notes_user")
                            .from(ReleaseNotes::Table, ReleaseNotes::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_release_notes_user")
                    .table(ReleaseNotes::Table)
                    .col(ReleaseNotes::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(ReleaseNotes::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(JournalEntries::Table)
                    .to_owned(),
            )
            .await
    }
}
