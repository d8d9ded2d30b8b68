pub use sea_orm_migration::prelude::*;

mod m20251002_000001_create_users;
mod m20251002_000002_create_journal_and_release;
mod m20251003_000001_create_affirmations;
mod m20251005_000001_add_pile_draw;
mod m20251008_000001_add_game_scores;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251002_000001_create_users::Migration),
            Box::new(m20251002_000002_create_journal_and_release::Migration),
            Box::new(m20251003_000001_create_affirmations::Migration),
            Box::new(m20251005_000001_add_pile_draw::Migration),
            Box::new(m20251008_000001_add_game_scores::Migration),
        ]
    }
}
