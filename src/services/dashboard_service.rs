use crate::entities::{
    affirmation_entity as affirmations, daily_affirmation_entity as daily,
    daily_affirmation_item_entity as items,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::load_pool;
use crate::utils::{RandomSource, sample_without_replacement};
use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    ModelTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::sync::Arc;

/// 每天展示的肯定语条数上限
pub const DAILY_AFFIRMATION_COUNT: usize = 5;

#[derive(Clone)]
pub struct DashboardService {
    pool: DatabaseConnection,
    random: Arc<dyn RandomSource>,
}

impl DashboardService {
    pub fn new(pool: DatabaseConnection, random: Arc<dyn RandomSource>) -> Self {
        Self { pool, random }
    }

    /// 仪表盘：一张随机幸运卡 + 当天固定的肯定语
    pub async fn dashboard(&self, user_id: i64, today: NaiveDate) -> AppResult<DashboardResponse> {
        let cards = load_pool(&self.pool).await?;
        let luck_card = sample_without_replacement(&cards, 1, &mut self.random.rng())
            .into_iter()
            .next()
            .map(Into::into);

        let affirmations = self.daily_affirmations(user_id, today).await?;

        Ok(DashboardResponse {
            date: today,
            luck_card,
            affirmations,
        })
    }

    /// 当天首次访问时抽取并保存，之后返回同一组。
    /// 首次访问时肯定语库为空则当天保持为空。
    pub async fn daily_affirmations(
        &self,
        user_id: i64,
        today: NaiveDate,
    ) -> AppResult<Vec<AffirmationResponse>> {
        let txn = self.pool.begin().await?;

        let inserted = daily::Entity::insert(daily::ActiveModel {
            user_id: Set(user_id),
            date: Set(today),
            created_at: Set(Utc::now()),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::columns([daily::Column::UserId, daily::Column::Date])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&txn)
        .await?;

        let record = daily::Entity::find()
            .filter(daily::Column::UserId.eq(user_id))
            .filter(daily::Column::Date.eq(today))
            .one(&txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("daily affirmation".into()))?;

        if inserted == 1 {
            self.select_for_day(&txn, record.id).await?;
        }

        let list = record
            .find_related(affirmations::Entity)
            .order_by_asc(affirmations::Column::Id)
            .all(&txn)
            .await?;

        txn.commit().await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    async fn select_for_day<C: ConnectionTrait>(&self, db: &C, daily_id: i64) -> AppResult<()> {
        let ids: Vec<i64> = affirmations::Entity::find()
            .order_by_asc(affirmations::Column::Id)
            .all(db)
            .await?
            .into_iter()
            .map(|a| a.id)
            .collect();

        let picked = sample_without_replacement(&ids, DAILY_AFFIRMATION_COUNT, &mut self.random.rng());
        if picked.is_empty() {
            log::warn!("No affirmations available for daily set {daily_id}");
            return Ok(());
        }

        let rows = picked.into_iter().map(|affirmation_id| items::ActiveModel {
            daily_affirmation_id: Set(daily_id),
            affirmation_id: Set(affirmation_id),
        });
        items::Entity::insert_many(rows)
            .exec_without_returning(db)
            .await?;
        Ok(())
    }

    /// 新增肯定语（管理员）
    pub async fn create_affirmation(
        &self,
        req: CreateAffirmationRequest,
    ) -> AppResult<AffirmationResponse> {
        let text = req.text.trim();
        if text.is_empty() {
            return Err(AppError::ValidationError(
                "Affirmation text cannot be empty.".to_string(),
            ));
        }

        let saved = affirmations::ActiveModel {
            text: Set(text.to_string()),
            category: Set(req.category),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;
        Ok(saved.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::database::{create_pool, run_migrations};
    use crate::entities::{AffirmationCategory, luck_card_entity, user_entity as users};
    use crate::utils::{EntropySource, SeededSource};
    use chrono::Duration;

    async fn setup() -> (DatabaseConnection, i64) {
        let pool = create_pool(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        })
        .await
        .unwrap();
        run_migrations(&pool).await.unwrap();
        let user = users::ActiveModel {
            username: Set("luna".into()),
            email: Set(None),
            password_hash: Set("x".into()),
            is_staff: Set(false),
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&pool)
        .await
        .unwrap();
        (pool, user.id)
    }

    async fn seed_affirmations(service: &DashboardService, n: usize) {
        for i in 0..n {
            service
                .create_affirmation(CreateAffirmationRequest {
                    text: format!("affirmation {i}"),
                    category: AffirmationCategory::Calm,
                })
                .await
                .unwrap();
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 14).unwrap()
    }

    #[tokio::test]
    async fn test_daily_affirmations_are_stable_for_the_day() {
        let (pool, user_id) = setup().await;
        let service = DashboardService::new(pool, Arc::new(EntropySource));
        seed_affirmations(&service, 12).await;

        let first = service.daily_affirmations(user_id, today()).await.unwrap();
        assert_eq!(first.len(), DAILY_AFFIRMATION_COUNT);

        let again = service.daily_affirmations(user_id, today()).await.unwrap();
        assert_eq!(first, again);

        let tomorrow = service
            .daily_affirmations(user_id, today() + Duration::days(1))
            .await
            .unwrap();
        assert_eq!(tomorrow.len(), DAILY_AFFIRMATION_COUNT);
    }

    #[tokio::test]
    async fn test_small_library_returns_everything() {
        let (pool, user_id) = setup().await;
        let service = DashboardService::new(pool, Arc::new(SeededSource::new(5)));
        seed_affirmations(&service, 3).await;

        let list = service.daily_affirmations(user_id, today()).await.unwrap();
        assert_eq!(list.len(), 3);
    }

    #[tokio::test]
    async fn test_dashboard_without_cards() {
        let (pool, user_id) = setup().await;
        let service = DashboardService::new(pool.clone(), Arc::new(EntropySource));

        let empty = service.dashboard(user_id, today()).await.unwrap();
        assert!(empty.luck_card.is_none());
        assert!(empty.affirmations.is_empty());

        let card = luck_card_entity::ActiveModel {
            message: Set("breathe".into()),
            image: Set(None),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&pool)
        .await
        .unwrap();

        let shown = service.dashboard(user_id, today()).await.unwrap();
        assert_eq!(shown.luck_card.map(|c| c.id), Some(card.id));
    }

    #[tokio::test]
    async fn test_blank_affirmation_rejected() {
        let (pool, _) = setup().await;
        let service = DashboardService::new(pool, Arc::new(EntropySource));
        let err = service
            .create_affirmation(CreateAffirmationRequest {
                text: "  ".into(),
                category: AffirmationCategory::default(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }
}
