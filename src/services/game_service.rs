use crate::entities::game_score_entity::{self as scores, BUBBLE_POP};
use crate::entities::user_entity as users;
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

/// 排行榜条数
pub const HIGH_SCORE_LIMIT: u64 = 5;

#[derive(Clone)]
pub struct GameService {
    pool: DatabaseConnection,
}

impl GameService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn submit_score(
        &self,
        user_id: i64,
        req: SubmitScoreRequest,
    ) -> AppResult<GameScoreResponse> {
        if req.score < 0 || req.bubbles_popped < 0 {
            return Err(AppError::ValidationError(
                "Score and bubbles popped must be non-negative.".to_string(),
            ));
        }

        let saved = scores::ActiveModel {
            user_id: Set(user_id),
            game: Set(BUBBLE_POP.to_string()),
            score: Set(req.score),
            bubbles_popped: Set(req.bubbles_popped),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::debug!("User {user_id} scored {} in {BUBBLE_POP}", saved.score);
        Ok(saved.into())
    }

    /// 最高分前 5，同分按先达成者靠前
    pub async fn high_scores(&self) -> AppResult<Vec<HighScoreEntry>> {
        let rows = scores::Entity::find()
            .filter(scores::Column::Game.eq(BUBBLE_POP))
            .order_by_desc(scores::Column::Score)
            .order_by_asc(scores::Column::CreatedAt)
            .order_by_asc(scores::Column::Id)
            .limit(HIGH_SCORE_LIMIT)
            .find_also_related(users::Entity)
            .all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(score, user)| HighScoreEntry {
                username: user.map(|u| u.username).unwrap_or_default(),
                score: score.score,
                bubbles_popped: score.bubbles_popped,
                created_at: score.created_at,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::database::{create_pool, run_migrations};

    async fn setup() -> (GameService, DatabaseConnection) {
        let pool = create_pool(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        })
        .await
        .unwrap();
        run_migrations(&pool).await.unwrap();
        (GameService::new(pool.clone()), pool)
    }

    async fn create_user(db: &DatabaseConnection, username: &str) -> i64 {
        users::ActiveModel {
            username: Set(username.into()),
            email: Set(None),
            password_hash: Set("x".into()),
            is_staff: Set(false),
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap()
        .id
    }

    fn score(score: i64) -> SubmitScoreRequest {
        SubmitScoreRequest {
            score,
            bubbles_popped: score / 10,
        }
    }

    #[tokio::test]
    async fn test_high_scores_top_five() {
        let (service, db) = setup().await;
        let luna = create_user(&db, "luna").await;
        let sol = create_user(&db, "sol").await;

        for s in [10, 70, 30, 50] {
            service.submit_score(luna, score(s)).await.unwrap();
        }
        for s in [60, 20, 40] {
            service.submit_score(sol, score(s)).await.unwrap();
        }

        let top = service.high_scores().await.unwrap();
        let values: Vec<i64> = top.iter().map(|e| e.score).collect();
        assert_eq!(values, vec![70, 60, 50, 40, 30]);
        assert_eq!(top[0].username, "luna");
        assert_eq!(top[1].username, "sol");
    }

    #[tokio::test]
    async fn test_negative_score_rejected() {
        let (service, db) = setup().await;
        let luna = create_user(&db, "luna").await;
        let err = service
            .submit_score(
                luna,
                SubmitScoreRequest {
                    score: -1,
                    bubbles_popped: 0,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }
}
