use crate::entities::release_note_entity as notes;
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

#[derive(Clone)]
pub struct ReleaseService {
    pool: DatabaseConnection,
}

impl ReleaseService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list_notes(&self, user_id: i64) -> AppResult<Vec<ReleaseNoteResponse>> {
        let list = notes::Entity::find()
            .filter(notes::Column::UserId.eq(user_id))
            .order_by_desc(notes::Column::CreatedAt)
            .order_by_desc(notes::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    pub async fn create_note(
        &self,
        user_id: i64,
        req: CreateReleaseNoteRequest,
    ) -> AppResult<ReleaseNoteResponse> {
        let content = req.content.trim();
        if content.is_empty() {
            return Err(AppError::ValidationError(
                "Please write something before submitting.".to_string(),
            ));
        }

        let note = notes::ActiveModel {
            user_id: Set(user_id),
            content: Set(content.to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;
        Ok(note.into())
    }

    /// 删除（放下）一条想法
    pub async fn delete_note(&self, user_id: i64, note_id: i64) -> AppResult<()> {
        let result = notes::Entity::delete_many()
            .filter(notes::Column::Id.eq(note_id))
            .filter(notes::Column::UserId.eq(user_id))
            .exec(&self.pool)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Thought not found.".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::database::{create_pool, run_migrations};
    use crate::entities::user_entity as users;

    async fn setup() -> (ReleaseService, i64) {
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
        (ReleaseService::new(pool), user.id)
    }

    fn note(content: &str) -> CreateReleaseNoteRequest {
        CreateReleaseNoteRequest {
            content: content.into(),
        }
    }

    #[tokio::test]
    async fn test_notes_newest_first() {
        let (service, user_id) = setup().await;
        service.create_note(user_id, note("first")).await.unwrap();
        service.create_note(user_id, note("second")).await.unwrap();

        let list = service.list_notes(user_id).await.unwrap();
        let contents: Vec<&str> = list.iter().map(|n| n.content.as_str()).collect();
        assert_eq!(contents, vec!["second", "first"]);
        assert!(service.list_notes(user_id + 1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_note_rejected() {
        let (service, user_id) = setup().await;
        let err = service.create_note(user_id, note("  \n ")).await.unwrap_err();
        assert!(
            matches!(err, AppError::ValidationError(ref m) if m == "Please write something before submitting.")
        );
    }

    #[tokio::test]
    async fn test_delete_only_own_note() {
        let (service, user_id) = setup().await;
        let created = service.create_note(user_id, note("let go")).await.unwrap();

        assert!(matches!(
            service.delete_note(user_id + 1, created.id).await,
            Err(AppError::NotFound(_))
        ));
        service.delete_note(user_id, created.id).await.unwrap();
        assert!(service.list_notes(user_id).await.unwrap().is_empty());
    }
}
