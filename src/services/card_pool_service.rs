use crate::entities::luck_card_entity as cards;
use crate::error::{AppError, AppResult};
use crate::models::{CreateLuckCardRequest, LuckCardResponse};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set,
};

/// 读取整个卡池（按 id 升序）
pub async fn load_pool<C: ConnectionTrait>(db: &C) -> Result<Vec<cards::Model>, DbErr> {
    cards::Entity::find()
        .order_by_asc(cards::Column::Id)
        .all(db)
        .await
}

#[derive(Clone)]
pub struct CardPoolService {
    pool: DatabaseConnection,
}

impl CardPoolService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list_cards(&self) -> AppResult<Vec<LuckCardResponse>> {
        let list = load_pool(&self.pool).await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// 新增卡片（管理员）
    pub async fn create_card(&self, req: CreateLuckCardRequest) -> AppResult<LuckCardResponse> {
        let message = req.message.trim();
        if message.is_empty() || message.chars().count() > 200 {
            return Err(AppError::ValidationError(
                "Card message must be between 1 and 200 characters".into(),
            ));
        }

        let image = req
            .image
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        if image.as_ref().is_some_and(|s| s.len() > 255) {
            return Err(AppError::ValidationError(
                "Image path must be at most 255 characters".into(),
            ));
        }

        let card = cards::ActiveModel {
            message: Set(message.to_string()),
            image: Set(image),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!("Luck card {} created", card.id);
        Ok(card.into())
    }
}
