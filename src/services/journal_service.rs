use crate::entities::journal_entry_entity as journal;
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::{Duration, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait,
    QueryFilter, QueryOrder, Set,
};
use std::collections::BTreeSet;

const ENTRY_NOT_FOUND: &str = "Journal entry not found.";

#[derive(Clone)]
pub struct JournalService {
    pool: DatabaseConnection,
}

impl JournalService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 按天分组的日记列表 + 连续天数
    pub async fn overview(&self, user_id: i64, today: NaiveDate) -> AppResult<JournalOverviewResponse> {
        let entries = journal::Entity::find()
            .filter(journal::Column::UserId.eq(user_id))
            .order_by_desc(journal::Column::CreatedAt)
            .order_by_desc(journal::Column::Id)
            .all(&self.pool)
            .await?;

        let dates: BTreeSet<NaiveDate> = entries.iter().map(|e| e.created_at.date_naive()).collect();
        let streak = calculate_streak(&dates, today);

        let mut days: Vec<JournalDayGroup> = Vec::new();
        for entry in entries {
            let date = entry.created_at.date_naive();
            match days.last_mut() {
                Some(group) if group.date == date => group.entries.push(entry.into()),
                _ => days.push(JournalDayGroup {
                    date,
                    entries: vec![entry.into()],
                }),
            }
        }

        Ok(JournalOverviewResponse { days, streak })
    }

    pub async fn create_entry(
        &self,
        user_id: i64,
        req: JournalEntryRequest,
    ) -> AppResult<JournalEntryResponse> {
        let (title, content) = validate_entry(&req)?;
        let entry = journal::ActiveModel {
            user_id: Set(user_id),
            title: Set(title),
            content: Set(content),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;
        Ok(entry.into())
    }

    pub async fn update_entry(
        &self,
        user_id: i64,
        entry_id: i64,
        req: JournalEntryRequest,
    ) -> AppResult<JournalEntryResponse> {
        let (title, content) = validate_entry(&req)?;
        let entry = self.find_owned(user_id, entry_id).await?;

        let mut am = entry.into_active_model();
        am.title = Set(title);
        am.content = Set(content);
        let updated = am.update(&self.pool).await?;
        Ok(updated.into())
    }

    pub async fn delete_entry(&self, user_id: i64, entry_id: i64) -> AppResult<()> {
        let entry = self.find_owned(user_id, entry_id).await?;
        entry.delete(&self.pool).await?;
        Ok(())
    }

    // 不属于当前用户的记录同样视为不存在
    async fn find_owned(&self, user_id: i64, entry_id: i64) -> AppResult<journal::Model> {
        journal::Entity::find_by_id(entry_id)
            .filter(journal::Column::UserId.eq(user_id))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(ENTRY_NOT_FOUND.to_string()))
    }
}

fn validate_entry(req: &JournalEntryRequest) -> AppResult<(String, String)> {
    let title = req.title.trim();
    if title.is_empty() || title.chars().count() > 100 {
        return Err(AppError::ValidationError(
            "Title must be between 1 and 100 characters.".to_string(),
        ));
    }
    let content = req.content.trim();
    if content.is_empty() {
        return Err(AppError::ValidationError(
            "Please write something before saving.".to_string(),
        ));
    }
    Ok((title.to_string(), content.to_string()))
}

/// 从今天往前数，每天至少一篇的连续天数；今天没写则为 0
pub fn calculate_streak(dates: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut day = today;
    while dates.contains(&day) {
        streak += 1;
        day -= Duration::days(1);
    }
    streak
}
