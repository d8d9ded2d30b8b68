use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::services::PileDrawOutcome;
use crate::utils::MediaResolver;

/// 单个牌堆（位置 + 卡片）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PileResponse {
    /// 位置 1..=3
    pub id: i32,
    pub image_url: String,
    pub message: String,
}

/// 抽卡接口响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PilesResponse {
    pub piles: Vec<PileResponse>,
    pub remaining_draws: i32,
    pub draw_allowed: bool,
    /// piles 是否为已保存的抽卡结果；false 表示空结果或临时样本
    pub persisted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PilesResponse {
    pub fn from_outcome(
        outcome: &PileDrawOutcome,
        resolver: &MediaResolver,
        request_origin: Option<&str>,
    ) -> Self {
        let piles = outcome
            .piles
            .iter()
            .map(|pile| PileResponse {
                id: pile.position,
                image_url: resolver.resolve(pile.card.image.as_deref(), request_origin),
                message: pile.card.message.clone(),
            })
            .collect();

        Self {
            piles,
            remaining_draws: outcome.record.remaining_draws(),
            draw_allowed: outcome.draw_allowed(),
            persisted: outcome.state.is_persisted(),
            message: outcome.state.message().map(str::to_string),
        }
    }
}
