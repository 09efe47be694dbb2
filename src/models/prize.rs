use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::storage::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PrizeType {
    Money,
    Travel,
    Gift,
}

impl std::fmt::Display for PrizeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrizeType::Money => write!(f, "money"),
            PrizeType::Travel => write!(f, "travel"),
            PrizeType::Gift => write!(f, "gift"),
        }
    }
}

/// 结算时发放给某张彩票的奖品，创建后不可变
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Prize {
    pub id: String,
    pub ticket_id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub prize_type: PrizeType,
    pub name: String,
    /// 奖金 (货币单位)，非现金奖品为 0
    pub value: i64,
    pub matches_count: u32,
}

impl Record for Prize {
    const KIND: &'static str = "Prize";

    fn id(&self) -> &str {
        &self.id
    }
}

/// 奖品模板（奖品目录中的一项）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PrizeTemplate {
    #[serde(rename = "type")]
    pub prize_type: PrizeType,
    pub name: String,
    pub value: i64,
}

impl PrizeTemplate {
    pub fn new(prize_type: PrizeType, name: impl Into<String>, value: i64) -> Self {
        Self {
            prize_type,
            name: name.into(),
            value,
        }
    }
}

/// 某一中奖档位（命中个数）下的候选奖品
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PrizeTier {
    pub matches: u32,
    pub candidates: Vec<PrizeTemplate>,
}
