use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::storage::Record;

/// 开奖状态：只允许 `Pending -> Completed`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DrawStatus {
    Pending,
    Completed,
}

impl std::fmt::Display for DrawStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawStatus::Pending => write!(f, "pending"),
            DrawStatus::Completed => write!(f, "completed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Draw {
    pub id: String,
    /// 开奖前为空，开奖后固定为 6 个号码
    pub winning_numbers: Vec<u32>,
    pub status: DrawStatus,
    pub draw_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Draw {
    pub fn is_pending(&self) -> bool {
        self.status == DrawStatus::Pending
    }
}

impl Record for Draw {
    const KIND: &'static str = "Draw";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExecuteDrawRequest {
    pub draw_id: String,
}
