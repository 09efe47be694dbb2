use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Prize;
use crate::storage::Record;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Ticket {
    pub id: String,
    pub user_id: String,
    pub draw_id: String,
    pub numbers: Vec<u32>,
    /// 结算前为 0
    pub matches: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prize_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Record for Ticket {
    const KIND: &'static str = "Ticket";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateTicketRequest {
    pub user_id: String,
    pub draw_id: String,
    #[schema(example = json!([3, 11, 19, 27, 38, 45]))]
    pub numbers: Vec<u32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UserTicketsQuery {
    pub user_id: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TicketDetailQuery {
    pub id: String,
}

/// 彩票详情：彩票本身 + 已中奖品
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TicketDetail {
    pub ticket: Ticket,
    pub prize: Option<Prize>,
}

/// 用户彩票列表项，附带所属开奖的状态
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserTicketView {
    pub ticket: Ticket,
    pub prize: Option<Prize>,
    /// pending / completed；开奖记录丢失时为 unknown
    pub draw_status: String,
}
