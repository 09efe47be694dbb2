use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PrizesByType {
    pub money: u64,
    pub travel: u64,
    pub gift: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Stats {
    pub total_prizes: u64,
    pub prizes_by_type: PrizesByType,
    pub total_value: i64,
    pub total_users: u64,
    pub total_tickets: u64,
    pub total_draws: u64,
}
