pub mod lottery_service;
pub mod prize_catalog;

pub use lottery_service::*;
pub use prize_catalog::*;
