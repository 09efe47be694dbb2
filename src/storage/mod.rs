//! 持久化层：每种实体一个 [`RecordStore`]，以及基于线性扫描的二级查询

pub mod record_store;

pub use record_store::{Record, RecordStore, UpdatePolicy};

use crate::config::StorageConfig;
use crate::error::{AppError, AppResult};
use crate::models::{Draw, DrawStatus, Prize, Ticket, User};

pub type UserStore = RecordStore<User>;
pub type DrawStore = RecordStore<Draw>;
pub type TicketStore = RecordStore<Ticket>;
pub type PrizeStore = RecordStore<Prize>;

impl RecordStore<User> {
    /// 用户名精确匹配（区分大小写）
    pub async fn get_by_username(&self, username: &str) -> AppResult<User> {
        self.find(|u| u.username == username)
            .await
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}

impl RecordStore<Draw> {
    pub async fn get_pending(&self) -> AppResult<Draw> {
        self.find(|d| d.status == DrawStatus::Pending)
            .await
            .ok_or_else(|| AppError::NotFound("No pending draw".to_string()))
    }
}

impl RecordStore<Ticket> {
    pub async fn list_by_user(&self, user_id: &str) -> Vec<Ticket> {
        self.filter(|t| t.user_id == user_id).await
    }

    pub async fn list_by_draw(&self, draw_id: &str) -> Vec<Ticket> {
        self.filter(|t| t.draw_id == draw_id).await
    }
}

impl RecordStore<Prize> {
    pub async fn get_by_ticket(&self, ticket_id: &str) -> AppResult<Prize> {
        self.find(|p| p.ticket_id == ticket_id)
            .await
            .ok_or_else(|| AppError::NotFound("Prize not found for ticket".to_string()))
    }
}

/// 四个实体仓库，从同一数据目录打开
#[derive(Clone)]
pub struct Stores {
    pub users: std::sync::Arc<UserStore>,
    pub draws: std::sync::Arc<DrawStore>,
    pub tickets: std::sync::Arc<TicketStore>,
    pub prizes: std::sync::Arc<PrizeStore>,
}

impl Stores {
    pub async fn open(config: &StorageConfig) -> AppResult<Self> {
        use std::sync::Arc;

        // User / Ticket 的 update 要求记录已存在；Draw / Prize 的 update 等同 upsert
        Ok(Self {
            users: Arc::new(
                UserStore::open(config.users_file(), UpdatePolicy::RequireExisting).await?,
            ),
            draws: Arc::new(DrawStore::open(config.draws_file(), UpdatePolicy::Upsert).await?),
            tickets: Arc::new(
                TicketStore::open(config.tickets_file(), UpdatePolicy::RequireExisting).await?,
            ),
            prizes: Arc::new(PrizeStore::open(config.prizes_file(), UpdatePolicy::Upsert).await?),
        })
    }
}
