use std::sync::{Arc, Mutex};

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::LotteryConfig;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::PrizeCatalog;
use crate::storage::{DrawStore, PrizeStore, Stores, TicketStore, UserStore};
use crate::utils::{count_matches, generate_id, generate_winning_numbers, validate_numbers};

/// 一次开奖结算的汇总
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettlementSummary {
    pub tickets: usize,
    pub winners: usize,
    pub prizes_awarded: usize,
    pub credited_value: i64,
    pub failures: usize,
}

#[derive(Clone)]
pub struct LotteryService {
    users: Arc<UserStore>,
    draws: Arc<DrawStore>,
    tickets: Arc<TicketStore>,
    prizes: Arc<PrizeStore>,
    catalog: Arc<PrizeCatalog>,
    rng: Arc<Mutex<StdRng>>,
    // 串行化所有跨仓库的“检查后写入”流程（唯一待开奖、余额扣减、结算入账、用户名唯一）
    lifecycle_lock: Arc<tokio::sync::Mutex<()>>,
    starting_balance: i64,
    ticket_price: i64,
}

impl LotteryService {
    pub fn new(stores: Stores, catalog: PrizeCatalog, rng: StdRng, config: &LotteryConfig) -> Self {
        Self {
            users: stores.users,
            draws: stores.draws,
            tickets: stores.tickets,
            prizes: stores.prizes,
            catalog: Arc::new(catalog),
            rng: Arc::new(Mutex::new(rng)),
            lifecycle_lock: Arc::new(tokio::sync::Mutex::new(())),
            starting_balance: config.starting_balance,
            ticket_price: config.ticket_price,
        }
    }

    /// 使用默认奖品目录构建服务；随机源按 `config.rng_seed` 播种，未配置时取系统熵
    pub fn from_config(stores: Stores, config: &LotteryConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(stores, PrizeCatalog::default(), rng, config)
    }

    // -----------------------------
    // 用户
    // -----------------------------

    pub async fn register_user(&self, username: &str, password: &str) -> AppResult<UserResponse> {
        if username.is_empty() || password.is_empty() {
            return Err(AppError::ValidationError(
                "Username and password are required".into(),
            ));
        }

        let _guard = self.lifecycle_lock.lock().await;

        if self.users.get_by_username(username).await.is_ok() {
            return Err(AppError::Conflict("Username already exists".into()));
        }

        let user = User {
            id: generate_id(),
            username: username.to_string(),
            password: password.to_string(),
            balance: self.starting_balance,
            created_at: Utc::now(),
        };
        self.users.save(user.clone()).await?;

        log::info!("User registered: {} ({})", user.username, user.id);
        Ok(user.into())
    }

    pub async fn login_user(&self, username: &str, password: &str) -> AppResult<UserResponse> {
        let invalid = || AppError::AuthError("Invalid username or password".into());

        let user = self
            .users
            .get_by_username(username)
            .await
            .map_err(|_| invalid())?;
        if user.password != password {
            return Err(invalid());
        }
        Ok(user.into())
    }

    pub async fn get_user(&self, user_id: &str) -> AppResult<UserResponse> {
        Ok(self.users.get_by_id(user_id).await?.into())
    }

    // -----------------------------
    // 开奖生命周期: pending -> completed
    // -----------------------------

    pub async fn create_draw(&self) -> AppResult<Draw> {
        let _guard = self.lifecycle_lock.lock().await;

        if self.draws.get_pending().await.is_ok() {
            return Err(AppError::Conflict("There is already an active draw".into()));
        }

        let now = Utc::now();
        let draw = Draw {
            id: generate_id(),
            winning_numbers: Vec::new(),
            status: DrawStatus::Pending,
            draw_date: now,
            created_at: now,
        };
        self.draws.save(draw.clone()).await?;

        log::info!("Draw created: {}", draw.id);
        Ok(draw)
    }

    /// 执行开奖
    ///
    /// 1. 校验开奖存在且仍为 pending（已完成则 Conflict，保证每期只开一次）
    /// 2. 生成中奖号码并标记为 completed、持久化
    /// 3. 对该期全部彩票结算；单张彩票失败只记日志，不回滚开奖状态
    pub async fn execute_draw(&self, draw_id: &str) -> AppResult<Draw> {
        let _guard = self.lifecycle_lock.lock().await;

        let mut draw = self.draws.get_by_id(draw_id).await?;
        if draw.status == DrawStatus::Completed {
            return Err(AppError::Conflict("Draw already completed".into()));
        }

        draw.winning_numbers = self.with_rng(|rng| generate_winning_numbers(rng))?;
        draw.status = DrawStatus::Completed;
        self.draws.update(draw.clone()).await?;

        log::info!(
            "Draw {} executed, winning numbers: {:?}",
            draw.id,
            draw.winning_numbers
        );

        let summary = self.settle_draw(&draw).await;
        log::info!(
            "Draw {} settled: tickets={}, winners={}, prizes={}, credited={}, failures={}",
            draw.id,
            summary.tickets,
            summary.winners,
            summary.prizes_awarded,
            summary.credited_value,
            summary.failures
        );

        Ok(draw)
    }

    pub async fn get_draw(&self, draw_id: &str) -> AppResult<Draw> {
        self.draws.get_by_id(draw_id).await
    }

    /// 按创建时间倒序
    pub async fn list_draws(&self) -> Vec<Draw> {
        let mut draws = self.draws.list().await;
        draws.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        draws
    }

    pub async fn get_pending_draw(&self) -> AppResult<Draw> {
        self.draws.get_pending().await
    }

    // -----------------------------
    // 彩票
    // -----------------------------

    pub async fn create_ticket(
        &self,
        user_id: &str,
        draw_id: &str,
        numbers: Vec<u32>,
    ) -> AppResult<Ticket> {
        if !validate_numbers(&numbers) {
            return Err(AppError::ValidationError(
                "Invalid numbers: must be 6 unique numbers between 1 and 49".into(),
            ));
        }

        let _guard = self.lifecycle_lock.lock().await;

        let draw = self
            .draws
            .get_by_id(draw_id)
            .await
            .map_err(|_| AppError::NotFound("Draw not found".into()))?;
        if !draw.is_pending() {
            return Err(AppError::Conflict("Draw is not accepting tickets".into()));
        }

        let mut user = self
            .users
            .get_by_id(user_id)
            .await
            .map_err(|_| AppError::NotFound("User not found".into()))?;
        if user.balance < self.ticket_price {
            return Err(AppError::ValidationError("Insufficient balance".into()));
        }

        user.balance -= self.ticket_price;
        self.users.update(user.clone()).await?;

        let ticket = Ticket {
            id: generate_id(),
            user_id: user_id.to_string(),
            draw_id: draw_id.to_string(),
            numbers,
            matches: 0,
            prize_id: None,
            created_at: Utc::now(),
        };

        if let Err(e) = self.tickets.save(ticket.clone()).await {
            // 彩票未写入：尽力退回已扣的票款
            user.balance += self.ticket_price;
            if let Err(refund_err) = self.users.update(user).await {
                log::error!(
                    "Refund of {} for user {user_id} failed after ticket save error: {refund_err}",
                    self.ticket_price
                );
            }
            return Err(e);
        }

        Ok(ticket)
    }

    pub async fn get_user_tickets(&self, user_id: &str) -> Vec<Ticket> {
        let mut tickets = self.tickets.list_by_user(user_id).await;
        tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        tickets
    }

    pub async fn get_ticket(&self, ticket_id: &str) -> AppResult<Ticket> {
        self.tickets.get_by_id(ticket_id).await
    }

    /// 用户彩票列表，附带奖品与开奖状态
    pub async fn get_user_ticket_details(&self, user_id: &str) -> Vec<UserTicketView> {
        let tickets = self.get_user_tickets(user_id).await;
        let mut result = Vec::with_capacity(tickets.len());

        for ticket in tickets {
            let draw_status = match self.draws.get_by_id(&ticket.draw_id).await {
                Ok(draw) => draw.status.to_string(),
                Err(_) => "unknown".to_string(),
            };
            let prize = self.prize_for(&ticket).await;
            result.push(UserTicketView {
                ticket,
                prize,
                draw_status,
            });
        }
        result
    }

    pub async fn get_ticket_detail(&self, ticket_id: &str) -> AppResult<TicketDetail> {
        let ticket = self.tickets.get_by_id(ticket_id).await?;
        let prize = self.prize_for(&ticket).await;
        Ok(TicketDetail { ticket, prize })
    }

    // -----------------------------
    // 奖品与统计
    // -----------------------------

    pub async fn get_prize_by_ticket(&self, ticket_id: &str) -> AppResult<Prize> {
        self.prizes.get_by_ticket(ticket_id).await
    }

    pub async fn get_all_prizes(&self) -> Vec<Prize> {
        self.prizes.list().await
    }

    pub fn list_prize_catalog(&self) -> Vec<PrizeTier> {
        self.catalog.tiers()
    }

    /// 只读汇总，不保证各仓库之间的时间点一致性
    pub async fn get_stats(&self) -> Stats {
        let prizes = self.prizes.list().await;

        let mut stats = Stats {
            total_prizes: prizes.len() as u64,
            ..Default::default()
        };
        for prize in &prizes {
            match prize.prize_type {
                PrizeType::Money => stats.prizes_by_type.money += 1,
                PrizeType::Travel => stats.prizes_by_type.travel += 1,
                PrizeType::Gift => stats.prizes_by_type.gift += 1,
            }
            stats.total_value += prize.value;
        }
        stats.total_users = self.users.len().await as u64;
        stats.total_tickets = self.tickets.len().await as u64;
        stats.total_draws = self.draws.len().await as u64;
        stats
    }

    // -----------------------------
    // 内部辅助方法
    // -----------------------------

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> AppResult<T> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| AppError::InternalError("Random source lock poisoned".into()))?;
        Ok(f(&mut *rng))
    }

    async fn prize_for(&self, ticket: &Ticket) -> Option<Prize> {
        if ticket.prize_id.is_none() {
            return None;
        }
        self.prizes.get_by_ticket(&ticket.id).await.ok()
    }

    /// 对已开奖的一期逐张结算；单张失败记日志后继续处理下一张
    async fn settle_draw(&self, draw: &Draw) -> SettlementSummary {
        let tickets = self.tickets.list_by_draw(&draw.id).await;
        let mut summary = SettlementSummary {
            tickets: tickets.len(),
            ..Default::default()
        };

        for ticket in tickets {
            if ticket.prize_id.is_some() {
                log::warn!("Ticket {} already has a prize, skipping", ticket.id);
                continue;
            }
            let ticket_id = ticket.id.clone();
            if let Err(e) = self
                .settle_ticket(ticket, &draw.winning_numbers, &mut summary)
                .await
            {
                summary.failures += 1;
                log::error!("Failed to settle ticket {ticket_id}: {e}");
            }
        }
        summary
    }

    async fn settle_ticket(
        &self,
        mut ticket: Ticket,
        winning_numbers: &[u32],
        summary: &mut SettlementSummary,
    ) -> AppResult<()> {
        let matches = count_matches(&ticket.numbers, winning_numbers);
        ticket.matches = matches;

        if matches < 1 {
            return self.tickets.update(ticket).await;
        }
        summary.winners += 1;

        let prize = match self.award_prize(&ticket, matches).await {
            Ok(Some(prize)) => prize,
            Ok(None) => {
                log::debug!("No prize tier for {matches} match(es), ticket {}", ticket.id);
                return self.tickets.update(ticket).await;
            }
            Err(e) => {
                summary.failures += 1;
                log::error!("Failed to award prize for ticket {}: {e}", ticket.id);
                return self.tickets.update(ticket).await;
            }
        };
        summary.prizes_awarded += 1;

        if prize.prize_type == PrizeType::Money && self.credit_prize(&prize).await {
            summary.credited_value += prize.value;
        }

        ticket.prize_id = Some(prize.id);
        self.tickets.update(ticket).await
    }

    /// 按命中个数从目录中等概率选取一个候选奖品并写入
    async fn award_prize(&self, ticket: &Ticket, matches: u32) -> AppResult<Option<Prize>> {
        let Some(candidates) = self.catalog.candidates(matches) else {
            return Ok(None);
        };

        let index = self.with_rng(|rng| rng.gen_range(0..candidates.len()))?;
        let template = &candidates[index];

        let prize = Prize {
            id: generate_id(),
            ticket_id: ticket.id.clone(),
            user_id: ticket.user_id.clone(),
            prize_type: template.prize_type,
            name: template.name.clone(),
            value: template.value,
            matches_count: matches,
        };
        self.prizes.save(prize.clone()).await?;
        Ok(Some(prize))
    }

    /// 现金奖入账；失败时保留奖品记录，并记录足够信息供人工对账
    async fn credit_prize(&self, prize: &Prize) -> bool {
        let result = async {
            let mut user = self.users.get_by_id(&prize.user_id).await?;
            user.balance += prize.value;
            self.users.update(user).await
        }
        .await;

        match result {
            Ok(()) => true,
            Err(e) => {
                log::error!(
                    "Prize {} of {} not credited to user {}: {e}",
                    prize.id,
                    prize.value,
                    prize.user_id
                );
                false
            }
        }
    }
}
