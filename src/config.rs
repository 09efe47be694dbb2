use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub lottery: LotteryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// 存放 users.json / draws.json / tickets.json / prizes.json 的目录
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
        }
    }
}

impl StorageConfig {
    pub fn users_file(&self) -> PathBuf {
        self.data_dir.join("users.json")
    }

    pub fn draws_file(&self) -> PathBuf {
        self.data_dir.join("draws.json")
    }

    pub fn tickets_file(&self) -> PathBuf {
        self.data_dir.join("tickets.json")
    }

    pub fn prizes_file(&self) -> PathBuf {
        self.data_dir.join("prizes.json")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LotteryConfig {
    /// 注册赠送余额
    #[serde(default = "default_starting_balance")]
    pub starting_balance: i64,
    /// 单张彩票价格
    #[serde(default = "default_ticket_price")]
    pub ticket_price: i64,
    /// 固定随机种子 (仅用于测试/复现)，None 表示使用系统熵
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

fn default_starting_balance() -> i64 {
    10_000
}

fn default_ticket_price() -> i64 {
    100
}

impl Default for LotteryConfig {
    fn default() -> Self {
        Self {
            starting_balance: default_starting_balance(),
            ticket_price: default_ticket_price(),
            rng_seed: None,
        }
    }
}

impl Config {
    pub fn from_toml() -> AppResult<Self> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // 尝试读取配置文件，如果不存在则完全依赖环境变量
        let mut config: Config = match std::fs::read_to_string(&config_path) {
            Ok(config_str) => Self::parse(&config_str)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Config {
                server: ServerConfig::default(),
                storage: StorageConfig::default(),
                lottery: LotteryConfig::default(),
            },
            Err(e) => {
                return Err(AppError::ConfigError(format!(
                    "Cannot read config file {config_path}: {e}"
                )));
            }
        };

        // 环境变量覆盖（即便文件存在时也覆盖）
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn parse(config_str: &str) -> AppResult<Self> {
        toml::from_str(config_str)
            .map_err(|e| AppError::ConfigError(format!("Failed to parse config file: {e}")))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = env::var("SERVER_HOST") {
            self.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            self.server.port = p;
        }
        if let Ok(v) = env::var("DATA_DIR") {
            self.storage.data_dir = PathBuf::from(v);
        }
        if let Ok(v) = env::var("LOTTERY_STARTING_BALANCE")
            && let Ok(n) = v.parse()
        {
            self.lottery.starting_balance = n;
        }
        if let Ok(v) = env::var("LOTTERY_TICKET_PRICE")
            && let Ok(n) = v.parse()
        {
            self.lottery.ticket_price = n;
        }
        if let Ok(v) = env::var("LOTTERY_RNG_SEED")
            && let Ok(n) = v.parse()
        {
            self.lottery.rng_seed = Some(n);
        }
    }

    fn validate(&self) -> AppResult<()> {
        if self.lottery.starting_balance < 0 {
            return Err(AppError::ConfigError(
                "lottery.starting_balance must not be negative".to_string(),
            ));
        }
        if self.lottery.ticket_price <= 0 {
            return Err(AppError::ConfigError(
                "lottery.ticket_price must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
