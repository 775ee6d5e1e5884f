use serde::Deserialize;
use shared::errors::ServiceError;
use shared::{PayoutTable, DEFAULT_API_BASE_URL, DEFAULT_GAME_ID, DEFAULT_HTTP_TIMEOUT_SECS};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub evaluation: EvaluationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub game_id: u32,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationConfig {
    pub worker_count: usize,
    pub payout_table_path: Option<PathBuf>,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let worker_count = match env::var("KINO_WORKER_COUNT") {
            Ok(value) => value.parse()?,
            Err(_) => available_workers(),
        };
        if worker_count == 0 {
            anyhow::bail!("KINO_WORKER_COUNT must be at least 1");
        }

        Ok(Config {
            api: ApiConfig {
                base_url: env::var("KINO_API_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
                game_id: env::var("KINO_GAME_ID")
                    .unwrap_or_else(|_| DEFAULT_GAME_ID.to_string())
                    .parse()?,
                timeout_seconds: env::var("KINO_HTTP_TIMEOUT_SECONDS")
                    .unwrap_or_else(|_| DEFAULT_HTTP_TIMEOUT_SECS.to_string())
                    .parse()?,
            },
            evaluation: EvaluationConfig {
                worker_count,
                payout_table_path: env::var("KINO_PAYOUT_TABLE").ok().map(PathBuf::from),
            },
        })
    }

    /// Payout table for this run: the configured JSON file, or the built-in KINO table
    pub fn payout_table(&self) -> Result<PayoutTable, ServiceError> {
        match &self.evaluation.payout_table_path {
            Some(path) => {
                let json = std::fs::read_to_string(path).map_err(|e| {
                    ServiceError::invalid_config(format!("{}: {}", path.display(), e))
                })?;
                PayoutTable::from_json(&json)
            }
            None => Ok(PayoutTable::kino()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api: ApiConfig {
                base_url: DEFAULT_API_BASE_URL.to_string(),
                game_id: DEFAULT_GAME_ID,
                timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECS,
            },
            evaluation: EvaluationConfig {
                worker_count: available_workers(),
                payout_table_path: None,
            },
        }
    }
}

/// Hardware parallelism available to this process, at least 1
pub fn available_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
