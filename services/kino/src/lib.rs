// Library interface for the kino calculator - exposes modules for testing

pub mod cache;
pub mod calculator;
pub mod cli;
pub mod config;
pub mod draw_client;
pub mod logging;
pub mod pagination;
pub mod payout;
pub mod report;
pub mod worker_pool;

pub use calculator::Calculator;
pub use cli::{Cli, RunRequest};
pub use config::Config;
pub use draw_client::{DrawPage, DrawSource, FetchError, OpapClient};
pub use report::RunReport;
pub use worker_pool::WorkerPool;
