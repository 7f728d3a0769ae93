#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod error;
pub mod health;
pub mod notify;
pub mod utils;

// Re-export commonly used types
pub use analysis::{Action, PairReport, PivotLevels, Signal, ZoneSet};
pub use config::MonitorConfig;
pub use data::{BinanceCandleSource, CandleSource};
pub use domain::{Candle, PairInterval};
pub use engine::Scheduler;
pub use error::MonitorError;
pub use notify::{Notifier, TelegramNotifier};

// CLI argument parsing
use clap::Parser;

use crate::config::ANALYSIS;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Instruments to monitor, comma separated
    #[arg(long, env = "SYMBOLS", value_delimiter = ',', default_value = "BTCUSDT,ETHUSDT,BNBUSDT")]
    pub symbols: Vec<String>,

    /// Candle resolutions in Binance shorthand, comma separated
    #[arg(long, env = "INTERVALS", value_delimiter = ',', default_value = "15m,1h")]
    pub intervals: Vec<String>,

    /// Seconds between checks
    #[arg(long, env = "CHECK_INTERVAL_SECONDS", default_value_t = 300)]
    pub check_interval_secs: u64,

    /// Port for the liveness endpoint
    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Candles fetched per pair on every check
    #[arg(long, default_value_t = ANALYSIS.windows.data_window)]
    pub data_window: usize,

    /// Most recent candles used for zone clustering
    #[arg(long, default_value_t = ANALYSIS.windows.zone_window)]
    pub zone_window: usize,

    /// Relative gap allowed between neighbouring extrema in one zone
    #[arg(long, default_value_t = ANALYSIS.zones.sensitivity_factor)]
    pub sensitivity_factor: f64,

    /// Extrema needed before a cluster becomes a zone
    #[arg(long, default_value_t = ANALYSIS.zones.min_cluster_size)]
    pub min_cluster_size: usize,

    /// Fractional distance from a pivot level that counts as "near"
    #[arg(long, default_value_t = ANALYSIS.signals.pivot_tolerance_pct)]
    pub pivot_tolerance: f64,

    /// Fractional band around a zone that counts as "in"
    #[arg(long, default_value_t = ANALYSIS.signals.zone_buffer_pct)]
    pub zone_buffer: f64,

    #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
    pub telegram_bot_token: Option<String>,

    #[arg(long, env = "TELEGRAM_CHAT_ID", hide_env_values = true)]
    pub telegram_chat_id: Option<String>,
}
