//! Configuration module for the pivot sniper.

pub mod analysis;
pub mod binance;
pub mod monitor;
pub mod telegram;

mod debug; // Can be private because we have a public re-export. Forces files to use crate::config::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

// Re-export commonly used items
pub use analysis::{ANALYSIS, AnalysisConfig, SignalParams, WindowSettings, ZoneParams};
pub use binance::{BINANCE, BinanceApiConfig};
pub use monitor::{MonitorConfig, TelegramCredentials};
pub use telegram::TELEGRAM;
