//! Runtime configuration: built once at startup from the CLI/environment, then immutable.

use std::time::Duration;

use anyhow::{Result, bail};
use itertools::{Itertools, iproduct};

use crate::Cli;
use crate::config::analysis::{AnalysisConfig, SignalParams, WindowSettings, ZoneParams};
use crate::config::{ANALYSIS, BINANCE};
use crate::domain::PairInterval;
use crate::utils::TimeUtils;

/// Telegram credentials. Either may be missing, in which case alerts are dropped.
#[derive(Clone, Default, PartialEq)]
pub struct TelegramCredentials {
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
}

impl TelegramCredentials {
    pub fn is_complete(&self) -> bool {
        self.bot_token.is_some() && self.chat_id.is_some()
    }
}

// Never print the bot token
impl std::fmt::Debug for TelegramCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramCredentials")
            .field("bot_token", &self.bot_token.as_ref().map(|_| "<redacted>"))
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Instruments outer, resolutions inner. This is also the per-tick evaluation order.
    pub pairs: Vec<PairInterval>,
    pub cadence: Duration,
    pub analysis: AnalysisConfig,
    pub port: u16,
    pub telegram: TelegramCredentials,
}

impl MonitorConfig {
    pub fn from_cli(args: &Cli) -> Result<Self> {
        let symbols: Vec<String> = args
            .symbols
            .iter()
            .map(|s| s.trim().to_uppercase()) // Trim whitespace and make uppercase
            .filter(|s| !s.is_empty())
            .unique()
            .collect();
        if symbols.is_empty() {
            bail!("No symbols configured");
        }
        for symbol in &symbols {
            if PairInterval::get_quote(symbol).is_none() {
                log::warn!("⚠️  {} does not end in a known quote asset", symbol);
            }
        }

        let mut intervals = Vec::new();
        for text in args.intervals.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
            match TimeUtils::interval_from_str(text) {
                Some(ms) if !intervals.contains(&ms) => intervals.push(ms),
                Some(_) => {}
                None => bail!("Unsupported interval '{}'", text),
            }
        }
        if intervals.is_empty() {
            bail!("No intervals configured");
        }

        if args.check_interval_secs == 0 {
            bail!("Check interval must be at least one second");
        }

        let windows = WindowSettings {
            data_window: args.data_window,
            zone_window: args.zone_window,
            min_candles: ANALYSIS.windows.min_candles,
        };
        if windows.data_window < windows.min_candles {
            bail!(
                "Data window of {} candles is below the minimum of {}",
                windows.data_window,
                windows.min_candles
            );
        }
        if windows.data_window > BINANCE.limits.klines_limit_max {
            bail!(
                "Data window of {} candles exceeds the Binance limit of {}",
                windows.data_window,
                BINANCE.limits.klines_limit_max
            );
        }
        if windows.zone_window == 0 {
            bail!("Zone window must hold at least one candle");
        }

        let zones = ZoneParams {
            sensitivity_factor: args.sensitivity_factor,
            min_cluster_size: args.min_cluster_size,
            price_dp: ANALYSIS.zones.price_dp,
        };
        if !is_non_negative(zones.sensitivity_factor) {
            bail!("Sensitivity factor must be a non-negative number");
        }
        if zones.min_cluster_size == 0 {
            bail!("Minimum cluster size must be at least 1");
        }

        let signals = SignalParams {
            pivot_tolerance_pct: args.pivot_tolerance,
            zone_buffer_pct: args.zone_buffer,
        };
        if !is_non_negative(signals.pivot_tolerance_pct) || !is_non_negative(signals.zone_buffer_pct) {
            bail!("Signal tolerances must be non-negative numbers");
        }

        let pairs = iproduct!(symbols, intervals)
            .map(|(name, interval_ms)| PairInterval::new(name, interval_ms))
            .collect();

        Ok(MonitorConfig {
            pairs,
            cadence: Duration::from_secs(args.check_interval_secs),
            analysis: AnalysisConfig {
                zones,
                signals,
                windows,
            },
            port: args.port,
            telegram: TelegramCredentials {
                bot_token: non_empty(&args.telegram_bot_token),
                chat_id: non_empty(&args.telegram_chat_id),
            },
        })
    }

    pub fn symbols(&self) -> Vec<&str> {
        self.pairs.iter().map(|p| p.name()).unique().collect()
    }

    pub fn intervals(&self) -> Vec<&'static str> {
        self.pairs.iter().map(|p| p.interval_str()).unique().collect()
    }
}

// NaN fails this too
fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_ref()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
