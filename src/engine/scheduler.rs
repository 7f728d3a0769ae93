use std::sync::Arc;

use tokio::sync::watch;

use crate::analysis::{PairReport, analyse_candles};
use crate::config::MonitorConfig;
use crate::data::CandleSource;
use crate::domain::PairInterval;
use crate::engine::cadence::Cadence;
use crate::error::MonitorError;
use crate::notify::{Notifier, format_alert};
use crate::utils::time_utils::utc_now_string;

/// Per-tick counters, mostly for logging and tests.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickSummary {
    pub evaluated: usize,
    pub signals: usize,
    pub skipped: usize,
}

/// Drives every configured pair through fetch, analysis and alerting once per cadence tick.
pub struct Scheduler<S: CandleSource, N: Notifier> {
    source: S,
    notifier: N,
    config: Arc<MonitorConfig>,
}

impl<S: CandleSource, N: Notifier> Scheduler<S, N> {
    pub fn new(source: S, notifier: N, config: Arc<MonitorConfig>) -> Self {
        Self {
            source,
            notifier,
            config,
        }
    }

    /// Runs until `shutdown` flips to `true` (or its sender goes away).
    /// Shutdown is only observed between ticks so a tick in flight always completes.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut cadence = Cadence::new(self.config.cadence);
        log::info!(
            "Scheduler started: {} pairs via {}",
            self.config.pairs.len(),
            self.source.signature()
        );

        while !*shutdown.borrow() {
            tokio::select! {
                biased;
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                _ = cadence.tick() => {
                    self.run_tick().await;
                    log::info!("Sleeping for {} seconds...", cadence.period().as_secs());
                }
            }
        }
        log::info!("Scheduler stopped.");
    }

    /// One pass over every pair, instruments outer and resolutions inner.
    pub async fn run_tick(&self) -> TickSummary {
        log::info!("--- Checking at {} ---", utc_now_string());
        let mut summary = TickSummary::default();

        for pair_interval in &self.config.pairs {
            match self.check_pair(pair_interval).await {
                Ok(report) => {
                    summary.evaluated += 1;
                    if report.signal.is_some() {
                        summary.signals += 1;
                        self.alert(&report).await;
                    } else {
                        log::info!("  No signal for {} at current price.", pair_interval);
                    }
                }
                Err(e @ MonitorError::InsufficientData { .. }) => {
                    summary.skipped += 1;
                    log::warn!("  Skipping {}", e);
                }
                Err(e) => {
                    summary.skipped += 1;
                    log::error!("  Skipping {}", e);
                }
            }
        }

        log::info!(
            "Tick done: {} evaluated, {} signals, {} skipped",
            summary.evaluated,
            summary.signals,
            summary.skipped
        );
        summary
    }

    async fn check_pair(&self, pair_interval: &PairInterval) -> Result<PairReport, MonitorError> {
        let analysis = &self.config.analysis;
        log::debug!("Fetching {} candles for {}", analysis.windows.data_window, pair_interval);
        let candles = self
            .source
            .fetch_candles(pair_interval, analysis.windows.data_window)
            .await?;

        let report = analyse_candles(pair_interval, &candles, analysis)?;
        let p = &report.pivots;
        log::info!(
            "{}: price {:.4} | PP {:.4} R1 {:.4} S1 {:.4} (from candle opened {})",
            pair_interval,
            report.current_price,
            p.pp,
            p.r1,
            p.s1,
            report.pivot_source_utc()
        );
        log::info!(
            "  Zones support {:?} resistance {:?}",
            report.zones.support,
            report.zones.resistance
        );
        Ok(report)
    }

    async fn alert(&self, report: &PairReport) {
        let Some(text) = format_alert(report) else {
            return;
        };
        if let Some(signal) = &report.signal {
            log::info!(
                "  SIGNAL {} {} at {:.4}: {}",
                report.pair_interval,
                signal.action,
                report.current_price,
                signal.reason()
            );
        }
        if let Err(e) = self.notifier.send_alert(&text).await {
            log::error!("  {}", e);
        }
    }
}
