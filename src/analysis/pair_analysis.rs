use crate::analysis::pivots::PivotLevels;
use crate::analysis::signal::{Signal, evaluate_signal};
use crate::analysis::zones::{ZoneSet, find_zones};
use crate::config::AnalysisConfig;
use crate::domain::{Candle, PairInterval};
use crate::error::MonitorError;
use crate::utils::time_utils::epoch_ms_to_utc;

/// Everything computed for one pair on one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct PairReport {
    pub pair_interval: PairInterval,
    pub current_price: f64,
    /// Open time of the completed candle the pivots came from
    pub pivot_source_open_ms: i64,
    pub pivots: PivotLevels,
    pub zones: ZoneSet,
    pub signal: Option<Signal>,
}

impl PairReport {
    /// UTC open time of the candle the pivots came from.
    pub fn pivot_source_utc(&self) -> String {
        epoch_ms_to_utc(self.pivot_source_open_ms)
    }
}

/// Runs pivots, zones and the signal rules over one freshly fetched window.
///
/// `candles` must be chronological with the still-forming candle last. The one before it is
/// the last completed candle and feeds the pivots; the live candle's close is the current price.
pub fn analyse_candles(
    pair_interval: &PairInterval,
    candles: &[Candle],
    config: &AnalysisConfig,
) -> Result<PairReport, MonitorError> {
    let required = config.windows.min_candles.max(2);
    if candles.len() < required {
        return Err(MonitorError::InsufficientData {
            pair_interval: pair_interval.clone(),
            received: candles.len(),
            required,
        });
    }

    let live = &candles[candles.len() - 1];
    let completed = &candles[candles.len() - 2];
    let current_price = live.close_price;

    let pivots = PivotLevels::from_candle(completed);

    let zone_start = candles.len().saturating_sub(config.windows.zone_window);
    let zones = find_zones(&candles[zone_start..], &config.zones);

    let signal = evaluate_signal(current_price, &pivots, &zones, &config.signals);

    Ok(PairReport {
        pair_interval: pair_interval.clone(),
        current_price,
        pivot_source_open_ms: completed.open_time_ms,
        pivots,
        zones,
        signal,
    })
}
