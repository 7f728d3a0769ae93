//! Analysis and computation configuration

/// Tunables for the zone clusterer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneParams {
    // Relative price tolerance between an extremum and the last member of the cluster
    // 0.005 corresponds to 0.5%
    pub sensitivity_factor: f64,
    // Clusters with fewer members than this never become zones
    pub min_cluster_size: usize,
    // Decimal places kept on zone prices
    pub price_dp: i32,
}

/// Tolerances for the signal engine (fractional, 0.001 = 0.1%)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalParams {
    pub pivot_tolerance_pct: f64,
    pub zone_buffer_pct: f64,
}

/// Candle windows used per tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSettings {
    // Number of candles requested from the data source
    pub data_window: usize,
    // Number of most recent candles handed to the zone clusterer
    pub zone_window: usize,
    // Below this the pair is skipped (need one completed candle plus the live one)
    pub min_candles: usize,
}

/// The Master Analysis Configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisConfig {
    pub zones: ZoneParams,
    pub signals: SignalParams,
    pub windows: WindowSettings,
}

pub const ANALYSIS: AnalysisConfig = AnalysisConfig {
    zones: ZoneParams {
        sensitivity_factor: 0.005,
        min_cluster_size: 3,
        price_dp: 4,
    },
    signals: SignalParams {
        pivot_tolerance_pct: 0.001,
        zone_buffer_pct: 0.002,
    },
    windows: WindowSettings {
        data_window: 100,
        zone_window: 50,
        min_candles: 2,
    },
};

impl Default for ZoneParams {
    fn default() -> Self {
        ANALYSIS.zones
    }
}

impl Default for SignalParams {
    fn default() -> Self {
        ANALYSIS.signals
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        ANALYSIS
    }
}
