// Pivot, zone and signal computation. Everything here is pure.
pub mod pair_analysis;
pub mod pivots;
pub mod signal;
pub mod zones;

// Re-export commonly used types
pub use pair_analysis::{PairReport, analyse_candles};
pub use pivots::PivotLevels;
pub use signal::{Action, Signal, evaluate_signal};
pub use zones::{ZoneSet, find_zones};
