pub mod cadence;
pub mod scheduler;

// Re-export key components
pub use cadence::Cadence;
pub use scheduler::{Scheduler, TickSummary};
