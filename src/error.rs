use std::fmt;

use crate::domain::PairInterval;

/// Every per-pair failure the monitor can hit. None of them stop the scheduler.
#[derive(Debug)]
pub enum MonitorError {
    /// Network or data-provider failure. The pair is retried on the next tick.
    TransientFetch {
        pair_interval: PairInterval,
        message: String,
    },
    /// Fewer candles than needed for one completed candle plus the live price.
    InsufficientData {
        pair_interval: PairInterval,
        received: usize,
        required: usize,
    },
    /// The alert could not be delivered. Not retried.
    NotificationDelivery(String),
}

impl MonitorError {
    pub fn fetch(pair_interval: &PairInterval, message: impl Into<String>) -> Self {
        MonitorError::TransientFetch {
            pair_interval: pair_interval.clone(),
            message: message.into(),
        }
    }
}

impl fmt::Display for MonitorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MonitorError::TransientFetch {
                pair_interval,
                message,
            } => write!(f, "{} fetch failed: {}", pair_interval, message),
            MonitorError::InsufficientData {
                pair_interval,
                received,
                required,
            } => write!(
                f,
                "{} not enough data ({} candles, need {})",
                pair_interval, received, required
            ),
            MonitorError::NotificationDelivery(msg) => {
                write!(f, "notification delivery failed: {}", msg)
            }
        }
    }
}

impl std::error::Error for MonitorError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::TimeUtils;

    #[test]
    fn messages_name_the_pair() {
        let pair = PairInterval::new("ETHUSDT", TimeUtils::MS_IN_H);
        let err = MonitorError::InsufficientData {
            pair_interval: pair.clone(),
            received: 1,
            required: 2,
        };
        assert_eq!(err.to_string(), "ETHUSDT 1h not enough data (1 candles, need 2)");
        assert_eq!(
            MonitorError::fetch(&pair, "timeout").to_string(),
            "ETHUSDT 1h fetch failed: timeout"
        );
    }
}
