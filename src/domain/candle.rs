/// One OHLCV bar. Produced by a `CandleSource`, read-only downstream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    pub open_time_ms: i64,
    pub open_price: f64,
    pub high_price: f64,
    pub low_price: f64,
    pub close_price: f64,
    pub volume: f64,
    pub close_time_ms: i64,
}

impl Candle {
    // Mostly used by tests and fakes; timestamps default to zero
    pub fn from_ohlc(open_price: f64, high_price: f64, low_price: f64, close_price: f64) -> Self {
        Candle {
            open_time_ms: 0,
            open_price,
            high_price,
            low_price,
            close_price,
            volume: 0.0,
            close_time_ms: 0,
        }
    }

    pub fn with_times(mut self, open_time_ms: i64, close_time_ms: i64) -> Self {
        self.open_time_ms = open_time_ms;
        self.close_time_ms = close_time_ms;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_times_keeps_prices() {
        let candle = Candle::from_ohlc(100.0, 105.0, 95.0, 101.0).with_times(60_000, 119_999);
        assert_eq!(candle.open_time_ms, 60_000);
        assert_eq!(candle.close_time_ms, 119_999);
        assert_eq!(candle.high_price, 105.0);
        assert_eq!(candle.close_price, 101.0);
    }
}
