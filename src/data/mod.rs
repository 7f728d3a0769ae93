// Market data retrieval
pub mod bn_kline;

use async_trait::async_trait;

use crate::domain::{Candle, PairInterval};
use crate::error::MonitorError;

pub use bn_kline::BinanceCandleSource;

#[async_trait]
pub trait CandleSource: Send + Sync {
    /// Up to `limit` most recent candles, oldest first. The last one is still forming.
    /// May return fewer than `limit`.
    async fn fetch_candles(
        &self,
        pair_interval: &PairInterval,
        limit: usize,
    ) -> Result<Vec<Candle>, MonitorError>;

    /// A unique identifier for this implementation (so that afterwards we know which one we used).
    fn signature(&self) -> &'static str;
}
