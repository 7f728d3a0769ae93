use crate::domain::Candle;

/// Classic floor-trader pivot levels derived from one completed candle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PivotLevels {
    pub pp: f64,
    pub r1: f64,
    pub r2: f64,
    pub r3: f64,
    pub s1: f64,
    pub s2: f64,
    pub s3: f64,
}

impl PivotLevels {
    /// `high < low` is not validated; the ordering guarantee only holds for `high >= low`.
    pub fn from_hlc(high: f64, low: f64, close: f64) -> Self {
        let pp = (high + low + close) / 3.0;
        let range = high - low;
        let r1 = (2.0 * pp) - low;
        let s1 = (2.0 * pp) - high;
        Self {
            pp,
            r1,
            r2: pp + range,
            r3: r1 + range,
            s1,
            s2: pp - range,
            s3: s1 - range,
        }
    }

    /// Must be the last *completed* candle, not the one still forming.
    pub fn from_candle(candle: &Candle) -> Self {
        Self::from_hlc(candle.high_price, candle.low_price, candle.close_price)
    }

    /// Support levels in evaluation order (nearest first).
    pub fn supports(&self) -> [(&'static str, f64); 3] {
        [("S1", self.s1), ("S2", self.s2), ("S3", self.s3)]
    }

    /// Resistance levels in evaluation order (nearest first).
    pub fn resistances(&self) -> [(&'static str, f64); 3] {
        [("R1", self.r1), ("R2", self.r2), ("R3", self.r3)]
    }
}
