#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::ZoneParams;
use crate::domain::Candle;
use crate::utils::maths_utils::{mean, round_to_dp, sort_dedup};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtremumKind {
    /// A candle low
    Support,
    /// A candle high
    Resistance,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extremum {
    pub price: f64,
    pub kind: ExtremumKind,
}

/// Clustered support/resistance prices. Each list strictly ascending, rounded to 4dp.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneSet {
    pub support: Vec<f64>,
    pub resistance: Vec<f64>,
}

impl ZoneSet {
    pub fn is_empty(&self) -> bool {
        self.support.is_empty() && self.resistance.is_empty()
    }
}

/// Each candle contributes its high (Resistance) followed by its low (Support).
fn collect_extrema(candles: &[Candle]) -> Vec<Extremum> {
    candles
        .iter()
        .flat_map(|c| {
            [
                Extremum {
                    price: c.high_price,
                    kind: ExtremumKind::Resistance,
                },
                Extremum {
                    price: c.low_price,
                    kind: ExtremumKind::Support,
                },
            ]
        })
        .collect()
}

/// Derives support/resistance zones by clustering candle extrema.
///
/// 1. Gathers every high and low, then sorts them by price (stable, so equal prices keep candle order).
/// 2. Sweeps once, growing a cluster while the next extremum is the same kind and within
///    `sensitivity_factor` of the *last* member. The tolerance follows the cluster as it grows,
///    so a slow drift of prices can chain into one long cluster.
/// 3. Clusters with at least `min_cluster_size` members become a zone at their mean price.
pub fn find_zones(candles: &[Candle], params: &ZoneParams) -> ZoneSet {
    if candles.is_empty() {
        return ZoneSet::default();
    }

    let mut extrema = collect_extrema(candles);
    extrema.sort_by(|a, b| a.price.total_cmp(&b.price));

    let mut zones = ZoneSet::default();

    // Helper to finalize a cluster
    let mut finalize_cluster = |cluster: &[Extremum]| {
        if cluster.len() < params.min_cluster_size {
            return;
        }
        let prices: Vec<f64> = cluster.iter().map(|e| e.price).collect();
        let Some(avg_price) = mean(&prices) else {
            return;
        };
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_zone_clusters {
            log::info!(
                "{:?} cluster of {} at {:.4}",
                cluster[0].kind,
                cluster.len(),
                avg_price
            );
        }
        match cluster[0].kind {
            ExtremumKind::Support => zones.support.push(avg_price),
            ExtremumKind::Resistance => zones.resistance.push(avg_price),
        }
    };

    let mut current_cluster: Vec<Extremum> = Vec::new();
    for extremum in extrema {
        let Some(last) = current_cluster.last() else {
            current_cluster.push(extremum);
            continue;
        };

        let price_diff = (extremum.price - last.price).abs();
        let threshold = last.price * params.sensitivity_factor;

        if price_diff <= threshold && extremum.kind == last.kind {
            current_cluster.push(extremum);
        } else {
            finalize_cluster(&current_cluster);
            current_cluster.clear();
            current_cluster.push(extremum);
        }
    }

    // Finalize the last cluster
    finalize_cluster(&current_cluster);

    for side in [&mut zones.support, &mut zones.resistance] {
        for price in side.iter_mut() {
            *price = round_to_dp(*price, params.price_dp);
        }
        sort_dedup(side);
    }

    zones
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn params(sensitivity_factor: f64, min_cluster_size: usize) -> ZoneParams {
        ZoneParams {
            sensitivity_factor,
            min_cluster_size,
            ..ZoneParams::default()
        }
    }

    fn candle(high: f64, low: f64) -> Candle {
        Candle::from_ohlc(low, high, low, high)
    }

    #[test]
    fn empty_window_gives_empty_zones() {
        let zones = find_zones(&[], &ZoneParams::default());
        assert!(zones.is_empty());
    }

    #[test]
    fn highs_cluster_into_one_resistance_at_the_mean() {
        // Lows far below each other, highs within 0.5% of their neighbour
        let candles = vec![
            candle(100.0, 50.0),
            candle(100.2, 60.0),
            candle(100.4, 70.0),
        ];
        let zones = find_zones(&candles, &params(0.005, 3));
        assert!(zones.support.is_empty());
        assert_eq!(zones.resistance.len(), 1);
        assert!(approx_eq(zones.resistance[0], 100.2));
    }

    #[test]
    fn lows_cluster_into_one_support() {
        let candles = vec![
            candle(150.0, 90.0),
            candle(160.0, 90.1),
            candle(170.0, 90.2),
            candle(180.0, 90.3),
        ];
        let zones = find_zones(&candles, &params(0.005, 3));
        assert!(zones.resistance.is_empty());
        assert_eq!(zones.support, vec![90.15]);
    }

    #[test]
    fn zone_prices_use_the_configured_precision() {
        // Lows average to 90.11
        let candles = vec![
            candle(150.0, 90.0),
            candle(160.0, 90.1),
            candle(170.0, 90.23),
        ];
        let four_dp = find_zones(&candles, &params(0.005, 3));
        assert!(approx_eq(four_dp.support[0], 90.11));

        let one_dp = ZoneParams {
            price_dp: 1,
            ..params(0.005, 3)
        };
        let zones = find_zones(&candles, &one_dp);
        assert_eq!(zones.support.len(), 1);
        assert!(approx_eq(zones.support[0], 90.1));
    }

    #[test]
    fn short_run_gives_no_zone() {
        let candles = vec![candle(100.0, 50.0), candle(100.2, 60.0)];
        let zones = find_zones(&candles, &params(0.005, 3));
        assert!(zones.is_empty());
    }

    #[test]
    fn a_short_run_does_not_swallow_the_next_one() {
        // Two highs near 100, then three highs near 110.
        let candles = vec![
            candle(100.0, 10.0),
            candle(100.1, 20.0),
            candle(110.0, 30.0),
            candle(110.1, 40.0),
            candle(110.2, 50.0),
        ];
        let zones = find_zones(&candles, &params(0.005, 3));
        assert_eq!(zones.resistance, vec![110.1]);
    }

    #[test]
    fn interleaved_kinds_break_clusters_even_at_zero_distance() {
        // Every candle has high == next candle's low, so kinds alternate at equal prices.
        let candles = vec![
            candle(101.0, 100.0),
            candle(102.0, 101.0),
            candle(103.0, 102.0),
        ];
        let zones = find_zones(&candles, &params(0.05, 2));
        assert!(zones.is_empty());
    }

    #[test]
    fn degenerate_identical_candles_form_no_single_kind_cluster() {
        // high == low: sorted order is R, S, R, S ... so nothing chains
        let candles = vec![candle(100.0, 100.0); 5];
        let zones = find_zones(&candles, &params(0.005, 3));
        assert!(zones.is_empty());
    }

    #[test]
    fn threshold_chains_off_the_last_member() {
        // Each high is 0.4% above the previous; first to last is ~1.6%, well beyond 0.5%
        let highs = [100.0, 100.4, 100.8016, 101.2048, 101.6096];
        let candles: Vec<Candle> = highs
            .iter()
            .enumerate()
            .map(|(i, &h)| candle(h, 10.0 + i as f64 * 10.0))
            .collect();
        let zones = find_zones(&candles, &params(0.005, 3));
        assert_eq!(zones.resistance.len(), 1);
        let expected = round_to_dp(highs.iter().sum::<f64>() / highs.len() as f64, 4);
        assert!(approx_eq(zones.resistance[0], expected));
    }

    #[test]
    fn output_is_strictly_ascending_and_deduplicated() {
        let mut candles = Vec::new();
        // Three separated groups, inserted out of price order
        for base in [200.0, 50.0] {
            for i in 0..3 {
                candles.push(candle(base + i as f64 * 0.1, base / 2.0 + i as f64 * 0.05));
            }
        }
        for i in 0..3 {
            candles.push(candle(300.0 + i as f64 * 0.1, 20.0 + i as f64 * 0.05));
        }
        let zones = find_zones(&candles, &params(0.005, 3));
        for side in [&zones.support, &zones.resistance] {
            assert!(side.windows(2).all(|w| w[0] < w[1]), "not ascending: {:?}", side);
            for z in side.iter() {
                assert!(approx_eq(*z, round_to_dp(*z, 4)));
            }
        }
        assert_eq!(zones.resistance, vec![50.1, 200.1, 300.1]);
        assert_eq!(zones.support, vec![20.05, 25.05, 100.05]);
    }

    #[test]
    fn equal_clusters_split_by_the_other_kind_are_merged() {
        // At 100.0 the stable sort yields R R R S R R R: two resistance clusters with the same mean
        let candles = vec![
            candle(100.0, 90.0),
            candle(100.0, 91.0),
            candle(100.0, 92.0),
            candle(105.0, 100.0),
            candle(100.0, 93.0),
            candle(100.0, 94.0),
            candle(100.0, 95.0),
        ];
        let zones = find_zones(&candles, &params(0.005, 3));
        assert_eq!(zones.resistance, vec![100.0]);
        assert!(zones.support.is_empty());
    }

    #[test]
    fn same_input_same_output() {
        let candles = vec![
            candle(100.0, 95.0),
            candle(100.3, 95.2),
            candle(100.1, 95.1),
            candle(108.0, 99.0),
        ];
        let p = ZoneParams::default();
        assert_eq!(find_zones(&candles, &p), find_zones(&candles, &p));
    }
}
