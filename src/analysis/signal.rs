use crate::analysis::pivots::PivotLevels;
use crate::analysis::zones::ZoneSet;
use crate::config::SignalParams;
use crate::utils::maths_utils::{in_band, within_pct};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Action {
    Buy,
    Sell,
}

/// A directional call plus every reason fragment that fired while reaching it.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub action: Action,
    pub reasons: Vec<String>,
}

impl Signal {
    /// Human-readable rationale, fragments joined with " and ".
    pub fn reason(&self) -> String {
        self.reasons.join(" and ")
    }
}

/// Turns a live price plus reference levels into a BUY/SELL call, or nothing.
///
/// Four passes run in order and share one running action:
/// 1. pivot supports S1, S2, S3 (first hit only) may set Buy
/// 2. pivot resistances R1, R2, R3 (first hit only) may set Sell unless already Buy
/// 3. support zones (first containing zone only) may set Buy unless already Sell
/// 4. resistance zones (first containing zone only) may set Sell unless already Buy
///
/// Once an action is set no later pass flips it, but a later pass that agrees still adds
/// its fragment. A fragment is recorded only when its pass actually set the action, and a
/// zone scan stops at the first containing zone even when that zone was overruled.
pub fn evaluate_signal(
    current_price: f64,
    levels: &PivotLevels,
    zones: &ZoneSet,
    params: &SignalParams,
) -> Option<Signal> {
    let mut action: Option<Action> = None;
    let mut reasons: Vec<String> = Vec::new();

    let near = |level: f64| within_pct(current_price, level, params.pivot_tolerance_pct);
    let in_zone = |zone: f64| in_band(current_price, zone, params.zone_buffer_pct);

    // 1. Pivot supports
    if let Some((name, level)) = levels.supports().into_iter().find(|&(_, l)| near(l)) {
        action = Some(Action::Buy);
        reasons.push(format!("Near {} ({:.4})", name, level));
    }

    // 2. Pivot resistances
    if let Some((name, level)) = levels.resistances().into_iter().find(|&(_, l)| near(l)) {
        if action != Some(Action::Buy) {
            action = Some(Action::Sell);
            reasons.push(format!("Near {} ({:.4})", name, level));
        }
    }

    // 3. Support zones
    if let Some(&zone) = zones.support.iter().find(|&&z| in_zone(z)) {
        if action != Some(Action::Sell) {
            action = Some(Action::Buy);
            reasons.push(format!("In Support Zone ({:.4})", zone));
        }
    }

    // 4. Resistance zones
    if let Some(&zone) = zones.resistance.iter().find(|&&z| in_zone(z)) {
        if action != Some(Action::Buy) {
            action = Some(Action::Sell);
            reasons.push(format!("In Resistance Zone ({:.4})", zone));
        }
    }

    action.map(|action| Signal { action, reasons })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels() -> PivotLevels {
        // pp 100, r1 105, r2 110, r3 115, s1 95, s2 90, s3 85
        PivotLevels::from_hlc(105.0, 95.0, 100.0)
    }

    fn zones(support: &[f64], resistance: &[f64]) -> ZoneSet {
        ZoneSet {
            support: support.to_vec(),
            resistance: resistance.to_vec(),
        }
    }

    fn run(price: f64, levels: &PivotLevels, zones: &ZoneSet) -> Option<Signal> {
        evaluate_signal(price, levels, zones, &SignalParams::default())
    }

    #[test]
    fn nothing_near_means_no_signal() {
        assert_eq!(run(102.5, &levels(), &ZoneSet::default()), None);
    }

    #[test]
    fn price_at_s1_is_a_buy() {
        let l = levels();
        let signal = run(l.s1, &l, &ZoneSet::default()).unwrap();
        assert_eq!(signal.action, Action::Buy);
        assert_eq!(signal.reason(), "Near S1 (95.0000)");
    }

    #[test]
    fn just_inside_tolerance_below_s1() {
        // |94.91 - 95| = 0.09 <= 0.095
        let signal = run(94.91, &levels(), &ZoneSet::default()).unwrap();
        assert_eq!(signal.action, Action::Buy);
        assert!(signal.reason().contains("S1 (95.0000)"));
    }

    #[test]
    fn just_outside_tolerance_is_ignored() {
        assert_eq!(run(94.9, &levels(), &ZoneSet::default()), None);
    }

    #[test]
    fn only_first_support_level_counts() {
        // Tiny range: s1, s2, s3 are all within 0.1% of each other
        let l = PivotLevels::from_hlc(100.01, 99.99, 100.0);
        let signal = run(l.s2, &l, &ZoneSet::default()).unwrap();
        assert_eq!(signal.reasons.len(), 1);
        assert!(signal.reasons[0].starts_with("Near S1"));
    }

    #[test]
    fn r2_plus_resistance_zone_is_a_sell_with_two_reasons() {
        let price = 110.05; // 0.045% above r2
        let signal = run(price, &levels(), &zones(&[], &[110.1])).unwrap();
        assert_eq!(signal.action, Action::Sell);
        assert_eq!(
            signal.reasons,
            vec!["Near R2 (110.0000)", "In Resistance Zone (110.1000)"]
        );
        assert_eq!(
            signal.reason(),
            "Near R2 (110.0000) and In Resistance Zone (110.1000)"
        );
    }

    #[test]
    fn pivot_buy_sticks_over_pivot_resistance() {
        // Degenerate candle: s1 == r1 == pp == 100
        let l = PivotLevels::from_hlc(100.0, 100.0, 100.0);
        let signal = run(100.0, &l, &ZoneSet::default()).unwrap();
        assert_eq!(signal.action, Action::Buy);
        assert_eq!(signal.reasons, vec!["Near S1 (100.0000)"]);
    }

    #[test]
    fn pivot_buy_sticks_over_resistance_zone() {
        let signal = run(95.0, &levels(), &zones(&[], &[95.1])).unwrap();
        assert_eq!(signal.action, Action::Buy);
        assert_eq!(signal.reasons.len(), 1);
    }

    #[test]
    fn support_zone_does_not_flip_pivot_sell() {
        let signal = run(105.0, &levels(), &zones(&[105.05], &[])).unwrap();
        assert_eq!(signal.action, Action::Sell);
        assert_eq!(signal.reasons, vec!["Near R1 (105.0000)"]);
    }

    #[test]
    fn overruled_support_zone_still_ends_the_scan() {
        // 105.05 contains the price but is overruled by the pivot Sell
        let signal = run(105.0, &levels(), &zones(&[105.05, 105.1], &[105.2])).unwrap();
        assert_eq!(signal.action, Action::Sell);
        assert_eq!(
            signal.reasons,
            vec!["Near R1 (105.0000)", "In Resistance Zone (105.2000)"]
        );
    }

    #[test]
    fn support_and_resistance_zone_together_is_a_buy() {
        let signal = run(102.0, &levels(), &zones(&[101.9], &[102.1])).unwrap();
        assert_eq!(signal.action, Action::Buy);
        assert_eq!(signal.reasons, vec!["In Support Zone (101.9000)"]);
    }

    #[test]
    fn only_first_containing_zone_is_reported() {
        let signal = run(102.0, &levels(), &zones(&[101.9, 102.0, 102.1], &[])).unwrap();
        assert_eq!(signal.reasons, vec!["In Support Zone (101.9000)"]);
    }

    #[test]
    fn resistance_zone_alone_is_a_sell() {
        let signal = run(120.0, &levels(), &zones(&[50.0], &[119.9, 120.1])).unwrap();
        assert_eq!(signal.action, Action::Sell);
        assert_eq!(signal.reasons, vec!["In Resistance Zone (119.9000)"]);
    }

    #[test]
    fn zone_buffer_is_relative_to_the_zone() {
        // 0.2% of 1000 is 2.0
        let z = zones(&[1000.0], &[]);
        assert!(run(998.1, &levels(), &z).is_some());
        assert!(run(1001.9, &levels(), &z).is_some());
        assert!(run(997.9, &levels(), &z).is_none());
        assert!(run(1002.1, &levels(), &z).is_none());
    }

    #[test]
    fn action_prints_in_upper_case() {
        assert_eq!(Action::Buy.to_string(), "BUY");
        assert_eq!(Action::Sell.to_string(), "SELL");
    }
}
