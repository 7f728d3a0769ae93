use itertools::Itertools;

use crate::analysis::PairReport;

fn price_list(prices: &[f64]) -> String {
    prices.iter().map(|p| format!("{:.4}", p)).join(", ")
}

/// Telegram Markdown alert for a report that carries a signal. `None` when there is nothing to say.
pub fn format_alert(report: &PairReport) -> Option<String> {
    let signal = report.signal.as_ref()?;
    let p = &report.pivots;

    let lines = [
        format!("🚨 *{} Signal!* 🚨", report.pair_interval),
        format!("📊 *Action:* {}!", signal.action),
        format!("💰 *Price:* {:.4}", report.current_price),
        format!("📈 *Reason:* {}", signal.reason()),
        "---".to_string(),
        "📐 *Pivot Points:*".to_string(),
        format!("  PP: `{:.4}`", p.pp),
        format!("  R1: `{:.4}`, R2: `{:.4}`, R3: `{:.4}`", p.r1, p.r2, p.r3),
        format!("  S1: `{:.4}`, S2: `{:.4}`, S3: `{:.4}`", p.s1, p.s2, p.s3),
        "🌐 *Zones:*".to_string(),
        format!("  Support: `{}`", price_list(&report.zones.support)),
        format!("  Resistance: `{}`", price_list(&report.zones.resistance)),
    ];
    Some(lines.join("\n"))
}
