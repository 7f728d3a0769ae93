/// Round to a fixed number of decimal places (half away from zero).
pub fn round_to_dp(value: f64, dp: i32) -> f64 {
    let factor = 10f64.powi(dp);
    (value * factor).round() / factor
}

/// Arithmetic mean. Returns `None` for an empty slice rather than NaN.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Is `value` within `+/- pct` (fractional, 0.001 = 0.1%) of `reference`?
/// Both bounds are inclusive.
pub fn within_pct(value: f64, reference: f64, pct: f64) -> bool {
    (value - reference).abs() <= reference.abs() * pct
}

/// Is `value` inside the band `[reference * (1 - pct), reference * (1 + pct)]`?
pub fn in_band(value: f64, reference: f64, pct: f64) -> bool {
    let lower_bound = reference * (1.0 - pct);
    let upper_bound = reference * (1.0 + pct);
    lower_bound <= value && value <= upper_bound
}

/// Sort ascending and drop exact duplicates. NaNs sort last via `total_cmp`.
pub fn sort_dedup(values: &mut Vec<f64>) {
    values.sort_by(|a, b| a.total_cmp(b));
    values.dedup();
}
