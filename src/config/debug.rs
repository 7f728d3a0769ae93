//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so release
//! builds remain quiet.

pub struct DebugFlags {
    /// Emit the number of klines returned by every fetch.
    pub print_fetch_counts: bool,
    /// Emit the full alert text before it is sent.
    pub print_alert_text: bool,
    /// Emit every zone emitted by the clusterer, with its member count.
    pub print_zone_clusters: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_fetch_counts: false,
    print_alert_text: false,
    print_zone_clusters: false,
};
