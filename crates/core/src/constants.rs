//! Time windows and cache lifetimes shared across tiers.

use chrono::Duration;
use std::time::Duration as StdDuration;

/// One day, in seconds.
pub const WINDOW_YESTERDAY: i64 = 24 * 60 * 60;

/// Seven days, in seconds.
pub const WINDOW_7D: i64 = 7 * 24 * 60 * 60;

/// The widest aggregation lookback any caller is allowed to use, in seconds.
pub const BIGGEST_WINDOW: i64 = 8 * 24 * 60 * 60;

/// Safety buffer added on top of the biggest window, in seconds.
pub const BUFFER_TTL: i64 = 60 * 60;

/// How far back a "latest" read is willing to look in the time-series tier.
pub const QUOTATION_LOOKBACK_HOURS: i64 = 24 * 7;

/// Cache entry lifetime.
///
/// Covers the biggest lookback window plus a buffer so a cache entry can never
/// outlive the range the time-series fallback would still accept.
pub fn cache_ttl() -> StdDuration {
    StdDuration::from_secs((BIGGEST_WINDOW + BUFFER_TTL) as u64)
}

/// Lookback window for latest-quotation reads that fall through to the
/// time-series tier.
pub fn quotation_lookback() -> Duration {
    Duration::hours(QUOTATION_LOOKBACK_HOURS)
}
