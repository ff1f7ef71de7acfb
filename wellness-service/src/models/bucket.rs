//! Time-bucket keys for the response cache.
//!
//! Daily and weekly caching both key on (user, bucket); the bucket key is a
//! deterministic string derived from the current UTC date. The `daily-` and
//! `weekly-` prefixes keep the two families disjoint within one table.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// Bucket key for the current calendar date, e.g. `daily-2025-02-01`.
pub fn daily_key(now: DateTime<Utc>) -> String {
    format!("daily-{}", now.date_naive().format("%Y-%m-%d"))
}

/// Bucket key for the current week, e.g. `weekly-2025-W6`.
pub fn weekly_key(now: DateTime<Utc>) -> String {
    let date = now.date_naive();
    format!("weekly-{}-W{}", date.year(), week_number(date))
}

/// Week-of-year used by weekly buckets: seven-day blocks counted from
/// January 1, offset by the date's weekday. Every caller must go through
/// this one routine or cache keys drift between writers and readers.
fn week_number(date: NaiveDate) -> u32 {
    (date.weekday().num_days_from_sunday() + 1 + date.ordinal0()).div_ceil(7)
}
