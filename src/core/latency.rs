//! Latency helpers for `/ping`.

use chrono::{DateTime, Utc};

/// Discord epoch (2015-01-01T00:00:00Z) in Unix milliseconds.
pub const DISCORD_EPOCH_MS: i64 = 1_420_070_400_000;

/// Unix milliseconds encoded in a Discord snowflake ID.
#[must_use]
pub const fn snowflake_millis(id: u64) -> i64 {
    (id >> 22) as i64 + DISCORD_EPOCH_MS
}

/// Milliseconds between the creation of snowflake `id` and `now`, never negative.
#[must_use]
pub fn elapsed_since_snowflake(id: u64, now: DateTime<Utc>) -> u64 {
    u64::try_from(now.timestamp_millis() - snowflake_millis(id)).unwrap_or(0)
}
