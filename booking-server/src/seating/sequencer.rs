//! Queue Sequencer
//!
//! Day-scoped queue numbers: `1 + MAX(queue_number)` over reservations
//! created on the current business day, starting at 1. Numbers are assigned
//! once and never reused or renumbered.
//!
//! Callers must hold the allocation lock; the `UNIQUE (queue_day,
//! queue_number)` index is the schema-level backstop, not the primary
//! defense.

use crate::db::repository::{RepoResult, reservation};
use chrono_tz::Tz;
use shared::util::business_today;
use sqlx::SqlitePool;

/// Queue day key format (`YYYY-MM-DD`)
const DAY_FORMAT: &str = "%Y-%m-%d";

/// Today's queue day key in the business timezone
pub fn queue_day(tz: Tz) -> String {
    business_today(tz).format(DAY_FORMAT).to_string()
}

/// Next queue number for the current business day
///
/// Returns the day key together with the number so the caller persists the
/// pair it was computed for — the day may roll over between calls.
pub async fn next_queue_number(pool: &SqlitePool, tz: Tz) -> RepoResult<(String, i32)> {
    let day = queue_day(tz);
    let max = reservation::max_queue_number(pool, &day).await?;
    Ok((day, max + 1))
}
