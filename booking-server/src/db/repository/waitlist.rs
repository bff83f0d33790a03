//! Waitlist Repository
//!
//! FIFO is `created_at ASC, id ASC` — the id tie-break keeps ordering stable
//! when two parties arrive in the same millisecond.

use super::{RepoError, RepoResult};
use shared::models::{Location, WaitlistEntry, WaitlistStatus};
use shared::util::now_millis;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, customer_id, adults, children, child_seat_required, location, status, \
     notes, estimated_wait_time, table_id, created_at, called_at, seated_at";

/// Insert payload
#[derive(Debug, Clone)]
pub struct NewWaitlistEntry {
    pub customer_id: i64,
    pub adults: i32,
    pub children: i32,
    pub child_seat_required: bool,
    pub location: Location,
    pub notes: Option<String>,
    pub estimated_wait_time: Option<i32>,
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<WaitlistEntry>> {
    let entry = sqlx::query_as::<_, WaitlistEntry>(&format!(
        "SELECT {COLUMNS} FROM waitlist_entry WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(entry)
}

pub async fn create(pool: &SqlitePool, data: NewWaitlistEntry) -> RepoResult<WaitlistEntry> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO waitlist_entry (customer_id, adults, children, child_seat_required, location, \
         status, notes, estimated_wait_time, created_at) \
         VALUES (?, ?, ?, ?, ?, 'Waiting', ?, ?, ?) RETURNING id",
    )
    .bind(data.customer_id)
    .bind(data.adults)
    .bind(data.children)
    .bind(data.child_seat_required)
    .bind(data.location)
    .bind(&data.notes)
    .bind(data.estimated_wait_time)
    .bind(now_millis())
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create waitlist entry".into()))
}

/// Active entries (Waiting/Called) in arrival order
pub async fn list_active(pool: &SqlitePool) -> RepoResult<Vec<WaitlistEntry>> {
    let entries = sqlx::query_as::<_, WaitlistEntry>(&format!(
        "SELECT {COLUMNS} FROM waitlist_entry WHERE status IN ('Waiting', 'Called') ORDER BY created_at ASC, id ASC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(entries)
}

/// Waiting entries in arrival order
pub async fn list_waiting(pool: &SqlitePool) -> RepoResult<Vec<WaitlistEntry>> {
    let entries = sqlx::query_as::<_, WaitlistEntry>(&format!(
        "SELECT {COLUMNS} FROM waitlist_entry WHERE status = 'Waiting' ORDER BY created_at ASC, id ASC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(entries)
}

/// Earliest Waiting entry a freed table could seat
///
/// First-fit by arrival order, not head-of-queue: a large party at the front
/// must not block smaller parties behind it.
pub async fn first_waiting_matching(
    pool: &SqlitePool,
    location: Location,
    table_size: i32,
) -> RepoResult<Option<WaitlistEntry>> {
    let entry = sqlx::query_as::<_, WaitlistEntry>(&format!(
        "SELECT {COLUMNS} FROM waitlist_entry WHERE status = 'Waiting' AND location = ? \
         AND (adults + children) <= ? ORDER BY created_at ASC, id ASC LIMIT 1"
    ))
    .bind(location)
    .bind(table_size)
    .fetch_optional(pool)
    .await?;
    Ok(entry)
}

/// The Seated entry currently holding a table, if any
pub async fn find_seated_by_table(
    pool: &SqlitePool,
    table_id: i64,
) -> RepoResult<Option<WaitlistEntry>> {
    let entry = sqlx::query_as::<_, WaitlistEntry>(&format!(
        "SELECT {COLUMNS} FROM waitlist_entry WHERE table_id = ? AND status = 'Seated' LIMIT 1"
    ))
    .bind(table_id)
    .fetch_optional(pool)
    .await?;
    Ok(entry)
}

/// Waiting -> Called
pub async fn mark_called(
    pool: &SqlitePool,
    id: i64,
    estimated_wait_time: Option<i32>,
) -> RepoResult<WaitlistEntry> {
    let rows = sqlx::query(
        "UPDATE waitlist_entry SET status = 'Called', called_at = ?, \
         estimated_wait_time = COALESCE(?, estimated_wait_time) WHERE id = ? AND status = 'Waiting'",
    )
    .bind(now_millis())
    .bind(estimated_wait_time)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Waitlist entry {id} not found or not waiting"
        )));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Waitlist entry {id} not found")))
}

/// Waiting/Called -> Seated at the given table
pub async fn mark_seated(pool: &SqlitePool, id: i64, table_id: i64) -> RepoResult<WaitlistEntry> {
    let rows = sqlx::query(
        "UPDATE waitlist_entry SET status = 'Seated', table_id = ?, seated_at = ? \
         WHERE id = ? AND status IN ('Waiting', 'Called')",
    )
    .bind(table_id)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Waitlist entry {id} not found or already finalized"
        )));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Waitlist entry {id} not found")))
}

/// Waiting/Called -> Cancelled
pub async fn mark_cancelled(pool: &SqlitePool, id: i64) -> RepoResult<WaitlistEntry> {
    let rows = sqlx::query(
        "UPDATE waitlist_entry SET status = 'Cancelled' WHERE id = ? AND status IN ('Waiting', 'Called')",
    )
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Waitlist entry {id} not found or already finalized"
        )));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Waitlist entry {id} not found")))
}

/// Update the staff wait-time estimate and notes
pub async fn update_estimate(
    pool: &SqlitePool,
    id: i64,
    estimated_wait_time: Option<i32>,
    notes: Option<String>,
) -> RepoResult<WaitlistEntry> {
    let rows = sqlx::query(
        "UPDATE waitlist_entry SET estimated_wait_time = COALESCE(?, estimated_wait_time), \
         notes = COALESCE(?, notes) WHERE id = ?",
    )
    .bind(estimated_wait_time)
    .bind(notes)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Waitlist entry {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Waitlist entry {id} not found")))
}

/// Hard delete (staff correction)
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM waitlist_entry WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Waitlist entry {id} not found")));
    }
    Ok(true)
}

pub async fn count_by_status(pool: &SqlitePool, status: WaitlistStatus) -> RepoResult<i64> {
    let count =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM waitlist_entry WHERE status = ?")
            .bind(status)
            .fetch_one(pool)
            .await?;
    Ok(count)
}
