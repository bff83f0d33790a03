//! Reservation Repository

use super::{RepoError, RepoResult};
use shared::models::{Reservation, ReservationStatus, ReservationType};
use shared::util::now_millis;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, customer_id, table_id, adults, children, child_seat_required, status, \
     queue_number, queue_day, reservation_type, is_scheduled, reservation_date, reservation_time, \
     notes, created_at, seated_at";

/// Insert payload — queue number and status are decided by the seating
/// manager, not by callers of the public API.
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub customer_id: i64,
    pub table_id: Option<i64>,
    pub adults: i32,
    pub children: i32,
    pub child_seat_required: bool,
    pub status: ReservationStatus,
    pub queue_number: i32,
    pub queue_day: String,
    pub reservation_type: ReservationType,
    pub is_scheduled: bool,
    pub reservation_date: Option<String>,
    pub reservation_time: Option<String>,
    pub notes: Option<String>,
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Reservation>> {
    let reservation = sqlx::query_as::<_, Reservation>(&format!(
        "SELECT {COLUMNS} FROM reservation WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(reservation)
}

pub async fn create(pool: &SqlitePool, data: NewReservation) -> RepoResult<Reservation> {
    let now = now_millis();
    let seated_at = (data.status == ReservationStatus::Seated).then_some(now);

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO reservation (customer_id, table_id, adults, children, child_seat_required, \
         status, queue_number, queue_day, reservation_type, is_scheduled, reservation_date, \
         reservation_time, notes, created_at, seated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(data.customer_id)
    .bind(data.table_id)
    .bind(data.adults)
    .bind(data.children)
    .bind(data.child_seat_required)
    .bind(data.status)
    .bind(data.queue_number)
    .bind(&data.queue_day)
    .bind(data.reservation_type)
    .bind(data.is_scheduled)
    .bind(&data.reservation_date)
    .bind(&data.reservation_time)
    .bind(&data.notes)
    .bind(now)
    .bind(seated_at)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create reservation".into()))
}

/// Highest queue number handed out on a business day (0 if none)
pub async fn max_queue_number(pool: &SqlitePool, queue_day: &str) -> RepoResult<i32> {
    let max = sqlx::query_scalar::<_, i32>(
        "SELECT COALESCE(MAX(queue_number), 0) FROM reservation WHERE queue_day = ?",
    )
    .bind(queue_day)
    .fetch_one(pool)
    .await?;
    Ok(max)
}

/// Move a Queued reservation to Seated at the given table
pub async fn seat(pool: &SqlitePool, id: i64, table_id: i64) -> RepoResult<Reservation> {
    let rows = sqlx::query(
        "UPDATE reservation SET status = 'Seated', table_id = ?, seated_at = ? WHERE id = ? AND status = 'Queued'",
    )
    .bind(table_id)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Reservation {id} not found or not queued"
        )));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Reservation {id} not found")))
}

/// Close out a Seated reservation; the table reference is kept for history
pub async fn complete(pool: &SqlitePool, id: i64) -> RepoResult<Reservation> {
    let rows = sqlx::query("UPDATE reservation SET status = 'Completed' WHERE id = ? AND status = 'Seated'")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Reservation {id} not found or not seated"
        )));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Reservation {id} not found")))
}

/// Terminate an active reservation (Cancelled or No-show), dropping its
/// table reference
pub async fn terminate(
    pool: &SqlitePool,
    id: i64,
    status: ReservationStatus,
) -> RepoResult<Reservation> {
    let rows = sqlx::query(
        "UPDATE reservation SET status = ?, table_id = NULL WHERE id = ? AND status IN ('Queued', 'Seated')",
    )
    .bind(status)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Reservation {id} not found or not active"
        )));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Reservation {id} not found")))
}

/// The Seated reservation currently holding a table, if any
pub async fn find_seated_by_table(
    pool: &SqlitePool,
    table_id: i64,
) -> RepoResult<Option<Reservation>> {
    let reservation = sqlx::query_as::<_, Reservation>(&format!(
        "SELECT {COLUMNS} FROM reservation WHERE table_id = ? AND status = 'Seated' LIMIT 1"
    ))
    .bind(table_id)
    .fetch_optional(pool)
    .await?;
    Ok(reservation)
}

/// Committed (Queued/Seated, table-holding) reservations at an exact slot
pub async fn count_committed_at_slot(
    pool: &SqlitePool,
    date: &str,
    time: &str,
) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM reservation WHERE reservation_date = ? AND reservation_time = ? \
         AND status IN ('Queued', 'Seated') AND table_id IS NOT NULL",
    )
    .bind(date)
    .bind(time)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Queued reservations in queue order
pub async fn list_queue(pool: &SqlitePool) -> RepoResult<Vec<Reservation>> {
    let reservations = sqlx::query_as::<_, Reservation>(&format!(
        "SELECT {COLUMNS} FROM reservation WHERE status = 'Queued' ORDER BY queue_day, queue_number"
    ))
    .fetch_all(pool)
    .await?;
    Ok(reservations)
}

/// All reservations created on a business day, in queue order
pub async fn list_on_day(pool: &SqlitePool, queue_day: &str) -> RepoResult<Vec<Reservation>> {
    let reservations = sqlx::query_as::<_, Reservation>(&format!(
        "SELECT {COLUMNS} FROM reservation WHERE queue_day = ? ORDER BY queue_number"
    ))
    .bind(queue_day)
    .fetch_all(pool)
    .await?;
    Ok(reservations)
}

pub async fn list_by_customer(pool: &SqlitePool, customer_id: i64) -> RepoResult<Vec<Reservation>> {
    let reservations = sqlx::query_as::<_, Reservation>(&format!(
        "SELECT {COLUMNS} FROM reservation WHERE customer_id = ? ORDER BY created_at DESC"
    ))
    .bind(customer_id)
    .fetch_all(pool)
    .await?;
    Ok(reservations)
}

pub async fn count_by_status(pool: &SqlitePool, status: ReservationStatus) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reservation WHERE status = ?")
        .bind(status)
        .fetch_one(pool)
        .await?;
    Ok(count)
}
