//! Dining Table Repository
//!
//! Table registry: CRUD plus the occupancy flag. Occupancy policy:
//! occupying an already-occupied table is an error (double-seating is always
//! a bug), freeing an already-free table is a no-op (cleanup paths must be
//! safe to repeat).

use super::{RepoError, RepoResult};
use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate, Location};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, table_number, location, size, is_occupied";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<DiningTable>> {
    let tables = sqlx::query_as::<_, DiningTable>(
        "SELECT id, table_number, location, size, is_occupied FROM dining_table ORDER BY table_number",
    )
    .fetch_all(pool)
    .await?;
    Ok(tables)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<DiningTable>> {
    let table = sqlx::query_as::<_, DiningTable>(&format!(
        "SELECT {COLUMNS} FROM dining_table WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(table)
}

pub async fn find_by_number(pool: &SqlitePool, number: &str) -> RepoResult<Option<DiningTable>> {
    let table = sqlx::query_as::<_, DiningTable>(&format!(
        "SELECT {COLUMNS} FROM dining_table WHERE table_number = ? LIMIT 1"
    ))
    .bind(number)
    .fetch_optional(pool)
    .await?;
    Ok(table)
}

/// Free tables at a location, smallest first
///
/// The ordering is the matcher's tie-break: smallest qualifying size, then
/// lowest id. Keep it stable — tests depend on it.
pub async fn list_free(pool: &SqlitePool, location: Location) -> RepoResult<Vec<DiningTable>> {
    let tables = sqlx::query_as::<_, DiningTable>(&format!(
        "SELECT {COLUMNS} FROM dining_table WHERE location = ? AND is_occupied = 0 ORDER BY size ASC, id ASC"
    ))
    .bind(location)
    .fetch_all(pool)
    .await?;
    Ok(tables)
}

/// Count tables that could ever seat the party, regardless of occupancy
pub async fn count_matching(
    pool: &SqlitePool,
    location: Location,
    min_size: i32,
) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM dining_table WHERE location = ? AND size >= ?",
    )
    .bind(location)
    .bind(min_size)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Count currently free tables that fit the party
pub async fn count_free_matching(
    pool: &SqlitePool,
    location: Location,
    min_size: i32,
) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM dining_table WHERE location = ? AND size >= ? AND is_occupied = 0",
    )
    .bind(location)
    .bind(min_size)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

pub async fn create(pool: &SqlitePool, data: DiningTableCreate) -> RepoResult<DiningTable> {
    if data.size < 1 {
        return Err(RepoError::Validation(format!(
            "Table size must be at least 1, got {}",
            data.size
        )));
    }
    if find_by_number(pool, &data.table_number).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Table '{}' already exists",
            data.table_number
        )));
    }

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO dining_table (table_number, location, size, is_occupied) VALUES (?, ?, ?, 0) RETURNING id",
    )
    .bind(&data.table_number)
    .bind(data.location)
    .bind(data.size)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create dining table".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: DiningTableUpdate) -> RepoResult<DiningTable> {
    if let Some(size) = data.size
        && size < 1
    {
        return Err(RepoError::Validation(format!(
            "Table size must be at least 1, got {size}"
        )));
    }
    if let Some(number) = &data.table_number
        && let Some(found) = find_by_number(pool, number).await?
        && found.id != id
    {
        return Err(RepoError::Duplicate(format!(
            "Table '{number}' already exists"
        )));
    }

    let rows = sqlx::query(
        "UPDATE dining_table SET table_number = COALESCE(?1, table_number), location = COALESCE(?2, location), size = COALESCE(?3, size) WHERE id = ?4",
    )
    .bind(data.table_number)
    .bind(data.location)
    .bind(data.size)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Table {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Table {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    // Refuse while a party is still at the table or queued for it
    let active = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM reservation WHERE table_id = ? AND status IN ('Queued', 'Seated')",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;
    if active > 0 {
        return Err(RepoError::Validation(
            "Cannot delete a table with active reservations".into(),
        ));
    }

    let rows = sqlx::query("DELETE FROM dining_table WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Table {id} not found")));
    }
    Ok(true)
}

/// Mark a table occupied
///
/// Fails with `Duplicate` if the table is already occupied.
pub async fn mark_occupied(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE dining_table SET is_occupied = 1 WHERE id = ? AND is_occupied = 0")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return match find_by_id(pool, id).await? {
            Some(table) => Err(RepoError::Duplicate(format!(
                "Table '{}' is already occupied",
                table.table_number
            ))),
            None => Err(RepoError::NotFound(format!("Table {id} not found"))),
        };
    }
    Ok(())
}

/// Mark a table free (idempotent)
pub async fn mark_free(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE dining_table SET is_occupied = 0 WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Table {id} not found")));
    }
    Ok(())
}
