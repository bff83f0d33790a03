//! Customer Repository

use super::{RepoError, RepoResult};
use shared::models::{Customer, CustomerCreate};
use shared::util::now_millis;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, name, phone_number, email, notes, created_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Customer>> {
    let customer =
        sqlx::query_as::<_, Customer>(&format!("SELECT {COLUMNS} FROM customer WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(customer)
}

pub async fn find_by_phone(pool: &SqlitePool, phone: &str) -> RepoResult<Option<Customer>> {
    let customer = sqlx::query_as::<_, Customer>(&format!(
        "SELECT {COLUMNS} FROM customer WHERE phone_number = ? LIMIT 1"
    ))
    .bind(phone)
    .fetch_optional(pool)
    .await?;
    Ok(customer)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Customer>> {
    let customers =
        sqlx::query_as::<_, Customer>(&format!("SELECT {COLUMNS} FROM customer ORDER BY name"))
            .fetch_all(pool)
            .await?;
    Ok(customers)
}

/// Find a customer by phone number, creating one if absent
///
/// Booking is idempotent on phone number for customer identity: an existing
/// customer is returned as-is, the payload's name/email are not applied over
/// it. `INSERT OR IGNORE` keeps concurrent first bookings from the same
/// phone race-free.
pub async fn upsert_by_phone(pool: &SqlitePool, data: &CustomerCreate) -> RepoResult<Customer> {
    if let Some(existing) = find_by_phone(pool, &data.phone_number).await? {
        return Ok(existing);
    }

    sqlx::query(
        "INSERT OR IGNORE INTO customer (name, phone_number, email, notes, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&data.name)
    .bind(&data.phone_number)
    .bind(&data.email)
    .bind(&data.notes)
    .bind(now_millis())
    .execute(pool)
    .await?;

    find_by_phone(pool, &data.phone_number)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to upsert customer".into()))
}
