use super::*;
use crate::db::DbService;
use crate::services::{BroadcastNotifier, Notification};
use shared::models::ReservationType;
use tokio::sync::broadcast;

mod test_transitions;

const TZ: Tz = chrono_tz::Europe::Madrid;

async fn test_manager() -> SeatingManager {
    let db = DbService::open_in_memory().await.unwrap();
    SeatingManager::new(db.pool, Arc::new(BroadcastNotifier::new()), TZ)
}

/// Manager plus a subscription to its notification stream
async fn test_manager_with_notifications() -> (SeatingManager, broadcast::Receiver<Notification>) {
    let db = DbService::open_in_memory().await.unwrap();
    let notifier = Arc::new(BroadcastNotifier::new());
    let rx = notifier.subscribe();
    (SeatingManager::new(db.pool, notifier, TZ), rx)
}

async fn seed_table(
    manager: &SeatingManager,
    number: &str,
    location: Location,
    size: i32,
) -> DiningTable {
    manager
        .create_table(DiningTableCreate {
            table_number: number.to_string(),
            location,
            size,
        })
        .await
        .unwrap()
}

fn walk_in(name: &str, phone: &str, adults: i32, children: i32, location: Location) -> BookingRequest {
    BookingRequest {
        name: name.to_string(),
        phone_number: phone.to_string(),
        email: None,
        adults,
        children,
        child_seat_required: false,
        location,
        notes: None,
        reservation_type: ReservationType::WalkIn,
        is_scheduled: false,
        reservation_date: None,
        reservation_time: None,
    }
}

fn scheduled(
    name: &str,
    phone: &str,
    adults: i32,
    location: Location,
    date: &str,
    time: &str,
) -> BookingRequest {
    BookingRequest {
        name: name.to_string(),
        phone_number: phone.to_string(),
        email: None,
        adults,
        children: 0,
        child_seat_required: false,
        location,
        notes: None,
        reservation_type: ReservationType::Online,
        is_scheduled: true,
        reservation_date: Some(date.to_string()),
        reservation_time: Some(time.to_string()),
    }
}

/// Occupancy invariant: every Seated reservation holds an occupied table,
/// at most one Seated reservation references any table, and a free table is
/// held by nobody. (A vacated table may still be referenced by a historical
/// Seated waitlist entry — the entry is the seating record, not a live hold.)
async fn assert_occupancy_invariant(manager: &SeatingManager) {
    for table in manager.list_tables().await.unwrap() {
        let seated_reservations: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM reservation WHERE table_id = ? AND status = 'Seated'",
        )
        .bind(table.id)
        .fetch_one(&manager.pool)
        .await
        .unwrap();
        assert!(
            seated_reservations <= 1,
            "table {} is double-booked",
            table.table_number
        );
        if seated_reservations == 1 {
            assert!(
                table.is_occupied,
                "table {} held by a seated reservation must be occupied",
                table.table_number
            );
        }
        if !table.is_occupied {
            assert_eq!(
                seated_reservations, 0,
                "free table {} must have no seated reservation",
                table.table_number
            );
        }
    }
}
