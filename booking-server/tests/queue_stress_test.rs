//! Concurrent booking stress tests
//!
//! N simultaneous bookings on one business day must receive the queue
//! numbers {1..N} exactly once each, and no two of them may claim the same
//! table.

use booking_server::{BroadcastNotifier, DbService, SeatingManager};
use shared::models::{BookingRequest, DiningTableCreate, Location, ReservationType};
use std::collections::HashSet;
use std::sync::Arc;

const PARTIES: i32 = 24;

fn request(i: i32) -> BookingRequest {
    BookingRequest {
        name: format!("Guest {i}"),
        phone_number: format!("+346000{i:05}"),
        email: None,
        adults: 2,
        children: 0,
        child_seat_required: false,
        location: Location::Indoor,
        notes: None,
        reservation_type: ReservationType::WalkIn,
        is_scheduled: false,
        reservation_date: None,
        reservation_time: None,
    }
}

async fn test_manager() -> Arc<SeatingManager> {
    let db = DbService::open_in_memory().await.unwrap();
    Arc::new(SeatingManager::new(
        db.pool.clone(),
        Arc::new(BroadcastNotifier::new()),
        chrono_tz::Europe::Madrid,
    ))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_creates_on_one_day_yield_sequential_numbers() {
    let manager = test_manager().await;

    // Plenty of tables: every booking gets seated and takes a number
    for i in 0..PARTIES {
        manager
            .create_table(DiningTableCreate {
                table_number: format!("T{i}"),
                location: Location::Indoor,
                size: 4,
            })
            .await
            .unwrap();
    }

    let mut handles = Vec::new();
    for i in 0..PARTIES {
        let manager = manager.clone();
        handles.push(tokio::spawn(async move { manager.book(request(i)).await }));
    }

    let mut numbers = Vec::new();
    for handle in handles {
        let reservation = handle.await.unwrap().unwrap().reservation().unwrap();
        numbers.push(reservation.queue_number);
    }

    let unique: HashSet<i32> = numbers.iter().copied().collect();
    assert_eq!(unique.len(), PARTIES as usize, "queue numbers must be distinct");
    numbers.sort_unstable();
    assert_eq!(numbers, (1..=PARTIES).collect::<Vec<i32>>());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_bookings_never_double_book_a_table() {
    use rand::Rng;

    let manager = test_manager().await;

    // Fewer tables than parties: the overflow goes to the waitlist
    for i in 0..4 {
        manager
            .create_table(DiningTableCreate {
                table_number: format!("T{i}"),
                location: Location::Indoor,
                size: 4,
            })
            .await
            .unwrap();
    }

    let mut handles = Vec::new();
    for i in 0..16 {
        let manager = manager.clone();
        let adults = rand::thread_rng().gen_range(1..=4);
        handles.push(tokio::spawn(async move {
            let mut req = request(i);
            req.adults = adults;
            manager.book(req).await
        }));
    }

    let mut seated_tables = Vec::new();
    let mut waitlisted = 0;
    for handle in handles {
        match handle.await.unwrap().unwrap() {
            booking_server::BookingOutcome::Reserved(r) => {
                seated_tables.push(r.table_id.expect("walk-in reservations hold a table"));
            }
            booking_server::BookingOutcome::Waitlisted(_) => waitlisted += 1,
        }
    }

    assert_eq!(seated_tables.len(), 4);
    assert_eq!(waitlisted, 12);
    let unique: HashSet<i64> = seated_tables.iter().copied().collect();
    assert_eq!(unique.len(), 4, "no table may be claimed twice");
}
