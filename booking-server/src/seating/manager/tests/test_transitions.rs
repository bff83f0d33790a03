use super::*;

async fn seat_party(manager: &SeatingManager, phone: &str) -> Reservation {
    manager
        .book(walk_in("Guest", phone, 2, 0, Location::Indoor))
        .await
        .unwrap()
        .reservation()
        .unwrap()
}

#[tokio::test]
async fn test_complete_frees_table() {
    let manager = test_manager().await;
    let table = seed_table(&manager, "T1", Location::Indoor, 4).await;
    let reservation = seat_party(&manager, "+34600000001").await;

    let completed = manager.complete(reservation.id).await.unwrap();
    assert_eq!(completed.status, ReservationStatus::Completed);
    // Table reference stays on the row for history
    assert_eq!(completed.table_id, Some(table.id));
    assert!(!manager.get_table(table.id).await.unwrap().is_occupied);
    assert_occupancy_invariant(&manager).await;
}

#[tokio::test]
async fn test_cancel_seated_frees_table_and_recancel_fails() {
    let manager = test_manager().await;
    let table = seed_table(&manager, "T1", Location::Indoor, 4).await;
    let reservation = seat_party(&manager, "+34600000001").await;

    let cancelled = manager.cancel(reservation.id).await.unwrap();
    assert_eq!(cancelled.status, ReservationStatus::Cancelled);
    assert!(cancelled.table_id.is_none());
    assert!(!manager.get_table(table.id).await.unwrap().is_occupied);
    assert_occupancy_invariant(&manager).await;

    // Second cancel: the row exists but admits no further transitions
    let again = manager.cancel(reservation.id).await;
    match again {
        Err(SeatingError::ReservationFinalized { id, status }) => {
            assert_eq!(id, reservation.id);
            assert_eq!(status, ReservationStatus::Cancelled);
        }
        other => panic!("expected ReservationFinalized, got {other:?}"),
    }
}

#[tokio::test]
async fn test_cancel_queued_reservation() {
    let manager = test_manager().await;
    seed_table(&manager, "T1", Location::Indoor, 4).await;
    seat_party(&manager, "+34600000001").await;

    let queued = manager
        .book(scheduled("Luis", "+34600000002", 2, Location::Indoor, "2024-01-01", "20:00"))
        .await
        .unwrap()
        .reservation()
        .unwrap();
    assert_eq!(queued.status, ReservationStatus::Queued);

    let cancelled = manager.cancel(queued.id).await.unwrap();
    assert_eq!(cancelled.status, ReservationStatus::Cancelled);
}

#[tokio::test]
async fn test_operations_on_missing_reservation_fail_not_found() {
    let manager = test_manager().await;

    assert!(matches!(
        manager.cancel(9999).await,
        Err(SeatingError::ReservationNotFound(9999))
    ));
    assert!(matches!(
        manager.complete(9999).await,
        Err(SeatingError::ReservationNotFound(9999))
    ));
    assert!(matches!(
        manager.mark_no_show(9999).await,
        Err(SeatingError::ReservationNotFound(9999))
    ));
}

#[tokio::test]
async fn test_no_show_from_queued_only() {
    let manager = test_manager().await;
    seed_table(&manager, "T1", Location::Indoor, 4).await;
    let seated = seat_party(&manager, "+34600000001").await;

    // Seated parties are present, they cannot no-show
    assert!(matches!(
        manager.mark_no_show(seated.id).await,
        Err(SeatingError::InvalidTransition { .. })
    ));

    let queued = manager
        .book(scheduled("Luis", "+34600000002", 2, Location::Indoor, "2024-01-01", "20:00"))
        .await
        .unwrap()
        .reservation()
        .unwrap();
    let marked = manager.mark_no_show(queued.id).await.unwrap();
    assert_eq!(marked.status, ReservationStatus::NoShow);
}

#[tokio::test]
async fn test_assign_table_seats_queued_reservation() {
    let manager = test_manager().await;
    seed_table(&manager, "T1", Location::Indoor, 4).await;
    let first = seat_party(&manager, "+34600000001").await;

    let queued = manager
        .book(scheduled("Luis", "+34600000002", 2, Location::Indoor, "2024-01-01", "20:00"))
        .await
        .unwrap()
        .reservation()
        .unwrap();

    // Table still occupied by the first party
    let table_id = first.table_id.unwrap();
    assert!(matches!(
        manager.assign_table(queued.id, table_id).await,
        Err(SeatingError::TableOccupied(_))
    ));

    manager.complete(first.id).await.unwrap();
    let seated = manager.assign_table(queued.id, table_id).await.unwrap();
    assert_eq!(seated.status, ReservationStatus::Seated);
    assert_eq!(seated.table_id, Some(table_id));
    assert!(seated.seated_at.is_some());
    assert!(manager.get_table(table_id).await.unwrap().is_occupied);
    assert_occupancy_invariant(&manager).await;
}

#[tokio::test]
async fn test_assign_table_rejects_non_queued() {
    let manager = test_manager().await;
    seed_table(&manager, "T1", Location::Indoor, 4).await;
    seed_table(&manager, "T2", Location::Indoor, 4).await;
    let seated = seat_party(&manager, "+34600000001").await;

    let spare = manager.list_tables().await.unwrap()[1].clone();
    assert!(matches!(
        manager.assign_table(seated.id, spare.id).await,
        Err(SeatingError::InvalidTransition { .. })
    ));

    manager.cancel(seated.id).await.unwrap();
    assert!(matches!(
        manager.assign_table(seated.id, spare.id).await,
        Err(SeatingError::ReservationFinalized { .. })
    ));
}

#[tokio::test]
async fn test_complete_requires_seated() {
    let manager = test_manager().await;
    seed_table(&manager, "T1", Location::Indoor, 4).await;
    seat_party(&manager, "+34600000001").await;

    let queued = manager
        .book(scheduled("Luis", "+34600000002", 2, Location::Indoor, "2024-01-01", "20:00"))
        .await
        .unwrap()
        .reservation()
        .unwrap();

    assert!(matches!(
        manager.complete(queued.id).await,
        Err(SeatingError::InvalidTransition { .. })
    ));
}

#[tokio::test]
async fn test_vacate_refuses_reservation_held_table() {
    let manager = test_manager().await;
    let table = seed_table(&manager, "T1", Location::Indoor, 4).await;
    seat_party(&manager, "+34600000001").await;

    assert!(matches!(
        manager.vacate_table(table.id).await,
        Err(SeatingError::TableInUse(_))
    ));
}

#[tokio::test]
async fn test_vacate_is_idempotent_on_free_tables() {
    let manager = test_manager().await;
    let table = seed_table(&manager, "T1", Location::Indoor, 4).await;

    let vacated = manager.vacate_table(table.id).await.unwrap();
    assert!(!vacated.is_occupied);
}

#[tokio::test]
async fn test_occupy_table_override_conflicts_when_taken() {
    let manager = test_manager().await;
    let table = seed_table(&manager, "T1", Location::Indoor, 4).await;

    let occupied = manager.occupy_table(table.id).await.unwrap();
    assert!(occupied.is_occupied);

    assert!(matches!(
        manager.occupy_table(table.id).await,
        Err(SeatingError::TableOccupied(_))
    ));
}

#[tokio::test]
async fn test_delete_table_guarded_while_in_use() {
    let manager = test_manager().await;
    let table = seed_table(&manager, "T1", Location::Indoor, 4).await;
    let reservation = seat_party(&manager, "+34600000001").await;

    assert!(matches!(
        manager.delete_table(table.id).await,
        Err(SeatingError::TableInUse(_))
    ));

    manager.complete(reservation.id).await.unwrap();
    manager.delete_table(table.id).await.unwrap();
    assert!(matches!(
        manager.get_table(table.id).await,
        Err(SeatingError::TableNotFound(_))
    ));
}

#[tokio::test]
async fn test_duplicate_table_number_rejected() {
    let manager = test_manager().await;
    seed_table(&manager, "T1", Location::Indoor, 4).await;

    let result = manager
        .create_table(DiningTableCreate {
            table_number: "T1".into(),
            location: Location::Outdoor,
            size: 2,
        })
        .await;
    assert!(matches!(result, Err(SeatingError::TableNumberExists(_))));
}

#[tokio::test]
async fn test_capacity_edit_applies_to_next_booking() {
    let manager = test_manager().await;
    let table = seed_table(&manager, "T1", Location::Indoor, 2).await;

    let first = manager
        .book(walk_in("Ana", "+34600000001", 4, 0, Location::Indoor))
        .await
        .unwrap();
    assert!(first.waitlist_entry().is_some());

    manager
        .update_table(
            table.id,
            DiningTableUpdate {
                size: Some(6),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let second = manager
        .book(walk_in("Luis", "+34600000002", 4, 0, Location::Indoor))
        .await
        .unwrap();
    assert_eq!(second.reservation().unwrap().table_id, Some(table.id));
}
