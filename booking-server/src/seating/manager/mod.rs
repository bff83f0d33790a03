//! SeatingManager - reservation and waitlist state machine
//!
//! Owns every allocation decision: which party gets which table, queue
//! number assignment, waitlist promotion, and the occupancy flag on each
//! table.
//!
//! # Booking Flow
//!
//! ```text
//! book(request)
//!     ├─ 1. Validate input (party size, location, HH:MM)
//!     ├─ 2. Take the allocation lock
//!     ├─ 3. Upsert customer by phone number
//!     ├─ 4. Scheduled only: slot conflict check
//!     ├─ 5. Match a table (pure matcher over a registry snapshot)
//!     ├─ 6. Seat / queue / waitlist
//!     └─ 7. Notify (fire-and-forget, after commit)
//! ```
//!
//! # Concurrency
//!
//! One `tokio::sync::Mutex` serializes the read-availability-then-mutate
//! window for all mutating operations. Queue numbers and table occupancy are
//! both decided inside it, so two concurrent bookings can never claim the
//! same table or the same number. Reads never take the lock.

mod error;
pub use error::*;

use crate::db::repository::reservation::NewReservation;
use crate::db::repository::waitlist::NewWaitlistEntry;
use crate::db::repository::{RepoError, customer, dining_table, reservation, waitlist};
use crate::seating::{matcher, sequencer};
use crate::services::{Notifier, NotifyEvent};
use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;
use serde::Serialize;
use shared::models::{
    BookingRequest, Customer, CustomerCreate, DiningTable, DiningTableCreate, DiningTableUpdate,
    Location, Reservation, ReservationStatus, WaitlistEntry, WaitlistRequest, WaitlistStatus,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Outcome of a booking request
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BookingOutcome {
    /// A reservation was created (Seated if a table was free, else Queued)
    Reserved(Reservation),
    /// No table and not scheduled: the party went on the waitlist
    Waitlisted(WaitlistEntry),
}

impl BookingOutcome {
    pub fn reservation(self) -> Option<Reservation> {
        match self {
            Self::Reserved(r) => Some(r),
            Self::Waitlisted(_) => None,
        }
    }

    pub fn waitlist_entry(self) -> Option<WaitlistEntry> {
        match self {
            Self::Reserved(_) => None,
            Self::Waitlisted(w) => Some(w),
        }
    }
}

/// A successful waitlist promotion
#[derive(Debug, Clone, Serialize)]
pub struct Promotion {
    pub entry: WaitlistEntry,
    pub table: DiningTable,
}

/// Front-of-house summary counts
#[derive(Debug, Clone, Serialize)]
pub struct SeatingStatus {
    pub total_tables: i64,
    pub occupied_tables: i64,
    pub queued: i64,
    pub seated: i64,
    pub waiting: i64,
    pub called: i64,
}

/// Seating manager
///
/// Cheap to share: hold it in an `Arc` and call from any number of request
/// handlers.
pub struct SeatingManager {
    pool: SqlitePool,
    notifier: Arc<dyn Notifier>,
    /// Single serialization point for allocate-or-waitlist (see module docs)
    alloc_lock: Mutex<()>,
    /// 业务时区 (queue numbers reset on this day boundary)
    tz: Tz,
}

impl std::fmt::Debug for SeatingManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeatingManager")
            .field("pool", &"<SqlitePool>")
            .field("notifier", &"<Notifier>")
            .field("tz", &self.tz)
            .finish()
    }
}

impl SeatingManager {
    /// Create a new seating manager over the given pool
    pub fn new(pool: SqlitePool, notifier: Arc<dyn Notifier>, tz: Tz) -> Self {
        Self {
            pool,
            notifier,
            alloc_lock: Mutex::new(()),
            tz,
        }
    }

    // ========================================================================
    // Booking
    // ========================================================================

    /// Handle an incoming booking request
    ///
    /// Walk-in/phone/online parties get a table immediately when one fits,
    /// otherwise they are redirected to the waitlist. Scheduled bookings are
    /// conflict-checked against their (date, time) slot and are queued
    /// without a table when nothing is free right now — they are never
    /// silently waitlisted.
    pub async fn book(&self, req: BookingRequest) -> SeatingResult<BookingOutcome> {
        let (date, time) = Self::validate_booking(&req)?;
        let party = req.party_size();

        let _guard = self.alloc_lock.lock().await;

        let cust = customer::upsert_by_phone(
            &self.pool,
            &CustomerCreate {
                name: req.name.clone(),
                phone_number: req.phone_number.clone(),
                email: req.email.clone(),
                notes: None,
            },
        )
        .await?;

        if req.is_scheduled {
            let d = date.as_deref().unwrap_or_default();
            let t = time.as_deref().unwrap_or_default();
            self.check_slot_capacity(req.location, party, d, t).await?;
        }

        let free = dining_table::list_free(&self.pool, req.location).await?;
        let candidate = matcher::find_candidate(&free, req.location, party).cloned();

        match candidate {
            Some(table) => {
                let (queue_day, queue_number) =
                    sequencer::next_queue_number(&self.pool, self.tz).await?;
                dining_table::mark_occupied(&self.pool, table.id)
                    .await
                    .map_err(Self::table_conflict)?;

                let created = match reservation::create(
                    &self.pool,
                    Self::new_reservation(&req, cust.id, Some(table.id), ReservationStatus::Seated, queue_number, queue_day, &date, &time),
                )
                .await
                {
                    Ok(r) => r,
                    Err(e) => {
                        // Give the table back before surfacing the failure
                        if let Err(release) = dining_table::mark_free(&self.pool, table.id).await {
                            tracing::error!(table_id = table.id, error = %release, "Failed to release table after aborted booking");
                        }
                        return Err(e.into());
                    }
                };

                tracing::info!(
                    reservation_id = created.id,
                    table = %table.table_number,
                    queue_number = created.queue_number,
                    "Party seated"
                );
                self.notifier.notify(NotifyEvent::ReservationConfirmed {
                    reservation_id: created.id,
                    customer_name: cust.name.clone(),
                    phone_number: cust.phone_number.clone(),
                    queue_number: created.queue_number,
                    table_number: Some(table.table_number.clone()),
                });
                Ok(BookingOutcome::Reserved(created))
            }
            None if !req.is_scheduled => {
                let entry = waitlist::create(
                    &self.pool,
                    NewWaitlistEntry {
                        customer_id: cust.id,
                        adults: req.adults,
                        children: req.children,
                        child_seat_required: req.child_seat_required,
                        location: req.location,
                        notes: req.notes.clone(),
                        estimated_wait_time: None,
                    },
                )
                .await?;

                tracing::info!(entry_id = entry.id, location = %req.location, "No table available, party waitlisted");
                self.notifier.notify(NotifyEvent::WaitlistAdded {
                    entry_id: entry.id,
                    customer_name: cust.name.clone(),
                    phone_number: cust.phone_number.clone(),
                    estimated_wait_time: entry.estimated_wait_time,
                });
                Ok(BookingOutcome::Waitlisted(entry))
            }
            None => {
                // Scheduled with slot capacity confirmed but nothing free at
                // this instant: queue without a table, staff assign one
                // closer to the hour
                let (queue_day, queue_number) =
                    sequencer::next_queue_number(&self.pool, self.tz).await?;
                let created = reservation::create(
                    &self.pool,
                    Self::new_reservation(&req, cust.id, None, ReservationStatus::Queued, queue_number, queue_day, &date, &time),
                )
                .await?;

                tracing::info!(
                    reservation_id = created.id,
                    queue_number = created.queue_number,
                    "Scheduled booking queued without a table"
                );
                self.notifier.notify(NotifyEvent::ReservationConfirmed {
                    reservation_id: created.id,
                    customer_name: cust.name.clone(),
                    phone_number: cust.phone_number.clone(),
                    queue_number: created.queue_number,
                    table_number: None,
                });
                Ok(BookingOutcome::Reserved(created))
            }
        }
    }

    /// Staff action: put a party straight on the waitlist
    pub async fn add_to_waitlist(&self, req: WaitlistRequest) -> SeatingResult<WaitlistEntry> {
        Self::validate_party(&req.name, &req.phone_number, req.adults, req.children)?;

        let _guard = self.alloc_lock.lock().await;

        let cust = customer::upsert_by_phone(
            &self.pool,
            &CustomerCreate {
                name: req.name.clone(),
                phone_number: req.phone_number.clone(),
                email: req.email.clone(),
                notes: None,
            },
        )
        .await?;

        let entry = waitlist::create(
            &self.pool,
            NewWaitlistEntry {
                customer_id: cust.id,
                adults: req.adults,
                children: req.children,
                child_seat_required: req.child_seat_required,
                location: req.location,
                notes: req.notes.clone(),
                estimated_wait_time: req.estimated_wait_time,
            },
        )
        .await?;

        tracing::info!(entry_id = entry.id, "Party added to waitlist");
        self.notifier.notify(NotifyEvent::WaitlistAdded {
            entry_id: entry.id,
            customer_name: cust.name.clone(),
            phone_number: cust.phone_number.clone(),
            estimated_wait_time: entry.estimated_wait_time,
        });
        Ok(entry)
    }

    // ========================================================================
    // Reservation transitions
    // ========================================================================

    /// Queued -> Seated at a staff-chosen table
    ///
    /// Location/size suitability is the caller's judgment; only occupancy is
    /// enforced.
    pub async fn assign_table(
        &self,
        reservation_id: i64,
        table_id: i64,
    ) -> SeatingResult<Reservation> {
        let _guard = self.alloc_lock.lock().await;

        let existing = self.fetch_reservation(reservation_id).await?;
        match existing.status {
            ReservationStatus::Queued => {}
            s if s.is_terminal() => {
                return Err(SeatingError::ReservationFinalized {
                    id: reservation_id,
                    status: s,
                });
            }
            s => {
                return Err(SeatingError::InvalidTransition {
                    id: reservation_id,
                    status: s,
                    action: "be assigned a table",
                });
            }
        }

        let table = self.fetch_table(table_id).await?;
        if table.is_occupied {
            return Err(SeatingError::TableOccupied(table.table_number));
        }
        dining_table::mark_occupied(&self.pool, table_id)
            .await
            .map_err(Self::table_conflict)?;

        let seated = match reservation::seat(&self.pool, reservation_id, table_id).await {
            Ok(r) => r,
            Err(e) => {
                if let Err(release) = dining_table::mark_free(&self.pool, table_id).await {
                    tracing::error!(table_id, error = %release, "Failed to release table after aborted assignment");
                }
                return Err(e.into());
            }
        };

        tracing::info!(reservation_id, table_id, "Reservation seated");
        Ok(seated)
    }

    /// Seated -> Completed, freeing the table
    pub async fn complete(&self, reservation_id: i64) -> SeatingResult<Reservation> {
        let _guard = self.alloc_lock.lock().await;

        let existing = self.fetch_reservation(reservation_id).await?;
        match existing.status {
            ReservationStatus::Seated => {}
            s if s.is_terminal() => {
                return Err(SeatingError::ReservationFinalized {
                    id: reservation_id,
                    status: s,
                });
            }
            s => {
                return Err(SeatingError::InvalidTransition {
                    id: reservation_id,
                    status: s,
                    action: "complete",
                });
            }
        }

        let completed = reservation::complete(&self.pool, reservation_id).await?;
        if let Some(table_id) = existing.table_id {
            dining_table::mark_free(&self.pool, table_id).await?;
        }

        tracing::info!(reservation_id, "Reservation completed");
        Ok(completed)
    }

    /// Queued/Seated -> Cancelled, freeing a held table
    ///
    /// Cancelling an already-terminal reservation fails with
    /// `ReservationFinalized` rather than NotFound: the row exists, it just
    /// admits no further transitions.
    pub async fn cancel(&self, reservation_id: i64) -> SeatingResult<Reservation> {
        let _guard = self.alloc_lock.lock().await;

        let existing = self.fetch_reservation(reservation_id).await?;
        if existing.status.is_terminal() {
            return Err(SeatingError::ReservationFinalized {
                id: reservation_id,
                status: existing.status,
            });
        }

        let cancelled =
            reservation::terminate(&self.pool, reservation_id, ReservationStatus::Cancelled)
                .await?;
        if let Some(table_id) = existing.table_id {
            dining_table::mark_free(&self.pool, table_id).await?;
        }

        tracing::info!(reservation_id, "Reservation cancelled");
        Ok(cancelled)
    }

    /// Queued -> No-show (timeout or staff mark), freeing a held table
    pub async fn mark_no_show(&self, reservation_id: i64) -> SeatingResult<Reservation> {
        let _guard = self.alloc_lock.lock().await;

        let existing = self.fetch_reservation(reservation_id).await?;
        match existing.status {
            ReservationStatus::Queued => {}
            s if s.is_terminal() => {
                return Err(SeatingError::ReservationFinalized {
                    id: reservation_id,
                    status: s,
                });
            }
            s => {
                return Err(SeatingError::InvalidTransition {
                    id: reservation_id,
                    status: s,
                    action: "be marked no-show",
                });
            }
        }

        let marked =
            reservation::terminate(&self.pool, reservation_id, ReservationStatus::NoShow).await?;
        if let Some(table_id) = existing.table_id {
            dining_table::mark_free(&self.pool, table_id).await?;
        }

        tracing::info!(reservation_id, "Reservation marked no-show");
        Ok(marked)
    }

    // ========================================================================
    // Waitlist transitions
    // ========================================================================

    /// Waiting -> Called (staff signal a table is coming up)
    pub async fn call_waitlist(
        &self,
        entry_id: i64,
        estimated_wait_time: Option<i32>,
    ) -> SeatingResult<WaitlistEntry> {
        let _guard = self.alloc_lock.lock().await;

        let entry = self.fetch_waitlist_entry(entry_id).await?;
        match entry.status {
            WaitlistStatus::Waiting => {}
            WaitlistStatus::Called => {
                return Err(SeatingError::Conflict(format!(
                    "Waitlist entry {entry_id} has already been called"
                )));
            }
            s => {
                return Err(SeatingError::WaitlistEntryFinalized {
                    id: entry_id,
                    status: s,
                });
            }
        }

        let called = waitlist::mark_called(&self.pool, entry_id, estimated_wait_time).await?;
        let cust = self.fetch_customer(called.customer_id).await?;

        tracing::info!(entry_id, "Waitlist entry called");
        self.notifier.notify(NotifyEvent::TableReady {
            entry_id,
            customer_name: cust.name,
            phone_number: cust.phone_number,
            table_number: None,
        });
        Ok(called)
    }

    /// Waiting/Called -> Seated at a staff-chosen table
    ///
    /// The entry itself becomes the seating record; no reservation row is
    /// created. The table is released later through `vacate_table`.
    pub async fn seat_waitlist(&self, entry_id: i64, table_id: i64) -> SeatingResult<WaitlistEntry> {
        let _guard = self.alloc_lock.lock().await;

        let entry = self.fetch_waitlist_entry(entry_id).await?;
        if entry.status.is_terminal() {
            return Err(SeatingError::WaitlistEntryFinalized {
                id: entry_id,
                status: entry.status,
            });
        }

        let table = self.fetch_table(table_id).await?;
        if table.is_occupied {
            return Err(SeatingError::TableOccupied(table.table_number));
        }
        dining_table::mark_occupied(&self.pool, table_id)
            .await
            .map_err(Self::table_conflict)?;

        let seated = match waitlist::mark_seated(&self.pool, entry_id, table_id).await {
            Ok(e) => e,
            Err(e) => {
                if let Err(release) = dining_table::mark_free(&self.pool, table_id).await {
                    tracing::error!(table_id, error = %release, "Failed to release table after aborted seating");
                }
                return Err(e.into());
            }
        };

        tracing::info!(entry_id, table_id, "Waitlist entry seated");
        Ok(seated)
    }

    /// Waiting/Called -> Cancelled (party gave up)
    pub async fn cancel_waitlist(&self, entry_id: i64) -> SeatingResult<WaitlistEntry> {
        let _guard = self.alloc_lock.lock().await;

        let entry = self.fetch_waitlist_entry(entry_id).await?;
        if entry.status.is_terminal() {
            return Err(SeatingError::WaitlistEntryFinalized {
                id: entry_id,
                status: entry.status,
            });
        }

        let cancelled = waitlist::mark_cancelled(&self.pool, entry_id).await?;
        tracing::info!(entry_id, "Waitlist entry cancelled");
        Ok(cancelled)
    }

    /// Hard delete a waitlist entry (staff correction)
    ///
    /// Seated entries are refused — their table must be released through
    /// `vacate_table` first, or the occupancy record would dangle.
    pub async fn remove_waitlist(&self, entry_id: i64) -> SeatingResult<()> {
        let _guard = self.alloc_lock.lock().await;

        let entry = self.fetch_waitlist_entry(entry_id).await?;
        if entry.status == WaitlistStatus::Seated && entry.table_id.is_some() {
            return Err(SeatingError::Conflict(format!(
                "Waitlist entry {entry_id} is seated; vacate its table first"
            )));
        }

        waitlist::delete(&self.pool, entry_id).await?;
        tracing::info!(entry_id, "Waitlist entry removed");
        Ok(())
    }

    /// Update the staff wait estimate / notes on an entry
    pub async fn update_waitlist_estimate(
        &self,
        entry_id: i64,
        estimated_wait_time: Option<i32>,
        notes: Option<String>,
    ) -> SeatingResult<WaitlistEntry> {
        let _guard = self.alloc_lock.lock().await;
        self.fetch_waitlist_entry(entry_id).await?;
        let updated =
            waitlist::update_estimate(&self.pool, entry_id, estimated_wait_time, notes).await?;
        Ok(updated)
    }

    /// Promote the earliest compatible Waiting entry onto a free table
    ///
    /// An explicit, at-will poll step — the surrounding system calls it when
    /// a table frees up or on a timer; there is no background scheduler.
    /// First-fit by arrival order: the scan starts at the oldest entry, so a
    /// big party at the head does not block smaller parties behind it.
    /// Returns `None` when nothing could be promoted.
    pub async fn promote(&self) -> SeatingResult<Option<Promotion>> {
        let _guard = self.alloc_lock.lock().await;

        let waiting = waitlist::list_waiting(&self.pool).await?;
        if waiting.is_empty() {
            return Ok(None);
        }

        let mut free = dining_table::list_free(&self.pool, Location::Indoor).await?;
        free.extend(dining_table::list_free(&self.pool, Location::Outdoor).await?);

        for entry in waiting {
            let Some(table) =
                matcher::find_candidate(&free, entry.location, entry.party_size()).cloned()
            else {
                continue;
            };
            return Ok(Some(self.promote_entry(entry.id, table.id).await?));
        }

        Ok(None)
    }

    /// Seat the earliest compatible Waiting entry at one specific free table
    /// (e.g. right after it was bussed)
    ///
    /// Returns `None` when nobody on the waitlist fits the table.
    pub async fn promote_to_table(&self, table_id: i64) -> SeatingResult<Option<Promotion>> {
        let _guard = self.alloc_lock.lock().await;

        let table = self.fetch_table(table_id).await?;
        if table.is_occupied {
            return Err(SeatingError::TableOccupied(table.table_number));
        }

        let Some(entry) =
            waitlist::first_waiting_matching(&self.pool, table.location, table.size).await?
        else {
            return Ok(None);
        };

        Ok(Some(self.promote_entry(entry.id, table.id).await?))
    }

    /// Shared tail of the promotion paths: occupy, seat, notify
    ///
    /// Caller must hold the allocation lock and have verified the table is
    /// free and the entry Waiting.
    async fn promote_entry(&self, entry_id: i64, table_id: i64) -> SeatingResult<Promotion> {
        dining_table::mark_occupied(&self.pool, table_id)
            .await
            .map_err(Self::table_conflict)?;
        let seated = match waitlist::mark_seated(&self.pool, entry_id, table_id).await {
            Ok(e) => e,
            Err(e) => {
                if let Err(release) = dining_table::mark_free(&self.pool, table_id).await {
                    tracing::error!(table_id, error = %release, "Failed to release table after aborted promotion");
                }
                return Err(e.into());
            }
        };
        let table = self.fetch_table(table_id).await?;
        let cust = self.fetch_customer(seated.customer_id).await?;

        tracing::info!(
            entry_id = seated.id,
            table = %table.table_number,
            "Waitlist entry promoted"
        );
        self.notifier.notify(NotifyEvent::TableReady {
            entry_id: seated.id,
            customer_name: cust.name,
            phone_number: cust.phone_number,
            table_number: Some(table.table_number.clone()),
        });
        Ok(Promotion {
            entry: seated,
            table,
        })
    }

    // ========================================================================
    // Table registry (staff operations)
    // ========================================================================

    pub async fn create_table(&self, data: DiningTableCreate) -> SeatingResult<DiningTable> {
        let _guard = self.alloc_lock.lock().await;
        let created = dining_table::create(&self.pool, data)
            .await
            .map_err(|e| match e {
                RepoError::Duplicate(msg) => SeatingError::TableNumberExists(msg),
                other => other.into(),
            })?;
        tracing::info!(table = %created.table_number, "Table created");
        Ok(created)
    }

    pub async fn update_table(
        &self,
        table_id: i64,
        data: DiningTableUpdate,
    ) -> SeatingResult<DiningTable> {
        let _guard = self.alloc_lock.lock().await;
        dining_table::update(&self.pool, table_id, data)
            .await
            .map_err(|e| match e {
                RepoError::NotFound(_) => SeatingError::TableNotFound(table_id),
                RepoError::Duplicate(msg) => SeatingError::TableNumberExists(msg),
                other => other.into(),
            })
    }

    pub async fn delete_table(&self, table_id: i64) -> SeatingResult<()> {
        let _guard = self.alloc_lock.lock().await;
        dining_table::delete(&self.pool, table_id)
            .await
            .map_err(|e| match e {
                RepoError::NotFound(_) => SeatingError::TableNotFound(table_id),
                RepoError::Validation(msg) => SeatingError::TableInUse(msg),
                other => other.into(),
            })?;
        tracing::info!(table_id, "Table deleted");
        Ok(())
    }

    /// Free a table whose party has left outside the reservation flow
    /// (seated waitlist entries, manual overrides)
    ///
    /// Refuses while a Seated reservation still references the table — those
    /// must go through `complete`/`cancel` so reservation state stays
    /// consistent with occupancy.
    pub async fn vacate_table(&self, table_id: i64) -> SeatingResult<DiningTable> {
        let _guard = self.alloc_lock.lock().await;

        let table = self.fetch_table(table_id).await?;
        if let Some(held_by) = reservation::find_seated_by_table(&self.pool, table_id).await? {
            return Err(SeatingError::TableInUse(format!(
                "Table '{}' is held by reservation {}",
                table.table_number, held_by.id
            )));
        }

        dining_table::mark_free(&self.pool, table_id).await?;
        match waitlist::find_seated_by_table(&self.pool, table_id).await? {
            Some(entry) => {
                tracing::info!(table = %table.table_number, entry_id = entry.id, "Table vacated after waitlist seating");
            }
            None => tracing::info!(table = %table.table_number, "Table vacated"),
        }
        self.fetch_table(table_id).await
    }

    /// Manually mark a table occupied (staff override)
    pub async fn occupy_table(&self, table_id: i64) -> SeatingResult<DiningTable> {
        let _guard = self.alloc_lock.lock().await;

        dining_table::mark_occupied(&self.pool, table_id)
            .await
            .map_err(Self::table_conflict)?;
        self.fetch_table(table_id).await
    }

    // ========================================================================
    // Queries (lock-free)
    // ========================================================================

    pub async fn get_reservation(&self, id: i64) -> SeatingResult<Reservation> {
        self.fetch_reservation(id).await
    }

    pub async fn get_waitlist_entry(&self, id: i64) -> SeatingResult<WaitlistEntry> {
        self.fetch_waitlist_entry(id).await
    }

    pub async fn get_table(&self, id: i64) -> SeatingResult<DiningTable> {
        self.fetch_table(id).await
    }

    pub async fn list_tables(&self) -> SeatingResult<Vec<DiningTable>> {
        Ok(dining_table::find_all(&self.pool).await?)
    }

    /// Queued reservations in queue order
    pub async fn list_queue(&self) -> SeatingResult<Vec<Reservation>> {
        Ok(reservation::list_queue(&self.pool).await?)
    }

    /// Reservations created on a business day
    pub async fn list_reservations_on(&self, day: NaiveDate) -> SeatingResult<Vec<Reservation>> {
        Ok(reservation::list_on_day(&self.pool, &day.format("%Y-%m-%d").to_string()).await?)
    }

    /// Active waitlist (Waiting/Called) in arrival order
    pub async fn list_waitlist(&self) -> SeatingResult<Vec<WaitlistEntry>> {
        Ok(waitlist::list_active(&self.pool).await?)
    }

    /// All customers (staff directory)
    pub async fn list_customers(&self) -> SeatingResult<Vec<Customer>> {
        Ok(customer::find_all(&self.pool).await?)
    }

    /// A customer's reservation history, newest first
    pub async fn list_customer_reservations(
        &self,
        customer_id: i64,
    ) -> SeatingResult<Vec<Reservation>> {
        self.fetch_customer(customer_id).await?;
        Ok(reservation::list_by_customer(&self.pool, customer_id).await?)
    }

    /// Front-of-house summary counts
    pub async fn status(&self) -> SeatingResult<SeatingStatus> {
        let tables = dining_table::find_all(&self.pool).await?;
        let occupied = tables.iter().filter(|t| t.is_occupied).count() as i64;
        Ok(SeatingStatus {
            total_tables: tables.len() as i64,
            occupied_tables: occupied,
            queued: reservation::count_by_status(&self.pool, ReservationStatus::Queued).await?,
            seated: reservation::count_by_status(&self.pool, ReservationStatus::Seated).await?,
            waiting: waitlist::count_by_status(&self.pool, WaitlistStatus::Waiting).await?,
            called: waitlist::count_by_status(&self.pool, WaitlistStatus::Called).await?,
        })
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Scheduled-slot capacity check
    ///
    /// Exact-slot equality, no duration model: two bookings an hour apart
    /// never conflict here.
    async fn check_slot_capacity(
        &self,
        location: Location,
        party_size: i32,
        date: &str,
        time: &str,
    ) -> SeatingResult<()> {
        if dining_table::count_matching(&self.pool, location, party_size).await? == 0 {
            return Err(SeatingError::NoCapacity {
                location: location.to_string(),
                party_size,
            });
        }

        let committed = reservation::count_committed_at_slot(&self.pool, date, time).await?;
        if committed > 0 {
            let available =
                dining_table::count_free_matching(&self.pool, location, party_size).await?;
            if available <= committed {
                return Err(SeatingError::SchedulingConflict {
                    date: date.to_string(),
                    time: time.to_string(),
                });
            }
        }
        Ok(())
    }

    fn new_reservation(
        req: &BookingRequest,
        customer_id: i64,
        table_id: Option<i64>,
        status: ReservationStatus,
        queue_number: i32,
        queue_day: String,
        date: &Option<String>,
        time: &Option<String>,
    ) -> NewReservation {
        NewReservation {
            customer_id,
            table_id,
            adults: req.adults,
            children: req.children,
            child_seat_required: req.child_seat_required,
            status,
            queue_number,
            queue_day,
            reservation_type: req.reservation_type,
            is_scheduled: req.is_scheduled,
            reservation_date: date.clone(),
            reservation_time: time.clone(),
            notes: req.notes.clone(),
        }
    }

    /// Validate a booking request, returning the canonical (date, time)
    fn validate_booking(req: &BookingRequest) -> SeatingResult<(Option<String>, Option<String>)> {
        Self::validate_party(&req.name, &req.phone_number, req.adults, req.children)?;

        if !req.is_scheduled {
            if req.reservation_date.is_some() || req.reservation_time.is_some() {
                return Err(SeatingError::InvalidInput(
                    "Only scheduled bookings may carry a reservation date/time".into(),
                ));
            }
            return Ok((None, None));
        }

        let date = req.reservation_date.as_deref().ok_or_else(|| {
            SeatingError::InvalidInput("Scheduled bookings require a reservation date".into())
        })?;
        let time = req.reservation_time.as_deref().ok_or_else(|| {
            SeatingError::InvalidInput("Scheduled bookings require a reservation time".into())
        })?;

        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| {
                SeatingError::InvalidFormat(format!(
                    "Invalid reservation date '{date}', expected YYYY-MM-DD"
                ))
            })?
            .format("%Y-%m-%d")
            .to_string();
        let time = NaiveTime::parse_from_str(time, "%H:%M")
            .map_err(|_| {
                SeatingError::InvalidFormat(format!(
                    "Invalid reservation time '{time}', expected HH:MM"
                ))
            })?
            .format("%H:%M")
            .to_string();

        Ok((Some(date), Some(time)))
    }

    fn validate_party(name: &str, phone: &str, adults: i32, children: i32) -> SeatingResult<()> {
        if name.trim().is_empty() {
            return Err(SeatingError::InvalidInput("Customer name is required".into()));
        }
        if phone.trim().is_empty() {
            return Err(SeatingError::InvalidInput("Phone number is required".into()));
        }
        if adults < 0 || children < 0 {
            return Err(SeatingError::InvalidInput(
                "Party counts cannot be negative".into(),
            ));
        }
        if adults + children < 1 {
            return Err(SeatingError::InvalidInput(
                "Party size must be at least 1".into(),
            ));
        }
        Ok(())
    }

    fn table_conflict(err: RepoError) -> SeatingError {
        match err {
            RepoError::Duplicate(msg) => SeatingError::TableOccupied(msg),
            other => other.into(),
        }
    }

    async fn fetch_reservation(&self, id: i64) -> SeatingResult<Reservation> {
        reservation::find_by_id(&self.pool, id)
            .await?
            .ok_or(SeatingError::ReservationNotFound(id))
    }

    async fn fetch_waitlist_entry(&self, id: i64) -> SeatingResult<WaitlistEntry> {
        waitlist::find_by_id(&self.pool, id)
            .await?
            .ok_or(SeatingError::WaitlistEntryNotFound(id))
    }

    async fn fetch_table(&self, id: i64) -> SeatingResult<DiningTable> {
        dining_table::find_by_id(&self.pool, id)
            .await?
            .ok_or(SeatingError::TableNotFound(id))
    }

    async fn fetch_customer(&self, id: i64) -> SeatingResult<Customer> {
        customer::find_by_id(&self.pool, id)
            .await?
            .ok_or(SeatingError::CustomerNotFound(id))
    }
}

#[cfg(test)]
mod tests;
