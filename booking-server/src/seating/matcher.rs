//! Availability Matcher
//!
//! Pure selection over a snapshot of the table registry. Never mutates
//! state: occupancy changes belong to the manager's critical section, so
//! conflict windows can be checked before anything is committed.

use shared::models::{DiningTable, Location};

/// Pick a table for a party
///
/// Returns any unoccupied table at the location with `size >= party_size`.
/// Tie-break is deterministic: smallest qualifying size first, then lowest
/// id. Smallest-first keeps big tables free for big parties.
pub fn find_candidate(
    tables: &[DiningTable],
    location: Location,
    party_size: i32,
) -> Option<&DiningTable> {
    tables
        .iter()
        .filter(|t| !t.is_occupied && t.fits(location, party_size))
        .min_by_key(|t| (t.size, t.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(id: i64, location: Location, size: i32, occupied: bool) -> DiningTable {
        DiningTable {
            id,
            table_number: format!("T{id}"),
            location,
            size,
            is_occupied: occupied,
        }
    }

    #[test]
    fn test_prefers_smallest_qualifying_size() {
        let tables = vec![
            table(1, Location::Indoor, 6, false),
            table(2, Location::Indoor, 4, false),
        ];
        let picked = find_candidate(&tables, Location::Indoor, 4).unwrap();
        assert_eq!(picked.id, 2);
    }

    #[test]
    fn test_deterministic_on_repeated_calls() {
        let tables = vec![
            table(1, Location::Indoor, 4, false),
            table(2, Location::Indoor, 6, false),
        ];
        for _ in 0..10 {
            assert_eq!(find_candidate(&tables, Location::Indoor, 4).unwrap().id, 1);
        }
    }

    #[test]
    fn test_size_tie_breaks_on_lowest_id() {
        let tables = vec![
            table(9, Location::Outdoor, 4, false),
            table(3, Location::Outdoor, 4, false),
        ];
        assert_eq!(find_candidate(&tables, Location::Outdoor, 2).unwrap().id, 3);
    }

    #[test]
    fn test_skips_occupied_and_wrong_location() {
        let tables = vec![
            table(1, Location::Indoor, 4, true),
            table(2, Location::Outdoor, 4, false),
        ];
        assert!(find_candidate(&tables, Location::Indoor, 2).is_none());
    }

    #[test]
    fn test_no_table_big_enough() {
        let tables = vec![table(1, Location::Indoor, 4, false)];
        assert!(find_candidate(&tables, Location::Indoor, 5).is_none());
    }
}
