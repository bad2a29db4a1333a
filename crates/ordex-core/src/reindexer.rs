//! # Reindexer
//!
//! Consolidates the reindexing operations for the Ordex core.
//!
//! All operations are:
//! - Deterministic: same snapshot, same result
//! - Pure: the input snapshot is never mutated, output is a fresh mapping
//! - Stateless: nothing is retained between calls
//!
//! The caller fetches its records, invokes an operation with the full
//! snapshot, and applies the returned [`PositionMap`] to storage itself.

use crate::placement::PositionMap;
use crate::types::{Orderable, OrdexError, Position};
use std::collections::BTreeSet;

// =============================================================================
// REINDEXER
// =============================================================================

/// The Reindexer consolidates all ordering computations.
///
/// It owns no records and holds no collection state; every operation
/// receives the full current snapshot by reference.
pub struct Reindexer;

impl Reindexer {
    /// Check the snapshot's caller contract: identities must be unique.
    ///
    /// Fails fast with `DuplicateIdentity` on the first repeated identity
    /// rather than silently deduplicating.
    pub fn validate<R: Orderable>(elements: &[R]) -> Result<(), OrdexError> {
        let mut seen = BTreeSet::new();
        for element in elements {
            let id = element.id();
            if !seen.insert(id.clone()) {
                return Err(OrdexError::DuplicateIdentity(format!("{:?}", id)));
            }
        }
        Ok(())
    }

    /// Derive the current total order of a snapshot.
    ///
    /// Records sort ascending by position. A missing position sorts before
    /// any assigned one; records tied on equal-or-missing positions keep
    /// their relative input order (stable sort). Missing and duplicate
    /// positions therefore never crash and never drop records.
    pub fn order<R: Orderable>(elements: &[R]) -> Result<Vec<&R>, OrdexError> {
        Self::validate(elements)?;

        let mut ordered: Vec<&R> = elements.iter().collect();
        // None < Some(_) under Option's ordering, which is exactly the
        // missing-position policy; the sort is stable, which is the tie policy.
        ordered.sort_by_key(|record| record.position());
        Ok(ordered)
    }

    /// Compute the mapping that moves `source` to `dest_index`.
    ///
    /// The source record is removed from the derived order and reinserted at
    /// `dest_index`; a destination at or beyond the end of the shortened
    /// sequence clamps to "append at end". All other records keep their
    /// relative order. The result assigns every identity in the snapshot a
    /// dense position `0..N-1`, with `source` at the clamped slot.
    ///
    /// Moving a record to the index it already occupies is an idempotent
    /// relabeling: the order is unchanged, but gapped or duplicated stored
    /// positions still come back densified.
    pub fn compute_move<R: Orderable>(
        elements: &[R],
        source: &R::Id,
        dest_index: usize,
    ) -> Result<PositionMap<R::Id>, OrdexError> {
        let mut ordered = Self::order(elements)?;

        let current = ordered
            .iter()
            .position(|record| record.id() == *source)
            .ok_or_else(|| OrdexError::RecordNotFound(format!("{:?}", source)))?;

        let moving = ordered.remove(current);
        if dest_index >= ordered.len() {
            ordered.push(moving);
        } else {
            ordered.insert(dest_index, moving);
        }

        Ok(Self::linearize(&ordered))
    }

    /// Compute the mapping that drops `removing` and closes the gap.
    ///
    /// The remaining records keep their relative order and come back with
    /// dense positions `0..N-2`. The removed identity is absent from the
    /// mapping; deleting the record itself from storage stays with the
    /// caller.
    pub fn compute_remove<R: Orderable>(
        elements: &[R],
        removing: &R::Id,
    ) -> Result<PositionMap<R::Id>, OrdexError> {
        let mut ordered = Self::order(elements)?;

        let current = ordered
            .iter()
            .position(|record| record.id() == *removing)
            .ok_or_else(|| OrdexError::RecordNotFound(format!("{:?}", removing)))?;
        ordered.remove(current);

        Ok(Self::linearize(&ordered))
    }

    /// Assign each record its index in the ordered sequence as its position.
    fn linearize<R: Orderable>(ordered: &[&R]) -> PositionMap<R::Id> {
        ordered
            .iter()
            .enumerate()
            .map(|(index, record)| (record.id(), Position::new(index as u64)))
            .collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Record, RecordId};

    fn snapshot(positions: &[(u64, Option<u64>)]) -> Vec<Record> {
        positions
            .iter()
            .map(|&(id, pos)| Record {
                id: RecordId(id),
                position: pos.map(Position::new),
            })
            .collect()
    }

    #[test]
    fn order_sorts_by_position() {
        let records = snapshot(&[(1, Some(2)), (2, Some(0)), (3, Some(1))]);

        let ordered = Reindexer::order(&records).expect("order");
        let ids: Vec<u64> = ordered.iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn order_puts_missing_positions_first_in_input_order() {
        let records = snapshot(&[(1, Some(0)), (2, None), (3, None)]);

        let ordered = Reindexer::order(&records).expect("order");
        let ids: Vec<u64> = ordered.iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn move_to_end_clamps() {
        let records = snapshot(&[(1, Some(0)), (2, Some(1)), (3, Some(2))]);

        // After removing id 1 the sequence has length 2, so 2 is an append
        let map = Reindexer::compute_move(&records, &RecordId(1), 2).expect("move");
        assert_eq!(map.get(&RecordId(2)), Some(Position::new(0)));
        assert_eq!(map.get(&RecordId(3)), Some(Position::new(1)));
        assert_eq!(map.get(&RecordId(1)), Some(Position::new(2)));
    }

    #[test]
    fn move_inserts_and_shifts_right() {
        let records = snapshot(&[(1, Some(0)), (2, Some(1)), (3, Some(2))]);

        let map = Reindexer::compute_move(&records, &RecordId(3), 0).expect("move");
        assert_eq!(map.get(&RecordId(3)), Some(Position::new(0)));
        assert_eq!(map.get(&RecordId(1)), Some(Position::new(1)));
        assert_eq!(map.get(&RecordId(2)), Some(Position::new(2)));
    }

    #[test]
    fn remove_closes_the_gap() {
        let records = snapshot(&[(1, Some(0)), (2, Some(1)), (3, Some(2))]);

        let map = Reindexer::compute_remove(&records, &RecordId(2)).expect("remove");
        assert_eq!(map.len(), 2);
        assert!(!map.contains(&RecordId(2)));
        assert_eq!(map.get(&RecordId(1)), Some(Position::new(0)));
        assert_eq!(map.get(&RecordId(3)), Some(Position::new(1)));
    }

    #[test]
    fn missing_source_is_an_error() {
        let records = snapshot(&[(1, Some(0))]);

        let moved = Reindexer::compute_move(&records, &RecordId(9), 0);
        assert!(matches!(moved, Err(OrdexError::RecordNotFound(_))));

        let removed = Reindexer::compute_remove(&records, &RecordId(9));
        assert!(matches!(removed, Err(OrdexError::RecordNotFound(_))));
    }

    #[test]
    fn duplicate_identity_is_an_error() {
        let records = snapshot(&[(1, Some(0)), (1, Some(1))]);

        let result = Reindexer::order(&records);
        assert!(matches!(result, Err(OrdexError::DuplicateIdentity(_))));
    }

    #[test]
    fn gapped_positions_come_back_dense() {
        let records = snapshot(&[(1, Some(10)), (2, Some(40)), (3, Some(95))]);

        // Moving a record onto its own slot relabels without reordering
        let map = Reindexer::compute_move(&records, &RecordId(1), 0).expect("move");
        assert!(map.is_dense());
        assert_eq!(map.get(&RecordId(1)), Some(Position::new(0)));
        assert_eq!(map.get(&RecordId(2)), Some(Position::new(1)));
        assert_eq!(map.get(&RecordId(3)), Some(Position::new(2)));
    }

    #[test]
    fn empty_snapshot_orders_to_empty() {
        let records: Vec<Record> = Vec::new();
        let ordered = Reindexer::order(&records).expect("order");
        assert!(ordered.is_empty());
    }
}
