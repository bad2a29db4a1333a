//! # Position Mapping
//!
//! The result type returned by every reindexing operation: a mapping from
//! record identity to freshly computed position.
//!
//! A `PositionMap` is created per call and handed to the caller; the core
//! retains nothing. Callers apply it by writing each position back into the
//! corresponding stored record, then running their own persistence step.

use crate::types::{Orderable, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// POSITION MAP
// =============================================================================

/// Mapping from record identity to newly assigned position.
///
/// Backed by a `BTreeMap` so iteration order is deterministic.
/// The key set is exactly the identities remaining in the sequence after the
/// operation: a removed record's identity is absent, a moved record's is
/// present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionMap<Id: Ord> {
    positions: BTreeMap<Id, Position>,
}

impl<Id: Ord> PositionMap<Id> {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self {
            positions: BTreeMap::new(),
        }
    }

    /// Assign a position to an identity, replacing any previous entry.
    pub fn assign(&mut self, id: Id, position: Position) {
        self.positions.insert(id, position);
    }

    /// Get the new position for an identity, if it survived the operation.
    #[must_use]
    pub fn get(&self, id: &Id) -> Option<Position> {
        self.positions.get(id).copied()
    }

    /// Check whether an identity is present in the mapping.
    #[must_use]
    pub fn contains(&self, id: &Id) -> bool {
        self.positions.contains_key(id)
    }

    /// Number of entries in the mapping.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check if the mapping is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterate over `(identity, position)` pairs in identity order.
    pub fn iter(&self) -> impl Iterator<Item = (&Id, Position)> {
        self.positions.iter().map(|(id, pos)| (id, *pos))
    }

    /// Check the density invariant: the value set is exactly `0..len-1`.
    ///
    /// Holds for every mapping produced by the reindexer; exposed so callers
    /// and diagnostics can verify stored snapshots independently.
    #[must_use]
    pub fn is_dense(&self) -> bool {
        let mut values: Vec<u64> = self.positions.values().map(|p| p.value()).collect();
        values.sort_unstable();
        values.iter().enumerate().all(|(i, v)| *v == i as u64)
    }

    /// Write the computed positions back into an owned slice of records.
    ///
    /// Records whose identity is absent from the mapping are left untouched;
    /// for a removal mapping that is exactly the removed record, which the
    /// caller must separately delete from its storage.
    pub fn apply<R: Orderable<Id = Id>>(&self, records: &mut [R]) {
        for record in records {
            if let Some(position) = self.get(&record.id()) {
                record.set_position(Some(position));
            }
        }
    }

    /// Consume the wrapper and return the underlying map.
    #[must_use]
    pub fn into_inner(self) -> BTreeMap<Id, Position> {
        self.positions
    }
}

impl<Id: Ord> Default for PositionMap<Id> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id: Ord> FromIterator<(Id, Position)> for PositionMap<Id> {
    fn from_iter<T: IntoIterator<Item = (Id, Position)>>(iter: T) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
