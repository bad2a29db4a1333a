//! # Core Type Definitions
//!
//! This module contains all core types for the Ordex reindexing substrate:
//! - Record identifiers and positions (`RecordId`, `Position`)
//! - The bundled concrete record type (`Record`)
//! - The `Orderable` capability trait
//! - Error types (`OrdexError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer arithmetic only (no floating-point)
//! - Implement `Ord` for deterministic ordering in `BTreeMap`/`BTreeSet`
//! - Carry no interior mutability and no global state

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// IDENTIFIERS & POSITIONS
// =============================================================================

/// Unique identifier for a record in the caller's storage layer.
///
/// The reindexer never interprets the identity; it only uses it as a
/// mapping key to correlate computed positions back to concrete records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A record's place in the linear order.
///
/// Positions computed by the reindexer always form a dense integer range
/// `0..N-1`. Positions read from a snapshot carry no such guarantee: they
/// may be missing, duplicated, or gapped, and the ordering primitive must
/// resolve them deterministically.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Position(pub u64);

impl Position {
    /// Create a new position with the given value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw position value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// ORDERABLE CAPABILITY
// =============================================================================

/// Capability interface for records that participate in manual ordering.
///
/// Any record shape qualifies as long as it exposes a stable identity usable
/// as a map key and a nullable integer position. The reindexer reads `id` and
/// `position` only; `set_position` exists so callers can apply a computed
/// mapping to records they own.
///
/// # Extension Point
///
/// The crate bundles [`Record`] as the canonical implementor, but the
/// reindexer is generic: adapters for ORM rows, document stores, or UI list
/// models implement this trait instead of converting their records.
pub trait Orderable {
    /// Stable identity, unique per record within a snapshot.
    ///
    /// `Ord` (rather than `Hash`) is required so results can live in
    /// `BTreeMap` with deterministic iteration order.
    type Id: Ord + Clone + fmt::Debug;

    /// The record's stable identity.
    fn id(&self) -> Self::Id;

    /// The persisted position, if one has ever been assigned.
    fn position(&self) -> Option<Position>;

    /// Overwrite the persisted position.
    ///
    /// Never called by the reindexer itself; used when applying a
    /// [`PositionMap`](crate::PositionMap) back onto owned records.
    fn set_position(&mut self, position: Option<Position>);
}

// =============================================================================
// RECORD
// =============================================================================

/// The bundled concrete record: an identity plus a nullable position.
///
/// This is the snapshot element used by the Ordex binary and the test
/// suites. Callers with richer record shapes implement [`Orderable`]
/// directly instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// The record's stable identity.
    pub id: RecordId,
    /// The persisted position; `None` until first assigned.
    pub position: Option<Position>,
}

impl Record {
    /// Create a record with an assigned position.
    #[must_use]
    pub const fn new(id: RecordId, position: Position) -> Self {
        Self {
            id,
            position: Some(position),
        }
    }

    /// Create a record that has never been positioned.
    #[must_use]
    pub const fn unpositioned(id: RecordId) -> Self {
        Self { id, position: None }
    }
}

impl Orderable for Record {
    type Id = RecordId;

    fn id(&self) -> RecordId {
        self.id
    }

    fn position(&self) -> Option<Position> {
        self.position
    }

    fn set_position(&mut self, position: Option<Position>) {
        self.position = position;
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Ordex system.
///
/// - No silent failures
/// - Use `Result<T, OrdexError>` for fallible operations
/// - The core should never panic; all errors must be recoverable
#[derive(Debug, Error)]
pub enum OrdexError {
    /// The record designated for a move or removal is not present in the
    /// supplied snapshot. Surfaced instead of silently no-opping.
    #[error("record not found in snapshot: {0}")]
    RecordNotFound(String),

    /// The snapshot contains the same identity more than once.
    /// Surfaced instead of silently deduplicating.
    #[error("duplicate identity in snapshot: {0}")]
    DuplicateIdentity(String),

    /// The snapshot exceeds the maximum supported record count.
    #[error("snapshot length {len} exceeds maximum allowed {max}")]
    SnapshotTooLarge {
        /// Number of records supplied.
        len: usize,
        /// The enforced ceiling.
        max: usize,
    },

    /// A serialization or deserialization error occurred.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================
