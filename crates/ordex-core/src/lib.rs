//! # ordex-core
//!
//! The deterministic reindexing core for Ordex - THE LOGIC.
//!
//! This crate computes dense, gap-free position assignments for collections
//! of identity-bearing records whose storage layer has no native ordered
//! collections. Each record persists a nullable integer position; given a
//! snapshot and a requested mutation (move or remove), the core returns the
//! complete identity -> position mapping that restores a contiguous
//! `0..N-1` ordering. Applying the mapping back to storage is the caller's
//! responsibility.
//!
//! ## Architectural Constraints
//!
//! The CORE:
//! - Owns no records and retains no collection state between calls
//! - Never mutates its input snapshot; output is always a fresh mapping
//! - Is deterministic: identical snapshots produce identical mappings
//! - Has NO async, NO network dependencies, NO I/O (pure Rust)

// =============================================================================
// MODULES
// =============================================================================

pub mod placement;
pub mod primitives;
pub mod reindexer;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Orderable, OrdexError, Position, Record, RecordId};

// =============================================================================
// RE-EXPORTS: Reindexing Engine
// =============================================================================

pub use placement::PositionMap;
pub use reindexer::Reindexer;
