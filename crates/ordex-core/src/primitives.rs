//! # Innate Primitives
//!
//! Hardcoded runtime constants for the Ordex core.
//!
//! These limits are compiled into the binary and immutable at runtime.
//! The core's computations are total over well-formed input; the limits
//! exist so the app boundary can reject snapshots that would make an
//! O(N log N) call unreasonably expensive.

/// Maximum number of records in a single snapshot.
///
/// Snapshots longer than this are rejected at the app boundary before any
/// ordering work happens. This prevents memory exhaustion from malicious
/// or malformed input; the core itself accepts any length.
pub const MAX_SNAPSHOT_LENGTH: usize = 100_000;
