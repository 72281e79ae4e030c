//! Error types for packed-storage growth.
//!
//! The store's contract violations (double insertion, erasing an absent
//! entity, out-of-range positions) are programming errors and are checked
//! with debug assertions rather than surfaced as values. The one genuine
//! runtime failure is the allocator declining to grow the packed buffer,
//! which the fallible entry points report through [`ReserveError`].
//!
//! ## Goals
//! * **Specificity:** the error names the capacity that was requested and
//!   carries the allocator's own report as its source.
//! * **Ergonomics:** implements [`std::error::Error`] and
//!   [`fmt::Display`], so it composes with `?` and error-reporting crates.
//! * **Actionability:** the structured field makes logs useful without
//!   reproducing the failure.

use std::collections::TryReserveError;
use std::fmt;

/// Returned when the packed buffer cannot be grown to the requested
/// capacity.
///
/// Emitted by the fallible growth paths (`try_reserve`, `try_insert`).
/// The set is left in its pre-operation state and all internal
/// invariants continue to hold.
///
/// ### Fields
/// * `requested` — Total number of entities the operation attempted to
///   make room for.
/// * `source` — The underlying allocator failure.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReserveError {
    /// Capacity, in entities, that the operation asked for.
    pub requested: usize,

    /// The allocator's report of why the request failed.
    pub source: TryReserveError,
}

impl fmt::Display for ReserveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to reserve packed capacity for {} entities",
            self.requested
        )
    }
}

impl std::error::Error for ReserveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}
