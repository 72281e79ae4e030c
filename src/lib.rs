//! # entity_set
//!
//! Sparse-set entity core for Entity-Component-System runtimes.
//!
//! The crate provides the data structure everything else in an ECS is
//! built on: a packed array of versioned entity identifiers paired with a
//! paged sparse index, giving near-constant-time insertion, removal,
//! membership test, position lookup, and ordered iteration.
//!
//! ## Design Goals
//! - Dense, cache-friendly storage with O(1) swap-and-pop erase
//! - Lazily allocated sparse pages, zero cost for untouched index ranges
//! - Statically dispatched hooks so derived storages keep parallel
//!   arrays in lockstep without virtual calls
//! - Sorting and cross-set reordering that keep both arrays consistent
//!
//! Registry façades, typed component columns, views, and groups are
//! deliberately out of scope; they are collaborators that build on the
//! hooks exposed here.

#![forbid(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]
#![deny(dead_code)]

pub mod store;

// ─────────────────────────────────────────────────────────────────────────────
// Re-exports (Public API)
// ─────────────────────────────────────────────────────────────────────────────

// Identifier scheme

pub use store::entity::{Entity, Null, Tombstone, NULL, TOMBSTONE};

pub use store::types::{
    EntityID,
    IndexID,
    VersionID,
    ENTITY_MASK,
    VERSION_MASK,
    ENTITY_SHIFT,
    PAGE_SIZE,
};

// Container

pub use store::set::SparseSet;
pub use store::hooks::StorageHooks;
pub use store::algorithm::{SortAlgorithm, StdSort, InsertionSort};

pub use store::error::ReserveError;

// ─────────────────────────────────────────────────────────────────────────────
// Prelude (Optional but recommended)
// ─────────────────────────────────────────────────────────────────────────────

/// Commonly used types.
///
/// Import with:
/// ```rust
/// use entity_set::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Entity,
        SparseSet,
        StorageHooks,
        NULL,
        TOMBSTONE,
    };
}
