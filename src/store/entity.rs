//! # Entity Identifiers
//!
//! This module defines the entity identifier and its two reserved
//! sentinels.
//!
//! ## Entity Model
//! An [`Entity`] is a compact, versioned handle composed of:
//!
//! - An **index**, the entity's slot number, stored in the low bits
//! - A **version**, incremented on recycling to invalidate stale handles,
//!   stored in the high bits
//!
//! This layout allows fast validation and prevents use-after-free bugs
//! when slots are recycled.
//!
//! ## Sentinels
//! Two reserved values are derived purely from the bit pattern:
//!
//! - [`NULL`]: every index bit set. Means "no slot". Comparison against it
//!   inspects **only the index field**, so any identifier whose index bits
//!   are all ones is null, whatever its version says.
//! - [`TOMBSTONE`]: every version bit set. Means "slot was valid but its
//!   generation is exhausted". Comparison against it inspects **only the
//!   version field**.
//!
//! Splitting the equality semantics this way lets a recycling allocator
//! refuse to hand out a bumped slot once its version would wrap, while
//! the store keeps using the null pattern for vacant cells.
//!
//! ## Invariants
//! - Two entities with the same index but different versions are distinct.
//! - The all-ones identifier compares equal to both sentinels.
//! - Sentinel equality is reflexive and symmetric.

use crate::store::types::{
    EntityID, IndexID, VersionID, ENTITY_MASK, ENTITY_SHIFT, VERSION_MASK,
};

/// Opaque, versioned identifier for an entity.
///
/// ## Representation
/// Internally, an `Entity` packs two values into a single integer:
///
/// - **Index** — the slot number, in the low [`ENTITY_SHIFT`] bits
/// - **Version** — the generation counter, in the remaining high bits
///
/// ## Notes
/// `Entity` values are cheap to copy and compare and are safe to pass
/// across threads. Plain `==` between two entities compares the full bit
/// pattern; the field-masked comparisons are reserved for the sentinel
/// types [`Null`] and [`Tombstone`].

#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Entity(EntityID);

impl Entity {
    /// Composes an identifier from an index and a version.
    ///
    /// The index is masked to its field width; version bits that do not
    /// fit in the field are discarded by the shift.
    #[inline]
    #[must_use]
    pub const fn new(index: IndexID, version: VersionID) -> Self {
        Self(((version as EntityID) << ENTITY_SHIFT) | (index as EntityID & ENTITY_MASK))
    }

    /// Reconstructs an identifier from its raw bit pattern.
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: EntityID) -> Self {
        Self(bits)
    }

    /// Returns the raw bit pattern of this identifier.
    #[inline]
    #[must_use]
    pub const fn to_bits(self) -> EntityID {
        self.0
    }

    /// Returns the index component of this identifier.
    #[inline]
    #[must_use]
    pub const fn index(self) -> IndexID {
        self.0 & ENTITY_MASK
    }

    /// Returns the version component of this identifier.
    #[inline]
    #[must_use]
    pub const fn version(self) -> VersionID {
        (self.0 >> ENTITY_SHIFT) as VersionID
    }
}

/// Sentinel type for the "no slot" identifier.
///
/// Equality against an [`Entity`] checks the index field only: an entity
/// is null exactly when its index bits are all ones.
#[derive(Clone, Copy, Debug, Default)]
pub struct Null;

/// Sentinel type for the "generation exhausted" identifier.
///
/// Equality against an [`Entity`] checks the version field only: an
/// entity is a tombstone exactly when its version bits are all ones.
#[derive(Clone, Copy, Debug, Default)]
pub struct Tombstone;

/// The null identifier.
pub const NULL: Null = Null;

/// The tombstone identifier.
pub const TOMBSTONE: Tombstone = Tombstone;

impl PartialEq for Null {
    #[inline]
    fn eq(&self, _: &Null) -> bool {
        true
    }
}

impl PartialEq<Entity> for Null {
    #[inline]
    fn eq(&self, other: &Entity) -> bool {
        other.index() == ENTITY_MASK
    }
}

impl PartialEq<Null> for Entity {
    #[inline]
    fn eq(&self, _: &Null) -> bool {
        self.index() == ENTITY_MASK
    }
}

impl PartialEq for Tombstone {
    #[inline]
    fn eq(&self, _: &Tombstone) -> bool {
        true
    }
}

impl PartialEq<Entity> for Tombstone {
    #[inline]
    fn eq(&self, other: &Entity) -> bool {
        (other.version() as EntityID) == VERSION_MASK
    }
}

impl PartialEq<Tombstone> for Entity {
    #[inline]
    fn eq(&self, _: &Tombstone) -> bool {
        (self.version() as EntityID) == VERSION_MASK
    }
}

impl From<Null> for Entity {
    /// The all-ones identifier: null-equal and tombstone-equal.
    #[inline]
    fn from(_: Null) -> Self {
        Entity(EntityID::MAX)
    }
}

impl From<Tombstone> for Entity {
    /// The all-ones identifier: null-equal and tombstone-equal.
    #[inline]
    fn from(_: Tombstone) -> Self {
        Entity(EntityID::MAX)
    }
}
