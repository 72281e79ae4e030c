//! # Storage Hooks
//!
//! Notification seam between the sparse set and a derived storage that
//! keeps a parallel array in lockstep with the packed array.
//!
//! ## Protocol
//! A set notifies exactly one subscriber, chosen at construction time,
//! about three events:
//!
//! - [`about_to_erase`](StorageHooks::about_to_erase) fires once per
//!   erased entity, immediately before the swap-and-pop; the entity is
//!   still resident and queryable.
//! - [`swap_and_pop`](StorageHooks::swap_and_pop) fires once per erased
//!   entity, immediately after, with the packed position the moved-in
//!   replacement now occupies (the former tail, unless the erased entity
//!   was the tail, in which case the slot is simply gone).
//! - [`swap_at`](StorageHooks::swap_at) fires whenever two packed slots
//!   are transposed, by an explicit swap or by the cycle walk that
//!   replays a sort onto derived arrays.
//!
//! The `ud` argument is opaque user data forwarded through the erase
//! entry points unchanged.
//!
//! ## Dispatch
//! The subscriber is a type parameter of the set and is held by value, so
//! every hook site is statically dispatched and inlinable. The unit type
//! is the default subscriber; its hooks are the trait's empty defaults
//! and compile away entirely.

use std::any::Any;

use crate::store::entity::Entity;

/// Subscriber interface for packed-array maintenance events.
///
/// All methods default to no-ops; a derived storage overrides the ones it
/// needs to keep its own columns aligned with the packed array.
pub trait StorageHooks {
    /// Last chance to use an entity that is about to be erased.
    #[inline]
    fn about_to_erase(&mut self, _entity: Entity, _ud: Option<&mut dyn Any>) {}

    /// The packed slot `pos` was refilled by the former tail, or vacated
    /// entirely if the erased entity was the tail.
    #[inline]
    fn swap_and_pop(&mut self, _pos: usize, _ud: Option<&mut dyn Any>) {}

    /// Packed slots `lhs` and `rhs` traded places.
    #[inline]
    fn swap_at(&mut self, _lhs: usize, _rhs: usize) {}
}

impl StorageHooks for () {}
