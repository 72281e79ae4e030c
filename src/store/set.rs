//! # Sparse Set
//!
//! The core container of the store: maps entity identifiers to dense
//! positions in a packed array, providing near-constant-time insertion,
//! removal, membership test, position lookup, and ordered iteration.
//!
//! ## Data Layout
//! Two arrays cooperate:
//!
//! - The **packed array** holds every resident entity contiguously, in
//!   insertion order (position 0 is the oldest).
//! - The **sparse index** ([`SparsePages`]) maps an entity's index bits
//!   to a cell whose own index bits encode the entity's packed position.
//!
//! For every resident entity `e`, `sparse[e]` encodes a position `p` with
//! `packed[p] == e`; for every absent entity the cell is out of range,
//! on an unallocated page, or holds the null pattern.
//!
//! ## Iteration Order
//! Default iteration walks the packed array from the tail down to
//! position 0, so the most recently inserted entity comes first.
//! [`as_slice`](SparseSet::as_slice) exposes the storage order directly.
//! No order is guaranteed across mutations.
//!
//! ## Erasure
//! Erase is O(1) swap-and-pop: the tail entity moves into the vacated
//! packed slot, its sparse cell is redirected, and the victim's cell is
//! reset to the null pattern. Positions are therefore not stable under
//! erase.
//!
//! ## Hooks
//! A subscriber chosen at construction time ([`StorageHooks`]) is told
//! about every erase and every packed transposition, which is all a
//! derived storage needs to keep a parallel component column in lockstep.
//!
//! ## Concurrency
//! Mutation is single-threaded by contract: no operation may run
//! concurrently with a mutating operation on the same set. Shared readers
//! are fine while no mutator runs, which Rust's borrow rules already
//! enforce.

use std::any::Any;
use std::ops::Index;

use crate::store::algorithm::{SortAlgorithm, StdSort};
use crate::store::entity::{Entity, NULL};
use crate::store::error::ReserveError;
use crate::store::hooks::StorageHooks;
use crate::store::pages::SparsePages;
use crate::store::types::{EntityID, IndexID, ENTITY_MASK};

/// Sparse set of entity identifiers with customization hooks.
///
/// ## Purpose
/// `SparseSet` is the substrate component storages, views, and groups are
/// built on: a dense, iteration-friendly array of entities paired with a
/// paged index that answers "is it here, and where" in constant time.
///
/// ## Invariants
/// - `sparse[e]` encodes position `p` iff `packed[p] == e`, for every
///   resident `e`.
/// - The packed buffer only grows in `emplace`/`insert`/`reserve` and
///   only shrinks in `shrink_to_fit`.
/// - Sparse pages are allocated on first touch and released only by
///   `shrink_to_fit` on an empty set (or by dropping the set).
///
/// ## Hooks
/// The subscriber `H` is held by value and statically dispatched; the
/// default `()` subscriber compiles to nothing. See [`StorageHooks`] for
/// the event protocol.
pub struct SparseSet<H: StorageHooks = ()> {
    sparse: SparsePages,
    packed: Vec<Entity>,
    hooks: H,
}

impl SparseSet {
    /// Creates an empty set with the no-op subscriber. Does not allocate.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_hooks(())
    }
}

impl<H: StorageHooks + Default> Default for SparseSet<H> {
    #[inline]
    fn default() -> Self {
        Self::with_hooks(H::default())
    }
}

impl<H: StorageHooks> SparseSet<H> {
    /// Creates an empty set owning the given subscriber.
    #[inline]
    pub fn with_hooks(hooks: H) -> Self {
        Self {
            sparse: SparsePages::new(),
            packed: Vec::new(),
            hooks,
        }
    }

    /// Shared access to the subscriber.
    #[inline]
    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Exclusive access to the subscriber.
    #[inline]
    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    #[inline]
    fn growth_target(&self, required: usize) -> usize {
        let geometric = self.packed.len() + self.packed.len() / 2;
        if geometric < required { required } else { geometric }
    }

    fn grow_packed_if_required(&mut self, required: usize) {
        if self.packed.capacity() < required {
            let target = self.growth_target(required);
            self.packed.reserve_exact(target - self.packed.len());
        }
    }

    /// Grows the packed buffer to hold at least `cap` entities.
    ///
    /// Never shrinks; a request at or below the current capacity does
    /// nothing.
    pub fn reserve(&mut self, cap: usize) {
        if cap > self.packed.capacity() {
            self.packed.reserve_exact(cap - self.packed.len());
        }
    }

    /// Fallible variant of [`reserve`](SparseSet::reserve).
    ///
    /// On failure the set is unchanged.
    pub fn try_reserve(&mut self, cap: usize) -> Result<(), ReserveError> {
        if cap > self.packed.capacity() {
            self.packed
                .try_reserve_exact(cap - self.packed.len())
                .map_err(|source| ReserveError {
                    requested: cap,
                    source,
                })?;
        }
        Ok(())
    }

    /// Number of entities the packed buffer can hold without growing.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.packed.capacity()
    }

    /// Shrinks the packed buffer to the number of resident entities.
    ///
    /// An empty set additionally releases every sparse page.
    pub fn shrink_to_fit(&mut self) {
        self.packed.shrink_to_fit();
        // conservative approach
        if self.packed.is_empty() {
            self.sparse.release();
        }
    }

    /// Number of cells addressable by the sparse index without growing.
    ///
    /// The extent says nothing about how many entities are resident; it
    /// is the page count times the page size.
    #[inline]
    pub fn extent(&self) -> usize {
        self.sparse.extent()
    }

    /// Number of resident entities.
    #[inline]
    pub fn len(&self) -> usize {
        self.packed.len()
    }

    /// Returns `true` if no entity is resident.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.packed.is_empty()
    }

    /// The packed array in storage order; valid even when empty.
    ///
    /// Entities appear in the reverse of the order produced by
    /// [`iter`](SparseSet::iter).
    #[inline]
    pub fn as_slice(&self) -> &[Entity] {
        &self.packed
    }

    /// Iterates resident entities from the most recently inserted down to
    /// the oldest.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.packed.iter().rev().copied()
    }

    /// Returns `true` if `entity` is resident.
    #[inline]
    pub fn contains(&self, entity: Entity) -> bool {
        // testing against null avoids touching the packed array
        self.sparse.peek(entity).map_or(false, |cell| cell != NULL)
    }

    /// Returns the packed position of a resident entity.
    ///
    /// ## Panics
    /// Asking for an entity that is not resident is a contract violation;
    /// it is caught by a debug assertion and, at worst, a panic.
    #[inline]
    pub fn index(&self, entity: Entity) -> usize {
        debug_assert!(self.contains(entity), "set does not contain entity");
        match self.sparse.peek(entity) {
            Some(cell) => cell.index() as usize,
            None => panic!("set does not contain entity"),
        }
    }

    /// Returns the entity at packed position `pos`, or the null pattern
    /// when `pos` is out of range.
    #[inline]
    pub fn at(&self, pos: usize) -> Entity {
        self.packed.get(pos).copied().unwrap_or(Entity::from(NULL))
    }

    /// Inserts an entity at the tail of the packed array.
    ///
    /// ## Behavior
    /// - Records the new packed position in the entity's sparse cell,
    ///   allocating its page on first touch.
    /// - Grows the packed buffer geometrically (factor 1.5, bumped to the
    ///   request) before appending.
    ///
    /// Inserting an entity that is already resident is a contract
    /// violation, checked by a debug assertion.
    pub fn emplace(&mut self, entity: Entity) {
        debug_assert!(!self.contains(entity), "set already contains entity");

        let pos = self.packed.len();
        debug_assert!((pos as EntityID) < ENTITY_MASK, "packed position space exhausted");

        *self.sparse.assure(entity) = Entity::new(pos as IndexID, 0);
        self.grow_packed_if_required(pos + 1);
        self.packed.push(entity);
    }

    /// Inserts a batch of entities after a single capacity reservation.
    ///
    /// Equivalent to calling [`emplace`](SparseSet::emplace) for each
    /// element; no element may already be resident.
    pub fn insert(&mut self, entities: &[Entity]) {
        self.grow_packed_if_required(self.packed.len() + entities.len());

        for &entity in entities {
            debug_assert!(!self.contains(entity), "set already contains entity");
            let pos = self.packed.len();
            *self.sparse.assure(entity) = Entity::new(pos as IndexID, 0);
            self.packed.push(entity);
        }
    }

    /// Fallible variant of [`insert`](SparseSet::insert).
    ///
    /// Reserves up front; on failure nothing is inserted and the set is
    /// unchanged.
    pub fn try_insert(&mut self, entities: &[Entity]) -> Result<(), ReserveError> {
        let required = self.packed.len() + entities.len();
        if self.packed.capacity() < required {
            let target = self.growth_target(required);
            self.packed
                .try_reserve_exact(target - self.packed.len())
                .map_err(|source| ReserveError {
                    requested: target,
                    source,
                })?;
        }

        for &entity in entities {
            debug_assert!(!self.contains(entity), "set already contains entity");
            let pos = self.packed.len();
            *self.sparse.assure(entity) = Entity::new(pos as IndexID, 0);
            self.packed.push(entity);
        }
        Ok(())
    }

    /// Erases a resident entity.
    ///
    /// ## Behavior
    /// Swap-and-pop: the tail entity is written into the vacated packed
    /// slot and its sparse cell redirected there, then the victim's cell
    /// is reset to the null pattern. The subscriber sees
    /// `about_to_erase` while the entity is still resident and
    /// `swap_and_pop` once the slot has been refilled.
    ///
    /// Erasing the tail itself degenerates to a harmless self-redirect
    /// followed by the pop; the victim's cell is still cleared.
    ///
    /// Erasing an entity that is not resident is a contract violation,
    /// checked by a debug assertion.
    pub fn erase(&mut self, entity: Entity, mut ud: Option<&mut dyn Any>) {
        debug_assert!(self.contains(entity), "set does not contain entity");

        // last chance to use the entity for derived storages
        self.hooks.about_to_erase(entity, ud.as_deref_mut());

        let cell = match self.sparse.peek(entity) {
            Some(cell) => cell,
            None => panic!("set does not contain entity"),
        };
        let pos = cell.index() as usize;
        let last = self.packed[self.packed.len() - 1];

        // redirect the tail before clearing the victim's cell
        *self.sparse.assure(last) = cell;
        self.sparse.vacate(entity);
        self.packed.swap_remove(pos);

        self.hooks.swap_and_pop(pos, ud);
    }

    /// Erases every entity in the batch, in order.
    pub fn erase_all(&mut self, entities: &[Entity], mut ud: Option<&mut dyn Any>) {
        for &entity in entities {
            self.erase(entity, ud.as_deref_mut());
        }
    }

    /// Erases `entity` if it is resident.
    ///
    /// Returns `true` if the entity was actually removed.
    pub fn remove(&mut self, entity: Entity, ud: Option<&mut dyn Any>) -> bool {
        if self.contains(entity) {
            self.erase(entity, ud);
            true
        } else {
            false
        }
    }

    /// Removes every resident entity in the batch.
    ///
    /// Returns the number of entities actually removed.
    pub fn remove_all(&mut self, entities: &[Entity], mut ud: Option<&mut dyn Any>) -> usize {
        let mut found = 0;
        for &entity in entities {
            found += usize::from(self.remove(entity, ud.as_deref_mut()));
        }
        found
    }

    /// Exchanges the packed positions of two resident entities.
    ///
    /// Affects both the packed array and the sparse index, and notifies
    /// the subscriber once via `swap_at`.
    pub fn swap(&mut self, lhs: Entity, rhs: Entity) {
        debug_assert!(self.contains(lhs), "set does not contain entity");
        debug_assert!(self.contains(rhs), "set does not contain entity");

        let from = self.index(lhs);
        let to = self.index(rhs);

        self.sparse.swap_cells(lhs, rhs);
        self.packed.swap(from, to);
        self.hooks.swap_at(from, to);
    }

    /// Sorts the first `length` packed entries with the given strategy.
    ///
    /// ## Behavior
    /// The prefix occupies the low end of the packed array, so iteration
    /// reaches it last and yields it in ascending `compare` order. The
    /// sparse index is kept consistent by walking the permutation cycles,
    /// and the subscriber sees one `swap_at` per transposition applied,
    /// so derived arrays can replay the exact same rearrangement.
    ///
    /// `compare` must induce a strict weak ordering. A `length` greater
    /// than the set size is a contract violation, checked by a debug
    /// assertion.
    pub fn sort_n_with<C, A>(&mut self, length: usize, mut compare: C, mut algo: A)
    where
        C: FnMut(Entity, Entity) -> bool,
        A: SortAlgorithm,
    {
        debug_assert!(length <= self.packed.len(), "sort length exceeds set size");

        // storage order is the reverse of iteration order, so flip the
        // predicate and sort the prefix descending
        algo.sort(&mut self.packed[..length], &mut |lhs, rhs| compare(rhs, lhs));

        for pos in 0..length {
            let mut curr = pos;
            let mut next = self.index(self.packed[curr]);

            while curr != next {
                let idx = self.index(self.packed[next]);
                let entity = self.packed[curr];

                self.hooks.swap_at(next, idx);
                *self.sparse.assure(entity) = Entity::new(curr as IndexID, 0);

                curr = next;
                next = idx;
            }
        }
    }

    /// Sorts the first `length` packed entries with the default strategy.
    #[inline]
    pub fn sort_n<C>(&mut self, length: usize, compare: C)
    where
        C: FnMut(Entity, Entity) -> bool,
    {
        self.sort_n_with(length, compare, StdSort);
    }

    /// Sorts the whole set with the given strategy.
    #[inline]
    pub fn sort_with<C, A>(&mut self, compare: C, algo: A)
    where
        C: FnMut(Entity, Entity) -> bool,
        A: SortAlgorithm,
    {
        self.sort_n_with(self.packed.len(), compare, algo);
    }

    /// Sorts the whole set with the default strategy.
    #[inline]
    pub fn sort<C>(&mut self, compare: C)
    where
        C: FnMut(Entity, Entity) -> bool,
    {
        self.sort_n(self.packed.len(), compare);
    }

    /// Reorders entities shared with `other` to follow `other`'s
    /// iteration order.
    ///
    /// Entities present in both sets end up at the high end of the packed
    /// array, iterated in the same order `other` iterates them; the
    /// remaining entities drift toward the low end with no order
    /// guarantee among them. The walk stops once packed position 0 is
    /// reached, so that slot is never the target of a placement.
    pub fn respect<O: StorageHooks>(&mut self, other: &SparseSet<O>) {
        if self.packed.len() < 2 {
            return;
        }

        let mut pos = self.packed.len() - 1;
        for entity in other.iter() {
            if pos == 0 {
                break;
            }
            if self.contains(entity) {
                if entity != self.packed[pos] {
                    let resident = self.packed[pos];
                    self.swap(resident, entity);
                }
                pos -= 1;
            }
        }
    }

    /// Erases every resident entity, one by one, firing the hook protocol
    /// for each.
    pub fn clear(&mut self, mut ud: Option<&mut dyn Any>) {
        while let Some(&entity) = self.packed.last() {
            self.erase(entity, ud.as_deref_mut());
        }
    }
}

impl<H: StorageHooks> Index<usize> for SparseSet<H> {
    type Output = Entity;

    #[inline]
    fn index(&self, pos: usize) -> &Entity {
        &self.packed[pos]
    }
}
