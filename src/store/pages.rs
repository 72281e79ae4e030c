//! # Paged Sparse Index
//!
//! Maps an entity's index bits to a cell holding its packed position.
//!
//! ## Design
//! The index space is split into fixed-size pages of [`PAGE_SIZE`]
//! identifiers. The page table is a growable vector of owning boxes:
//!
//! - An absent page costs a single `None` and is zero-overhead to skip.
//! - A page is allocated on first touch as one block, fully initialised
//!   to the null pattern, and lives until the whole index is released.
//! - The table grows only; pages are never returned individually.
//!
//! `page(e) = index(e) / PAGE_SIZE` and `offset(e) = index(e) % PAGE_SIZE`
//! locate the cell for an entity. A cell equal to the null pattern means
//! the entity is absent.
//!
//! ## Invariants
//! - Every allocated page has exactly [`PAGE_SIZE`] cells.
//! - Cells of a freshly allocated page all hold the vacant pattern.
//! - The number of pages in the table never decreases except through
//!   [`SparsePages::release`].

use crate::store::entity::Entity;
use crate::store::types::{EntityID, PAGE_SIZE};

/// Pattern stored in untouched cells; null-equal by construction.
const VACANT: Entity = Entity::from_bits(EntityID::MAX);

/// Lazily allocated page table from entity index to packed position.
///
/// Owned exclusively by the sparse set that embeds it. All writes go
/// through [`assure`](SparsePages::assure), which allocates the target
/// page on demand; reads go through [`peek`](SparsePages::peek), which
/// never allocates.
#[derive(Default)]
pub struct SparsePages {
    buckets: Vec<Option<Box<[Entity; PAGE_SIZE]>>>,
}

#[inline]
const fn page_of(entity: Entity) -> usize {
    entity.index() as usize / PAGE_SIZE
}

#[inline]
const fn offset_of(entity: Entity) -> usize {
    entity.index() as usize % PAGE_SIZE
}

impl SparsePages {
    /// Creates an empty page table. Does not allocate.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of cells addressable without growing the table.
    #[inline]
    pub fn extent(&self) -> usize {
        self.buckets.len() * PAGE_SIZE
    }

    /// Reads the cell for `entity` without allocating.
    ///
    /// Returns `None` when the page is out of range or absent; the caller
    /// distinguishes a vacant cell by comparing the value against the
    /// null pattern.
    #[inline]
    pub fn peek(&self, entity: Entity) -> Option<Entity> {
        self.buckets
            .get(page_of(entity))
            .and_then(|bucket| bucket.as_deref())
            .map(|page| page[offset_of(entity)])
    }

    /// Returns the cell for `entity`, growing the table and allocating
    /// the page if needed.
    ///
    /// Growing the table fills new slots with the absent marker; a fresh
    /// page is one block of [`PAGE_SIZE`] cells, all vacant.
    pub fn assure(&mut self, entity: Entity) -> &mut Entity {
        let page = page_of(entity);
        if page >= self.buckets.len() {
            self.buckets.resize_with(page + 1, || None);
        }

        let cells = self.buckets[page].get_or_insert_with(|| Box::new([VACANT; PAGE_SIZE]));
        &mut cells[offset_of(entity)]
    }

    /// Resets the cell for `entity` to the vacant pattern.
    #[inline]
    pub fn vacate(&mut self, entity: Entity) {
        *self.assure(entity) = VACANT;
    }

    /// Exchanges the cells of two entities.
    pub fn swap_cells(&mut self, lhs: Entity, rhs: Entity) {
        let lhs_cell = *self.assure(lhs);
        let rhs_cell = *self.assure(rhs);
        *self.assure(lhs) = rhs_cell;
        *self.assure(rhs) = lhs_cell;
    }

    /// Drops every page and the table itself.
    ///
    /// Only called when no entity is resident; afterwards the extent is
    /// zero and the table is indistinguishable from a fresh one.
    #[inline]
    pub fn release(&mut self) {
        self.buckets = Vec::new();
    }
}
