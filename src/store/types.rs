//! Core Identifier Types and Bit-Level Layout
//!
//! This module defines the **fundamental types, bit widths, masks, and
//! page geometry** shared by every part of the store. These definitions
//! form the semantic backbone of the crate: the entity identifier format,
//! the sparse page size, and the compile-time checks that keep both honest.
//!
//! ## Entity Representation
//!
//! Entities are encoded as a packed 32-bit integer with the following layout:
//!
//! ```text
//! | version | index |
//! ```
//!
//! - **Index** identifies the entity's slot and addresses the sparse pages.
//! - **Version** is a generation counter distinguishing recycled slots.
//!
//! The exact bit widths are controlled by compile-time constants and
//! validated using static assertions.
//!
//! ## Page Geometry
//!
//! The sparse side of the store is split into fixed-size pages of
//! [`PAGE_SIZE`] identifiers so that untouched index ranges cost nothing
//! but a null pointer. The page size must be a power of two; page and
//! offset arithmetic reduces to shifts and masks on the index bits.

/// Bit-width type used for compile-time layout calculations.
pub type Bits = u8;

/// Raw bit pattern of an entity identifier.
pub type EntityID = u32;
/// Index field extracted from an [`EntityID`].
pub type IndexID = u32;
/// Generation counter field extracted from an [`EntityID`].
pub type VersionID = u16;

/// Total number of bits in an [`EntityID`].
pub const ENTITY_BITS: Bits = 32;
/// Number of bits reserved for entity versioning.
pub const VERSION_BITS: Bits = 12;
/// Number of bits reserved for the entity index.
pub const INDEX_BITS: Bits = ENTITY_BITS - VERSION_BITS;

const _: [(); 1] = [(); (VERSION_BITS < ENTITY_BITS) as usize];
const _: [(); 1] = [(); (INDEX_BITS > 0) as usize];
const _: [(); 1] = [(); (INDEX_BITS < ENTITY_BITS) as usize];

const fn mask(bits: Bits) -> EntityID {
    if bits == 0 { 0 } else { ((1 as EntityID) << bits) - 1 }
}

/// Mask selecting the index portion of an [`EntityID`].
pub const ENTITY_MASK: EntityID = mask(INDEX_BITS);
/// Mask selecting the version portion of an [`EntityID`], pre-shift.
pub const VERSION_MASK: EntityID = mask(VERSION_BITS);
/// Number of low bits to skip to reach the version field.
pub const ENTITY_SHIFT: Bits = INDEX_BITS;

/// Number of identifiers held by one sparse page.
pub const PAGE_SIZE: usize = 4096;

const _: [(); 1] = [(); PAGE_SIZE.is_power_of_two() as usize];
