// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=stagecraft_objects --heading-base-level=0

//! Stagecraft Objects: the placed-object model of a stage.
//!
//! This crate holds the data a stage editor manipulates:
//! - [`PlacedObject`]: type, absolute position, auxiliary data, allocation
//!   address, and table membership ([`Container`]).
//! - [`ObjectRegistry`]: the ordered, capacity-limited object list of one
//!   stage, addressed through stable [`ObjectId`] handles.
//! - Table filtering with [`is_visible`].
//! - [`AddressAllocator`]: block occupancy over the fixed allocation range.
//!
//! Level-format specifics (how many data bytes a type carries, how regions
//! tile the stage) stay outside: they come in through the [`DataLayout`] and
//! [`RegionLayout`] traits.
//!
//! ## Minimal example
//!
//! ```rust
//! use stagecraft_objects::{
//!     AddressAllocator, Container, ObjectRegistry, PlacedObject, StagePoint,
//! };
//!
//! let mut registry = ObjectRegistry::new();
//! let boss = registry
//!     .try_insert(PlacedObject::new(
//!         StagePoint::new(120, 48),
//!         0x0031,
//!         vec![0; 8],
//!         0xE140,
//!         Container::RegionTable,
//!     ))
//!     .unwrap();
//!
//! // Hidden under the initial-table filter, shown under "all tables".
//! assert_eq!(registry.visible(Some(Container::InitialTable)).count(), 0);
//! assert_eq!(registry.visible(Some(Container::AllTables)).count(), 1);
//!
//! // The first block is taken by the boss.
//! let table = AddressAllocator::default().block_table(&registry, None);
//! assert_eq!(table[0].occupants.as_slice(), &[boss]);
//! assert!(table[1].is_free());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod address;
mod object;
mod registry;

pub use address::{
    AddressAllocator, AddressLayout, Block, DEFAULT_BLOCK_SIZE, DEFAULT_END_ADDRESS,
    DEFAULT_START_ADDRESS, Occupants,
};
pub use object::{
    Container, DEFAULT_DATA_LEN, DEFAULT_REGION_SIZE, DataLayout, ObjectRules, PlacedObject,
    RegionLayout, RegionPosition, StagePoint, UniformLayout, is_visible,
};
pub use registry::{CapacityError, MAX_OBJECTS, ObjectId, ObjectRegistry};
