// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=stagecraft_editor --heading-base-level=0

//! Stagecraft Editor: validated edits of placed objects.
//!
//! - [`HexField`]: text input that only accepts hex digits and whitespace and
//!   caps the digit count, cutting over-long input instead of rejecting it.
//! - [`EditSession`]: edits type, data, container and address of an existing
//!   object. Commit is all-or-nothing.
//! - [`AddSession`]: builds a new object at the view focus; it cannot be
//!   committed before an allocation address is picked.
//! - [`AddressPicker`]: the block table shown when picking an address.
//!
//! Data lengths come from a [`DataLayout`](stagecraft_objects::DataLayout)
//! supplied by the caller.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use stagecraft_editor::{AddSession, EditError, EditSession};
//! use stagecraft_objects::{AddressAllocator, ObjectRegistry, UniformLayout};
//!
//! let rules = UniformLayout::default();
//! let mut registry = ObjectRegistry::new();
//!
//! let mut add = AddSession::open(&registry, Point::new(64.4, 20.0), &rules).unwrap();
//! add.type_field.set_text("3a");
//! assert_eq!(add.commit(&mut registry, &rules), Err(EditError::NoAddressSelected));
//!
//! let mut picker = add.address_picker(AddressAllocator::default(), &registry);
//! picker.select(Some(2));
//! add.apply_picker(&picker).unwrap();
//! let id = add.commit(&mut registry, &rules).unwrap();
//!
//! let mut edit = EditSession::open(&registry, id, &rules).unwrap();
//! edit.data_field.set_text("de ad be ef");
//! let outcome = edit.commit(&mut registry, &rules).unwrap();
//! assert!(!outcome.type_changed);
//!
//! let object = registry.get(id).unwrap();
//! assert_eq!(object.object_type(), 0x3A);
//! assert_eq!(object.address(), 0xE1C0);
//! assert_eq!(object.data(), [0xDE, 0xAD, 0xBE, 0xEF, 0, 0, 0, 0]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod hex;
mod picker;
mod session;

pub use error::{EditError, HexInput};
pub use hex::{
    HexField, TYPE_DIGITS, filter_hex, format_address, format_data, format_type, parse_data,
    parse_type,
};
pub use picker::AddressPicker;
pub use session::{AddSession, EditOutcome, EditSession};
