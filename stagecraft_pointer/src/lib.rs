// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=stagecraft_pointer --heading-base-level=0

//! Stagecraft Pointer: pointer interaction over a stage.
//!
//! - [`pick_nearest`] / [`pick_visible`]: nearest-object hit testing in world
//!   space with a fixed pick radius.
//! - [`PointerController`]: click-to-select, drag-to-move of the selected
//!   object, and view panning with the middle or secondary button.
//! - [`DragTracker`]: per-button press/move/release bookkeeping.
//!
//! The controller never owns the viewport or the registry. Each event borrows
//! them, so a caller can keep the viewport behind a lock shared with a zoom
//! timer while the registry stays on the event thread.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use stagecraft_objects::{Container, ObjectRegistry, PlacedObject, StagePoint};
//! use stagecraft_pointer::{PointerButton, PointerController, PointerOutcome};
//! use stagecraft_view::StageViewport;
//!
//! let mut view = StageViewport::new(Size::new(100.0, 100.0), Size::new(100.0, 100.0));
//! let mut registry = ObjectRegistry::from_objects([PlacedObject::new(
//!     StagePoint::new(40, 40),
//!     0,
//!     vec![0; 8],
//!     0xE140,
//!     Container::RegionTable,
//! )])
//! .unwrap();
//! let mut pointer = PointerController::default();
//!
//! // Click near the object to select it.
//! let at = Point::new(42.0, 41.0);
//! pointer.on_press(PointerButton::Primary, at, &view, &registry);
//! let PointerOutcome::Selected(Some(id)) =
//!     pointer.on_release(PointerButton::Primary, at, &view, &registry)
//! else {
//!     panic!("expected a selection");
//! };
//!
//! // Press on it again and drag it somewhere else.
//! pointer.on_press(PointerButton::Primary, at, &view, &registry);
//! pointer.on_move(Point::new(70.0, 20.0), &mut view, &mut registry);
//! pointer.on_release(PointerButton::Primary, Point::new(70.0, 20.0), &view, &registry);
//! assert_eq!(registry.get(id).unwrap().position(), StagePoint::new(70, 20));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod controller;
mod drag;
mod hit;

pub use controller::{PointerButton, PointerController, PointerOutcome};
pub use drag::DragTracker;
pub use hit::{DEFAULT_SELECTION_THRESHOLD, distance_to, pick_nearest, pick_visible};
