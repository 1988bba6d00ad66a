// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=stagecraft_view --heading-base-level=0

//! Stagecraft View: the pan/zoom model behind the stage map.
//!
//! This crate provides a small, headless model of a stage image shown on a
//! display surface. It focuses on:
//! - Viewport state: a world-space focus point shown at the view center plus a
//!   uniform scale factor.
//! - Coordinate conversion between world (image pixels) and display space.
//! - Anchor zoom: wheel zooming that keeps the point under the pointer fixed.
//! - Eased zoom animation as a steppable state machine.
//!
//! It does **not** own timers or threads. Callers drive [`ZoomAnimator::step`]
//! from whatever periodic source they have and redraw when it reports a change.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use stagecraft_view::{StageViewport, ZoomAnimator, ZoomStep};
//!
//! let mut view = StageViewport::new(Size::new(800.0, 600.0), Size::new(2048.0, 1024.0));
//!
//! // One wheel notch towards the user zooms in around the pointer.
//! let pointer = Point::new(120.0, 80.0);
//! let under_pointer = view.to_world(pointer);
//!
//! let mut anim = ZoomAnimator::default();
//! anim.start(view.zoom_target(-1.0, pointer, 7.5));
//! while anim.step(&mut view) != ZoomStep::Finished {}
//!
//! let back = view.to_display(under_pointer);
//! assert!((back.x - pointer.x).abs() < 1e-6);
//! assert!((back.y - pointer.y).abs() < 1e-6);
//! ```
//!
//! ## Design notes
//!
//! - The transform is `display = center + scale * (world - focus)`.
//! - The focus is clamped to the image rectangle and the scale to
//!   `[min_scale, max_scale]` after every mutation.
//! - Scales within `±0.0025` of `1.0` snap to exactly `1.0`.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod modes;
mod viewport;
mod zoom;

pub use modes::{AnimationState, ZoomMode};
pub use viewport::{
    DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE, DEFAULT_ZOOM_SENSITIVITY, StageViewport, UNIT_SCALE_SNAP,
    ZoomTarget, snap_unit_scale,
};
pub use zoom::{DEFAULT_ZOOM_FRAMES, ZoomAnimator, ZoomStep, zoom_weights};
