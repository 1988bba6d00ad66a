// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=stagecraft --heading-base-level=0

//! Stagecraft: the core of a stage map viewer and object placement editor.
//!
//! A level is a set of stages. Each stage is a background image with placed
//! objects on it; the user pans and zooms the view, selects and drags
//! objects, and edits them through validated sessions.
//!
//! - [`StageSet`]: every loaded stage, with reload and the per-stage queries
//!   an outer application needs (objects for serialization, selection, scale).
//! - [`Stage`]: one stage. Routes pointer input, runs zoom (animated or
//!   instant), opens edit and add sessions, and builds render snapshots.
//! - [`FrameScheduler`]: drives zoom animation frames. [`ThreadScheduler`]
//!   runs them on one shared timer thread; [`ManualScheduler`] lets the
//!   host run frames from its own clock.
//! - [`Frame`]: a render snapshot in display space (markers, stack counts,
//!   selection box).
//!
//! The building blocks live in their own crates, and their main types are
//! re-exported here:
//! [`stagecraft_view`], [`stagecraft_objects`], [`stagecraft_pointer`] and
//! [`stagecraft_editor`].
//!
//! ## Minimal example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use kurbo::{Point, Size};
//! use stagecraft::{
//!     Container, DefaultPalette, ManualScheduler, PlacedObject, PointerButton, StageContext,
//!     StageId, StageLoad, StageSet, StagePoint, UniformLayout,
//! };
//!
//! let scheduler = Arc::new(ManualScheduler::new());
//! let context = StageContext::new(UniformLayout::default()).with_scheduler(scheduler.clone());
//! let chest = PlacedObject::new(
//!     StagePoint::new(512, 384),
//!     0x2A,
//!     vec![0; 8],
//!     0xE140,
//!     Container::RegionTable,
//! );
//! let mut stages = StageSet::load(
//!     vec![StageLoad::new(Size::new(1024.0, 768.0), vec![chest])],
//!     Size::new(640.0, 480.0),
//!     context,
//! )
//! .unwrap();
//!
//! let first = StageId::new(0);
//! let stage = stages.stage_mut(first).unwrap();
//!
//! // The view starts centered on the image, so the object is at the view center.
//! stage.pointer_press(PointerButton::Primary, Point::new(320.0, 240.0));
//! stage.pointer_release(PointerButton::Primary, Point::new(320.0, 240.0));
//! assert_eq!(stage.selected_object().unwrap().object_type(), 0x2A);
//!
//! // Zoom in around the pointer; frames run whenever the host asks.
//! stage.zoom(-7.5, Point::new(320.0, 240.0));
//! scheduler.run_until_idle(100);
//! assert_eq!(stages.scale(first).unwrap(), 2.0);
//!
//! let frame = stages.stage(first).unwrap().frame(&DefaultPalette);
//! assert_eq!(frame.markers.len(), 1);
//! assert!(frame.selection.is_some());
//! ```

mod config;
mod error;
mod frame;
mod scheduler;
mod set;
mod stage;
mod summary;

pub use config::{DEFAULT_FRAME_INTERVAL, StageConfig};
pub use error::StageError;
pub use frame::{
    DEFAULT_FILL, DEFAULT_OUTLINE, DefaultPalette, Frame, MARKER_SIZE_FACTOR, Marker,
    MarkerPalette, SELECTION_BOX_FACTOR, SELECTION_COLOR, SELECTION_DASHES,
    SELECTION_STROKE_WIDTH, STACK_LABEL_COLOR, STACK_LABEL_MIN_SCALE, STACK_LABEL_OPAQUE_SCALE,
    SelectionBox, StackLabel, TypePalette, build_frame, marker_diameter, marker_stroke_width,
    stack_label_alpha,
};
pub use scheduler::{FrameScheduler, FrameTask, FrameTick, ManualScheduler, ThreadScheduler};
pub use set::StageSet;
pub use stage::{RedrawNotifier, Stage, StageContext, StageId, StageLoad};
pub use summary::{ObjectSummary, TypeCatalog};

pub use stagecraft_editor::{
    AddSession, AddressPicker, EditError, EditOutcome, EditSession, HexField, HexInput,
};
pub use stagecraft_objects::{
    AddressAllocator, AddressLayout, Block, CapacityError, Container, DataLayout, ObjectId,
    ObjectRegistry, ObjectRules, PlacedObject, RegionLayout, RegionPosition, StagePoint,
    UniformLayout,
};
pub use stagecraft_pointer::{PointerButton, PointerOutcome};
pub use stagecraft_view::{StageViewport, ZoomMode};
