// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Click-to-select, drag-to-move, and view panning.
//!
//! The controller owns only interaction state: the selection, the table
//! filter, and the per-button drag trackers. The viewport and the registry
//! are passed into each event so the caller decides how they are stored and
//! locked.

use kurbo::{Point, Vec2};
use stagecraft_objects::{Container, ObjectId, ObjectRegistry, PlacedObject, StagePoint};
use stagecraft_view::StageViewport;

use crate::drag::DragTracker;
use crate::hit::{DEFAULT_SELECTION_THRESHOLD, distance_to, pick_visible};

/// Pointer buttons the controller distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Selects and moves objects.
    Primary,
    /// Pans the view.
    Middle,
    /// Pans the view.
    Secondary,
}

/// What a pointer event did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerOutcome {
    /// Nothing changed.
    Ignored,
    /// A press landed on the selected object; the next moves will drag it.
    DragArmed(ObjectId),
    /// The selected object was moved to a new position.
    Moved {
        /// The dragged object.
        id: ObjectId,
        /// Its new absolute position.
        position: StagePoint,
    },
    /// The drag of the selected object ended.
    DragEnded(ObjectId),
    /// The view focus moved.
    Panned,
    /// A click re-ran hit testing; carries the new selection.
    Selected(Option<ObjectId>),
}

impl PointerOutcome {
    /// Returns `true` if the outcome changes what is drawn.
    #[must_use]
    pub fn needs_redraw(&self) -> bool {
        !matches!(self, Self::Ignored | Self::DragArmed(_))
    }
}

/// Pointer interaction state for one stage.
#[derive(Clone, Debug)]
pub struct PointerController {
    threshold: f64,
    filter: Option<Container>,
    selected: Option<ObjectId>,
    object_drag: DragTracker,
    armed: bool,
    pan_drag: DragTracker,
    pan_button: Option<PointerButton>,
}

impl Default for PointerController {
    fn default() -> Self {
        Self::new(DEFAULT_SELECTION_THRESHOLD)
    }
}

impl PointerController {
    /// Creates a controller with the given pick radius (world units).
    ///
    /// The initial filter shows every table and nothing is selected.
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            filter: Some(Container::AllTables),
            selected: None,
            object_drag: DragTracker::default(),
            armed: false,
            pan_drag: DragTracker::default(),
            pan_button: None,
        }
    }

    /// Returns the pick radius.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Returns the table filter.
    #[must_use]
    pub fn filter(&self) -> Option<Container> {
        self.filter
    }

    /// Changes the table filter.
    ///
    /// A selection that the new filter hides is cleared; returns `true` in
    /// that case.
    pub fn set_filter(&mut self, filter: Option<Container>, registry: &ObjectRegistry) -> bool {
        self.filter = filter;
        let hidden = self
            .selected
            .is_some_and(|id| !registry.get(id).is_some_and(|obj| obj.is_visible(filter)));
        if hidden {
            self.clear_selection();
        }
        hidden
    }

    /// Returns the selected object, if it still exists and passes the filter.
    #[must_use]
    pub fn selected(&self, registry: &ObjectRegistry) -> Option<ObjectId> {
        self.selected.filter(|&id| {
            registry
                .get(id)
                .is_some_and(|obj| obj.is_visible(self.filter))
        })
    }

    /// Returns the selected object itself.
    #[must_use]
    pub fn selected_object<'a>(&self, registry: &'a ObjectRegistry) -> Option<&'a PlacedObject> {
        self.selected(registry).and_then(|id| registry.get(id))
    }

    /// Selects `id` directly, bypassing hit testing.
    pub fn select(&mut self, id: Option<ObjectId>) {
        self.selected = id;
        self.disarm();
    }

    /// Clears the selection and any drag in progress.
    pub fn clear_selection(&mut self) {
        self.select(None);
    }

    /// Returns `true` while the selected object follows the pointer.
    #[must_use]
    pub fn is_dragging_object(&self) -> bool {
        self.armed
    }

    /// Returns `true` while the view follows the pointer.
    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.pan_button.is_some()
    }

    /// Handles a button press at display position `pos`.
    ///
    /// A primary press within the pick radius of the selected object arms the
    /// object drag. Middle and secondary presses start panning.
    pub fn on_press(
        &mut self,
        button: PointerButton,
        pos: Point,
        viewport: &StageViewport,
        registry: &ObjectRegistry,
    ) -> PointerOutcome {
        match button {
            PointerButton::Primary => {
                self.object_drag.press(pos);
                let world = viewport.to_world(pos);
                let hit = self.selected(registry).filter(|&id| {
                    registry
                        .get(id)
                        .is_some_and(|obj| distance_to(obj, world) < self.threshold)
                });
                match hit {
                    Some(id) => {
                        self.armed = true;
                        PointerOutcome::DragArmed(id)
                    }
                    None => PointerOutcome::Ignored,
                }
            }
            PointerButton::Middle | PointerButton::Secondary => {
                self.pan_drag.press(pos);
                self.pan_button = Some(button);
                PointerOutcome::Ignored
            }
        }
    }

    /// Handles a pointer move to display position `pos`.
    ///
    /// Panning wins over an object drag if both buttons are held.
    pub fn on_move(
        &mut self,
        pos: Point,
        viewport: &mut StageViewport,
        registry: &mut ObjectRegistry,
    ) -> PointerOutcome {
        if self.pan_button.is_some() {
            // Keep the primary tracker current so an armed drag that turned
            // into panning still ends as a drag.
            self.object_drag.update(pos);
            return match self.pan_drag.update(pos) {
                Some(delta) if delta != Vec2::ZERO => {
                    viewport.pan_by_view(delta);
                    PointerOutcome::Panned
                }
                _ => PointerOutcome::Ignored,
            };
        }

        if self.object_drag.update(pos).is_none() || !self.armed {
            return PointerOutcome::Ignored;
        }
        let Some(id) = self.selected else {
            self.armed = false;
            return PointerOutcome::Ignored;
        };
        let Some(object) = registry.get_mut(id) else {
            self.clear_selection();
            return PointerOutcome::Ignored;
        };
        let position = StagePoint::from_world(viewport.to_world(pos));
        object.set_position(position);
        PointerOutcome::Moved { id, position }
    }

    /// Handles a button release at display position `pos`.
    ///
    /// A primary release re-runs hit testing: the nearest visible object
    /// within the pick radius becomes the selection, or the selection is
    /// cleared. Only a release that ends a drag of the selected object leaves
    /// the selection alone; pointer jitter during a plain click does not.
    pub fn on_release(
        &mut self,
        button: PointerButton,
        pos: Point,
        viewport: &StageViewport,
        registry: &ObjectRegistry,
    ) -> PointerOutcome {
        match button {
            PointerButton::Primary => {
                let tracked = self.object_drag.is_active();
                let moved = self.object_drag.release();
                let armed = core::mem::replace(&mut self.armed, false);
                if let Some(id) = self.selected.filter(|_| moved && armed) {
                    return PointerOutcome::DragEnded(id);
                }
                if !tracked {
                    return PointerOutcome::Ignored;
                }
                let world = viewport.to_world(pos);
                self.selected = pick_visible(registry, self.filter, world, self.threshold);
                PointerOutcome::Selected(self.selected)
            }
            PointerButton::Middle | PointerButton::Secondary => {
                if self.pan_button == Some(button) {
                    self.pan_drag.release();
                    self.pan_button = None;
                }
                PointerOutcome::Ignored
            }
        }
    }

    fn disarm(&mut self) {
        self.armed = false;
        self.object_drag.release();
    }
}
