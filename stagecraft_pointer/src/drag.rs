// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Press/move/release tracking for a single pointer button.
//!
//! ## Usage
//!
//! 1) Call [`DragTracker::press`] when the button goes down.
//! 2) On each move, call [`DragTracker::update`] to get the delta since the
//!    previous position.
//! 3) Call [`DragTracker::release`] when the button goes up; it reports
//!    whether the pointer moved in between.
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use stagecraft_pointer::DragTracker;
//!
//! let mut drag = DragTracker::default();
//! drag.press(Point::new(10.0, 20.0));
//! assert_eq!(drag.update(Point::new(14.0, 17.0)), Some(Vec2::new(4.0, -3.0)));
//! assert_eq!(drag.total_offset(Point::new(14.0, 17.0)), Some(Vec2::new(4.0, -3.0)));
//! assert!(drag.release(), "the pointer moved while pressed");
//! assert!(!drag.is_active());
//! ```

use kurbo::{Point, Vec2};

/// Tracks one pressed button across move events.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragTracker {
    start: Option<Point>,
    last: Option<Point>,
    moved: bool,
}

impl DragTracker {
    /// Begins tracking from `pos`, discarding any earlier gesture.
    pub fn press(&mut self, pos: Point) {
        self.start = Some(pos);
        self.last = Some(pos);
        self.moved = false;
    }

    /// Records a move to `pos` and returns the delta since the last position.
    ///
    /// Returns `None` when no button is tracked. A zero delta does not count
    /// as movement.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        let last = self.last.replace(pos)?;
        let delta = pos - last;
        if delta != Vec2::ZERO {
            self.moved = true;
        }
        Some(delta)
    }

    /// Returns the offset of `pos` from where the button went down.
    #[must_use]
    pub fn total_offset(&self, pos: Point) -> Option<Vec2> {
        self.start.map(|start| pos - start)
    }

    /// Stops tracking and returns `true` if the pointer moved while pressed.
    pub fn release(&mut self) -> bool {
        let moved = self.moved;
        *self = Self::default();
        moved
    }

    /// Returns `true` while a button is tracked.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.start.is_some()
    }

    /// Returns `true` if the tracked button has moved since the press.
    #[must_use]
    pub fn has_moved(&self) -> bool {
        self.moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_tracker_ignores_moves() {
        let mut drag = DragTracker::default();
        assert_eq!(drag.update(Point::new(3.0, 4.0)), None);
        assert!(!drag.is_active());
        assert!(!drag.release());
    }

    #[test]
    fn deltas_are_incremental() {
        let mut drag = DragTracker::default();
        drag.press(Point::ORIGIN);
        assert_eq!(drag.update(Point::new(5.0, 3.0)), Some(Vec2::new(5.0, 3.0)));
        assert_eq!(drag.update(Point::new(8.0, 7.0)), Some(Vec2::new(3.0, 4.0)));
        assert_eq!(
            drag.total_offset(Point::new(8.0, 7.0)),
            Some(Vec2::new(8.0, 7.0))
        );
    }

    #[test]
    fn zero_delta_is_not_movement() {
        let mut drag = DragTracker::default();
        let at = Point::new(50.0, 50.0);
        drag.press(at);
        assert_eq!(drag.update(at), Some(Vec2::ZERO));
        assert!(!drag.has_moved());
        assert!(!drag.release());
    }

    #[test]
    fn press_restarts_gesture() {
        let mut drag = DragTracker::default();
        drag.press(Point::ORIGIN);
        drag.update(Point::new(10.0, 10.0));
        assert!(drag.has_moved());

        drag.press(Point::new(50.0, 60.0));
        assert!(!drag.has_moved());
        assert_eq!(
            drag.total_offset(Point::new(55.0, 65.0)),
            Some(Vec2::new(5.0, 5.0))
        );
    }
}
