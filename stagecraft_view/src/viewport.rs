// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Size, Vec2};

/// Default lower bound for the viewport scale.
pub const DEFAULT_MIN_SCALE: f64 = 0.2;

/// Default upper bound for the viewport scale.
pub const DEFAULT_MAX_SCALE: f64 = 1000.0;

/// Default divisor applied to wheel ticks when computing a zoom step.
pub const DEFAULT_ZOOM_SENSITIVITY: f64 = 7.5;

/// Half-width of the band around `1.0` that [`snap_unit_scale`] collapses.
pub const UNIT_SCALE_SNAP: f64 = 0.0025;

/// Snaps `scale` to exactly `1.0` when it lies strictly within
/// [`UNIT_SCALE_SNAP`] of it.
///
/// Repeated wheel zooming accumulates rounding error; snapping lets the user
/// return to a pixel-exact view.
#[must_use]
pub fn snap_unit_scale(scale: f64) -> f64 {
    if scale > 1.0 - UNIT_SCALE_SNAP && scale < 1.0 + UNIT_SCALE_SNAP {
        1.0
    } else {
        scale
    }
}

/// Destination of a zoom: the scale and the world-space focus point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomTarget {
    /// Target scale, already snapped and clamped.
    pub scale: f64,
    /// Target focus (world point shown at the center of the view).
    pub focus: Point,
}

/// Centered pan/zoom transform over a stage image.
///
/// The viewport keeps a world-space *focus* point (the pan) that is shown at
/// the center of the display surface, and a uniform scale factor:
///
/// `display = center + scale * (world - focus)`
///
/// The focus is always clamped to the image rectangle `[0, width] × [0, height]`
/// and the scale to `[min_scale, max_scale]`.
#[derive(Clone, Debug)]
pub struct StageViewport {
    view_size: Size,
    image_size: Size,
    focus: Point,
    scale: f64,
    min_scale: f64,
    max_scale: f64,
    world_to_view: Affine,
    view_to_world: Affine,
}

impl StageViewport {
    /// Creates a viewport over an image of `image_size` shown on a surface of
    /// `view_size`.
    ///
    /// - Initial scale is `1.0`.
    /// - Initial focus is the image center.
    /// - Scale is clamped to `[DEFAULT_MIN_SCALE, DEFAULT_MAX_SCALE]`.
    #[must_use]
    pub fn new(view_size: Size, image_size: Size) -> Self {
        let mut vp = Self {
            view_size,
            image_size,
            focus: Point::new(image_size.width / 2.0, image_size.height / 2.0),
            scale: 1.0,
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            world_to_view: Affine::IDENTITY,
            view_to_world: Affine::IDENTITY,
        };
        vp.rebuild_transforms();
        vp
    }

    /// Returns the display surface size.
    #[must_use]
    pub fn view_size(&self) -> Size {
        self.view_size
    }

    /// Sets the display surface size.
    ///
    /// Scale and focus are unchanged; only the center of the view moves.
    pub fn set_view_size(&mut self, size: Size) {
        if self.view_size == size {
            return;
        }
        self.view_size = size;
        self.rebuild_transforms();
    }

    /// Returns the image (world) size.
    #[must_use]
    pub fn image_size(&self) -> Size {
        self.image_size
    }

    /// Replaces the image size and re-clamps the focus into it.
    pub fn set_image_size(&mut self, size: Size) {
        self.image_size = size;
        self.focus = self.clamp_focus(self.focus);
        self.rebuild_transforms();
    }

    /// Returns the world point shown at the center of the view.
    #[must_use]
    pub fn focus(&self) -> Point {
        self.focus
    }

    /// Moves the focus to `focus`, clamped to the image bounds.
    pub fn set_focus(&mut self, focus: Point) {
        let focus = self.clamp_focus(focus);
        if focus == self.focus {
            return;
        }
        self.focus = focus;
        self.rebuild_transforms();
    }

    /// Returns the current scale factor.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Returns the minimum scale factor.
    #[must_use]
    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    /// Returns the maximum scale factor.
    #[must_use]
    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    /// Sets the minimum and maximum scale factors.
    ///
    /// The provided range is normalized so that `min <= max`. The current
    /// scale is clamped into the new range.
    pub fn set_scale_limits(&mut self, min_scale: f64, max_scale: f64) {
        let (min_scale, max_scale) = if min_scale <= max_scale {
            (min_scale, max_scale)
        } else {
            (max_scale, min_scale)
        };
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self.set_scale(self.scale);
    }

    /// Clamps `scale` into the configured range.
    #[must_use]
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }

    /// Sets the scale factor, clamping it into the configured range.
    ///
    /// The focus stays fixed, so this zooms about the view center.
    pub fn set_scale(&mut self, scale: f64) {
        let clamped = self.clamp_scale(scale);
        if self.scale == clamped {
            return;
        }
        self.scale = clamped;
        self.rebuild_transforms();
    }

    /// Pans by a display-space delta.
    ///
    /// The content follows the pointer: dragging right by `d` pixels moves the
    /// focus left by `d / scale` world units. The focus is clamped to the image.
    pub fn pan_by_view(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        self.set_focus(self.focus - delta / self.scale);
    }

    /// Converts a world-space point into display coordinates.
    #[must_use]
    pub fn to_display(&self, world: Point) -> Point {
        self.world_to_view * world
    }

    /// Converts a display-space point into world coordinates.
    #[must_use]
    pub fn to_world(&self, display: Point) -> Point {
        self.view_to_world * display
    }

    /// Returns the world → display transform, for renderers.
    #[must_use]
    pub fn world_to_view(&self) -> Affine {
        self.world_to_view
    }

    /// Returns the center of the display surface.
    #[must_use]
    pub fn view_center(&self) -> Point {
        Point::new(self.view_size.width / 2.0, self.view_size.height / 2.0)
    }

    /// Computes where a wheel zoom of `tick` notches at `anchor` would land.
    ///
    /// The raw scale is `scale - (tick / sensitivity) * scale`, which is then
    /// snapped with [`snap_unit_scale`] and clamped. The focus is chosen so
    /// that the world point under `anchor` stays under `anchor` at the new
    /// scale. The target focus is *not* clamped; callers apply it through
    /// [`StageViewport::apply_target`], which clamps.
    #[must_use]
    pub fn zoom_target(&self, tick: f64, anchor: Point, sensitivity: f64) -> ZoomTarget {
        let raw = self.scale - (tick / sensitivity) * self.scale;
        let scale = self.clamp_scale(snap_unit_scale(raw));
        ZoomTarget {
            scale,
            focus: self.anchored_focus(anchor, scale),
        }
    }

    /// Returns the focus that keeps the world point under `anchor` fixed when
    /// the scale changes to `new_scale`.
    #[must_use]
    pub fn anchored_focus(&self, anchor: Point, new_scale: f64) -> Point {
        let world = self.to_world(anchor);
        world - (anchor - self.view_center()) / new_scale
    }

    /// Jumps to `target` in one step (scale clamped, focus clamped).
    pub fn apply_target(&mut self, target: ZoomTarget) {
        self.set_scale_and_focus(target.scale, target.focus);
    }

    /// Zooms about `anchor` immediately, without animation.
    pub fn zoom_about_view_point(&mut self, anchor: Point, tick: f64, sensitivity: f64) {
        let target = self.zoom_target(tick, anchor, sensitivity);
        self.apply_target(target);
    }

    pub(crate) fn set_scale_and_focus(&mut self, scale: f64, focus: Point) {
        self.scale = self.clamp_scale(scale);
        self.focus = self.clamp_focus(focus);
        self.rebuild_transforms();
    }

    fn clamp_focus(&self, focus: Point) -> Point {
        Point::new(
            focus.x.clamp(0.0, self.image_size.width.max(0.0)),
            focus.y.clamp(0.0, self.image_size.height.max(0.0)),
        )
    }

    fn rebuild_transforms(&mut self) {
        let center = self.view_center().to_vec2();
        // World → view: move the focus to the origin, scale, then move the
        // origin to the view center.
        self.world_to_view = Affine::translate(center)
            * Affine::scale(self.scale)
            * Affine::translate(-self.focus.to_vec2());
        self.view_to_world = self.world_to_view.inverse();
    }
}
