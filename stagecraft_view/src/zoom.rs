// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Eased zoom animation.
//!
//! A [`ZoomAnimator`] moves a [`StageViewport`] from its live state to a
//! [`ZoomTarget`] over a fixed number of frames. The animator is a pure state
//! machine: something else (a timer, a test) calls [`ZoomAnimator::step`] once
//! per frame.
//!
//! On the first frame the remaining delta (scale and focus) is split across
//! all frames with the decelerating weight `w(i) = 1 / (i² / 4 + 1)`,
//! normalized to sum to one, so the zoom starts fast and eases to a stop.

use alloc::vec::Vec;

use kurbo::Vec2;

use crate::modes::AnimationState;
use crate::viewport::{StageViewport, ZoomTarget, snap_unit_scale};

/// Default number of frames in a smooth zoom.
pub const DEFAULT_ZOOM_FRAMES: usize = 20;

/// Returns the normalized per-frame weights for an animation of `frames` frames.
///
/// The weights are strictly decreasing and sum to `1.0`.
#[must_use]
pub fn zoom_weights(frames: usize) -> Vec<f64> {
    let raw: Vec<f64> = (0..frames)
        .map(|i| {
            let i = i as f64;
            1.0 / (i * i / 4.0 + 1.0)
        })
        .collect();
    let total: f64 = raw.iter().sum();
    raw.into_iter().map(|w| w / total).collect()
}

/// Result of one [`ZoomAnimator::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomStep {
    /// Nothing is animating; the viewport was not touched.
    Idle,
    /// The scale changed; the frame must be redrawn.
    Advanced,
    /// The frame slot was consumed but the snapped scale did not change, so
    /// no redraw is needed.
    Held,
    /// The final frame landed on the target; the animator is idle again.
    Finished,
}

#[derive(Clone, Copy, Debug)]
struct FrameDelta {
    scale: f64,
    focus: Vec2,
}

/// Cancellable, frame-stepped zoom animation.
#[derive(Clone, Debug)]
pub struct ZoomAnimator {
    weights: Vec<f64>,
    deltas: Vec<FrameDelta>,
    frame: usize,
    target: Option<ZoomTarget>,
}

impl Default for ZoomAnimator {
    fn default() -> Self {
        Self::new(DEFAULT_ZOOM_FRAMES)
    }
}

impl ZoomAnimator {
    /// Creates an idle animator that spreads each zoom over `frames` frames.
    ///
    /// A frame count of zero is treated as one.
    #[must_use]
    pub fn new(frames: usize) -> Self {
        let frames = frames.max(1);
        Self {
            weights: zoom_weights(frames),
            deltas: Vec::with_capacity(frames),
            frame: 0,
            target: None,
        }
    }

    /// Returns the number of frames per animation.
    #[must_use]
    pub fn frames(&self) -> usize {
        self.weights.len()
    }

    /// Returns the index of the next frame to run.
    #[must_use]
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub fn state(&self) -> AnimationState {
        if self.target.is_some() {
            AnimationState::Animating
        } else {
            AnimationState::Idle
        }
    }

    /// Returns `true` while a zoom is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.target.is_some()
    }

    /// Returns the target of the animation in flight, if any.
    #[must_use]
    pub fn target(&self) -> Option<ZoomTarget> {
        self.target
    }

    /// Starts a new animation towards `target`.
    ///
    /// Any animation in flight is discarded without completing; the new one
    /// starts from whatever state the viewport is in at its first frame.
    /// Returns `true` if an animation was cancelled.
    pub fn start(&mut self, target: ZoomTarget) -> bool {
        let cancelled = self.is_animating();
        self.reset();
        self.target = Some(target);
        cancelled
    }

    /// Stops the animation in flight, leaving the viewport where it is.
    pub fn cancel(&mut self) {
        self.reset();
    }

    /// Runs one frame against `viewport`.
    pub fn step(&mut self, viewport: &mut StageViewport) -> ZoomStep {
        let Some(target) = self.target else {
            return ZoomStep::Idle;
        };

        if self.frame == 0 {
            self.plan(viewport, target);
        }

        if self.frame + 1 >= self.frames() {
            // Land exactly on the target instead of trusting the summed deltas.
            viewport.apply_target(target);
            self.reset();
            return ZoomStep::Finished;
        }

        let delta = self.deltas[self.frame];
        let before = viewport.scale();
        let scale = snap_unit_scale(viewport.clamp_scale(before + delta.scale));
        viewport.set_scale_and_focus(scale, viewport.focus() + delta.focus);
        self.frame += 1;

        if scale == before {
            ZoomStep::Held
        } else {
            ZoomStep::Advanced
        }
    }

    fn plan(&mut self, viewport: &StageViewport, target: ZoomTarget) {
        let scale_diff = target.scale - viewport.scale();
        let focus_diff = target.focus - viewport.focus();
        self.deltas.clear();
        self.deltas.extend(self.weights.iter().map(|w| FrameDelta {
            scale: scale_diff * w,
            focus: focus_diff * *w,
        }));
    }

    fn reset(&mut self) {
        self.target = None;
        self.frame = 0;
        self.deltas.clear();
    }
}
