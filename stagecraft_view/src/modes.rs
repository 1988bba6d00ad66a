// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// How a wheel zoom reaches its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ZoomMode {
    /// Jump to the target scale and focus in one step.
    Instant,
    /// Ease towards the target over a fixed number of timer frames using
    /// [`crate::ZoomAnimator`].
    #[default]
    Smooth,
}

/// Lifecycle of a [`crate::ZoomAnimator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AnimationState {
    /// No zoom in flight.
    #[default]
    Idle,
    /// A zoom is easing towards its target.
    Animating,
}
