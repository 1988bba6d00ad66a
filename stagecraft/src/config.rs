// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::time::Duration;

use stagecraft_objects::{AddressLayout, MAX_OBJECTS};
use stagecraft_pointer::DEFAULT_SELECTION_THRESHOLD;
use stagecraft_view::{
    DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE, DEFAULT_ZOOM_FRAMES, DEFAULT_ZOOM_SENSITIVITY, ZoomMode,
};

/// Default delay between two zoom animation frames.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(6);

/// Tunables of a stage. All values are compiled in; there is no file or
/// environment lookup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StageConfig {
    /// Lower scale bound.
    pub min_scale: f64,
    /// Upper scale bound.
    pub max_scale: f64,
    /// Pick radius in world units.
    pub selection_threshold: f64,
    /// Wheel ticks are divided by this before scaling.
    pub zoom_sensitivity: f64,
    /// Frames in one smooth zoom.
    pub zoom_frames: usize,
    /// Delay between smooth zoom frames.
    pub frame_interval: Duration,
    /// Whether wheel zoom animates.
    pub zoom_mode: ZoomMode,
    /// Maximum number of objects per stage.
    pub object_limit: usize,
    /// Allocation address range and block size.
    pub address_layout: AddressLayout,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            selection_threshold: DEFAULT_SELECTION_THRESHOLD,
            zoom_sensitivity: DEFAULT_ZOOM_SENSITIVITY,
            zoom_frames: DEFAULT_ZOOM_FRAMES,
            frame_interval: DEFAULT_FRAME_INTERVAL,
            zoom_mode: ZoomMode::Smooth,
            object_limit: MAX_OBJECTS,
            address_layout: AddressLayout::default(),
        }
    }
}
