// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;
use stagecraft_objects::{Container, ObjectId, ObjectRegistry, PlacedObject};

/// Default pick radius, in world units.
///
/// The radius is not scaled by zoom, so picking precision is the same at every
/// scale.
pub const DEFAULT_SELECTION_THRESHOLD: f64 = 5.0;

/// World-space distance from `world` to the object's position.
#[must_use]
pub fn distance_to(object: &PlacedObject, world: Point) -> f64 {
    object.position().to_point().distance(world)
}

/// Returns the candidate nearest to `world` that is strictly closer than
/// `threshold`.
///
/// Candidates are scanned in order and one replaces the current best only when
/// strictly closer, so ties keep the first one encountered.
#[must_use]
pub fn pick_nearest<'a, I>(candidates: I, world: Point, threshold: f64) -> Option<ObjectId>
where
    I: IntoIterator<Item = (ObjectId, &'a PlacedObject)>,
{
    let mut best = threshold;
    let mut found = None;
    for (id, object) in candidates {
        let dist = distance_to(object, world);
        if dist < best {
            best = dist;
            found = Some(id);
        }
    }
    found
}

/// [`pick_nearest`] over the objects of `registry` that pass `filter`.
#[must_use]
pub fn pick_visible(
    registry: &ObjectRegistry,
    filter: Option<Container>,
    world: Point,
    threshold: f64,
) -> Option<ObjectId> {
    pick_nearest(registry.visible(filter), world, threshold)
}
