// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered, capacity-limited object storage for one stage.

use alloc::vec::Vec;
use core::fmt;

use crate::object::{Container, PlacedObject};

/// Maximum number of objects a stage can hold.
pub const MAX_OBJECTS: usize = 256;

/// Stable handle to an object within one [`ObjectRegistry`].
///
/// Handles are never reused by a registry, so a stale handle simply stops
/// resolving once its object is removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u32);

impl ObjectId {
    /// Returns the raw handle value.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

/// Error returned when an insertion would exceed the registry's object limit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CapacityError {
    /// The limit that was hit.
    pub limit: usize,
}

impl fmt::Display for CapacityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "object limit of {} reached; remove some objects first",
            self.limit
        )
    }
}

impl core::error::Error for CapacityError {}

#[derive(Clone, Debug)]
struct Entry {
    id: ObjectId,
    object: PlacedObject,
}

/// The ordered list of objects placed on one stage.
///
/// Order is insertion order and is what serializers receive. Every object gets
/// an [`ObjectId`] when it enters the registry.
#[derive(Clone, Debug)]
pub struct ObjectRegistry {
    entries: Vec<Entry>,
    next_id: u32,
    limit: usize,
}

impl Default for ObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectRegistry {
    /// Creates an empty registry limited to [`MAX_OBJECTS`].
    #[must_use]
    pub const fn new() -> Self {
        Self::with_limit(MAX_OBJECTS)
    }

    /// Creates an empty registry limited to `limit` objects.
    #[must_use]
    pub const fn with_limit(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
            limit,
        }
    }

    /// Builds a registry holding `objects` in order.
    ///
    /// Fails without building anything if the list exceeds [`MAX_OBJECTS`].
    pub fn from_objects<I>(objects: I) -> Result<Self, CapacityError>
    where
        I: IntoIterator<Item = PlacedObject>,
    {
        let mut registry = Self::new();
        registry.replace_all(objects)?;
        Ok(registry)
    }

    /// Returns the object limit.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Returns the number of objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if another insertion would be rejected.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.limit
    }

    /// Fails with [`CapacityError`] if the registry is full.
    pub fn check_capacity(&self) -> Result<(), CapacityError> {
        if self.is_full() {
            Err(CapacityError { limit: self.limit })
        } else {
            Ok(())
        }
    }

    /// Appends `object`, returning its handle.
    ///
    /// The registry is left unchanged when it is already full.
    pub fn try_insert(&mut self, object: PlacedObject) -> Result<ObjectId, CapacityError> {
        self.check_capacity()?;
        let id = self.allocate_id();
        self.entries.push(Entry { id, object });
        Ok(id)
    }

    /// Replaces every object with `objects`, in order.
    ///
    /// All previously issued handles stop resolving. If the new list exceeds
    /// the limit the registry is left untouched.
    pub fn replace_all<I>(&mut self, objects: I) -> Result<(), CapacityError>
    where
        I: IntoIterator<Item = PlacedObject>,
    {
        let objects: Vec<PlacedObject> = objects.into_iter().collect();
        if objects.len() > self.limit {
            return Err(CapacityError { limit: self.limit });
        }
        self.entries.clear();
        for object in objects {
            let id = self.allocate_id();
            self.entries.push(Entry { id, object });
        }
        Ok(())
    }

    /// Removes the object behind `id`, preserving the order of the rest.
    pub fn remove(&mut self, id: ObjectId) -> Option<PlacedObject> {
        let idx = self.index_of(id)?;
        Some(self.entries.remove(idx).object)
    }

    /// Returns `true` if `id` resolves to an object.
    #[must_use]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.index_of(id).is_some()
    }

    /// Returns the object behind `id`.
    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&PlacedObject> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.object)
    }

    /// Returns the object behind `id` for in-place edits.
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut PlacedObject> {
        self.entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .map(|entry| &mut entry.object)
    }

    /// Iterates over all objects in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &PlacedObject)> + '_ {
        self.entries.iter().map(|entry| (entry.id, &entry.object))
    }

    /// Iterates over the objects that pass `filter`, in registry order.
    ///
    /// Filtering never changes the registry; it only narrows what is shown
    /// and what can be picked.
    pub fn visible(
        &self,
        filter: Option<Container>,
    ) -> impl Iterator<Item = (ObjectId, &PlacedObject)> + '_ {
        self.iter().filter(move |(_, obj)| obj.is_visible(filter))
    }

    /// Returns a copy of every object in registry order, for serialization.
    #[must_use]
    pub fn to_vec(&self) -> Vec<PlacedObject> {
        self.entries.iter().map(|entry| entry.object.clone()).collect()
    }

    fn index_of(&self, id: ObjectId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    fn allocate_id(&mut self) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }
}
