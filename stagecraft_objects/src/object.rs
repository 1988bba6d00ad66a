// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placed objects, their table membership, and the external layout rules.

use alloc::vec::Vec;
use core::fmt;

use kurbo::Point;

/// Which object table a placed object belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Container {
    /// Member of every table. Visible under every filter except "hide all".
    AllTables,
    /// Member of the per-region table.
    RegionTable,
    /// Member of the initial table.
    InitialTable,
}

impl Container {
    /// All containers, in the order an editor lists them.
    pub const ALL: [Self; 3] = [Self::AllTables, Self::RegionTable, Self::InitialTable];
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AllTables => "ALL_TABLES",
            Self::RegionTable => "REGION_TABLE",
            Self::InitialTable => "INITIAL_TABLE",
        })
    }
}

/// Returns `true` if an object in `container` passes `filter`.
///
/// - `None` hides everything.
/// - `Some(AllTables)` shows everything.
/// - Objects in `AllTables` are shown under every `Some` filter.
/// - Otherwise the container must equal the filter.
#[must_use]
pub fn is_visible(container: Container, filter: Option<Container>) -> bool {
    match filter {
        None => false,
        Some(Container::AllTables) => true,
        Some(filter) => container == Container::AllTables || container == filter,
    }
}

/// Integer position on the stage, in image pixels.
///
/// Unsigned so the `x, y >= 0` invariant holds by construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StagePoint {
    /// Horizontal coordinate.
    pub x: u32,
    /// Vertical coordinate.
    pub y: u32,
}

impl StagePoint {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Converts a world-space point to the stage grid.
    ///
    /// Negative (and NaN) components clamp to `0`; positive ones are truncated.
    #[must_use]
    pub fn from_world(world: Point) -> Self {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "float to int casts saturate; negatives are handled first"
        )]
        let axis = |v: f64| if v > 0.0 { v as u32 } else { 0 };
        Self::new(axis(world.x), axis(world.y))
    }

    /// Returns the point in world space.
    #[must_use]
    pub fn to_point(self) -> Point {
        Point::new(f64::from(self.x), f64::from(self.y))
    }
}

impl fmt::Display for StagePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(x = {}, y = {})", self.x, self.y)
    }
}

/// A position split into its containing region and the offset inside it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RegionPosition {
    /// Region (tile) coordinates.
    pub region: StagePoint,
    /// Offset within the region.
    pub relative: StagePoint,
}

/// Maps absolute stage positions to region/relative pairs and back.
///
/// The absolute position is the stored value; region and relative positions
/// are always derived through this rule and never stored.
pub trait RegionLayout {
    /// Splits an absolute position.
    fn locate(&self, absolute: StagePoint) -> RegionPosition;

    /// Joins a region/relative pair back into an absolute position.
    fn resolve(&self, position: RegionPosition) -> StagePoint;
}

/// Decides how many auxiliary data bytes an object carries.
pub trait DataLayout {
    /// Returns the required data length for `object_type` stored in `container`.
    fn data_len(&self, object_type: u16, container: Container) -> usize;
}

/// Default data length used by [`UniformLayout`].
pub const DEFAULT_DATA_LEN: usize = 8;

/// Default region edge used by [`UniformLayout`], in pixels.
pub const DEFAULT_REGION_SIZE: u32 = 256;

/// Rules for stages built from equally sized square regions and
/// fixed-length object data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UniformLayout {
    /// Region edge in pixels. Zero is treated as one.
    pub region_size: u32,
    /// Data bytes carried by every object.
    pub data_len: usize,
}

impl Default for UniformLayout {
    fn default() -> Self {
        Self {
            region_size: DEFAULT_REGION_SIZE,
            data_len: DEFAULT_DATA_LEN,
        }
    }
}

impl RegionLayout for UniformLayout {
    fn locate(&self, absolute: StagePoint) -> RegionPosition {
        let size = self.region_size.max(1);
        RegionPosition {
            region: StagePoint::new(absolute.x / size, absolute.y / size),
            relative: StagePoint::new(absolute.x % size, absolute.y % size),
        }
    }

    fn resolve(&self, position: RegionPosition) -> StagePoint {
        let size = self.region_size.max(1);
        let axis = |region: u32, relative: u32| region.saturating_mul(size).saturating_add(relative);
        StagePoint::new(
            axis(position.region.x, position.relative.x),
            axis(position.region.y, position.relative.y),
        )
    }
}

impl DataLayout for UniformLayout {
    fn data_len(&self, _object_type: u16, _container: Container) -> usize {
        self.data_len
    }
}

/// The external rules a stage needs from the level format.
pub trait ObjectRules: RegionLayout + DataLayout {}

impl<T: RegionLayout + DataLayout + ?Sized> ObjectRules for T {}

/// One object placed on a stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedObject {
    position: StagePoint,
    object_type: u16,
    data: Vec<u8>,
    address: u16,
    container: Container,
}

impl PlacedObject {
    /// Creates an object.
    #[must_use]
    pub fn new(
        position: StagePoint,
        object_type: u16,
        data: Vec<u8>,
        address: u16,
        container: Container,
    ) -> Self {
        Self {
            position,
            object_type,
            data,
            address,
            container,
        }
    }

    /// Returns the absolute stage position.
    #[must_use]
    pub fn position(&self) -> StagePoint {
        self.position
    }

    /// Moves the object to an absolute stage position.
    pub fn set_position(&mut self, position: StagePoint) {
        self.position = position;
    }

    /// Returns the region/relative split of the position under `layout`.
    #[must_use]
    pub fn region_position(&self, layout: &(impl RegionLayout + ?Sized)) -> RegionPosition {
        layout.locate(self.position)
    }

    /// Moves the object to a region/relative position, re-deriving the
    /// absolute position through `layout`.
    pub fn set_region_position(
        &mut self,
        layout: &(impl RegionLayout + ?Sized),
        position: RegionPosition,
    ) {
        self.position = layout.resolve(position);
    }

    /// Returns the object type.
    #[must_use]
    pub fn object_type(&self) -> u16 {
        self.object_type
    }

    /// Sets the object type.
    pub fn set_object_type(&mut self, object_type: u16) {
        self.object_type = object_type;
    }

    /// Returns the auxiliary data bytes.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Replaces the auxiliary data bytes.
    pub fn set_data(&mut self, data: Vec<u8>) {
        self.data = data;
    }

    /// Returns the allocation address.
    #[must_use]
    pub fn address(&self) -> u16 {
        self.address
    }

    /// Sets the allocation address.
    pub fn set_address(&mut self, address: u16) {
        self.address = address;
    }

    /// Returns the table the object belongs to.
    #[must_use]
    pub fn container(&self) -> Container {
        self.container
    }

    /// Moves the object to another table.
    pub fn set_container(&mut self, container: Container) {
        self.container = container;
    }

    /// Returns `true` if the object passes `filter`.
    #[must_use]
    pub fn is_visible(&self, filter: Option<Container>) -> bool {
        is_visible(self.container, filter)
    }

    /// Returns `true` if the data length matches what `layout` requires.
    #[must_use]
    pub fn has_valid_data_len(&self, layout: &(impl DataLayout + ?Sized)) -> bool {
        self.data.len() == layout.data_len(self.object_type, self.container)
    }
}
