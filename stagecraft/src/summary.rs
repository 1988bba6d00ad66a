// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text summary of the selected object.

use std::fmt;

use stagecraft_editor::{format_address, format_data};
use stagecraft_objects::{Container, PlacedObject, RegionLayout, StagePoint};

/// Human readable names for object types.
pub trait TypeCatalog {
    /// Describes `object_type`.
    fn describe(&self, object_type: u16) -> String;
}

impl<F: Fn(u16) -> String> TypeCatalog for F {
    fn describe(&self, object_type: u16) -> String {
        self(object_type)
    }
}

/// Everything shown about one object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectSummary {
    /// Object type.
    pub object_type: u16,
    /// Catalog description of the type.
    pub description: String,
    /// Containing region.
    pub region: StagePoint,
    /// Offset within the region.
    pub relative: StagePoint,
    /// Absolute stage position.
    pub absolute: StagePoint,
    /// Allocation address.
    pub address: u16,
    /// Auxiliary data.
    pub data: Vec<u8>,
    /// Storage container.
    pub container: Container,
}

impl ObjectSummary {
    /// Summarizes `object`.
    pub fn new(
        object: &PlacedObject,
        layout: &(impl RegionLayout + ?Sized),
        catalog: &(impl TypeCatalog + ?Sized),
    ) -> Self {
        let split = object.region_position(layout);
        Self {
            object_type: object.object_type(),
            description: catalog.describe(object.object_type()),
            region: split.region,
            relative: split.relative,
            absolute: object.position(),
            address: object.address(),
            data: object.data().to_vec(),
            container: object.container(),
        }
    }

    /// Returns the summary as display lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("Type: 0x{:04x}", self.object_type),
            format!("Description: {}", self.description),
            format!("Region: ({}, {})", self.region.x, self.region.y),
            format!("Relative position: {}", self.relative),
            format!("Absolute position: {}", self.absolute),
            format!("Allocation address: {}", format_address(self.address)),
            format!("Additional data: {}", format_data(&self.data).trim_end()),
            format!("Container: {}", self.container),
        ]
    }
}

impl fmt::Display for ObjectSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines().iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use stagecraft_objects::{Container, PlacedObject, StagePoint, UniformLayout};

    use super::ObjectSummary;

    #[test]
    fn lines_match_display_format() {
        let object = PlacedObject::new(
            StagePoint::new(300, 40),
            0x00AB,
            vec![0x01, 0xFF],
            0xE1C0,
            Container::RegionTable,
        );
        let catalog = |t: u16| if t == 0xAB { "Chest".to_string() } else { String::new() };
        let summary = ObjectSummary::new(&object, &UniformLayout::default(), &catalog);
        assert_eq!(
            summary.lines(),
            [
                "Type: 0x00ab",
                "Description: Chest",
                "Region: (1, 0)",
                "Relative position: (x = 44, y = 40)",
                "Absolute position: (x = 300, y = 40)",
                "Allocation address: 0xe1c0",
                "Additional data: 01 ff",
                "Container: REGION_TABLE",
            ]
        );
        assert_eq!(summary.to_string().lines().count(), 8);
    }
}
