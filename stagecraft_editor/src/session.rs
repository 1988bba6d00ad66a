// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edit and add sessions.
//!
//! A session holds the in-progress field values for one object. Nothing
//! reaches the registry until `commit`, and a commit either applies every
//! field or returns an error and applies none.

use alloc::vec;

use kurbo::{Point, Vec2};
use stagecraft_objects::{
    AddressAllocator, Container, DataLayout, ObjectId, ObjectRegistry, PlacedObject, StagePoint,
};

use crate::error::EditError;
use crate::hex::{HexField, format_data, format_type};
use crate::picker::AddressPicker;

/// Result of a successful [`EditSession::commit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EditOutcome {
    /// The edited object.
    pub id: ObjectId,
    /// Whether the type changed, which changes how the object is drawn.
    pub type_changed: bool,
    /// Whether a new address was written.
    pub address_changed: bool,
}

/// Editing session for one existing object.
#[derive(Clone, Debug)]
pub struct EditSession {
    target: ObjectId,
    address: u16,
    picked_address: Option<u16>,
    /// Type input.
    pub type_field: HexField,
    /// Data input.
    pub data_field: HexField,
    /// Container choice, applied as-is on commit.
    pub container: Container,
}

impl EditSession {
    /// Opens a session on `id`, filling the fields from the object.
    pub fn open(
        registry: &ObjectRegistry,
        id: ObjectId,
        rules: &(impl DataLayout + ?Sized),
    ) -> Result<Self, EditError> {
        let object = registry.get(id).ok_or(EditError::UnknownObject)?;
        let mut type_field = HexField::for_type();
        type_field.set_text(&format_type(object.object_type()));
        let mut data_field =
            HexField::for_data(rules.data_len(object.object_type(), object.container()));
        data_field.set_text(&format_data(object.data()));
        Ok(Self {
            target: id,
            address: object.address(),
            picked_address: None,
            type_field,
            data_field,
            container: object.container(),
        })
    }

    /// Returns the object being edited.
    #[must_use]
    pub fn target(&self) -> ObjectId {
        self.target
    }

    /// Returns the address the object will have after commit.
    #[must_use]
    pub fn address(&self) -> u16 {
        self.picked_address.unwrap_or(self.address)
    }

    /// Returns `true` once a block has been picked.
    #[must_use]
    pub fn address_picked(&self) -> bool {
        self.picked_address.is_some()
    }

    /// Opens a block picker for this object.
    ///
    /// The edited object is left out of the occupancy rows and the block of
    /// its current (or already picked) address is preselected.
    #[must_use]
    pub fn address_picker(
        &self,
        allocator: AddressAllocator,
        registry: &ObjectRegistry,
    ) -> AddressPicker {
        AddressPicker::open(allocator, registry, Some(self.target), Some(self.address()))
    }

    /// Takes the address confirmed in `picker`.
    ///
    /// On [`EditError::NoBlockSelected`] the session is unchanged.
    pub fn apply_picker(&mut self, picker: &AddressPicker) -> Result<u16, EditError> {
        let address = picker.confirm()?;
        self.picked_address = Some(address);
        Ok(address)
    }

    /// Validates every field and writes them to the object.
    ///
    /// Data is sized for the edited type and container. The address is only
    /// written if a block was picked.
    pub fn commit(
        &self,
        registry: &mut ObjectRegistry,
        rules: &(impl DataLayout + ?Sized),
    ) -> Result<EditOutcome, EditError> {
        let object_type = self.type_field.parse_type()?;
        let data = self
            .data_field
            .parse_data(rules.data_len(object_type, self.container))?;
        let object = registry
            .get_mut(self.target)
            .ok_or(EditError::UnknownObject)?;

        let type_changed = object.object_type() != object_type;
        object.set_object_type(object_type);
        object.set_data(data);
        if let Some(address) = self.picked_address {
            object.set_address(address);
        }
        object.set_container(self.container);
        Ok(EditOutcome {
            id: self.target,
            type_changed,
            address_changed: self.picked_address.is_some(),
        })
    }
}

/// Session for a new object that is not in the registry yet.
#[derive(Clone, Debug)]
pub struct AddSession {
    position: StagePoint,
    address: Option<u16>,
    /// Type input.
    pub type_field: HexField,
    /// Data input.
    pub data_field: HexField,
    /// Container choice.
    pub container: Container,
}

impl AddSession {
    /// Opens a session for an object at `focus`.
    ///
    /// - Position is `focus` rounded, with negative components at `0`.
    /// - Type `0`, container [`Container::RegionTable`], zeroed data.
    /// - No address: one must be picked before commit.
    ///
    /// Fails with [`EditError::Capacity`] if the registry is already full.
    pub fn open(
        registry: &ObjectRegistry,
        focus: Point,
        rules: &(impl DataLayout + ?Sized),
    ) -> Result<Self, EditError> {
        registry.check_capacity()?;
        let container = Container::RegionTable;
        let len = rules.data_len(0, container);
        let mut type_field = HexField::for_type();
        type_field.set_text(&format_type(0));
        let mut data_field = HexField::for_data(len);
        data_field.set_text(&format_data(&vec![0; len]));
        Ok(Self {
            // Truncating after a half offset rounds to nearest; negatives clamp.
            position: StagePoint::from_world(focus + Vec2::new(0.5, 0.5)),
            address: None,
            type_field,
            data_field,
            container,
        })
    }

    /// Returns where the object will be placed.
    #[must_use]
    pub fn position(&self) -> StagePoint {
        self.position
    }

    /// Returns the picked address.
    #[must_use]
    pub fn address(&self) -> Option<u16> {
        self.address
    }

    /// Opens a block picker, preselecting an already picked block.
    #[must_use]
    pub fn address_picker(
        &self,
        allocator: AddressAllocator,
        registry: &ObjectRegistry,
    ) -> AddressPicker {
        AddressPicker::open(allocator, registry, None, self.address)
    }

    /// Takes the address confirmed in `picker`.
    ///
    /// On [`EditError::NoBlockSelected`] the session is unchanged.
    pub fn apply_picker(&mut self, picker: &AddressPicker) -> Result<u16, EditError> {
        let address = picker.confirm()?;
        self.address = Some(address);
        Ok(address)
    }

    /// Validates the fields and appends the new object to `registry`.
    pub fn commit(
        &self,
        registry: &mut ObjectRegistry,
        rules: &(impl DataLayout + ?Sized),
    ) -> Result<ObjectId, EditError> {
        let address = self.address.ok_or(EditError::NoAddressSelected)?;
        let object_type = self.type_field.parse_type()?;
        let data = self
            .data_field
            .parse_data(rules.data_len(object_type, self.container))?;
        let object = PlacedObject::new(self.position, object_type, data, address, self.container);
        registry.try_insert(object).map_err(EditError::from)
    }
}
