// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use stagecraft_objects::{AddressAllocator, Block, ObjectId, ObjectRegistry};

use crate::error::EditError;
use crate::hex::format_address;

/// Transient state of the block picker opened from an edit or add session.
///
/// The row table is a snapshot of occupancy when the picker opened, with the
/// object being edited left out. Confirming yields the start address of the
/// selected block; dropping the picker is a cancel and changes nothing.
#[derive(Clone, Debug)]
pub struct AddressPicker {
    allocator: AddressAllocator,
    rows: Vec<Block>,
    selected: Option<usize>,
}

impl AddressPicker {
    /// Opens a picker over `registry`.
    ///
    /// `exclude` is left out of the occupancy lists. When `current` lies in a
    /// block, that block starts out selected.
    #[must_use]
    pub fn open(
        allocator: AddressAllocator,
        registry: &ObjectRegistry,
        exclude: Option<ObjectId>,
        current: Option<u16>,
    ) -> Self {
        Self {
            allocator,
            rows: allocator.block_table(registry, exclude),
            selected: current.and_then(|address| allocator.layout().block_index_of(address)),
        }
    }

    /// Returns one row per block.
    #[must_use]
    pub fn rows(&self) -> &[Block] {
        &self.rows
    }

    /// Returns the selected row.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Selects row `index`; out-of-range indices clear the selection.
    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index.filter(|&i| i < self.rows.len());
    }

    /// Returns the address the current selection would assign.
    #[must_use]
    pub fn selected_address(&self) -> Option<u16> {
        self.selected.and_then(|i| self.allocator.pick(i))
    }

    /// Status line for the current selection.
    #[must_use]
    pub fn status(&self) -> String {
        match self.selected_address() {
            Some(address) => format!("Selected block: {}", format_address(address)),
            None => String::from("No block selected"),
        }
    }

    /// Returns the picked address, or [`EditError::NoBlockSelected`].
    pub fn confirm(&self) -> Result<u16, EditError> {
        self.selected_address().ok_or(EditError::NoBlockSelected)
    }
}
