// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Block-partitioned allocation addresses.
//!
//! Every object owns a 16-bit allocation address inside a fixed range
//! `[start, end)`. The range is cut into equal blocks; the block is the unit
//! users pick from and the unit occupancy is reported in.
//!
//! Sharing is advisory: nothing here rejects two objects in one block. The
//! occupancy table exists so a user can see who is already there.

use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::registry::{ObjectId, ObjectRegistry};

/// First address of the default allocation range.
pub const DEFAULT_START_ADDRESS: u16 = 0xE140;

/// End (exclusive) of the default allocation range.
pub const DEFAULT_END_ADDRESS: u16 = 0xFB80;

/// Default block size.
pub const DEFAULT_BLOCK_SIZE: u16 = 0x40;

/// Objects found in one block. Most blocks hold zero or one object.
pub type Occupants = SmallVec<[ObjectId; 4]>;

/// The allocation range and its block size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressLayout {
    /// First address of the range.
    pub start: u16,
    /// End of the range (exclusive).
    pub end: u16,
    /// Size of one block. Zero is treated as one.
    pub block_size: u16,
}

impl Default for AddressLayout {
    fn default() -> Self {
        Self {
            start: DEFAULT_START_ADDRESS,
            end: DEFAULT_END_ADDRESS,
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

impl AddressLayout {
    fn block_size_u32(&self) -> u32 {
        u32::from(self.block_size.max(1))
    }

    /// Returns the number of whole blocks in the range.
    #[must_use]
    pub fn block_count(&self) -> usize {
        let span = u32::from(self.end.saturating_sub(self.start));
        (span / self.block_size_u32()) as usize
    }

    /// Returns `true` if `address` lies in `[start, end)`.
    #[must_use]
    pub fn contains(&self, address: u16) -> bool {
        (self.start..self.end).contains(&address)
    }

    /// Returns the first address of block `index`.
    #[must_use]
    pub fn block_start(&self, index: usize) -> Option<u16> {
        if index >= self.block_count() {
            return None;
        }
        let offset = u32::try_from(index).ok()? * self.block_size_u32();
        u16::try_from(u32::from(self.start) + offset).ok()
    }

    /// Returns the index of the block containing `address`.
    ///
    /// Addresses outside the range, or in a trailing partial block, have no
    /// block.
    #[must_use]
    pub fn block_index_of(&self, address: u16) -> Option<usize> {
        if !self.contains(address) {
            return None;
        }
        let index = (u32::from(address - self.start) / self.block_size_u32()) as usize;
        (index < self.block_count()).then_some(index)
    }

    /// Iterates over the first address of every block.
    pub fn block_starts(&self) -> impl Iterator<Item = u16> + '_ {
        (0..self.block_count()).filter_map(|index| self.block_start(index))
    }
}

/// One row of the occupancy table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    /// Position of the block in the range.
    pub index: usize,
    /// First address of the block.
    pub start: u16,
    /// Last address of the block (inclusive).
    pub last: u16,
    /// Objects whose address falls in the block, in registry order.
    pub occupants: Occupants,
}

impl Block {
    /// Returns `true` if no object uses this block.
    #[must_use]
    pub fn is_free(&self) -> bool {
        self.occupants.is_empty()
    }
}

/// Reports block occupancy for a registry.
///
/// The allocator keeps no state of its own: every query reads the current
/// registry, so the answer always reflects the latest edits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AddressAllocator {
    layout: AddressLayout,
}

impl AddressAllocator {
    /// Creates an allocator over `layout`.
    #[must_use]
    pub fn new(layout: AddressLayout) -> Self {
        Self { layout }
    }

    /// Returns the layout.
    #[must_use]
    pub fn layout(&self) -> AddressLayout {
        self.layout
    }

    /// Returns the objects whose address lies in
    /// `[block_start, block_start + block_size)`, skipping `exclude`.
    #[must_use]
    pub fn occupancy_of(
        &self,
        registry: &ObjectRegistry,
        block_start: u16,
        exclude: Option<ObjectId>,
    ) -> Occupants {
        let lo = u32::from(block_start);
        let hi = lo + self.layout.block_size_u32();
        registry
            .iter()
            .filter(|(id, _)| Some(*id) != exclude)
            .filter(|(_, obj)| (lo..hi).contains(&u32::from(obj.address())))
            .map(|(id, _)| id)
            .collect()
    }

    /// Builds the full occupancy table, one [`Block`] per block, skipping
    /// `exclude` (typically the object being edited).
    #[must_use]
    pub fn block_table(&self, registry: &ObjectRegistry, exclude: Option<ObjectId>) -> Vec<Block> {
        let mut table: Vec<Block> = (0..self.layout.block_count())
            .filter_map(|index| {
                let start = self.layout.block_start(index)?;
                let last = u16::try_from(
                    u32::from(start) + self.layout.block_size_u32() - 1,
                )
                .unwrap_or(u16::MAX);
                Some(Block {
                    index,
                    start,
                    last,
                    occupants: Occupants::new(),
                })
            })
            .collect();

        for (id, obj) in registry.iter() {
            if Some(id) == exclude {
                continue;
            }
            if let Some(index) = self.layout.block_index_of(obj.address())
                && let Some(block) = table.get_mut(index)
            {
                block.occupants.push(id);
            }
        }
        table
    }

    /// Returns the address assigned when a user picks block `index`.
    #[must_use]
    pub fn pick(&self, index: usize) -> Option<u16> {
        self.layout.block_start(index)
    }
}
