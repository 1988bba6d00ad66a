// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use stagecraft_objects::CapacityError;

/// The hex input a [`EditError::MalformedHex`] refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HexInput {
    /// The object type field.
    Type,
    /// The auxiliary data field.
    Data,
}

impl fmt::Display for HexInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Type => "type",
            Self::Data => "data",
        })
    }
}

/// Validation failures of an edit or add session.
///
/// A session that returns one of these has not touched the registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditError {
    /// The input holds something other than hex digits and whitespace, or
    /// more digits than the field allows.
    MalformedHex {
        /// Which input was rejected.
        input: HexInput,
    },
    /// An object cannot be added before an allocation address is picked.
    NoAddressSelected,
    /// The address picker was confirmed without a block.
    NoBlockSelected,
    /// The edited object is no longer in the registry.
    UnknownObject,
    /// The registry is full.
    Capacity(CapacityError),
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedHex { input } => write!(f, "malformed hex in the {input} field"),
            Self::NoAddressSelected => f.write_str("no allocation address selected"),
            Self::NoBlockSelected => f.write_str("select a memory address first"),
            Self::UnknownObject => f.write_str("the edited object no longer exists"),
            Self::Capacity(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl core::error::Error for EditError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Capacity(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CapacityError> for EditError {
    fn from(err: CapacityError) -> Self {
        Self::Capacity(err)
    }
}
