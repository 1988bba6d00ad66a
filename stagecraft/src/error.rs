// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;

use stagecraft_editor::EditError;
use stagecraft_objects::CapacityError;

use crate::StageId;

/// Errors surfaced by stage operations.
///
/// Whenever one of these is returned the stage (or the whole set, for a
/// reload) is left as it was.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StageError {
    /// No stage has this id.
    UnknownStage(StageId),
    /// A reload supplied a different number of stages than are loaded.
    StageCountMismatch {
        /// Stages currently loaded.
        expected: usize,
        /// Stages supplied.
        found: usize,
    },
    /// The operation needs a selected object.
    NoObjectSelected,
    /// An edit or add session rejected its input.
    Edit(EditError),
}

impl fmt::Display for StageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownStage(id) => write!(f, "no stage with id {}", id.get()),
            Self::StageCountMismatch { expected, found } => write!(
                f,
                "reload supplied {found} stages but {expected} are loaded"
            ),
            Self::NoObjectSelected => f.write_str("no object selected"),
            Self::Edit(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for StageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Edit(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EditError> for StageError {
    fn from(err: EditError) -> Self {
        Self::Edit(err)
    }
}

impl From<CapacityError> for StageError {
    fn from(err: CapacityError) -> Self {
        Self::Edit(EditError::Capacity(err))
    }
}
