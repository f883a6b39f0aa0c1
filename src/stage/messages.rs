// SPDX-License-Identifier: MPL-2.0
//! Messages the stage accepts and the effects it reports back to its shell.

use crate::domain::{Point, SquareSelection};
use crate::error::Error;

/// Pointer input in preview coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    PointerPressed(Point),
    PointerMoved(Point),
    PointerReleased,
    /// The pointer left the preview surface. Ends any gesture like a release.
    PointerLeft,
}

/// Effects produced by stage operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// No effect.
    None,
    /// The committed selection changed, possibly to no selection at all.
    ///
    /// `overlay_missing` is set when no overlay raster is loaded; the shell
    /// should prompt for one, the selection itself stays valid.
    SelectionChanged {
        selection: Option<SquareSelection>,
        overlay_missing: bool,
    },
}

/// Result of feeding a finished decode back into the stage.
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    /// The raster was installed.
    Applied(Effect),
    /// The request was superseded before it finished; nothing changed.
    Discarded,
    /// Decoding failed; the slot keeps its previous raster.
    Failed(Error),
}

impl LoadOutcome {
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, LoadOutcome::Applied(_))
    }
}
