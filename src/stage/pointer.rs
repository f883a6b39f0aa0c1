// SPDX-License-Identifier: MPL-2.0
//! Pointer gestures on the preview.
//!
//! A press inside the overlay rectangle starts an overlay drag; any other
//! press over a drawable poster starts a new square. Release and leave both
//! end the gesture.

use super::{Effect, Stage};
use crate::domain::{OverlayRect, Point, SquareSelection};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PointerState {
    #[default]
    Idle,
    /// A square is being drawn from `anchor`. `candidate` is the last valid
    /// square, if the drag has produced one yet.
    DrawingSelection {
        anchor: Point,
        candidate: Option<SquareSelection>,
    },
    /// The overlay follows the pointer, `grab` being the pointer's offset
    /// from the overlay's top-left corner.
    DraggingOverlay { grab: Point },
}

impl PointerState {
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, PointerState::Idle)
    }
}

impl Stage {
    pub(super) fn pointer_pressed(&mut self, position: Point) -> Effect {
        if self.drawable_bounds().is_none() {
            tracing::debug!("pointer press ignored, no drawable background");
            return Effect::None;
        }

        if let Some(rect) = self.overlay_rect.filter(|rect| rect.contains(position)) {
            self.pointer = PointerState::DraggingOverlay {
                grab: rect.grab_offset(position),
            };
            return Effect::None;
        }

        self.pointer = PointerState::DrawingSelection {
            anchor: position,
            candidate: None,
        };
        Effect::None
    }

    pub(super) fn pointer_moved(&mut self, position: Point) -> Effect {
        match self.pointer {
            PointerState::Idle => {}
            PointerState::DrawingSelection { anchor, .. } => {
                let next = self
                    .drawable_bounds()
                    .and_then(|bounds| SquareSelection::from_drag(anchor, position, bounds));
                // A zero-sized square keeps the previous candidate.
                if let Some(candidate) = next {
                    self.pointer = PointerState::DrawingSelection {
                        anchor,
                        candidate: Some(candidate),
                    };
                    self.redraw();
                }
            }
            PointerState::DraggingOverlay { grab } => {
                if let (Some(rect), Some(selection)) = (self.overlay_rect, self.selection) {
                    self.overlay_rect = Some(rect.dragged_to(position, grab, &selection));
                    self.redraw();
                }
            }
        }
        Effect::None
    }

    pub(super) fn pointer_released(&mut self) -> Effect {
        match std::mem::take(&mut self.pointer) {
            PointerState::DrawingSelection {
                candidate: Some(selection),
                ..
            } => self.commit_selection(selection),
            PointerState::DraggingOverlay { .. } => {
                tracing::debug!(rect = ?self.overlay_rect, "overlay moved");
                Effect::None
            }
            PointerState::DrawingSelection {
                candidate: None, ..
            }
            | PointerState::Idle => Effect::None,
        }
    }

    fn commit_selection(&mut self, selection: SquareSelection) -> Effect {
        self.selection = Some(selection);
        self.overlay_rect = self
            .overlay
            .as_ref()
            .map(|overlay| OverlayRect::auto_fit(&selection, overlay.width(), overlay.height()));
        self.redraw();

        let overlay_missing = self.overlay.is_none();
        tracing::debug!(?selection, overlay_missing, "selection committed");
        Effect::SelectionChanged {
            selection: Some(selection),
            overlay_missing,
        }
    }
}
