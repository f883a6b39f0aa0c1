// SPDX-License-Identifier: MPL-2.0
//! Overlay placement inside a square selection.
//!
//! Auto-fit scales the overlay so its longest side equals the selection side
//! and centers it. Dragging moves the rectangle without resizing it and keeps
//! it inside the selection on both axes independently.

use super::geometry::{Point, Rect};
use super::selection::{clamp_axis, SquareSelection};

/// Where the overlay raster is drawn, in preview coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl OverlayRect {
    /// Fits an `overlay_width × overlay_height` raster into `selection`.
    ///
    /// The result keeps the overlay's aspect ratio, its longest side equals
    /// `selection.size`, and it is centered in the selection. An empty overlay
    /// collapses to a zero-size rectangle at the selection's center.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn auto_fit(selection: &SquareSelection, overlay_width: u32, overlay_height: u32) -> Self {
        let longest = overlay_width.max(overlay_height) as f32;
        let scale = if longest > 0.0 {
            selection.size / longest
        } else {
            0.0
        };
        let width = overlay_width as f32 * scale;
        let height = overlay_height as f32 * scale;

        Self {
            x: selection.x + (selection.size - width) / 2.0,
            y: selection.y + (selection.size - height) / 2.0,
            width,
            height,
        }
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Hit test used to decide between an overlay drag and a new selection.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        self.rect().contains(point)
    }

    /// Pointer position relative to the rectangle's top-left corner.
    #[must_use]
    pub fn grab_offset(&self, pointer: Point) -> Point {
        Point::new(pointer.x - self.x, pointer.y - self.y)
    }

    /// The rectangle moved so `grab` stays under `pointer`, clamped to `selection`.
    #[must_use]
    pub fn dragged_to(&self, pointer: Point, grab: Point, selection: &SquareSelection) -> Self {
        let x = clamp_axis(
            pointer.x - grab.x,
            selection.x,
            selection.x + selection.size - self.width,
        );
        let y = clamp_axis(
            pointer.y - grab.y,
            selection.y,
            selection.y + selection.size - self.height,
        );

        Self { x, y, ..*self }
    }
}
