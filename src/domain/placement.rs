// SPDX-License-Identifier: MPL-2.0
//! Fit calculator.
//!
//! Computes how a raster of native size `(W, H)` is shown inside a preview
//! surface of size `(Cw, Ch)`: one uniform scale, no cropping, centered. The
//! same numbers are inverted at export time to map preview edits back to the
//! raster's own pixels.
#![allow(clippy::cast_precision_loss)]

use super::geometry::{PreviewSize, Rect};

/// How a raster is displayed inside the preview surface.
///
/// Invariants for a drawable placement: `offset_x >= 0`, `offset_y >= 0`,
/// `draw_width <= preview width`, `draw_height <= preview height`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedPlacement {
    /// Native width of the fitted raster.
    pub source_width: u32,
    /// Native height of the fitted raster.
    pub source_height: u32,
    pub draw_width: f32,
    pub draw_height: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    /// Preview pixels per native pixel. Zero for a degenerate placement.
    pub scale: f32,
}

impl FittedPlacement {
    /// Fits a `source_width × source_height` raster into `preview`.
    ///
    /// An empty preview or an empty source yields a degenerate placement with
    /// `scale == 0`; check [`is_drawable`](Self::is_drawable) before drawing.
    #[must_use]
    pub fn fit(source_width: u32, source_height: u32, preview: PreviewSize) -> Self {
        if preview.is_empty() || source_width == 0 || source_height == 0 {
            return Self {
                source_width,
                source_height,
                draw_width: 0.0,
                draw_height: 0.0,
                offset_x: 0.0,
                offset_y: 0.0,
                scale: 0.0,
            };
        }

        let canvas_width = preview.width as f32;
        let canvas_height = preview.height as f32;
        let width = source_width as f32;
        let height = source_height as f32;

        let scale = (canvas_width / width).min(canvas_height / height);
        let draw_width = width * scale;
        let draw_height = height * scale;

        Self {
            source_width,
            source_height,
            draw_width,
            draw_height,
            offset_x: ((canvas_width - draw_width) / 2.0).max(0.0),
            offset_y: ((canvas_height - draw_height) / 2.0).max(0.0),
            scale,
        }
    }

    /// Whether the placement has a positive, finite scale.
    #[must_use]
    pub fn is_drawable(&self) -> bool {
        self.scale > 0.0 && self.scale.is_finite()
    }

    /// The rectangle the raster occupies on the preview.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.offset_x,
            self.offset_y,
            self.draw_width,
            self.draw_height,
        )
    }

    /// Maps a preview-space rectangle into the raster's native pixel space.
    ///
    /// Returns `None` for a degenerate placement.
    #[must_use]
    pub fn preview_to_native(&self, rect: Rect) -> Option<Rect> {
        if !self.is_drawable() {
            return None;
        }
        Some(Rect::new(
            (rect.x - self.offset_x) / self.scale,
            (rect.y - self.offset_y) / self.scale,
            rect.width / self.scale,
            rect.height / self.scale,
        ))
    }
}
