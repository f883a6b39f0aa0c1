// SPDX-License-Identifier: MPL-2.0
//! Compositor for the preview stack and the full-resolution export.
//!
//! Both paths are pure functions of a [`Scene`]: drawing the same scene twice
//! produces the same pixels. The compositor only keeps text shaping resources.
//!
//! Preview layers, bottom to top:
//! 1. background (placeholder, or the poster at its fitted placement)
//! 2. overlay at its preview rectangle, nearest-neighbour so QR modules stay sharp
//! 3. dashed selection outline and its size label
//!
//! The export does not rescale the preview. It draws the poster at native size
//! and replays the overlay rectangle through the inverse of the placement.

use crate::config::defaults::{
    PLACEHOLDER_FILL_RGBA, PLACEHOLDER_FONT_SIZE, PLACEHOLDER_TEXT_RGBA, SELECTION_DASH,
    SELECTION_LABEL_FONT_SIZE, SELECTION_LABEL_GAP_Y, SELECTION_LABEL_INSET_X,
    SELECTION_LABEL_MIN_BASELINE, SELECTION_LABEL_RGBA, SELECTION_STROKE_RGBA,
    SELECTION_STROKE_WIDTH,
};
use crate::domain::{FittedPlacement, OverlayRect, Point, Rect, SquareSelection};
use crate::media::Raster;
use crate::render::text::TextRenderer;
use tiny_skia::{
    BlendMode, Color, FilterQuality, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint,
    Stroke, StrokeDash, Transform,
};

/// Everything a redraw depends on.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub background: Option<(&'a Raster, &'a FittedPlacement)>,
    pub overlay: Option<(&'a Raster, &'a OverlayRect)>,
    pub selection: Option<&'a SquareSelection>,
    pub placeholder: &'a str,
}

#[derive(Debug, Default)]
pub struct Compositor {
    text: TextRenderer,
}

impl Compositor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Redraws the whole preview stack onto `target`.
    pub fn draw_preview(&mut self, target: &mut Pixmap, scene: &Scene<'_>) {
        target.fill(Color::TRANSPARENT);

        match scene.background {
            Some((raster, placement)) if placement.is_drawable() => {
                draw_raster(target, raster, placement.bounds(), FilterQuality::Bicubic);
            }
            Some(_) => {}
            None => self.draw_placeholder(target, scene.placeholder),
        }

        if let Some((raster, rect)) = scene.overlay {
            draw_raster(target, raster, rect.rect(), FilterQuality::Nearest);
        }

        if let Some(selection) = scene.selection {
            stroke_selection(target, selection);
            let anchor = label_baseline(selection);
            self.text.draw_at_baseline(
                target,
                &selection.size_label(),
                anchor.x,
                anchor.y,
                SELECTION_LABEL_FONT_SIZE,
                SELECTION_LABEL_RGBA,
            );
        }
    }

    /// Renders the export onto `target`, which must match the background's
    /// native size.
    ///
    /// Returns `false` without drawing when the scene has no background.
    pub fn draw_export(target: &mut Pixmap, scene: &Scene<'_>) -> bool {
        let Some((background, placement)) = scene.background else {
            return false;
        };

        target.fill(Color::TRANSPARENT);
        #[allow(clippy::cast_precision_loss)]
        let native = Rect::new(
            0.0,
            0.0,
            background.width() as f32,
            background.height() as f32,
        );
        draw_raster(target, background, native, FilterQuality::Nearest);

        if let Some((overlay, rect)) = scene.overlay {
            match placement.preview_to_native(rect.rect()) {
                Some(native_rect) => {
                    tracing::debug!(?native_rect, "overlay mapped to native space");
                    draw_raster(target, overlay, native_rect, FilterQuality::Nearest);
                }
                None => tracing::warn!("degenerate placement, overlay skipped in export"),
            }
        }
        true
    }

    fn draw_placeholder(&mut self, target: &mut Pixmap, hint: &str) {
        let [r, g, b, a] = PLACEHOLDER_FILL_RGBA;
        target.fill(Color::from_rgba8(r, g, b, a));

        if hint.is_empty() {
            return;
        }
        let (text_width, text_height) = self.text.measure(hint, PLACEHOLDER_FONT_SIZE);
        #[allow(clippy::cast_precision_loss)]
        let (width, height) = (target.width() as f32, target.height() as f32);
        self.text.draw(
            target,
            hint,
            (width - text_width) / 2.0,
            (height - text_height) / 2.0,
            PLACEHOLDER_FONT_SIZE,
            PLACEHOLDER_TEXT_RGBA,
        );
    }
}

/// Start of the size label's baseline.
///
/// The baseline sits just above the square, but never above
/// `SELECTION_LABEL_MIN_BASELINE`, so squares touching the top edge keep a
/// visible label.
#[must_use]
pub fn label_baseline(selection: &SquareSelection) -> Point {
    Point::new(
        selection.x + SELECTION_LABEL_INSET_X,
        (selection.y - SELECTION_LABEL_GAP_Y).max(SELECTION_LABEL_MIN_BASELINE),
    )
}

/// Draws `raster` stretched into `dest`.
fn draw_raster(target: &mut Pixmap, raster: &Raster, dest: Rect, quality: FilterQuality) {
    if !(dest.width > 0.0 && dest.height > 0.0) {
        return;
    }

    #[allow(clippy::cast_precision_loss)]
    let scale_x = dest.width / raster.width() as f32;
    #[allow(clippy::cast_precision_loss)]
    let scale_y = dest.height / raster.height() as f32;

    let paint = PixmapPaint {
        opacity: 1.0,
        blend_mode: BlendMode::SourceOver,
        quality,
    };
    target.draw_pixmap(
        0,
        0,
        raster.pixmap(),
        &paint,
        Transform::from_row(scale_x, 0.0, 0.0, scale_y, dest.x, dest.y),
        None,
    );
}

fn stroke_selection(target: &mut Pixmap, selection: &SquareSelection) {
    let Some(rect) =
        tiny_skia::Rect::from_xywh(selection.x, selection.y, selection.size, selection.size)
    else {
        return;
    };
    let path = PathBuilder::from_rect(rect);

    let [r, g, b, a] = SELECTION_STROKE_RGBA;
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;

    let stroke = Stroke {
        width: SELECTION_STROKE_WIDTH,
        line_cap: LineCap::Butt,
        line_join: LineJoin::Miter,
        dash: StrokeDash::new(SELECTION_DASH.to_vec(), 0.0),
        ..Default::default()
    };

    target.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
}
