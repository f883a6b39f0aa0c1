// SPDX-License-Identifier: MPL-2.0
//! Text shaping with cosmic-text, blended into tiny-skia surfaces.
//!
//! Used for the placeholder hint and the selection size label. The font
//! system is created on first use; without any system font the text simply
//! draws nothing.
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use cosmic_text::{
    Attrs, Buffer, Color as CosmicColor, FontSystem, LayoutGlyph, Metrics, Shaping, SwashCache,
};
use std::collections::HashMap;
use std::fmt;
use tiny_skia::Pixmap;

/// Shaping cache entries kept before the cache is flushed.
const TEXT_CACHE_MAX_ENTRIES: usize = 64;

/// Cached result of text shaping
struct ShapedText {
    /// Glyphs with the baseline of their line, measured from the layout top.
    glyphs: Vec<(LayoutGlyph, f32)>,
    /// Baseline of the first line, measured from the layout top.
    first_baseline: f32,
    width: f32,
    height: f32,
}

/// Key for text cache: (text content, font size rounded to tenths)
type TextCacheKey = (String, u32);

#[derive(Default)]
pub struct TextRenderer {
    font_system: Option<FontSystem>,
    swash_cache: Option<SwashCache>,
    shaped: HashMap<TextCacheKey, ShapedText>,
}

impl TextRenderer {
    /// Whether any font face is available to draw with.
    #[cfg(test)]
    pub(crate) fn has_fonts(&mut self) -> bool {
        self.font_system
            .get_or_insert_with(FontSystem::new)
            .db()
            .faces()
            .next()
            .is_some()
    }

    /// Text extent `(width, height)` in pixels.
    pub fn measure(&mut self, text: &str, font_size: f32) -> (f32, f32) {
        let shaped = self.shape(text, font_size);
        (shaped.width, shaped.height)
    }

    /// Draws `text` with its layout box's top-left corner at `(x, y)`.
    pub fn draw(
        &mut self,
        pixmap: &mut Pixmap,
        text: &str,
        x: f32,
        y: f32,
        font_size: f32,
        rgba: [u8; 4],
    ) {
        let glyphs = self.shape(text, font_size).glyphs.clone();
        self.draw_glyphs(pixmap, &glyphs, x, y, rgba);
    }

    /// Draws `text` with its first line's baseline at `baseline`.
    pub fn draw_at_baseline(
        &mut self,
        pixmap: &mut Pixmap,
        text: &str,
        x: f32,
        baseline: f32,
        font_size: f32,
        rgba: [u8; 4],
    ) {
        let shaped = self.shape(text, font_size);
        let top = baseline - shaped.first_baseline;
        let glyphs = shaped.glyphs.clone();
        self.draw_glyphs(pixmap, &glyphs, x, top, rgba);
    }

    fn draw_glyphs(
        &mut self,
        pixmap: &mut Pixmap,
        glyphs: &[(LayoutGlyph, f32)],
        x: f32,
        top: f32,
        rgba: [u8; 4],
    ) {
        let color = CosmicColor::rgba(rgba[0], rgba[1], rgba[2], rgba[3]);

        let font_system = self.font_system.get_or_insert_with(FontSystem::new);
        let swash_cache = self.swash_cache.get_or_insert_with(SwashCache::new);

        for (glyph, line_y) in glyphs {
            let physical_glyph = glyph.physical((x, top + line_y), 1.0);

            if let Some(image) = swash_cache.get_image(font_system, physical_glyph.cache_key) {
                let glyph_x = physical_glyph.x + image.placement.left;
                let glyph_y = physical_glyph.y - image.placement.top;

                blend_glyph(
                    pixmap,
                    &image.data,
                    image.placement.width,
                    image.placement.height,
                    glyph_x,
                    glyph_y,
                    color,
                );
            }
        }
    }

    fn shape(&mut self, text: &str, font_size: f32) -> &ShapedText {
        let key = (text.to_string(), (font_size * 10.0).round() as u32);

        if self.shaped.len() >= TEXT_CACHE_MAX_ENTRIES && !self.shaped.contains_key(&key) {
            self.shaped.clear();
        }

        let font_system = self.font_system.get_or_insert_with(FontSystem::new);
        self.shaped.entry(key).or_insert_with(|| {
            let metrics = Metrics::new(font_size, font_size * 1.2);
            let mut buffer = Buffer::new(font_system, metrics);
            let attrs = Attrs::new();
            buffer.set_text(font_system, text, &attrs, Shaping::Advanced, None);
            buffer.shape_until_scroll(font_system, false);

            let mut glyphs = Vec::new();
            let mut first_baseline = None;
            let mut width = 0.0f32;
            let mut height = 0.0f32;
            for run in buffer.layout_runs() {
                width = width.max(run.line_w);
                height += run.line_height;
                first_baseline.get_or_insert(run.line_y);
                glyphs.extend(run.glyphs.iter().map(|glyph| (glyph.clone(), run.line_y)));
            }

            ShapedText {
                glyphs,
                first_baseline: first_baseline.unwrap_or(font_size),
                width,
                height,
            }
        })
    }
}

impl fmt::Debug for TextRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextRenderer")
            .field("fonts_loaded", &self.font_system.is_some())
            .field("cached_texts", &self.shaped.len())
            .finish()
    }
}

/// Source-over blend of a glyph coverage mask onto premultiplied pixels.
fn blend_glyph(
    pixmap: &mut Pixmap,
    glyph_data: &[u8],
    glyph_width: u32,
    glyph_height: u32,
    dest_x: i32,
    dest_y: i32,
    color: CosmicColor,
) {
    let pixmap_width = pixmap.width() as i32;
    let pixmap_height = pixmap.height() as i32;
    let data = pixmap.data_mut();

    for gy in 0..glyph_height as i32 {
        let py = dest_y + gy;
        if py < 0 || py >= pixmap_height {
            continue;
        }

        for gx in 0..glyph_width as i32 {
            let px = dest_x + gx;
            if px < 0 || px >= pixmap_width {
                continue;
            }

            let glyph_idx = (gy as u32 * glyph_width + gx as u32) as usize;
            let Some(&coverage) = glyph_data.get(glyph_idx) else {
                continue;
            };
            if coverage == 0 {
                continue;
            }

            let pixel_idx = ((py as u32 * pixmap_width as u32 + px as u32) * 4) as usize;
            if pixel_idx + 3 >= data.len() {
                continue;
            }

            let src_a = (u32::from(coverage) * u32::from(color.a())) / 255;
            let inv_a = 255 - src_a;

            data[pixel_idx] =
                ((u32::from(color.r()) * src_a + u32::from(data[pixel_idx]) * inv_a) / 255) as u8;
            data[pixel_idx + 1] = ((u32::from(color.g()) * src_a
                + u32::from(data[pixel_idx + 1]) * inv_a)
                / 255) as u8;
            data[pixel_idx + 2] = ((u32::from(color.b()) * src_a
                + u32::from(data[pixel_idx + 2]) * inv_a)
                / 255) as u8;
            data[pixel_idx + 3] = (src_a + (u32::from(data[pixel_idx + 3]) * inv_a) / 255) as u8;
        }
    }
}
