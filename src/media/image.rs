// SPDX-License-Identifier: MPL-2.0
//! Raster decoding from PNG and JPEG bytes.

use crate::domain::{FittedPlacement, PreviewSize};
use crate::error::{Error, Result};
use image_rs::{GenericImageView, RgbaImage};
use std::fmt;
use std::sync::Arc;
use tiny_skia::{IntSize, Pixmap, PixmapRef};

/// A decoded image, read-only after load.
///
/// Pixels are kept premultiplied so the compositor can draw them directly.
/// Stored in an Arc so the stage and render calls share it without copying.
#[derive(Clone)]
pub struct Raster {
    pixmap: Arc<Pixmap>,
}

impl Raster {
    /// Creates a raster from straight-alpha RGBA pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the image has a zero dimension.
    pub fn from_rgba_image(image: RgbaImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        let size = IntSize::from_wh(width, height)
            .ok_or_else(|| Error::Decode(format!("image has empty dimensions {width}x{height}")))?;

        let mut pixels = image.into_raw();
        premultiply_in_place(&mut pixels);

        let pixmap = Pixmap::from_vec(pixels, size)
            .ok_or_else(|| Error::Decode("pixel buffer does not match dimensions".into()))?;

        Ok(Self {
            pixmap: Arc::new(pixmap),
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Fits this raster into a preview surface.
    #[must_use]
    pub fn fit_into(&self, preview: PreviewSize) -> FittedPlacement {
        FittedPlacement::fit(self.width(), self.height(), preview)
    }

    pub(crate) fn pixmap(&self) -> PixmapRef<'_> {
        Pixmap::as_ref(&self.pixmap)
    }
}

impl fmt::Debug for Raster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Raster")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

/// Decodes PNG or JPEG bytes into a [`Raster`].
///
/// The source bytes are not retained.
///
/// # Errors
///
/// Returns [`Error::Decode`] if the bytes are not a decodable image or the
/// decoded image is empty.
pub fn decode(bytes: &[u8]) -> Result<Raster> {
    let img = image_rs::load_from_memory(bytes)?;
    let (width, height) = img.dimensions();
    tracing::debug!(width, height, "decoded raster");

    Raster::from_rgba_image(img.to_rgba8())
}

fn premultiply_in_place(pixels: &mut [u8]) {
    for px in pixels.chunks_exact_mut(4) {
        let alpha = u16::from(px[3]);
        if alpha == 255 {
            continue;
        }
        for channel in &mut px[..3] {
            *channel = ((u16::from(*channel) * alpha + 127) / 255) as u8;
        }
    }
}
