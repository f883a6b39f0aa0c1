// SPDX-License-Identifier: MPL-2.0
//! Surface state: the preview and export drawing surfaces.
//!
//! Only the stage writes to these, through the compositor.

use crate::domain::PreviewSize;
use std::fmt;
use tiny_skia::{Color, Pixmap};

pub struct SurfaceState {
    size: PreviewSize,
    /// `None` while the preview size is empty.
    preview: Option<Pixmap>,
    /// Reused between exports of the same background.
    export: Option<Pixmap>,
}

impl SurfaceState {
    #[must_use]
    pub fn new(size: PreviewSize) -> Self {
        Self {
            size,
            preview: Pixmap::new(size.width, size.height),
            export: None,
        }
    }

    #[must_use]
    pub fn size(&self) -> PreviewSize {
        self.size
    }

    /// Reallocates the preview surface. Contents are lost.
    pub fn resize(&mut self, size: PreviewSize) {
        if size == self.size && self.preview.is_some() {
            return;
        }
        self.size = size;
        self.preview = Pixmap::new(size.width, size.height);
    }

    #[must_use]
    pub fn preview(&self) -> Option<&Pixmap> {
        self.preview.as_ref()
    }

    pub(crate) fn preview_mut(&mut self) -> Option<&mut Pixmap> {
        self.preview.as_mut()
    }

    /// A cleared export surface of `width × height`, reallocated only when the
    /// size changes.
    pub(crate) fn export_surface(&mut self, width: u32, height: u32) -> Option<&mut Pixmap> {
        let reusable = self
            .export
            .as_ref()
            .is_some_and(|p| p.width() == width && p.height() == height);

        if reusable {
            if let Some(surface) = self.export.as_mut() {
                surface.fill(Color::TRANSPARENT);
            }
        } else {
            self.export = Pixmap::new(width, height);
        }
        self.export.as_mut()
    }

    /// Drops the export buffer and clears the preview to transparent.
    pub fn clear(&mut self) {
        self.export = None;
        if let Some(preview) = self.preview.as_mut() {
            preview.fill(Color::TRANSPARENT);
        }
    }
}

impl fmt::Debug for SurfaceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceState")
            .field("size", &self.size)
            .field("has_preview", &self.preview.is_some())
            .field("has_export", &self.export.is_some())
            .finish()
    }
}
