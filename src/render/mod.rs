// SPDX-License-Identifier: MPL-2.0
//! Software rendering of the preview stack and the export composite.
//!
//! Everything here draws into [`tiny_skia::Pixmap`]s; the shell decides how
//! to present them.

pub mod compositor;
pub mod surface;
pub mod text;

pub use compositor::{label_baseline, Compositor, Scene};
pub use surface::SurfaceState;
pub use text::TextRenderer;
