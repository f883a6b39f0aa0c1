// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core placement rules with ZERO external dependencies.
//!
//! This module contains pure geometry types and the arithmetic that maps a
//! poster between its native pixel space and the preview surface. It has no
//! dependencies on external crates (except `std`) so every rule can be tested
//! without decoding or rendering anything.
//!
//! # Modules
//!
//! - [`geometry`]: Value objects ([`Point`](geometry::Point), [`Rect`](geometry::Rect),
//!   [`PreviewSize`](geometry::PreviewSize))
//! - [`placement`]: Fit calculator ([`FittedPlacement`](placement::FittedPlacement))
//! - [`selection`]: Square selection rules ([`SquareSelection`](selection::SquareSelection))
//! - [`overlay`]: Overlay auto-fit and drag clamping ([`OverlayRect`](overlay::OverlayRect))

pub mod geometry;
pub mod overlay;
pub mod placement;
pub mod selection;

pub use geometry::{Point, PreviewSize, Rect};
pub use overlay::OverlayRect;
pub use placement::FittedPlacement;
pub use selection::SquareSelection;
