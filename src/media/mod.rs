// SPDX-License-Identifier: MPL-2.0
//! Image input and output.
//!
//! This module turns uploaded bytes into [`Raster`]s, guards asynchronous
//! decodes against supersession, and encodes finished composites.

pub mod export;
pub mod image;
pub mod loader;
pub mod upload;

// Re-export commonly used types
pub use export::{encode_png, suggested_file_name};
pub use image::{decode, Raster};
pub use loader::{load, LoadGenerations, LoadTicket, Slot};
pub use upload::{validate, AcceptedType};
