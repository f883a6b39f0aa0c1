// SPDX-License-Identifier: MPL-2.0
//! `poster_stamp` places a QR code onto a poster.
//!
//! A poster is fitted into a fixed preview surface, the user drags out a
//! square on it, the QR code is auto-fitted into that square and can be moved
//! around inside it. The export replays the placement at the poster's native
//! resolution and encodes the result as PNG.
//!
//! - [`domain`]: placement geometry with no I/O
//! - [`media`]: decoding, upload checks, PNG export
//! - [`render`]: software compositor for preview and export
//! - [`stage`]: the state owner driven by pointer messages
//! - [`config`], [`i18n`], [`logging`]: shell support

#![doc(html_root_url = "https://docs.rs/poster_stamp/0.1.0")]

pub mod config;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod logging;
pub mod media;
pub mod render;
pub mod stage;

#[cfg(test)]
pub(crate) mod test_utils;
