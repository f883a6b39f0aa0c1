// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Preview**: Size of the interactive preview surface
//! - **Upload**: Limits enforced by the upload collaborator
//! - **Rendering**: Colors, dash pattern and font sizes of the preview chrome

// ==========================================================================
// Preview Defaults
// ==========================================================================

/// Default preview surface width in pixels.
pub const DEFAULT_PREVIEW_WIDTH: u32 = 960;

/// Default preview surface height in pixels.
pub const DEFAULT_PREVIEW_HEIGHT: u32 = 640;

/// Largest preview edge accepted from configuration.
pub const MAX_PREVIEW_EDGE: u32 = 8192;

// ==========================================================================
// Upload Defaults
// ==========================================================================

/// Default maximum upload size in megabytes.
pub const DEFAULT_MAX_UPLOAD_MB: u64 = 10;

/// Bytes per megabyte used for upload limits.
pub const BYTES_PER_MB: u64 = 1024 * 1024;

// ==========================================================================
// Rendering Defaults
// ==========================================================================

/// Placeholder fill (`#f3f4f6`).
pub const PLACEHOLDER_FILL_RGBA: [u8; 4] = [0xf3, 0xf4, 0xf6, 0xff];

/// Placeholder hint text color (`#9ca3af`).
pub const PLACEHOLDER_TEXT_RGBA: [u8; 4] = [0x9c, 0xa3, 0xaf, 0xff];

/// Placeholder hint font size.
pub const PLACEHOLDER_FONT_SIZE: f32 = 14.0;

/// Selection outline color (`#ef4444`).
pub const SELECTION_STROKE_RGBA: [u8; 4] = [0xef, 0x44, 0x44, 0xff];

/// Selection size label color (`rgba(239,68,68,0.9)`).
pub const SELECTION_LABEL_RGBA: [u8; 4] = [0xef, 0x44, 0x44, 0xe6];

/// Selection outline width.
pub const SELECTION_STROKE_WIDTH: f32 = 1.0;

/// Selection outline dash pattern (on, off).
pub const SELECTION_DASH: [f32; 2] = [6.0, 4.0];

/// Selection size label font size.
pub const SELECTION_LABEL_FONT_SIZE: f32 = 12.0;

/// Horizontal inset of the size label from the selection's left edge.
pub const SELECTION_LABEL_INSET_X: f32 = 4.0;

/// Gap between the size label baseline and the selection's top edge.
pub const SELECTION_LABEL_GAP_Y: f32 = 4.0;

/// Lowest baseline the size label may use, keeping it visible near the top edge.
pub const SELECTION_LABEL_MIN_BASELINE: f32 = 12.0;
