// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the crate.
//!
//! This module provides localization capabilities using the Fluent localization system.
//! It handles language detection, translation file loading, and string formatting.
//!
//! # Features
//!
//! - Automatic locale detection from CLI, config, or system settings
//! - Translation files embedded at build time from `assets/i18n/*.ftl`
//! - Runtime language switching
//! - Missing messages render as `MISSING: <key>`

pub mod fluent;
