// SPDX-License-Identifier: MPL-2.0
//! Upload acceptance rules.
//!
//! The engine never validates its input; this is the check an upload
//! collaborator runs before handing bytes over. Only PNG and JPEG up to the
//! configured size are accepted. The format is sniffed from the bytes, not
//! taken from a file name.

use crate::error::{Result, UploadError};
use image_rs::ImageFormat;

/// An accepted upload type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptedType {
    Png,
    Jpeg,
}

impl AcceptedType {
    #[must_use]
    pub fn mime(self) -> &'static str {
        match self {
            AcceptedType::Png => "image/png",
            AcceptedType::Jpeg => "image/jpeg",
        }
    }
}

/// Checks `bytes` against the upload rules.
///
/// # Errors
///
/// - [`UploadError::Empty`] for an empty file
/// - [`UploadError::TooLarge`] above `max_bytes`
/// - [`UploadError::UnsupportedType`] for anything but PNG or JPEG
pub fn validate(bytes: &[u8], max_bytes: u64) -> Result<AcceptedType> {
    if bytes.is_empty() {
        return Err(UploadError::Empty.into());
    }

    let size = bytes.len() as u64;
    if size > max_bytes {
        return Err(UploadError::TooLarge {
            size,
            max: max_bytes,
        }
        .into());
    }

    match image_rs::guess_format(bytes) {
        Ok(ImageFormat::Png) => Ok(AcceptedType::Png),
        Ok(ImageFormat::Jpeg) => Ok(AcceptedType::Jpeg),
        _ => Err(UploadError::UnsupportedType.into()),
    }
}
