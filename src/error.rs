// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Decode(String),
    Encode(String),
    Config(String),
    Upload(UploadError),
}

/// Reasons an upload is rejected before it ever reaches the decoder.
/// Used to provide user-friendly, localized error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    /// The bytes are neither PNG nor JPEG.
    UnsupportedType,

    /// The file exceeds the configured size limit.
    TooLarge { size: u64, max: u64 },

    /// The file is empty.
    Empty,
}

impl UploadError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            UploadError::UnsupportedType => "error-upload-unsupported-type",
            UploadError::TooLarge { .. } => "error-upload-too-large",
            UploadError::Empty => "error-upload-empty",
        }
    }
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::UnsupportedType => write!(f, "Only PNG and JPEG images are accepted"),
            UploadError::TooLarge { size, max } => {
                write!(f, "File is {} bytes, the limit is {} bytes", size, max)
            }
            UploadError::Empty => write!(f, "File is empty"),
        }
    }
}

impl Error {
    /// Returns the i18n message key a shell should show for this error.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Error::Upload(e) => e.i18n_key(),
            Error::Decode(_) => "error-decode",
            Error::Io(_) | Error::Encode(_) | Error::Config(_) => "error-general",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Decode(e) => write!(f, "Decode Error: {}", e),
            Error::Encode(e) => write!(f, "Encode Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Upload(e) => write!(f, "Upload Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<UploadError> for Error {
    fn from(err: UploadError) -> Self {
        Error::Upload(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Decode(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
