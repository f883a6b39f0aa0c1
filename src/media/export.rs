// SPDX-License-Identifier: MPL-2.0
//! PNG encoding of rendered surfaces and download naming.

use crate::error::{Error, Result};
use chrono::NaiveDateTime;
use tiny_skia::Pixmap;

/// File name prefix for exported composites.
pub const EXPORT_FILE_PREFIX: &str = "poster_qr";

/// Encodes a surface as PNG.
///
/// # Errors
///
/// Returns [`Error::Encode`] if the PNG encoder fails.
pub fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>> {
    pixmap.encode_png().map_err(|e| Error::Encode(e.to_string()))
}

/// Suggested download name, e.g. `poster_qr_20261019T101500.png`.
#[must_use]
pub fn suggested_file_name(now: NaiveDateTime) -> String {
    format!("{EXPORT_FILE_PREFIX}_{}.png", now.format("%Y%m%dT%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tiny_skia::Color;

    #[test]
    fn file_name_uses_compact_timestamp() {
        let now = NaiveDate::from_ymd_opt(2026, 10, 19)
            .and_then(|d| d.and_hms_opt(9, 5, 7))
            .expect("valid timestamp");
        assert_eq!(suggested_file_name(now), "poster_qr_20261019T090507.png");
    }

    #[test]
    fn encoded_png_decodes_back_to_same_size() {
        let mut pixmap = Pixmap::new(6, 3).expect("pixmap");
        pixmap.fill(Color::from_rgba8(0, 128, 255, 255));

        let bytes = encode_png(&pixmap).expect("encode");
        let decoded = image_rs::load_from_memory(&bytes).expect("decode").to_rgba8();

        assert_eq!(decoded.dimensions(), (6, 3));
        assert_eq!(decoded.get_pixel(5, 2).0, [0, 128, 255, 255]);
    }
}
