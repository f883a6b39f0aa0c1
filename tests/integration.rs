// SPDX-License-Identifier: MPL-2.0
use image_rs::{ImageFormat, Rgba, RgbaImage};
use poster_stamp::config::{self, Config};
use poster_stamp::domain::{FittedPlacement, OverlayRect, Point, PreviewSize, Rect};
use poster_stamp::error::{Error, UploadError};
use poster_stamp::i18n::fluent::I18n;
use poster_stamp::media::{self, AcceptedType, Slot};
use poster_stamp::stage::{Effect, LoadOutcome, Message, Stage, StageSettings};
use std::io::Cursor;
use tempfile::tempdir;

fn encode(image: &RgbaImage, format: ImageFormat) -> Vec<u8> {
    let mut bytes = Vec::new();
    match format {
        ImageFormat::Jpeg => image_rs::DynamicImage::ImageRgba8(image.clone())
            .to_rgb8()
            .write_to(&mut Cursor::new(&mut bytes), format)
            .expect("encode jpeg"),
        _ => image
            .write_to(&mut Cursor::new(&mut bytes), format)
            .expect("encode image"),
    }
    bytes
}

fn png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    encode(
        &RgbaImage::from_pixel(width, height, Rgba(rgba)),
        ImageFormat::Png,
    )
}

fn stage(width: u32, height: u32) -> Stage {
    Stage::new(StageSettings {
        preview: PreviewSize::new(width, height),
        placeholder_text: String::new(),
    })
}

fn drag(stage: &mut Stage, from: Point, to: Point) -> Effect {
    stage.handle(Message::PointerPressed(from));
    stage.handle(Message::PointerMoved(to));
    stage.handle(Message::PointerReleased)
}

#[tokio::test]
async fn square_poster_is_centered_in_wide_preview() {
    let mut stage = stage(800, 400);
    let outcome = stage
        .load(Slot::Background, png(400, 400, [255, 255, 255, 255]))
        .await;
    assert!(outcome.is_applied());

    let placement = stage.placement().expect("placement");
    assert_eq!(placement.scale, 1.0);
    assert_eq!(placement.offset_x, 200.0);
    assert_eq!(placement.offset_y, 0.0);
    assert_eq!(placement.draw_width, 400.0);
    assert_eq!(placement.draw_height, 400.0);
}

#[tokio::test]
async fn full_placement_flow_exports_qr_at_native_position() {
    // 1000×500 poster in a 500×500 preview: scale 0.5, offset (0, 125).
    let mut stage = stage(500, 500);
    stage
        .load(Slot::Background, png(1000, 500, [255, 255, 255, 255]))
        .await;

    let effect = drag(&mut stage, Point::new(100.0, 150.0), Point::new(200.0, 250.0));
    assert_eq!(
        effect,
        Effect::SelectionChanged {
            selection: Some(poster_stamp::domain::SquareSelection::new(
                100.0, 150.0, 100.0
            )),
            overlay_missing: true,
        }
    );

    stage
        .load(Slot::Overlay, png(4, 4, [0, 0, 0, 255]))
        .await;
    assert!(stage.can_export());
    assert_eq!(
        stage.overlay_rect(),
        Some(OverlayRect {
            x: 100.0,
            y: 150.0,
            width: 100.0,
            height: 100.0,
        })
    );

    let bytes = stage.export_composite().expect("export");
    let exported = image_rs::load_from_memory(&bytes).expect("decode").to_rgba8();
    assert_eq!(exported.dimensions(), (1000, 500));

    // Native rect: x = 100 / 0.5 = 200, y = (150 - 125) / 0.5 = 50, side 200.
    assert_eq!(exported.get_pixel(205, 55).0, [0, 0, 0, 255]);
    assert_eq!(exported.get_pixel(395, 245).0, [0, 0, 0, 255]);
    assert_eq!(exported.get_pixel(195, 55).0, [255, 255, 255, 255]);
    assert_eq!(exported.get_pixel(405, 245).0, [255, 255, 255, 255]);
    assert_eq!(exported.get_pixel(300, 255).0, [255, 255, 255, 255]);
}

#[tokio::test]
async fn jpeg_poster_is_accepted_and_exported_as_png() {
    let poster = encode(
        &RgbaImage::from_pixel(64, 32, Rgba([200, 100, 50, 255])),
        ImageFormat::Jpeg,
    );
    assert_eq!(
        media::validate(&poster, 10 * 1024 * 1024).expect("accepted"),
        AcceptedType::Jpeg
    );

    let mut stage = stage(64, 64);
    assert!(stage.load(Slot::Background, poster).await.is_applied());

    let bytes = stage.export_composite().expect("export");
    assert_eq!(
        image_rs::guess_format(&bytes).expect("format"),
        ImageFormat::Png
    );
}

#[test]
fn export_mapping_inverts_placement() {
    let placement = FittedPlacement {
        source_width: 1000,
        source_height: 2000,
        draw_width: 300.0,
        draw_height: 600.0,
        offset_x: 100.0,
        offset_y: 0.0,
        scale: 0.3,
    };
    let native = placement
        .preview_to_native(Rect::new(150.0, 50.0, 90.0, 90.0))
        .expect("drawable");

    assert!((native.x - 166.666_67).abs() < 1e-2);
    assert!((native.y - 166.666_67).abs() < 1e-2);
    assert!((native.width - 300.0).abs() < 1e-2);
    assert!((native.height - 300.0).abs() < 1e-2);
}

#[tokio::test]
async fn reset_returns_to_placeholder() {
    let mut fresh = stage(120, 80);
    fresh.redraw();

    let mut stage = stage(120, 80);
    stage
        .load(Slot::Background, png(60, 40, [10, 20, 30, 255]))
        .await;
    stage.load(Slot::Overlay, png(3, 3, [0, 0, 0, 255])).await;
    drag(&mut stage, Point::new(20.0, 10.0), Point::new(60.0, 50.0));
    assert!(stage.can_export());

    stage.reset();
    assert!(!stage.can_export());
    assert!(stage.export_composite().is_none());
    assert_eq!(
        stage.preview().expect("preview").data(),
        fresh.preview().expect("preview").data()
    );
}

#[tokio::test]
async fn superseded_load_does_not_replace_newer_one() {
    let mut stage = stage(100, 100);
    let stale = stage.begin_load(Slot::Background);
    let stale_result = media::load(png(10, 10, [255, 0, 0, 255])).await;

    stage
        .load(Slot::Background, png(50, 25, [0, 255, 0, 255]))
        .await;

    assert!(matches!(
        stage.apply_loaded(stale, stale_result),
        LoadOutcome::Discarded
    ));
    assert_eq!(stage.placement().expect("placement").source_width, 50);
}

#[test]
fn upload_checks_reject_bad_input() {
    assert!(matches!(
        media::validate(&[], 1024),
        Err(Error::Upload(UploadError::Empty))
    ));
    assert!(matches!(
        media::validate(b"GIF89a not accepted", 1024),
        Err(Error::Upload(UploadError::UnsupportedType))
    ));
    let large = png(8, 8, [1, 2, 3, 255]);
    assert!(matches!(
        media::validate(&large, 10),
        Err(Error::Upload(UploadError::TooLarge { max: 10, .. }))
    ));
}

#[test]
fn test_language_change_via_config() {
    // Create a temporary directory for the config file
    let dir = tempdir().expect("Failed to create temporary directory");
    let temp_config_file_path = dir.path().join("settings.toml");

    // 1. Initial config: en-US
    let initial_config = Config {
        language: Some("en-US".to_string()),
        ..Config::default()
    };
    config::save_to_path(&initial_config, &temp_config_file_path)
        .expect("Failed to write initial config file");

    let loaded_initial_config = config::load_from_path(&temp_config_file_path)
        .expect("Failed to load initial config from path");
    let i18n_en = I18n::new(None, &loaded_initial_config);
    assert_eq!(i18n_en.current_locale().to_string(), "en-US");

    // 2. Change config to zh-CN
    let chinese_config = Config {
        language: Some("zh-CN".to_string()),
        ..Config::default()
    };
    config::save_to_path(&chinese_config, &temp_config_file_path)
        .expect("Failed to write chinese config file");

    let loaded_chinese_config = config::load_from_path(&temp_config_file_path)
        .expect("Failed to load chinese config from path");
    let i18n_zh = I18n::new(None, &loaded_chinese_config);
    assert_eq!(i18n_zh.current_locale().to_string(), "zh-CN");

    // Placeholder hint follows the locale.
    let settings = StageSettings::from_config(&loaded_chinese_config, &i18n_zh);
    assert_eq!(
        settings.placeholder_text,
        "海报图片会显示在这里，可以在上面画正方形框"
    );

    dir.close().expect("Failed to close temporary directory");
}
