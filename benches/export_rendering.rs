// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, Criterion};
use image_rs::{Rgba, RgbaImage};
use poster_stamp::domain::{Point, PreviewSize};
use poster_stamp::media::Raster;
use poster_stamp::stage::{Message, Stage, StageSettings};
use std::hint::black_box;

fn placed_stage() -> Stage {
    let poster = Raster::from_rgba_image(RgbaImage::from_pixel(
        2480,
        3508,
        Rgba([240, 230, 220, 255]),
    ))
    .unwrap();
    let qr = Raster::from_rgba_image(RgbaImage::from_pixel(33, 33, Rgba([0, 0, 0, 255])))
        .unwrap();

    let mut stage = Stage::new(StageSettings {
        preview: PreviewSize::new(960, 640),
        placeholder_text: String::new(),
    });
    stage.set_background(Some(poster));
    stage.set_overlay(Some(qr));
    stage.handle(Message::PointerPressed(Point::new(400.0, 300.0)));
    stage.handle(Message::PointerMoved(Point::new(500.0, 400.0)));
    stage.handle(Message::PointerReleased);
    stage
}

fn export_rendering_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("export_rendering");
    group.sample_size(10);

    let mut stage = placed_stage();

    group.bench_function("redraw_preview", |b| {
        b.iter(|| {
            stage.redraw();
            black_box(stage.preview());
        });
    });

    group.bench_function("overlay_drag_step", |b| {
        let mut step = 0.0f32;
        b.iter(|| {
            step = (step + 1.0) % 20.0;
            stage.handle(Message::PointerPressed(Point::new(450.0, 350.0)));
            stage.handle(Message::PointerMoved(Point::new(450.0 + step, 350.0)));
            black_box(stage.handle(Message::PointerReleased));
        });
    });

    group.bench_function("export_a4_poster", |b| {
        b.iter(|| {
            let _ = black_box(stage.export_composite().unwrap());
        });
    });

    group.finish();
}

criterion_group!(benches, export_rendering_benchmark);
criterion_main!(benches);
