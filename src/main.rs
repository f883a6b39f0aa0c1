// SPDX-License-Identifier: MPL-2.0
use chrono::Local;
use poster_stamp::config::{self, defaults::BYTES_PER_MB, Config};
use poster_stamp::domain::{Point, PreviewSize};
use poster_stamp::error::{Error, Result, UploadError};
use poster_stamp::i18n::fluent::I18n;
use poster_stamp::logging;
use poster_stamp::media::{self, encode_png, suggested_file_name, Slot};
use poster_stamp::stage::{Effect, LoadOutcome, Message, Stage, StageSettings};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const HELP: &str = "\
poster_stamp - place a QR code onto a poster

USAGE:
  poster_stamp [OPTIONS] --from X,Y --to X,Y POSTER QR

OPTIONS:
  --lang LANG            UI language (en-US, zh-CN)
  --preview WxH          Preview surface size
  --from X,Y             Drag start on the preview
  --to X,Y               Drag end on the preview
  --move-overlay X,Y     Drag the QR code's center to X,Y inside the square
  --preview-out PATH     Also write the preview as PNG
  --out PATH             Output file (default: timestamped name)
  -h, --help             Print this help
";

struct Cli {
    lang: Option<String>,
    preview: Option<PreviewSize>,
    from: Point,
    to: Point,
    move_overlay: Option<Point>,
    preview_out: Option<PathBuf>,
    out: Option<PathBuf>,
    poster: PathBuf,
    qr: PathBuf,
}

impl Cli {
    fn parse(mut args: pico_args::Arguments) -> std::result::Result<Self, pico_args::Error> {
        let cli = Self {
            lang: args.opt_value_from_str("--lang")?,
            preview: args.opt_value_from_fn("--preview", parse_size)?,
            from: args.value_from_fn("--from", parse_point)?,
            to: args.value_from_fn("--to", parse_point)?,
            move_overlay: args.opt_value_from_fn("--move-overlay", parse_point)?,
            preview_out: args.opt_value_from_str("--preview-out")?,
            out: args.opt_value_from_str("--out")?,
            poster: args.free_from_str()?,
            qr: args.free_from_str()?,
        };

        let remaining = args.finish();
        if !remaining.is_empty() {
            tracing::warn!(?remaining, "ignoring extra arguments");
        }
        Ok(cli)
    }
}

fn parse_point(value: &str) -> std::result::Result<Point, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{value}'"))?;
    let x = x.trim().parse::<f32>().map_err(|e| e.to_string())?;
    let y = y.trim().parse::<f32>().map_err(|e| e.to_string())?;
    Ok(Point::new(x, y))
}

fn parse_size(value: &str) -> std::result::Result<PreviewSize, String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got '{value}'"))?;
    let width = width.trim().parse::<u32>().map_err(|e| e.to_string())?;
    let height = height.trim().parse::<u32>().map_err(|e| e.to_string())?;
    Ok(PreviewSize::new(width, height))
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return ExitCode::SUCCESS;
    }

    let cli = match Cli::parse(args) {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };

    let config = config::load().unwrap_or_else(|err| {
        tracing::warn!(%err, "could not read settings, using defaults");
        Config::default()
    });
    let i18n = I18n::new(cli.lang.clone(), &config);

    match run(cli, &config, &i18n).await {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(%err, "{}", localized(&err, &i18n));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: &Config, i18n: &I18n) -> Result<ExitCode> {
    let mut settings = StageSettings::from_config(config, i18n);
    if let Some(preview) = cli.preview {
        settings.preview = preview;
    }
    let mut stage = Stage::new(settings);
    let max_bytes = config.max_upload_bytes();

    let poster = read_upload(&cli.poster, max_bytes)?;
    load_into(&mut stage, Slot::Background, poster).await?;
    let qr = read_upload(&cli.qr, max_bytes)?;
    load_into(&mut stage, Slot::Overlay, qr).await?;

    stage.handle(Message::PointerPressed(cli.from));
    stage.handle(Message::PointerMoved(cli.to));
    match stage.handle(Message::PointerReleased) {
        Effect::SelectionChanged {
            selection: Some(selection),
            overlay_missing,
        } => {
            tracing::info!(?selection, "square selected");
            if overlay_missing {
                tracing::warn!("{}", i18n.tr("prompt-missing-overlay"));
            }
        }
        _ => tracing::warn!(from = ?cli.from, to = ?cli.to, "drag did not produce a square"),
    }

    if let (Some(target), Some(rect)) = (cli.move_overlay, stage.overlay_rect()) {
        let center = Point::new(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0);
        stage.handle(Message::PointerPressed(center));
        stage.handle(Message::PointerMoved(target));
        stage.handle(Message::PointerReleased);
        tracing::info!(rect = ?stage.overlay_rect(), "QR code moved");
    }

    if let Some(path) = &cli.preview_out {
        if let Some(preview) = stage.preview() {
            fs::write(path, encode_png(preview)?)?;
            tracing::info!(path = %path.display(), "preview written");
        }
    }

    if !stage.can_export() {
        tracing::warn!("exporting without a placed QR code");
    }
    let Some(png) = stage.export_composite() else {
        tracing::error!("{}", i18n.tr("export-unavailable"));
        return Ok(ExitCode::FAILURE);
    };

    let out = cli
        .out
        .unwrap_or_else(|| PathBuf::from(suggested_file_name(Local::now().naive_local())));
    fs::write(&out, png)?;

    let mut args = fluent_bundle::FluentArgs::new();
    args.set("path", out.display().to_string());
    tracing::info!("{}", i18n.tr_with_args("export-success", &args));
    Ok(ExitCode::SUCCESS)
}

/// Reads a file and applies the upload checks to it.
fn read_upload(path: &Path, max_bytes: u64) -> Result<Vec<u8>> {
    let bytes = fs::read(path)?;
    let kind = media::validate(&bytes, max_bytes)?;
    tracing::debug!(path = %path.display(), mime = kind.mime(), "upload accepted");
    Ok(bytes)
}

async fn load_into(stage: &mut Stage, slot: Slot, bytes: Vec<u8>) -> Result<()> {
    match stage.load(slot, bytes).await {
        LoadOutcome::Applied(_) | LoadOutcome::Discarded => Ok(()),
        LoadOutcome::Failed(err) => Err(err),
    }
}

fn localized(err: &Error, i18n: &I18n) -> String {
    match err {
        Error::Upload(UploadError::TooLarge { max, .. }) => {
            let mut args = fluent_bundle::FluentArgs::new();
            args.set("max", max / BYTES_PER_MB);
            i18n.tr_with_args(err.i18n_key(), &args)
        }
        _ => i18n.tr(err.i18n_key()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_points() {
        assert_eq!(parse_point("250,50"), Ok(Point::new(250.0, 50.0)));
        assert_eq!(parse_point(" 1.5 , -2 "), Ok(Point::new(1.5, -2.0)));
        assert!(parse_point("250").is_err());
        assert!(parse_point("a,b").is_err());
    }

    #[test]
    fn parses_sizes() {
        assert_eq!(parse_size("800x400"), Ok(PreviewSize::new(800, 400)));
        assert_eq!(parse_size("10X20"), Ok(PreviewSize::new(10, 20)));
        assert!(parse_size("800").is_err());
        assert!(parse_size("-1x5").is_err());
    }
}
