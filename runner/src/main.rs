use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use frame_filter_common::config::Config;
use frame_filter_common::pixel_format::{PixelFormat, BYTES_PER_PIXEL};
use frame_filter_runner::host::{FilterLibrary, HostError};
use image::RgbaImage;
use tracing::{error, info};

/// Fill value of the synthetic frame handed to the filter.
const FRAME_FILL: u8 = 0x55;

/// Load a frame filter library and run it over one synthetic frame.
#[derive(Debug, Parser)]
#[command(name = "frame-filter-runner", version)]
struct Args {
    /// Filter shared library to load
    filter: PathBuf,

    /// TOML config file whose text is passed to filter_init
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Frame timestamp in milliseconds
    #[arg(short, long, default_value_t = 0.0)]
    timestamp: f64,

    #[arg(short, long, default_value_t = 1280)]
    width: u32,

    #[arg(short = 'H', long, default_value_t = 720)]
    height: u32,

    /// Write the filtered frame to this PNG file
    #[arg(short = 'o', long)]
    png_out: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    let (config_text, config) = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.parse().unwrap_or_default()),
        )
        .init();

    info!(
        filter = %args.filter.display(),
        width = args.width,
        height = args.height,
        ts_millis = args.timestamp,
        "starting frame-filter runner"
    );

    match run(&args, &config_text, &config) {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!(error = format!("{e:#}"), "runner failed");
            std::process::exit(1);
        }
    }
}

/// Returns the raw config text for the filter alongside the parsed form
/// the runner uses for its own settings.
fn load_config(path: Option<&Path>) -> Result<(String, Config)> {
    let Some(path) = path else {
        return Ok((String::new(), Config::default()));
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config = Config::from_toml_str(&text)?;
    Ok((text, config))
}

fn run(args: &Args, config_text: &str, config: &Config) -> Result<i32> {
    let library = FilterLibrary::load(&args.filter)?;

    let mut session = match library.init(config_text) {
        Ok(s) => s,
        Err(HostError::Init(rv)) => {
            info!(rv, "filter_init returned");
            return Ok(rv);
        }
        Err(e) => return Err(e.into()),
    };
    info!(rv = 0, "filter_init returned");

    let line_size = args.width as usize * BYTES_PER_PIXEL;
    let mut frame = vec![FRAME_FILL; line_size * args.height as usize];
    let rv = session.frame(&mut frame, args.width, args.height, line_size, args.timestamp)?;
    info!(rv, "filter_frame returned");
    drop(session);

    if rv == 0 {
        if let Some(png_out) = &args.png_out {
            let format = PixelFormat::from_config(&config.pixel_format)?;
            info!(path = %png_out.display(), "writing PNG");
            write_frame_png(png_out, &frame, args.width, args.height, format)?;
        }
    }

    Ok(rv)
}

fn write_frame_png(
    path: &Path,
    frame: &[u8],
    width: u32,
    height: u32,
    format: PixelFormat,
) -> Result<()> {
    let line_size = width as usize * BYTES_PER_PIXEL;
    let image = RgbaImage::from_fn(width, height, |x, y| {
        let offset = y as usize * line_size + x as usize * BYTES_PER_PIXEL;
        image::Rgba(format.unpack(&frame[offset..offset + BYTES_PER_PIXEL]))
    });
    image
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn args_defaults() {
        let args = Args::try_parse_from(["frame-filter-runner", "libsample.so"]).unwrap();
        assert_eq!(args.filter, PathBuf::from("libsample.so"));
        assert_eq!((args.width, args.height), (1280, 720));
        assert_eq!(args.timestamp, 0.0);
        assert!(args.config.is_none() && args.png_out.is_none());
    }

    #[test]
    fn args_overrides() {
        let args = Args::try_parse_from([
            "frame-filter-runner",
            "libsample.so",
            "-w",
            "640",
            "-H",
            "480",
            "--timestamp",
            "40.5",
            "-o",
            "out.png",
        ])
        .unwrap();
        assert_eq!((args.width, args.height), (640, 480));
        assert_eq!(args.timestamp, 40.5);
        assert_eq!(args.png_out, Some(PathBuf::from("out.png")));
    }

    #[test]
    fn filter_path_is_required() {
        assert!(Args::try_parse_from(["frame-filter-runner"]).is_err());
    }

    #[test]
    fn config_text_is_passed_through_verbatim() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[snapshot]\nenabled = false\n").unwrap();
        let (text, config) = load_config(Some(file.path())).unwrap();
        assert_eq!(text, "[snapshot]\nenabled = false\n");
        assert!(!config.snapshot.enabled);

        let (text, config) = load_config(None).unwrap();
        assert!(text.is_empty());
        assert!(config.snapshot.enabled);
    }

    #[test]
    fn png_output_uses_band_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        // 2x1: bytes A, B, G, R
        let frame = [255, 0, 0, 200, 128, 7, 8, 9];
        write_frame_png(&path, &frame, 2, 1, PixelFormat::HOST_DEFAULT).unwrap();

        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.get_pixel(0, 0), &image::Rgba([200, 0, 0, 255]));
        assert_eq!(decoded.get_pixel(1, 0), &image::Rgba([9, 8, 7, 128]));
    }
}
