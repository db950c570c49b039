use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Filter configuration.
///
/// Every section is optional so an empty document yields the stock sample
/// behaviour: a yellow square with a magenta outline at (100, 100) and a
/// single `java-sample.png` snapshot.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub snapshot: SnapshotConfig,
    #[serde(default)]
    pub overlay: OverlayConfig,
    #[serde(default)]
    pub pixel_format: PixelFormatConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Resolved against the process working directory when relative.
    #[serde(default = "default_snapshot_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OverlayConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub rect: RectConfig,
    /// RGBA, straight alpha.
    #[serde(default = "default_fill_color")]
    pub fill_color: [u8; 4],
    #[serde(default = "default_stroke_color")]
    pub stroke_color: [u8; 4],
    #[serde(default)]
    pub stroke: StrokeConfig,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RectConfig {
    #[serde(default = "default_rect_origin")]
    pub x: f64,
    #[serde(default = "default_rect_origin")]
    pub y: f64,
    #[serde(default = "default_rect_extent")]
    pub width: f64,
    #[serde(default = "default_rect_extent")]
    pub height: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StrokeConfig {
    /// Zero draws a one-pixel hairline.
    #[serde(default = "default_stroke_width")]
    pub width: f64,
    /// One of `butt`, `square`, `round`. Only open paths show caps, so the
    /// closed overlay outline looks the same with any of them.
    #[serde(default = "default_cap")]
    pub cap: String,
    /// One of `miter`, `round`, `bevel`.
    #[serde(default = "default_join")]
    pub join: String,
    #[serde(default = "default_miter_limit")]
    pub miter_limit: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PixelFormatConfig {
    #[serde(default = "default_channels")]
    pub channels: u8,
    #[serde(default = "default_bit_depth")]
    pub bit_depth: u8,
    /// `band_order[c]` is the byte offset of output channel `c` (R, G, B, A)
    /// inside each pixel.
    #[serde(default = "default_band_order")]
    pub band_order: Vec<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: default_snapshot_path(),
        }
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rect: RectConfig::default(),
            fill_color: default_fill_color(),
            stroke_color: default_stroke_color(),
            stroke: StrokeConfig::default(),
        }
    }
}

impl Default for RectConfig {
    fn default() -> Self {
        Self {
            x: default_rect_origin(),
            y: default_rect_origin(),
            width: default_rect_extent(),
            height: default_rect_extent(),
        }
    }
}

impl Default for StrokeConfig {
    fn default() -> Self {
        Self {
            width: default_stroke_width(),
            cap: default_cap(),
            join: default_join(),
            miter_limit: default_miter_limit(),
        }
    }
}

impl Default for PixelFormatConfig {
    fn default() -> Self {
        Self {
            channels: default_channels(),
            bit_depth: default_bit_depth(),
            band_order: default_band_order(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadFile(path.display().to_string(), e))?;
        Self::from_toml_str(&content)
    }

    /// Parse config text as handed over by a host. Blank text means defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {0}: {1}")]
    ReadFile(String, std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(String),
}

// Default value functions
fn default_true() -> bool {
    true
}
fn default_snapshot_path() -> PathBuf {
    PathBuf::from("java-sample.png")
}
fn default_fill_color() -> [u8; 4] {
    [255, 255, 0, 255]
}
fn default_stroke_color() -> [u8; 4] {
    [255, 0, 255, 255]
}
fn default_rect_origin() -> f64 {
    100.0
}
fn default_rect_extent() -> f64 {
    100.0
}
fn default_stroke_width() -> f64 {
    3.0
}
fn default_cap() -> String {
    "square".into()
}
fn default_join() -> String {
    "round".into()
}
fn default_miter_limit() -> f64 {
    10.0
}
fn default_channels() -> u8 {
    4
}
fn default_bit_depth() -> u8 {
    8
}
fn default_band_order() -> Vec<usize> {
    vec![3, 2, 1, 0]
}
fn default_log_level() -> String {
    "info".into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn blank_text_yields_defaults() {
        let config = Config::from_toml_str("  \n").unwrap();
        assert!(config.snapshot.enabled);
        assert_eq!(config.snapshot.path, PathBuf::from("java-sample.png"));
        assert_eq!(config.overlay.fill_color, [255, 255, 0, 255]);
        assert_eq!(config.overlay.stroke_color, [255, 0, 255, 255]);
        assert_eq!(config.overlay.stroke.cap, "square");
        assert_eq!(config.overlay.stroke.join, "round");
        assert_eq!(config.pixel_format.band_order, vec![3, 2, 1, 0]);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = Config::from_toml_str(
            r#"
            [snapshot]
            path = "out/first.png"

            [overlay.stroke]
            width = 5.0
            "#,
        )
        .unwrap();
        assert!(config.snapshot.enabled);
        assert_eq!(config.snapshot.path, PathBuf::from("out/first.png"));
        assert_eq!(config.overlay.stroke.width, 5.0);
        assert_eq!(config.overlay.stroke.miter_limit, 10.0);
        assert_eq!(config.overlay.rect.x, 100.0);
        assert_eq!(config.overlay.rect.height, 100.0);
    }

    #[test]
    fn malformed_text_is_a_parse_error() {
        let err = Config::from_toml_str("[snapshot\npath = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[overlay]\nenabled = false").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert!(!config.overlay.enabled);
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile(_, _)));
    }
}
