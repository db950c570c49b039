use std::str::FromStr;

use frame_filter_common::config::StrokeConfig;

/// Decoration applied to the ends of open lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCap {
    Butt,
    Square,
    Round,
}

/// Decoration applied where two segments of an outline meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineJoin {
    Miter,
    Round,
    Bevel,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DrawError {
    #[error("stroke width must be finite and non-negative, got {0}")]
    Width(f64),
    #[error("miter limit must be finite and at least 1.0 for miter joins, got {0}")]
    MiterLimit(f64),
    #[error("unknown line cap {0:?}, expected butt, square or round")]
    UnknownCap(String),
    #[error("unknown line join {0:?}, expected miter, round or bevel")]
    UnknownJoin(String),
    #[error("cannot allocate a {width}x{height} drawing surface")]
    Surface { width: u32, height: u32 },
}

impl FromStr for LineCap {
    type Err = DrawError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "butt" => Ok(Self::Butt),
            "square" => Ok(Self::Square),
            "round" => Ok(Self::Round),
            _ => Err(DrawError::UnknownCap(s.to_string())),
        }
    }
}

impl FromStr for LineJoin {
    type Err = DrawError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "miter" => Ok(Self::Miter),
            "round" => Ok(Self::Round),
            "bevel" => Ok(Self::Bevel),
            _ => Err(DrawError::UnknownJoin(s.to_string())),
        }
    }
}

/// Outline pen: width in device units, cap and join decorations, and the
/// miter limit (ratio of miter length to half the stroke width).
///
/// A width of zero draws a hairline, one device pixel wide whatever the
/// scale. Caps only decorate open paths; closed rectangle outlines never
/// show them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    width: f64,
    cap: LineCap,
    join: LineJoin,
    miter_limit: f64,
}

impl Stroke {
    pub fn new(width: f64, cap: LineCap, join: LineJoin, miter_limit: f64) -> Result<Self, DrawError> {
        if !width.is_finite() || width < 0.0 {
            return Err(DrawError::Width(width));
        }
        // Round and bevel joins never consult the limit, any finite value goes.
        if !miter_limit.is_finite() || (join == LineJoin::Miter && miter_limit < 1.0) {
            return Err(DrawError::MiterLimit(miter_limit));
        }
        Ok(Self {
            width,
            cap,
            join,
            miter_limit,
        })
    }

    pub fn from_config(config: &StrokeConfig) -> Result<Self, DrawError> {
        Self::new(
            config.width,
            config.cap.parse()?,
            config.join.parse()?,
            config.miter_limit,
        )
    }

    pub(crate) fn to_skia(self) -> tiny_skia::Stroke {
        tiny_skia::Stroke {
            width: self.width as f32,
            miter_limit: self.miter_limit as f32,
            line_cap: match self.cap {
                LineCap::Butt => tiny_skia::LineCap::Butt,
                LineCap::Square => tiny_skia::LineCap::Square,
                LineCap::Round => tiny_skia::LineCap::Round,
            },
            line_join: match self.join {
                LineJoin::Miter => tiny_skia::LineJoin::Miter,
                LineJoin::Round => tiny_skia::LineJoin::Round,
                LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
            },
            ..tiny_skia::Stroke::default()
        }
    }
}

impl Default for Stroke {
    /// One unit wide, square caps, miter joins, limit 10.
    fn default() -> Self {
        Self {
            width: 1.0,
            cap: LineCap::Square,
            join: LineJoin::Miter,
            miter_limit: 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_stroke_from_default_config() {
        let stroke = Stroke::from_config(&StrokeConfig::default()).unwrap();
        let skia = stroke.to_skia();
        assert_eq!(skia.width, 3.0);
        assert_eq!(skia.line_cap, tiny_skia::LineCap::Square);
        assert_eq!(skia.line_join, tiny_skia::LineJoin::Round);
        assert_eq!(skia.miter_limit, 10.0);
        assert!(skia.dash.is_none());
    }

    #[test]
    fn round_join_accepts_small_miter_limit() {
        assert!(Stroke::new(3.0, LineCap::Square, LineJoin::Round, 0.5).is_ok());
        assert_eq!(
            Stroke::new(3.0, LineCap::Square, LineJoin::Miter, 0.5),
            Err(DrawError::MiterLimit(0.5))
        );
    }

    #[test]
    fn rejects_bad_width() {
        assert_eq!(
            Stroke::new(-1.0, LineCap::Butt, LineJoin::Round, 10.0),
            Err(DrawError::Width(-1.0))
        );
        assert!(Stroke::new(f64::NAN, LineCap::Butt, LineJoin::Round, 10.0).is_err());
    }

    #[test]
    fn zero_width_is_a_hairline_pen() {
        let stroke = Stroke::new(0.0, LineCap::Butt, LineJoin::Miter, 4.0).unwrap();
        assert_eq!(stroke.to_skia().width, 0.0);
    }

    #[test]
    fn bevel_and_butt_map_through() {
        let skia = Stroke::new(2.0, LineCap::Butt, LineJoin::Bevel, 1.0)
            .unwrap()
            .to_skia();
        assert_eq!(skia.line_cap, tiny_skia::LineCap::Butt);
        assert_eq!(skia.line_join, tiny_skia::LineJoin::Bevel);
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("Square".parse::<LineCap>(), Ok(LineCap::Square));
        assert_eq!(" bevel ".parse::<LineJoin>(), Ok(LineJoin::Bevel));
        assert_eq!(
            "arrow".parse::<LineCap>(),
            Err(DrawError::UnknownCap("arrow".into()))
        );
    }
}
