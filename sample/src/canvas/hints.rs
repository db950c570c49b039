use image::Rgba;
use tiny_skia::Paint;

/// Speed/quality trade-off for a rendering stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderQuality {
    Speed,
    #[default]
    Default,
    Quality,
}

/// How stroke outlines are placed on the pixel grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StrokeControl {
    /// Snap outline coordinates to whole pixels before stroking.
    #[default]
    Normalize,
    /// Stroke in floating-point device space, no snapping.
    Pure,
}

/// Rendering configuration applied to a [`Graphics`](super::Graphics)
/// context.
///
/// `antialiasing` switches the rasterizer between coverage-based edges and
/// hard pixel-center edges. A `Quality` setting for either `rendering` or
/// `color_rendering` forces the high-precision blending pipeline. The
/// canvas draws no glyphs, so the two text hints only travel with the
/// profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderingHints {
    pub antialiasing: bool,
    pub color_rendering: RenderQuality,
    pub rendering: RenderQuality,
    pub text_antialiasing: bool,
    pub stroke_control: StrokeControl,
    pub fractional_metrics: bool,
}

impl RenderingHints {
    /// Everything at its highest setting, pure strokes.
    pub fn high_quality() -> Self {
        Self {
            antialiasing: true,
            color_rendering: RenderQuality::Quality,
            rendering: RenderQuality::Quality,
            text_antialiasing: true,
            stroke_control: StrokeControl::Pure,
            fractional_metrics: true,
        }
    }

    pub(crate) fn paint(&self, color: Rgba<u8>) -> Paint<'static> {
        let [r, g, b, a] = color.0;
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = self.antialiasing;
        paint.force_hq_pipeline = self.rendering == RenderQuality::Quality
            || self.color_rendering == RenderQuality::Quality;
        paint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    #[test]
    fn default_is_aliased_and_normalized() {
        let hints = RenderingHints::default();
        let paint = hints.paint(RED);
        assert!(!paint.anti_alias);
        assert!(!paint.force_hq_pipeline);
        assert_eq!(hints.stroke_control, StrokeControl::Normalize);
    }

    #[test]
    fn high_quality_profile() {
        let hints = RenderingHints::high_quality();
        let paint = hints.paint(RED);
        assert!(paint.anti_alias && paint.force_hq_pipeline);
        assert_eq!(hints.stroke_control, StrokeControl::Pure);
        assert!(hints.text_antialiasing && hints.fractional_metrics);
    }

    #[test]
    fn speed_rendering_keeps_the_fast_pipeline() {
        let hints = RenderingHints {
            antialiasing: true,
            rendering: RenderQuality::Speed,
            color_rendering: RenderQuality::Speed,
            ..RenderingHints::default()
        };
        let paint = hints.paint(RED);
        assert!(paint.anti_alias);
        assert!(!paint.force_hq_pipeline);
    }

    #[test]
    fn quality_color_rendering_alone_forces_hq() {
        let hints = RenderingHints {
            color_rendering: RenderQuality::Quality,
            ..RenderingHints::default()
        };
        assert!(hints.paint(RED).force_hq_pipeline);
    }
}
