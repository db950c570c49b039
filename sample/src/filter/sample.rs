use frame_filter_common::config::{Config, OverlayConfig};
use frame_filter_common::frame::Frame;
use frame_filter_common::pixel_format::PixelFormat;
use image::Rgba;
use tracing::{debug, info, warn};

use super::traits::FrameFilter;
use crate::canvas::{DrawError, RasterView, Rect, RenderingHints, Stroke};
use crate::error::FilterError;
use crate::snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Uninitialized,
    Initialized,
    Destroyed,
}

/// Demonstration filter: on the first frame it draws a filled, outlined
/// square into the buffer and saves the result as a PNG. Every later frame
/// is passed through untouched.
pub struct SampleFilter {
    config: Config,
    state: LifecycleState,
    /// Validated at `init`, dropped at `destroy`.
    prepared: Option<Prepared>,
    frames_seen: u64,
}

struct Prepared {
    format: PixelFormat,
    overlay: Option<Overlay>,
}

struct Overlay {
    rect: Rect,
    fill: Rgba<u8>,
    outline: Rgba<u8>,
    stroke: Stroke,
}

impl Overlay {
    fn from_config(config: &OverlayConfig) -> Result<Option<Self>, FilterError> {
        if !config.enabled {
            return Ok(None);
        }
        let stroke = Stroke::from_config(&config.stroke)?;
        Ok(Some(Self {
            rect: Rect::from_config(&config.rect),
            fill: Rgba(config.fill_color),
            outline: Rgba(config.stroke_color),
            stroke,
        }))
    }

    fn draw(&self, view: &mut RasterView<'_>) -> Result<(), DrawError> {
        let mut g = view.create_graphics()?;
        g.set_hints(RenderingHints::high_quality());

        g.set_color(self.fill);
        g.fill_rect(self.rect);

        g.set_stroke(self.stroke);
        g.set_color(self.outline);
        g.stroke_rect(self.rect);
        debug!(dirty = ?g.dirty_bounds(), "overlay drawn");
        Ok(())
    }
}

impl SampleFilter {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: LifecycleState::Uninitialized,
            prepared: None,
            frames_seen: 0,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Number of `on_frame` calls since construction.
    pub fn frames_seen(&self) -> u64 {
        self.frames_seen
    }
}

impl FrameFilter for SampleFilter {
    fn init(&mut self) -> Result<(), FilterError> {
        info!("init");
        if self.state != LifecycleState::Uninitialized {
            warn!(state = ?self.state, "init called more than once");
        }

        let format = PixelFormat::from_config(&self.config.pixel_format)?;
        let overlay = Overlay::from_config(&self.config.overlay)?;

        debug!(
            band_order = ?format.band_order(),
            overlay = overlay.is_some(),
            snapshot = self.config.snapshot.enabled,
            snapshot_path = %self.config.snapshot.path.display(),
            "sample filter ready"
        );

        self.prepared = Some(Prepared { format, overlay });
        self.state = LifecycleState::Initialized;
        Ok(())
    }

    fn on_frame<'a>(&mut self, frame: Frame<'a>) -> Result<Option<Frame<'a>>, FilterError> {
        info!(
            width = frame.width(),
            height = frame.height(),
            ts_millis = frame.ts_millis,
            "onFrame"
        );

        let prepared = match (&self.prepared, self.state) {
            (Some(prepared), LifecycleState::Initialized) => prepared,
            (_, state) => return Err(FilterError::NotInitialized(state)),
        };

        self.frames_seen += 1;
        if self.frames_seen > 1 {
            // Only the first frame is of interest.
            return Ok(None);
        }

        let mut view = RasterView::new(frame, prepared.format);
        if let Some(overlay) = &prepared.overlay {
            overlay.draw(&mut view)?;
        }

        if self.config.snapshot.enabled {
            snapshot::write_png(&view, &self.config.snapshot.path)?;
        }

        Ok(Some(view.into_frame()))
    }

    fn destroy(&mut self) {
        info!("destroy");
        if self.state != LifecycleState::Initialized {
            warn!(state = ?self.state, "destroy called on a filter that is not initialized");
        }
        self.prepared = None;
        self.state = LifecycleState::Destroyed;
    }

    fn name(&self) -> &str {
        "sample"
    }
}
