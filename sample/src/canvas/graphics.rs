use image::Rgba;
use tiny_skia::{PathBuilder, Pixmap, Transform};
use tracing::{debug, trace};

use super::geometry::{PixelBounds, Rect};
use super::hints::{RenderingHints, StrokeControl};
use super::raster::RasterView;
use super::stroke::{DrawError, Stroke};

/// Drawing context over a [`RasterView`].
///
/// Shapes are rasterized into a premultiplied copy of the view. Dropping
/// the context (or calling [`Graphics::dispose`]) stores the changed pixels
/// back through the view's pixel format; every exit path of the enclosing
/// scope does so.
pub struct Graphics<'v, 'a> {
    view: &'v mut RasterView<'a>,
    base: Pixmap,
    canvas: Pixmap,
    color: Rgba<u8>,
    stroke: Stroke,
    hints: RenderingHints,
}

impl<'v, 'a> Graphics<'v, 'a> {
    pub(crate) fn new(view: &'v mut RasterView<'a>) -> Result<Self, DrawError> {
        let base = view.to_pixmap()?;
        trace!(width = view.width(), height = view.height(), "graphics context acquired");
        Ok(Self {
            view,
            canvas: base.clone(),
            base,
            color: Rgba([0, 0, 0, 255]),
            stroke: Stroke::default(),
            hints: RenderingHints::default(),
        })
    }

    pub fn set_color(&mut self, color: Rgba<u8>) {
        self.color = color;
    }

    pub fn set_stroke(&mut self, stroke: Stroke) {
        self.stroke = stroke;
    }

    pub fn set_hints(&mut self, hints: RenderingHints) {
        debug!(?hints, "rendering hints applied");
        self.hints = hints;
    }

    /// Pixels changed so far, if any.
    pub fn dirty_bounds(&self) -> Option<PixelBounds> {
        let width = self.canvas.width();
        self.base
            .pixels()
            .iter()
            .zip(self.canvas.pixels())
            .enumerate()
            .filter(|(_, (before, after))| before != after)
            .map(|(i, _)| PixelBounds::pixel(i as u32 % width, i as u32 / width))
            .reduce(PixelBounds::union)
    }

    pub fn fill_rect(&mut self, rect: Rect) {
        if rect.is_empty() {
            return;
        }
        let Some(rect) = rect.to_skia() else {
            return;
        };
        let paint = self.hints.paint(self.color);
        self.canvas.fill_rect(rect, &paint, Transform::identity(), None);
    }

    /// Stroke the closed outline of `rect`, centered on its edges.
    pub fn stroke_rect(&mut self, rect: Rect) {
        let rect = match self.hints.stroke_control {
            StrokeControl::Normalize => rect.snapped(),
            StrokeControl::Pure => rect,
        };
        let Some(rect) = rect.to_skia() else {
            return;
        };
        let path = PathBuilder::from_rect(rect);
        let paint = self.hints.paint(self.color);
        self.canvas.stroke_path(
            &path,
            &paint,
            &self.stroke.to_skia(),
            Transform::identity(),
            None,
        );
    }

    /// Release the context now instead of at end of scope.
    pub fn dispose(self) {}
}

impl Drop for Graphics<'_, '_> {
    fn drop(&mut self) {
        let stored = self.view.store_changes(&self.base, &self.canvas);
        trace!(?stored, "graphics context released");
    }
}
