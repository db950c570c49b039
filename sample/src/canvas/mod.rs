//! Raster canvas over a host frame.
//!
//! A [`RasterView`] reinterprets the host's byte buffer through a
//! [`PixelFormat`](frame_filter_common::pixel_format::PixelFormat); a
//! [`Graphics`] context borrows the view exclusively and rasterizes shapes
//! with `tiny-skia`, source-over, then stores the touched pixels back.

mod geometry;
mod graphics;
mod hints;
mod raster;
mod stroke;

pub use geometry::{PixelBounds, Rect};
pub use graphics::Graphics;
pub use hints::{RenderQuality, RenderingHints, StrokeControl};
pub use raster::RasterView;
pub use stroke::{DrawError, LineCap, LineJoin, Stroke};
