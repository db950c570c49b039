use frame_filter_common::frame::Frame;
use frame_filter_common::pixel_format::{PixelFormat, BYTES_PER_PIXEL};
use image::{Rgba, RgbaImage};
use tiny_skia::{ColorU8, Pixmap};

use super::geometry::PixelBounds;
use super::graphics::Graphics;
use super::stroke::DrawError;

/// Writable RGBA view over a host frame.
///
/// Pixels are read and written through the frame's [`PixelFormat`], so
/// callers always see straight-alpha RGBA regardless of the host's byte
/// order. The view owns the frame borrow until [`RasterView::into_frame`].
pub struct RasterView<'a> {
    frame: Frame<'a>,
    format: PixelFormat,
}

impl<'a> RasterView<'a> {
    pub fn new(frame: Frame<'a>, format: PixelFormat) -> Self {
        Self { frame, format }
    }

    pub fn width(&self) -> u32 {
        self.frame.width()
    }

    pub fn height(&self) -> u32 {
        self.frame.height()
    }

    /// Panics when `(x, y)` lies outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        assert!(x < self.width() && y < self.height(), "pixel ({x}, {y}) out of bounds");
        let offset = self.frame.pixel_offset(x, y);
        Rgba(self.format.unpack(&self.frame.data()[offset..offset + BYTES_PER_PIXEL]))
    }

    /// Panics when `(x, y)` lies outside the frame.
    pub fn put_pixel(&mut self, x: u32, y: u32, pixel: Rgba<u8>) {
        assert!(x < self.width() && y < self.height(), "pixel ({x}, {y}) out of bounds");
        let offset = self.frame.pixel_offset(x, y);
        let format = self.format;
        format.pack(pixel.0, &mut self.frame.data_mut()[offset..offset + BYTES_PER_PIXEL]);
    }

    /// Open a drawing context. The context holds the view exclusively and
    /// writes its strokes back when dropped.
    pub fn create_graphics(&mut self) -> Result<Graphics<'_, 'a>, DrawError> {
        Graphics::new(self)
    }

    /// Premultiplied copy of the view for the rasterizer.
    pub(crate) fn to_pixmap(&self) -> Result<Pixmap, DrawError> {
        let (width, height) = (self.width(), self.height());
        let mut pixmap = Pixmap::new(width, height).ok_or(DrawError::Surface { width, height })?;
        let pixels = pixmap.pixels_mut();
        for y in 0..height {
            for x in 0..width {
                let [r, g, b, a] = self.pixel(x, y).0;
                pixels[(y * width + x) as usize] = ColorU8::from_rgba(r, g, b, a).premultiply();
            }
        }
        Ok(pixmap)
    }

    /// Store every pixel where `drawn` differs from `base`, both taken from
    /// [`RasterView::to_pixmap`]. Pixels the rasterizer left alone keep
    /// their original bytes. Returns the bounds of what was stored.
    pub(crate) fn store_changes(&mut self, base: &Pixmap, drawn: &Pixmap) -> Option<PixelBounds> {
        let width = self.width();
        let mut stored: Option<PixelBounds> = None;
        for (i, (before, after)) in base.pixels().iter().zip(drawn.pixels()).enumerate() {
            if before == after {
                continue;
            }
            let (x, y) = (i as u32 % width, i as u32 / width);
            let c = after.demultiply();
            self.put_pixel(x, y, Rgba([c.red(), c.green(), c.blue(), c.alpha()]));
            let px = PixelBounds::pixel(x, y);
            stored = Some(stored.map_or(px, |s| s.union(px)));
        }
        stored
    }

    /// Copy the view into a packed RGBA image, e.g. for encoding.
    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width(), self.height(), |x, y| self.pixel(x, y))
    }

    pub fn into_frame(self) -> Frame<'a> {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_through_band_order() {
        // one pixel, bytes A, B, G, R
        let mut buf = vec![0xFF, 0x03, 0x02, 0x01];
        let frame = Frame::packed(&mut buf, 1, 1, 0.0).unwrap();
        let view = RasterView::new(frame, PixelFormat::HOST_DEFAULT);
        assert_eq!(view.pixel(0, 0), Rgba([0x01, 0x02, 0x03, 0xFF]));
    }

    #[test]
    fn writes_leave_row_padding_alone() {
        // 2x2 pixels, 12-byte rows
        let mut buf = vec![0xEE; 24];
        {
            let frame = Frame::new(&mut buf, 2, 2, 12, 0.0).unwrap();
            let mut view = RasterView::new(frame, PixelFormat::HOST_DEFAULT);
            view.put_pixel(1, 1, Rgba([10, 20, 30, 40]));
        }
        assert_eq!(&buf[16..20], &[40, 30, 20, 10]);
        assert_eq!(&buf[20..24], &[0xEE; 4]);
        assert_eq!(&buf[8..12], &[0xEE; 4]);
    }

    #[test]
    fn rgba_image_is_reordered() {
        let mut buf = vec![255, 0, 0, 9, 255, 0, 9, 0];
        let frame = Frame::packed(&mut buf, 2, 1, 0.0).unwrap();
        let view = RasterView::new(frame, PixelFormat::HOST_DEFAULT);
        let image = view.to_rgba_image();
        assert_eq!(image.dimensions(), (2, 1));
        assert_eq!(image.get_pixel(0, 0), &Rgba([9, 0, 0, 255]));
        assert_eq!(image.get_pixel(1, 0), &Rgba([0, 9, 0, 255]));
    }

    #[test]
    fn pixmap_is_premultiplied() {
        // A, B, G, R: half-transparent white
        let mut buf = vec![128, 255, 255, 255];
        let frame = Frame::packed(&mut buf, 1, 1, 0.0).unwrap();
        let view = RasterView::new(frame, PixelFormat::HOST_DEFAULT);
        let pixmap = view.to_pixmap().unwrap();
        let px = pixmap.pixels()[0];
        assert_eq!((px.red(), px.alpha()), (128, 128));
    }

    #[test]
    fn only_changed_pixels_are_stored() {
        // translucent pixels would not survive a premultiplied round trip
        let mut buf = vec![0x55; 12];
        let original = buf.clone();
        let bounds = {
            let frame = Frame::packed(&mut buf, 3, 1, 0.0).unwrap();
            let mut view = RasterView::new(frame, PixelFormat::HOST_DEFAULT);
            let base = view.to_pixmap().unwrap();
            let mut drawn = base.clone();
            drawn.pixels_mut()[1] = ColorU8::from_rgba(0, 255, 0, 255).premultiply();
            view.store_changes(&base, &drawn)
        };
        assert_eq!(bounds, Some(PixelBounds::pixel(1, 0)));
        assert_eq!(&buf[0..4], &original[0..4]);
        assert_eq!(&buf[4..8], &[255, 0, 255, 0]);
        assert_eq!(&buf[8..12], &original[8..12]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn out_of_bounds_read_panics() {
        let mut buf = vec![0; 4];
        let frame = Frame::packed(&mut buf, 1, 1, 0.0).unwrap();
        RasterView::new(frame, PixelFormat::HOST_DEFAULT).pixel(1, 0);
    }
}
