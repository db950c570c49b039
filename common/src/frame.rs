use crate::pixel_format::BYTES_PER_PIXEL;

/// One video frame borrowed from the host for the duration of a call.
///
/// Layout:
///   row `y` starts at byte `y * line_size`
///   pixel `x` of a row occupies bytes `[x * 4, x * 4 + 4)`
///   bytes past `width * 4` in a row are padding and are never touched
///
/// The host may hand over a buffer longer than `height * line_size`; the
/// tail is ignored.
#[derive(Debug)]
pub struct Frame<'a> {
    data: &'a mut [u8],
    width: u32,
    height: u32,
    line_size: usize,
    /// Presentation time in milliseconds, opaque to filters.
    pub ts_millis: f64,
}

impl<'a> Frame<'a> {
    /// Wrap a host buffer, validating its geometry.
    pub fn new(
        data: &'a mut [u8],
        width: u32,
        height: u32,
        line_size: usize,
        ts_millis: f64,
    ) -> Result<Self, FrameError> {
        if width == 0 || height == 0 {
            return Err(FrameError::EmptyDimensions { width, height });
        }

        let min_line_size = width as usize * BYTES_PER_PIXEL;
        if line_size < min_line_size {
            return Err(FrameError::LineTooShort {
                got: line_size,
                expected: min_line_size,
            });
        }

        let expected = line_size * height as usize;
        if data.len() < expected {
            return Err(FrameError::TooShort {
                got: data.len(),
                expected,
            });
        }

        Ok(Self {
            data,
            width,
            height,
            line_size,
            ts_millis,
        })
    }

    /// Wrap a tightly packed buffer (`line_size == width * 4`).
    pub fn packed(
        data: &'a mut [u8],
        width: u32,
        height: u32,
        ts_millis: f64,
    ) -> Result<Self, FrameError> {
        Self::new(data, width, height, width as usize * BYTES_PER_PIXEL, ts_millis)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn line_size(&self) -> usize {
        self.line_size
    }

    pub fn data(&self) -> &[u8] {
        &*self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut *self.data
    }

    /// Byte offset of pixel `(x, y)`. Caller guarantees the coordinates are
    /// inside the frame.
    pub fn pixel_offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.line_size + x as usize * BYTES_PER_PIXEL
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("frame has empty dimensions {width}x{height}")]
    EmptyDimensions { width: u32, height: u32 },
    #[error("line size too short: got {got} bytes, expected at least {expected}")]
    LineTooShort { got: usize, expected: usize },
    #[error("frame buffer too short: got {got} bytes, expected at least {expected}")]
    TooShort { got: usize, expected: usize },
}
