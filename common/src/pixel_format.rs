use crate::config::PixelFormatConfig;

/// Bytes per pixel of every supported layout.
pub const BYTES_PER_PIXEL: usize = 4;

/// Interleaved 4-channel, 8-bit pixel layout.
///
/// `band_order[c]` is the byte offset, within one pixel, of output channel
/// `c` where channels are R, G, B, A in that order. The host's default
/// layout is `[3, 2, 1, 0]`: the last byte of each pixel carries red and the
/// first carries alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelFormat {
    band_order: [usize; BYTES_PER_PIXEL],
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PixelFormatError {
    #[error("unsupported channel count {0}, expected 4")]
    Channels(u8),
    #[error("unsupported bit depth {0}, expected 8")]
    BitDepth(u8),
    #[error("band order {0:?} is not a permutation of 0..4")]
    BandOrder(Vec<usize>),
}

impl PixelFormat {
    pub const HOST_DEFAULT: PixelFormat = PixelFormat {
        band_order: [3, 2, 1, 0],
    };

    pub fn new(band_order: [usize; BYTES_PER_PIXEL]) -> Result<Self, PixelFormatError> {
        let mut seen = [false; BYTES_PER_PIXEL];
        for &offset in &band_order {
            if offset >= BYTES_PER_PIXEL || seen[offset] {
                return Err(PixelFormatError::BandOrder(band_order.to_vec()));
            }
            seen[offset] = true;
        }
        Ok(Self { band_order })
    }

    pub fn from_config(config: &PixelFormatConfig) -> Result<Self, PixelFormatError> {
        if config.channels as usize != BYTES_PER_PIXEL {
            return Err(PixelFormatError::Channels(config.channels));
        }
        if config.bit_depth != 8 {
            return Err(PixelFormatError::BitDepth(config.bit_depth));
        }
        let band_order: [usize; BYTES_PER_PIXEL] = config
            .band_order
            .as_slice()
            .try_into()
            .map_err(|_| PixelFormatError::BandOrder(config.band_order.clone()))?;
        Self::new(band_order)
    }

    pub fn band_order(&self) -> [usize; BYTES_PER_PIXEL] {
        self.band_order
    }

    /// Read one pixel's bytes into RGBA channel order.
    pub fn unpack(&self, pixel: &[u8]) -> [u8; 4] {
        let [r, g, b, a] = self.band_order;
        [pixel[r], pixel[g], pixel[b], pixel[a]]
    }

    /// Write RGBA channels into one pixel's bytes.
    pub fn pack(&self, rgba: [u8; 4], pixel: &mut [u8]) {
        for (channel, &offset) in rgba.iter().zip(self.band_order.iter()) {
            pixel[offset] = *channel;
        }
    }
}

impl Default for PixelFormat {
    fn default() -> Self {
        Self::HOST_DEFAULT
    }
}
