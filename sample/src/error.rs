use std::path::PathBuf;

use frame_filter_common::frame::FrameError;
use frame_filter_common::pixel_format::PixelFormatError;

use crate::canvas::DrawError;
use crate::filter::LifecycleState;

#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("unsupported pixel format: {0}")]
    PixelFormat(#[from] PixelFormatError),
    #[error("drawing setup failed: {0}")]
    Draw(#[from] DrawError),
    #[error("frame delivered while filter is {0:?}")]
    NotInitialized(LifecycleState),
    #[error("invalid frame: {0}")]
    Frame(#[from] FrameError),
    #[error("failed to write PNG snapshot to {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
