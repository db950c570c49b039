use std::path::{Path, PathBuf};

use image::ImageFormat;
use tracing::info;

use crate::canvas::RasterView;
use crate::error::FilterError;

/// Encode the view as PNG with codec defaults and write it to `path`,
/// replacing any existing file. Relative paths resolve against the working
/// directory. Returns the absolute path written.
pub fn write_png(view: &RasterView<'_>, path: &Path) -> Result<PathBuf, FilterError> {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    info!(path = %absolute.display(), "saving PNG of frame");

    view.to_rgba_image()
        .save_with_format(&absolute, ImageFormat::Png)
        .map_err(|source| FilterError::Encode {
            path: absolute.clone(),
            source,
        })?;

    Ok(absolute)
}
