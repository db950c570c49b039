use frame_filter_common::frame::Frame;

use crate::error::FilterError;

/// Host-facing filter interface.
///
/// The host calls `init` once, then `on_frame` once per frame in order and
/// never concurrently, then `destroy` once. Implementations receive the
/// frame buffer by mutable borrow and may draw into it in place.
pub trait FrameFilter: Send {
    /// One-time setup. An error aborts loading the filter.
    fn init(&mut self) -> Result<(), FilterError>;

    /// Returns the frame (possibly modified) for the host to use, or `None`
    /// when the frame was left untouched and may be passed on as is.
    fn on_frame<'a>(&mut self, frame: Frame<'a>) -> Result<Option<Frame<'a>>, FilterError>;

    /// Release whatever `init` acquired.
    fn destroy(&mut self);

    /// Human-readable name for logging.
    fn name(&self) -> &str {
        "unnamed"
    }
}
