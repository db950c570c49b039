pub mod canvas;
pub mod error;
pub mod ffi;
pub mod filter;
pub mod logging;
pub mod snapshot;

pub use error::FilterError;
pub use filter::{FrameFilter, LifecycleState, SampleFilter};
