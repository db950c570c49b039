mod sample;
mod traits;

pub use sample::{LifecycleState, SampleFilter};
pub use traits::FrameFilter;
