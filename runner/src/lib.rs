//! Host side of the frame filter C ABI.

pub mod host;
