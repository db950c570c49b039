pub mod config;
pub mod frame;
pub mod pixel_format;
