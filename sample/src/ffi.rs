//! C ABI the host uses to drive a filter loaded from a shared library.
//!
//! ```c
//! int  filter_init(const char *config, void **user_data);
//! int  filter_frame(unsigned char *data, unsigned int data_size,
//!                   int width, int height, int line_size,
//!                   double ts_millis, void *user_data);
//! void filter_uninit(void *user_data);
//! ```
//!
//! Zero means success. `config` is TOML text; an empty string selects the
//! defaults. `user_data` is an opaque handle owned by the host between
//! `filter_init` and `filter_uninit`.

use std::ffi::CStr;
use std::ptr;

use frame_filter_common::config::Config;
use frame_filter_common::frame::Frame;
use libc::{c_char, c_double, c_int, c_uchar, c_uint, c_void};
use tracing::error;

use crate::filter::{FrameFilter, SampleFilter};
use crate::logging::init_logging;

type Handle = Box<dyn FrameFilter>;

/// # Safety
///
/// `config` must be null or a valid NUL-terminated string; `user_data` must
/// point to writable storage for one pointer.
#[no_mangle]
pub unsafe extern "C" fn filter_init(config: *const c_char, user_data: *mut *mut c_void) -> c_int {
    if user_data.is_null() {
        return 1;
    }
    *user_data = ptr::null_mut();

    if config.is_null() {
        error!("got null config");
        return 1;
    }

    let config = match CStr::from_ptr(config).to_str() {
        Ok(text) => match Config::from_toml_str(text) {
            Ok(c) => c,
            Err(e) => {
                error!(error = %e, "invalid config");
                return 1;
            }
        },
        Err(e) => {
            error!(error = %e, "config is not valid UTF-8");
            return 1;
        }
    };

    init_logging(&config.logging.level);

    let mut filter: Handle = Box::new(SampleFilter::new(config));
    if let Err(e) = filter.init() {
        error!(filter = filter.name(), error = %e, "filter init failed");
        return 1;
    }

    *user_data = Box::into_raw(Box::new(filter)) as *mut c_void;
    0
}

/// # Safety
///
/// `data` must be null or valid for reads and writes of `data_size` bytes;
/// `user_data` must be null or a handle produced by [`filter_init`] that has
/// not been passed to [`filter_uninit`].
#[no_mangle]
pub unsafe extern "C" fn filter_frame(
    data: *mut c_uchar,
    data_size: c_uint,
    width: c_int,
    height: c_int,
    line_size: c_int,
    ts_millis: c_double,
    user_data: *mut c_void,
) -> c_int {
    if data.is_null() || width <= 0 || height <= 0 {
        return 0;
    }

    let filter = if user_data.is_null() {
        error!("no user data");
        return 1;
    } else {
        &mut *(user_data as *mut Handle)
    };

    let buf = std::slice::from_raw_parts_mut(data, data_size as usize);
    let frame = match Frame::new(
        buf,
        width as u32,
        height as u32,
        line_size.max(0) as usize,
        ts_millis,
    ) {
        Ok(f) => f,
        Err(e) => {
            error!(error = %e, "rejecting frame");
            return 1;
        }
    };

    // Drawing happens in place, so a returned frame needs no copy back.
    match filter.on_frame(frame) {
        Ok(_) => 0,
        Err(e) => {
            error!(filter = filter.name(), error = %e, "onFrame failed");
            1
        }
    }
}

/// # Safety
///
/// `user_data` must be null or a handle produced by [`filter_init`]; it is
/// invalid after this call.
#[no_mangle]
pub unsafe extern "C" fn filter_uninit(user_data: *mut c_void) {
    if !user_data.is_null() {
        let mut filter = Box::from_raw(user_data as *mut Handle);
        filter.destroy();
    }
}
