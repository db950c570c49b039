use std::ffi::{CString, NulError};
use std::path::Path;
use std::ptr;

use anyhow::{Context, Result};
use libc::{c_char, c_double, c_int, c_uchar, c_uint, c_void};
use libloading::Library;
use tracing::debug;

type InitFn = unsafe extern "C" fn(config: *const c_char, user_data: *mut *mut c_void) -> c_int;
type FrameFn = unsafe extern "C" fn(
    data: *mut c_uchar,
    data_size: c_uint,
    width: c_int,
    height: c_int,
    line_size: c_int,
    ts_millis: c_double,
    user_data: *mut c_void,
) -> c_int;
type UninitFn = unsafe extern "C" fn(user_data: *mut c_void);

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("config text contains a NUL byte: {0}")]
    NulConfig(#[from] NulError),
    #[error("filter_init returned {0}")]
    Init(c_int),
    #[error("frame geometry does not fit the C ABI: {0}")]
    Geometry(String),
}

/// A filter shared library with its three entry points resolved.
///
/// The function pointers are only valid while `_library` stays loaded,
/// which this struct guarantees by owning it.
pub struct FilterLibrary {
    _library: Library,
    init: InitFn,
    frame: FrameFn,
    uninit: UninitFn,
}

impl FilterLibrary {
    pub fn load(path: &Path) -> Result<Self> {
        let library = unsafe {
            Library::new(path)
                .with_context(|| format!("failed to load filter library: {}", path.display()))?
        };

        let (init, frame, uninit) = unsafe {
            let init = *library
                .get::<InitFn>(b"filter_init\0")
                .context("filter library is missing filter_init")?;
            let frame = *library
                .get::<FrameFn>(b"filter_frame\0")
                .context("filter library is missing filter_frame")?;
            let uninit = *library
                .get::<UninitFn>(b"filter_uninit\0")
                .context("filter library is missing filter_uninit")?;
            (init, frame, uninit)
        };

        debug!(path = %path.display(), "filter library loaded");
        Ok(Self {
            _library: library,
            init,
            frame,
            uninit,
        })
    }

    /// Call `filter_init`. The returned session calls `filter_uninit` when
    /// dropped.
    pub fn init(&self, config: &str) -> Result<FilterSession<'_>, HostError> {
        let config = CString::new(config)?;
        let mut user_data: *mut c_void = ptr::null_mut();
        let rv = unsafe { (self.init)(config.as_ptr(), &mut user_data) };
        if rv != 0 {
            return Err(HostError::Init(rv));
        }
        Ok(FilterSession {
            library: self,
            user_data,
        })
    }
}

/// A successfully initialized filter instance.
pub struct FilterSession<'l> {
    library: &'l FilterLibrary,
    user_data: *mut c_void,
}

impl FilterSession<'_> {
    /// Run `filter_frame` over a buffer of `height` rows of `line_size`
    /// bytes. Returns the filter's status code.
    pub fn frame(
        &mut self,
        data: &mut [u8],
        width: u32,
        height: u32,
        line_size: usize,
        ts_millis: f64,
    ) -> Result<c_int, HostError> {
        let to_int = |v: usize, what: &str| {
            c_int::try_from(v).map_err(|_| HostError::Geometry(format!("{what} {v} too large")))
        };
        let width = to_int(width as usize, "width")?;
        let height = to_int(height as usize, "height")?;
        let line_size = to_int(line_size, "line size")?;
        let data_size = c_uint::try_from(data.len())
            .map_err(|_| HostError::Geometry(format!("buffer of {} bytes too large", data.len())))?;

        let rv = unsafe {
            (self.library.frame)(
                data.as_mut_ptr(),
                data_size,
                width,
                height,
                line_size,
                ts_millis,
                self.user_data,
            )
        };
        Ok(rv)
    }
}

impl Drop for FilterSession<'_> {
    fn drop(&mut self) {
        unsafe { (self.library.uninit)(self.user_data) };
        debug!("filter uninitialized");
    }
}
