use std::ffi::CString;
use std::io;
use std::mem::MaybeUninit;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use libc::{c_int, stat as Stat};

use crate::fs::Metadata;

/// A raw OS error code, as found in `errno`.
pub type RawOsError = i32;

pub(crate) fn err_no() -> RawOsError {
    // SAFETY: raw_os_error guarantees Some if constructed from last_os_error.
    unsafe { io::Error::last_os_error().raw_os_error().unwrap_unchecked() }
}

/// Clears `errno`, for calls like `readdir` that only signal failure through it.
pub(crate) fn clear_err_no() {
    // SAFETY: The errno location is valid and thread-local for the lifetime of the calling thread.
    unsafe { *errno_location() = 0 };
}

#[cfg(any(target_os = "linux", target_os = "emscripten", target_os = "redox"))]
unsafe fn errno_location() -> *mut c_int {
    // SAFETY: Always returns a valid pointer to the calling thread's errno.
    unsafe { libc::__errno_location() }
}

#[cfg(any(
    target_os = "macos",
    target_os = "ios",
    target_os = "tvos",
    target_os = "watchos",
    target_os = "freebsd",
    target_os = "dragonfly",
))]
unsafe fn errno_location() -> *mut c_int {
    // SAFETY: Always returns a valid pointer to the calling thread's errno.
    unsafe { libc::__error() }
}

#[cfg(any(target_os = "android", target_os = "netbsd", target_os = "openbsd"))]
unsafe fn errno_location() -> *mut c_int {
    // SAFETY: Always returns a valid pointer to the calling thread's errno.
    unsafe { libc::__errno() }
}

/// Converts a path into the nul-terminated form expected by libc. Paths containing an interior nul
/// can't name anything on disk.
pub(crate) fn c_path(path: &Path) -> Result<CString, RawOsError> {
    CString::new(path.as_os_str().as_bytes()).map_err(|_| libc::EINVAL)
}

/// Retrieves the metadata for the file at `path`, following symlinks.
pub(crate) fn stat(path: &Path) -> Result<Metadata, RawOsError> {
    let pathname = c_path(path)?;

    let mut raw_meta: MaybeUninit<Stat> = MaybeUninit::uninit();
    // SAFETY: pathname is nul-terminated and outlives the call, raw_meta is valid for writes.
    if unsafe { libc::stat(pathname.as_ptr(), raw_meta.as_mut_ptr()) } == -1 {
        return Err(err_no());
    }
    // SAFETY: stat either initializes raw_meta or returns -1, which is handled above.
    let raw = unsafe { raw_meta.assume_init() };

    Ok(Metadata::from_stat(&raw))
}
