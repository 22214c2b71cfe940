use std::ffi::{CStr, OsStr, OsString};
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::ptr::NonNull;

use crate::fs::limit::{OpenLimiter, OpenPermit};
use crate::fs::{Fd, FsError, RawOsError, syscall};

/// An open directory stream, closed on drop.
pub(crate) struct DirStream(NonNull<libc::DIR>);

impl DirStream {
    /// Turns an open descriptor into a directory stream. Fails with `ENOTDIR` if the descriptor
    /// refers to anything other than a directory.
    pub fn from_fd(fd: Fd) -> Result<DirStream, RawOsError> {
        // SAFETY: fd is an open descriptor owned by us. On success the stream takes over
        // ownership, on failure it is untouched and still ours to close.
        let dir = unsafe { libc::fdopendir(*fd) };
        match NonNull::new(dir) {
            Some(dir) => {
                fd.into_raw();
                Ok(DirStream(dir))
            },
            None => {
                let e = syscall::err_no();
                drop(fd);
                Err(e)
            },
        }
    }

    /// Collects every name in the directory except `.` and `..`.
    pub fn names(&mut self) -> Result<Vec<OsString>, RawOsError> {
        let mut names = Vec::new();

        loop {
            // readdir reports both the end of the stream and failures as null.
            syscall::clear_err_no();
            // SAFETY: self.0 is an open stream that only this value uses.
            let entry = unsafe { libc::readdir(self.0.as_ptr()) };
            if entry.is_null() {
                return match syscall::err_no() {
                    0 => Ok(names),
                    e => Err(e),
                };
            }

            // SAFETY: readdir returned a valid entry whose d_name is nul-terminated. It stays
            // valid until the next readdir call, and the name is copied out before then.
            let name = unsafe { CStr::from_ptr((*entry).d_name.as_ptr()) };
            match name.to_bytes() {
                b"." | b".." => (),
                bytes => names.push(OsStr::from_bytes(bytes).to_owned()),
            }
        }
    }
}

impl Drop for DirStream {
    fn drop(&mut self) {
        // SAFETY: The stream is open and never used again. closedir also closes the descriptor.
        if unsafe { libc::closedir(self.0.as_ptr()) } == -1 {
            tracing::trace!(errno = syscall::err_no(), "closedir failed");
        }
    }
}

/// Reads the names in `dir` with a single open, bracketed by `limiter`.
///
/// `ENOTDIR` while opening means some component of the path isn't a directory, so nothing exists
/// at the path and the error becomes [`NotFoundError`](crate::fs::NotFoundError). `ENOTDIR` while
/// starting the stream means the path itself is a regular file, which is a real
/// [`NotDirError`](crate::fs::NotDirError) and is kept.
pub(crate) fn read_dir_names(dir: &Path, limiter: &dyn OpenLimiter) -> Result<Vec<OsString>, FsError> {
    let _permit = OpenPermit::acquire(limiter);

    let fd = Fd::open_read(dir).map_err(FsError::normalized)?;
    let mut stream = DirStream::from_fd(fd).map_err(FsError::from_raw_os_error)?;
    stream.names().map_err(FsError::from_raw_os_error)
}
