use std::fmt::{self, Debug, Formatter};
use std::mem::{self, MaybeUninit};
use std::ops::Deref;
use std::path::Path;

use libc::{c_int, stat as Stat};

use crate::fs::{Metadata, RawOsError, syscall};

/// Growth step for reads once the size reported by `fstat` has been exhausted. Files under
/// `/proc` and friends report a size of 0 while still having contents.
const READ_CHUNK: usize = 8 * 1024;

/// An owned file descriptor, closed on drop.
pub(crate) struct Fd(pub c_int);

impl Fd {
    /// Opens `path` read-only. Symlinks are followed.
    ///
    /// The open never waits: a FIFO without a writer opens straight away instead of blocking until
    /// one shows up. Regular files and directories ignore the flag.
    pub fn open_read(path: &Path) -> Result<Fd, RawOsError> {
        let pathname = syscall::c_path(path)?;
        let flags = libc::O_RDONLY | libc::O_NONBLOCK | libc::O_CLOEXEC;

        // SAFETY: pathname is nul-terminated and outlives the call.
        match unsafe { libc::open(pathname.as_ptr(), flags) } {
            -1 => Err(syscall::err_no()),
            fd => Ok(Fd(fd)),
        }
    }

    pub fn metadata(&self) -> Result<Metadata, RawOsError> {
        let mut raw_meta: MaybeUninit<Stat> = MaybeUninit::uninit();
        // SAFETY: self.0 is an open descriptor and raw_meta is valid for writes.
        if unsafe { libc::fstat(self.0, raw_meta.as_mut_ptr()) } == -1 {
            return Err(syscall::err_no());
        }
        // SAFETY: fstat either initializes raw_meta or returns -1, which is handled above.
        let raw = unsafe { raw_meta.assume_init() };

        Ok(Metadata::from_stat(&raw))
    }

    /// Reads from the current offset until end of file.
    ///
    /// The size reported by `fstat` is only a hint. A buffer that can't be allocated fails with
    /// `ENOMEM` rather than aborting.
    pub fn read_to_end(&self) -> Result<Vec<u8>, RawOsError> {
        let size = usize::try_from(self.metadata()?.size).unwrap_or(0);
        let mut buf: Vec<u8> = Vec::new();
        // One spare byte lets the final zero-length read happen without growing the buffer.
        buf.try_reserve_exact(size.saturating_add(1)).map_err(|_| libc::ENOMEM)?;

        loop {
            if buf.len() == buf.capacity() {
                buf.try_reserve(READ_CHUNK).map_err(|_| libc::ENOMEM)?;
            }
            let spare = buf.spare_capacity_mut();

            // SAFETY: spare is valid for writes of spare.len() bytes and read writes no more.
            match unsafe { libc::read(self.0, spare.as_mut_ptr().cast(), spare.len()) } {
                -1 => match syscall::err_no() {
                    libc::EINTR => continue,
                    e => return Err(e),
                },
                0 => return Ok(buf),
                // SAFETY: read initialized exactly count bytes directly after the current length.
                count => unsafe { buf.set_len(buf.len() + count as usize) },
            }
        }
    }

    /// Gives up ownership of the descriptor without closing it.
    pub fn into_raw(self) -> c_int {
        let fd = self.0;
        mem::forget(self);
        fd
    }
}

impl Deref for Fd {
    type Target = c_int;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Drop for Fd {
    fn drop(&mut self) {
        // Only read-only descriptors are held here, so a failed close loses nothing.
        // SAFETY: After this, the file descriptor is invalidated but we are dropping self so it
        // doesn't matter.
        if unsafe { libc::close(self.0) } == -1 {
            tracing::trace!(fd = self.0, errno = syscall::err_no(), "close failed");
        }
    }
}

impl Debug for Fd {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Fd({})", self.0)
    }
}
