use std::path::Path;

use crate::fs::limit::{OpenLimiter, OpenPermit};
use crate::fs::{Fd, FsError};

/// Reads the whole file at `path`, holding a permit from `limiter` from before the open until
/// after the close.
///
/// Nothing is cached. `ENOTDIR` from the open is reported as
/// [`NotFoundError`](crate::fs::NotFoundError), as it means an ancestor of `path` is a regular
/// file. Reading a directory fails with `EISDIR`, as [`OtherError`](crate::fs::OtherError).
pub(crate) fn read_all(path: &Path, limiter: &dyn OpenLimiter) -> Result<Vec<u8>, FsError> {
    let _permit = OpenPermit::acquire(limiter);

    let fd = Fd::open_read(path).map_err(FsError::normalized)?;
    fd.read_to_end().map_err(FsError::from_raw_os_error)
}
