use std::io;
use std::string::FromUtf8Error;

use derive_more::{Display, Error, From, IsVariant};

use crate::fs::RawOsError;

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("no such file or directory")]
pub struct NotFoundError;

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("not a directory")]
pub struct NotDirError;

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("permission denied")]
pub struct PermissionError;

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("unexpected OS error with code: {_0}")]
pub struct OtherError(#[error(not(source))] pub RawOsError);

/// The error vocabulary shared by every operation in this crate.
///
/// `FsError` is cheap to copy, because a failed directory listing is cached and handed out again
/// on every later request for the same directory.
#[derive(Debug, Display, Error, From, Clone, Copy, PartialEq, Eq, IsVariant)]
pub enum FsError {
    NotFound(NotFoundError),
    NotDir(NotDirError),
    Permission(PermissionError),
    Other(OtherError),
}

impl FsError {
    /// Classifies a raw OS error code, keeping `ENOTDIR` as [`NotDirError`].
    pub fn from_raw_os_error(code: RawOsError) -> FsError {
        match code {
            libc::ENOENT =>                 NotFoundError.into(),
            libc::ENOTDIR =>                NotDirError.into(),
            libc::EACCES | libc::EPERM =>   PermissionError.into(),
            e =>                            OtherError(e).into(),
        }
    }

    /// Classifies a raw OS error code produced while walking a path to open or probe it.
    ///
    /// Some platforms report `ENOTDIR` for a path that simply doesn't exist, and every platform
    /// reports it when an ancestor component is a regular file. Either way nothing exists at that
    /// path, so the error is reported as [`NotFoundError`].
    pub(crate) fn normalized(code: RawOsError) -> FsError {
        match code {
            libc::ENOTDIR => NotFoundError.into(),
            e =>             FsError::from_raw_os_error(e),
        }
    }

    /// Recovers a representative raw OS error code.
    pub const fn raw_os_error(&self) -> RawOsError {
        match self {
            FsError::NotFound(_) =>         libc::ENOENT,
            FsError::NotDir(_) =>           libc::ENOTDIR,
            FsError::Permission(_) =>       libc::EACCES,
            FsError::Other(OtherError(e)) => *e,
        }
    }
}

impl From<FsError> for io::Error {
    fn from(value: FsError) -> Self {
        io::Error::from_raw_os_error(value.raw_os_error())
    }
}

#[derive(Debug, Display, Error, From)]
pub enum ReadStringError {
    Fs(FsError),
    Utf8(FromUtf8Error),
}

mod tests;
