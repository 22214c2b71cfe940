use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::fs::dir::DirEntries;
use crate::fs::{FsError, ModKey, path};

/// The filesystem capability handed to resolvers and bundlers.
///
/// [`RealFs`](crate::fs::RealFs) is the implementation backed by the operating system. The path
/// helpers have default implementations that defer to [`fs::path`](crate::fs::path), so other
/// implementations only need to supply the first four methods.
pub trait FileSystem: Send + Sync {
    /// Lists `dir`. The outcome, success or failure, is remembered for the lifetime of `self`.
    fn read_directory(&self, dir: &Path) -> Result<Arc<DirEntries>, FsError>;

    /// Reads the whole file at `path`. Never cached.
    fn read_file(&self, path: &Path) -> Result<Vec<u8>, FsError>;

    /// Fingerprints the file at `path` for change detection. Never cached.
    fn mod_key(&self, path: &Path) -> Result<ModKey, FsError>;

    /// The working directory captured when `self` was created, with symlinks resolved where
    /// possible.
    fn cwd(&self) -> &Path;

    fn is_abs(&self, path: &Path) -> bool {
        path::is_abs(path)
    }

    fn abs(&self, path: &Path) -> Option<PathBuf> {
        path::abs(path)
    }

    fn dir(&self, path: &Path) -> PathBuf {
        path::dir(path)
    }

    fn base(&self, path: &Path) -> OsString {
        path::base(path)
    }

    fn ext(&self, path: &Path) -> OsString {
        path::ext(path)
    }

    fn join(&self, parts: &[&Path]) -> PathBuf {
        path::join(parts)
    }

    fn rel(&self, base: &Path, target: &Path) -> Option<PathBuf> {
        path::rel(base, target)
    }
}
