use std::fmt::{self, Debug, Formatter};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::RealFsOptions;
use crate::fs::dir::{DirCache, DirEntries, DirListing};
use crate::fs::limit::OpenLimiter;
use crate::fs::{FileSystem, FsError, ModKey, ReadStringError, file, mod_key};

/// The filesystem as the operating system sees it, with directory listings memoized.
///
/// A `RealFs` is meant to live for one build. Nothing it caches is ever invalidated, so changes
/// made to directories after they were listed won't be seen through the same instance.
pub struct RealFs {
    pub(crate) listings: DirCache,
    pub(crate) cwd: PathBuf,
    pub(crate) limiter: Arc<dyn OpenLimiter>,
}

impl RealFs {
    /// Creates a filesystem with the default options.
    pub fn new() -> RealFs {
        RealFs::options().build()
    }

    pub fn options() -> RealFsOptions {
        RealFsOptions::new()
    }

    /// The remembered outcome of listing `dir`, listing it first if needed. Unlike
    /// [`read_directory`](FileSystem::read_directory), this hands back the (empty) entries
    /// alongside any error.
    pub fn dir_listing(&self, dir: &Path) -> DirListing {
        self.listings.get_or_list(dir, &self.limiter)
    }

    /// Reads the file at `path` as UTF-8 text.
    pub fn read_file_to_string(&self, path: &Path) -> Result<String, ReadStringError> {
        Ok(String::from_utf8(self.read_file(path)?)?)
    }

    /// The number of distinct directories listed so far, failed ones included.
    pub fn cached_dirs(&self) -> usize {
        self.listings.len()
    }

    pub fn limiter(&self) -> &Arc<dyn OpenLimiter> {
        &self.limiter
    }
}

impl FileSystem for RealFs {
    fn read_directory(&self, dir: &Path) -> Result<Arc<DirEntries>, FsError> {
        self.dir_listing(dir).to_result()
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>, FsError> {
        file::read_all(path, &*self.limiter)
    }

    fn mod_key(&self, path: &Path) -> Result<ModKey, FsError> {
        mod_key::mod_key(path, &*self.limiter)
    }

    fn cwd(&self) -> &Path {
        &self.cwd
    }
}

impl Default for RealFs {
    fn default() -> Self {
        RealFs::new()
    }
}

impl Debug for RealFs {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RealFs")
            .field("cwd", &self.cwd)
            .field("cached_dirs", &self.cached_dirs())
            .finish_non_exhaustive()
    }
}
