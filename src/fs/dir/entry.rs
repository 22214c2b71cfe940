use std::ffi::{OsStr, OsString};
use std::fmt::{self, Debug, Formatter};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::trace;

use crate::fs::limit::{OpenLimiter, OpenPermit};
use crate::fs::{EntryKind, FsError, syscall};

/// One name inside one directory, with its kind resolved on demand.
///
/// Entries are created by directory listings without touching the entry itself. The first call to
/// [`kind`](Entry::kind) stats the entry (following symlinks) and remembers the answer for the
/// lifetime of the entry. A failed stat isn't remembered.
pub struct Entry {
    dir: Arc<Path>,
    base: OsString,
    kind: Mutex<Option<EntryKind>>,
    limiter: Arc<dyn OpenLimiter>,
}

impl Entry {
    pub(crate) fn new(dir: Arc<Path>, base: OsString, limiter: Arc<dyn OpenLimiter>) -> Entry {
        Entry {
            dir,
            base,
            kind: Mutex::new(None),
            limiter,
        }
    }

    /// The directory this entry was listed from, exactly as it was passed to the listing.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn base(&self) -> &OsStr {
        &self.base
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.base)
    }

    /// Returns whether this entry is a file, a directory or something else.
    ///
    /// Symlinks report the kind of whatever they point at. Only the first successful call touches
    /// the filesystem. Concurrent first calls wait for each other rather than probing twice.
    pub fn kind(&self) -> Result<EntryKind, FsError> {
        let mut kind = self.kind.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(kind) = *kind {
            return Ok(kind);
        }

        let path = self.path();
        let stat = {
            let _permit = OpenPermit::acquire(&*self.limiter);
            syscall::stat(&path)
        };
        let metadata = stat.map_err(FsError::normalized)?;

        let resolved = EntryKind::from(metadata.file_type);
        trace!(path = %path.display(), kind = ?resolved, "resolved entry kind");
        *kind = Some(resolved);
        Ok(resolved)
    }

    /// The kind, if a previous call to [`kind`](Entry::kind) already resolved it.
    pub fn cached_kind(&self) -> Option<EntryKind> {
        *self.kind.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Debug for Entry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("dir", &self.dir)
            .field("base", &self.base)
            .field("kind", &self.cached_kind())
            .finish()
    }
}
