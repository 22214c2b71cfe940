use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use tracing::{debug, trace};

use super::{Entry, read_dir_names};
use crate::fs::FsError;
use crate::fs::limit::OpenLimiter;

/// The names in one directory, mapped to their entries. Iteration order carries no meaning.
pub type DirEntries = HashMap<OsString, Arc<Entry>>;

/// The remembered outcome of listing one directory: its entries, or the error that prevented
/// listing it, in which case the entries are empty.
#[derive(Debug, Clone)]
pub struct DirListing {
    entries: Arc<DirEntries>,
    error: Option<FsError>,
}

impl DirListing {
    pub fn entries(&self) -> &Arc<DirEntries> {
        &self.entries
    }

    pub const fn error(&self) -> Option<FsError> {
        self.error
    }

    pub fn to_result(&self) -> Result<Arc<DirEntries>, FsError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(Arc::clone(&self.entries)),
        }
    }
}

/// Memoizes directory listings by path, for as long as the cache lives.
///
/// There is no invalidation. A directory that fails to list is remembered as failed, and asking
/// again returns the same error without going back to the OS.
///
/// Each path gets its own once-cell, so concurrent first requests for one directory share a single
/// OS read while requests for other directories carry on unblocked.
#[derive(Debug, Default)]
pub struct DirCache {
    listings: Mutex<HashMap<PathBuf, Arc<OnceLock<DirListing>>>>,
}

impl DirCache {
    pub fn new() -> DirCache {
        DirCache::default()
    }

    /// Returns the listing for `dir`, reading it through `limiter` if it hasn't been seen before.
    pub fn get_or_list(&self, dir: &Path, limiter: &Arc<dyn OpenLimiter>) -> DirListing {
        let slot = {
            let mut listings = self.listings.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(listings.entry(dir.to_path_buf()).or_default())
        };

        slot.get_or_init(|| list(dir, limiter)).clone()
    }

    /// The number of directories seen so far, whether they listed successfully or not.
    pub fn len(&self) -> usize {
        self.listings.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn list(dir: &Path, limiter: &Arc<dyn OpenLimiter>) -> DirListing {
    trace!(dir = %dir.display(), "listing directory");

    match read_dir_names(dir, &**limiter) {
        Ok(names) => {
            let shared_dir: Arc<Path> = Arc::from(dir);
            // No stat here. Kinds are resolved per entry, on demand.
            let entries: DirEntries = names.into_iter()
                .map(|name| {
                    let entry = Entry::new(Arc::clone(&shared_dir), name.clone(), Arc::clone(limiter));
                    (name, Arc::new(entry))
                })
                .collect();

            DirListing {
                entries: Arc::new(entries),
                error: None,
            }
        },
        Err(error) => {
            debug!(dir = %dir.display(), %error, "directory listing failed, caching failure");
            DirListing {
                entries: Arc::default(),
                error: Some(error),
            }
        },
    }
}
