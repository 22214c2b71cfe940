use std::path::Path;

use crate::fs::limit::{OpenLimiter, OpenPermit};
use crate::fs::{FsError, Metadata, syscall};

/// A fingerprint of a file's identity and metadata, for telling whether it changed between two
/// observations.
///
/// Two keys for the same unchanged file compare equal. Writing to the file, touching its
/// modification time, replacing it, or changing its permissions or owner produces a different key.
/// The contents are never read, so this is a cheap change detector and not an integrity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModKey {
    device_id: u64,
    inode_num: u64,
    size: i64,
    mtime_sec: i64,
    mtime_nsec: i64,
    mode: u32,
    uid: u32,
}

impl ModKey {
    pub(crate) const fn from_metadata(metadata: &Metadata) -> ModKey {
        ModKey {
            device_id: metadata.device_id,
            inode_num: metadata.inode_num,
            size: metadata.size,
            mtime_sec: metadata.time_modified.0,
            mtime_nsec: metadata.time_modified.1,
            mode: metadata.mode,
            uid: metadata.uid,
        }
    }
}

/// Computes the [`ModKey`] for `path`, following symlinks. Never cached.
pub(crate) fn mod_key(path: &Path, limiter: &dyn OpenLimiter) -> Result<ModKey, FsError> {
    let stat = {
        let _permit = OpenPermit::acquire(limiter);
        syscall::stat(path)
    };
    let metadata = stat.map_err(FsError::normalized)?;

    Ok(ModKey::from_metadata(&metadata))
}
