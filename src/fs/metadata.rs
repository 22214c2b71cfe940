use libc::stat;

use super::FileType;

/// The subset of `stat` results this crate looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Metadata {
    pub size: i64,                 // st_size
    pub file_type: FileType,       // st_mode
    pub mode: u32,                 // st_mode
    pub uid: u32,                  // st_uid
    pub device_id: u64,            // st_dev
    pub inode_num: u64,            // st_ino
    pub time_modified: (i64, i64), // st_mtime, st_mtime_nsec
}

impl Metadata {
    #[allow(clippy::unnecessary_cast)]
    pub(crate) const fn from_stat(raw: &stat) -> Metadata {
        Metadata {
            size: raw.st_size as i64,
            file_type: FileType::from_stat_mode(raw.st_mode),
            mode: raw.st_mode as u32,
            uid: raw.st_uid as u32,
            device_id: raw.st_dev as u64,
            inode_num: raw.st_ino as u64,
            time_modified: (raw.st_mtime as i64, raw.st_mtime_nsec as i64),
        }
    }
}
