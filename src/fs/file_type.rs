use derive_more::IsVariant;
use libc::mode_t;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FileType {
    BlockDevice,
    CharDevice,
    Directory,
    Fifo,
    Symlink,
    Regular,
    Socket,
    Other,
}

use FileType::*;

impl FileType {
    #[inline(always)]
    pub(crate) const fn from_stat_mode(st_mode: mode_t) -> FileType {
        match st_mode & libc::S_IFMT {
            libc::S_IFBLK => BlockDevice,
            libc::S_IFCHR => CharDevice,
            libc::S_IFDIR => Directory,
            libc::S_IFIFO => Fifo,
            libc::S_IFLNK => Symlink,
            libc::S_IFREG => Regular,
            libc::S_IFSOCK => Socket,
            _ => Other,
        }
    }
}

/// What a directory entry turned out to be, once symlinks are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IsVariant)]
pub enum EntryKind {
    File,
    Dir,
    /// Devices, fifos, sockets and anything else that is neither.
    Other,
}

impl From<FileType> for EntryKind {
    fn from(value: FileType) -> Self {
        match value {
            Regular => EntryKind::File,
            Directory => EntryKind::Dir,
            _ => EntryKind::Other,
        }
    }
}
