use std::ffi::CString;
use std::fs;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use crate::fs::RealFs;
use crate::util::limit::RecordingLimiter;

/// A scratch directory holding:
///
/// ```text
/// root/
///   a.txt           "alpha"
///   b.js            "beta"
///   sub/
///     c.txt         "gamma"
/// ```
pub struct Tree {
    pub dir: TempDir,
}

impl Tree {
    pub fn new() -> Tree {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        fs::write(dir.path().join("a.txt"), "alpha").expect("a.txt should be written");
        fs::write(dir.path().join("b.js"), "beta").expect("b.js should be written");
        fs::create_dir(dir.path().join("sub")).expect("sub should be created");
        fs::write(dir.path().join("sub/c.txt"), "gamma").expect("c.txt should be written");
        Tree { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Creates a named pipe at `rel` and returns its path.
    pub fn fifo(&self, rel: &str) -> PathBuf {
        let path = self.path(rel);
        let pathname = CString::new(path.as_os_str().as_bytes()).expect("path should have no nul");
        // SAFETY: pathname is nul-terminated and outlives the call.
        assert_eq!(unsafe { libc::mkfifo(pathname.as_ptr(), 0o644) }, 0, "fifo should be created");
        path
    }
}

/// A filesystem whose every open and stat is counted by the returned limiter.
pub fn recorded_fs() -> (RealFs, Arc<RecordingLimiter>) {
    let limiter = Arc::new(RecordingLimiter::default());
    let fs = RealFs::options()
        .shared_limiter(limiter.clone())
        .build();
    (fs, limiter)
}
