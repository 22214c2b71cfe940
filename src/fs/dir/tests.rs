#![cfg(test)]

use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::os::unix::fs::symlink;
use std::os::unix::net::UnixListener;
use std::path::Path;
use std::sync::Arc;
use std::thread;

use super::*;
use crate::fs::limit::OpenLimiter;
use crate::fs::{EntryKind, FsError, NotDirError, NotFoundError};
use crate::util::limit::RecordingLimiter;
use crate::util::tree::Tree;

fn recording() -> (Arc<RecordingLimiter>, Arc<dyn OpenLimiter>) {
    let limiter = Arc::new(RecordingLimiter::default());
    let shared: Arc<dyn OpenLimiter> = limiter.clone();
    (limiter, shared)
}

fn names(entries: &DirEntries) -> HashSet<OsString> {
    entries.keys().cloned().collect()
}

#[test_log::test]
fn test_read_dir_names_skips_dots() {
    let tree = Tree::new();
    let (_, limiter) = recording();

    let found: HashSet<_> = read_dir_names(tree.root(), &*limiter)
        .expect("root should list")
        .into_iter()
        .collect();
    assert_eq!(
        found,
        HashSet::from([OsString::from("a.txt"), OsString::from("b.js"), OsString::from("sub")]),
        "Listing should contain every name except . and .."
    );
}

#[test_log::test]
fn test_read_dir_names_errors() {
    let tree = Tree::new();
    let (_, limiter) = recording();

    assert_eq!(
        read_dir_names(&tree.path("missing"), &*limiter),
        Err(FsError::from(NotFoundError))
    );
    assert_eq!(
        read_dir_names(&tree.path("a.txt"), &*limiter),
        Err(FsError::from(NotDirError)),
        "Listing a regular file should report that it isn't a directory."
    );
    assert_eq!(
        read_dir_names(&tree.path("a.txt/inner"), &*limiter),
        Err(FsError::from(NotFoundError)),
        "A regular file in the middle of the path means nothing exists there."
    );
}

#[test_log::test]
fn test_cache_lists_once() {
    let tree = Tree::new();
    let (recorder, limiter) = recording();
    let cache = DirCache::new();

    let first = cache.get_or_list(tree.root(), &limiter);
    let second = cache.get_or_list(tree.root(), &limiter);

    assert_eq!(recorder.acquired(), 1, "Second listing should be served from the cache.");
    assert!(first.error().is_none() && second.error().is_none());
    assert_eq!(names(first.entries()), names(second.entries()));
    assert!(
        Arc::ptr_eq(first.entries(), second.entries()),
        "The cached entries themselves should be handed out again."
    );
    assert_eq!(cache.len(), 1);
}

#[test_log::test]
fn test_cache_remembers_failure() {
    let tree = Tree::new();
    let (recorder, limiter) = recording();
    let cache = DirCache::new();
    let missing = tree.path("later");

    let first = cache.get_or_list(&missing, &limiter);
    assert_eq!(first.error(), Some(FsError::from(NotFoundError)));
    assert!(first.entries().is_empty(), "A failed listing should have no entries.");

    // Even once the directory exists, the cached failure stands.
    fs::create_dir(&missing).expect("directory should be created");
    let second = cache.get_or_list(&missing, &limiter);

    assert_eq!(second.error(), first.error());
    assert!(second.entries().is_empty());
    assert!(second.to_result().is_err());
    assert_eq!(recorder.acquired(), 1, "A failed listing shouldn't be retried.");
}

#[test_log::test]
fn test_listing_doesnt_stat_entries() {
    let tree = Tree::new();
    let (recorder, limiter) = recording();
    let cache = DirCache::new();

    let listing = cache.get_or_list(tree.root(), &limiter);
    assert_eq!(recorder.acquired(), 1, "Only the listing itself should touch the OS.");
    assert!(
        listing.entries().values().all(|entry| entry.cached_kind().is_none()),
        "No entry should have a kind before it is asked for."
    );
}

#[test_log::test]
fn test_entry_kind_probes_once() {
    let tree = Tree::new();
    let (recorder, limiter) = recording();
    let cache = DirCache::new();

    let entries = cache.get_or_list(tree.root(), &limiter).to_result().expect("root should list");
    let sub = &entries[&OsString::from("sub")];
    let file = &entries[&OsString::from("a.txt")];

    assert_eq!(sub.kind(), Ok(EntryKind::Dir));
    assert_eq!(sub.kind(), Ok(EntryKind::Dir));
    assert_eq!(recorder.acquired(), 2, "One listing, then one stat for the first kind query.");

    assert_eq!(file.kind(), Ok(EntryKind::File));
    assert_eq!(file.cached_kind(), Some(EntryKind::File));
    assert_eq!(recorder.acquired(), 3);
    assert_eq!(recorder.released(), recorder.acquired());

    assert_eq!(sub.dir(), tree.root());
    assert_eq!(sub.base(), "sub");
    assert_eq!(sub.path(), tree.path("sub"));
}

#[test_log::test]
fn test_entry_kind_survives_changes() {
    let tree = Tree::new();
    let (_, limiter) = recording();
    let cache = DirCache::new();

    let entries = cache.get_or_list(tree.root(), &limiter).to_result().expect("root should list");
    let entry = &entries[&OsString::from("a.txt")];
    assert_eq!(entry.kind(), Ok(EntryKind::File));

    fs::remove_file(tree.path("a.txt")).expect("file should be removed");
    fs::create_dir(tree.path("a.txt")).expect("directory should be created");
    assert_eq!(
        entry.kind(),
        Ok(EntryKind::File),
        "Once resolved, an entry's kind never changes."
    );
}

#[test_log::test]
fn test_entry_failure_not_cached() {
    let tree = Tree::new();
    let (recorder, limiter) = recording();
    let cache = DirCache::new();

    let entries = cache.get_or_list(tree.root(), &limiter).to_result().expect("root should list");
    let entry = &entries[&OsString::from("b.js")];

    fs::remove_file(tree.path("b.js")).expect("file should be removed");
    assert_eq!(entry.kind(), Err(FsError::from(NotFoundError)));
    assert_eq!(entry.cached_kind(), None, "A failed probe shouldn't be remembered.");

    fs::create_dir(tree.path("b.js")).expect("directory should be created");
    assert_eq!(entry.kind(), Ok(EntryKind::Dir), "The next query should probe again.");
    assert_eq!(recorder.acquired(), 3);
}

#[test_log::test]
fn test_entry_follows_symlinks() {
    let tree = Tree::new();
    symlink(tree.path("sub"), tree.path("to_sub")).expect("symlink should be created");
    symlink(tree.path("a.txt"), tree.path("to_a")).expect("symlink should be created");
    symlink(tree.path("nowhere"), tree.path("dangling")).expect("symlink should be created");
    let (_, limiter) = recording();
    let cache = DirCache::new();

    let entries = cache.get_or_list(tree.root(), &limiter).to_result().expect("root should list");
    assert_eq!(entries[&OsString::from("to_sub")].kind(), Ok(EntryKind::Dir));
    assert_eq!(entries[&OsString::from("to_a")].kind(), Ok(EntryKind::File));
    assert_eq!(
        entries[&OsString::from("dangling")].kind(),
        Err(FsError::from(NotFoundError)),
        "A dangling symlink has nothing to classify."
    );
}

#[test_log::test]
fn test_entry_kind_other() {
    let tree = Tree::new();
    tree.fifo("pipe");
    let _socket = UnixListener::bind(tree.path("sock")).expect("socket should be bound");
    symlink(tree.path("pipe"), tree.path("to_pipe")).expect("symlink should be created");
    let (_, limiter) = recording();
    let cache = DirCache::new();

    let entries = cache.get_or_list(tree.root(), &limiter).to_result().expect("root should list");
    assert_eq!(entries[&OsString::from("pipe")].kind(), Ok(EntryKind::Other));
    assert_eq!(entries[&OsString::from("sock")].kind(), Ok(EntryKind::Other));
    assert_eq!(
        entries[&OsString::from("to_pipe")].kind(),
        Ok(EntryKind::Other),
        "A symlink to a pipe should report the pipe."
    );
}

#[test_log::test]
fn test_concurrent_first_access() {
    let tree = Tree::new();
    let (recorder, limiter) = recording();
    let cache = DirCache::new();
    let root: &Path = tree.root();

    thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                let entries = cache.get_or_list(root, &limiter).to_result().expect("root should list");
                assert_eq!(entries[&OsString::from("sub")].kind(), Ok(EntryKind::Dir));
            });
        }
    });

    assert_eq!(
        recorder.acquired(),
        2,
        "Concurrent callers should share one listing and one stat."
    );
}
