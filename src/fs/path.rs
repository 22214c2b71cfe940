//! Stateless, lexical path operations.
//!
//! None of these touch the filesystem, except [`abs`] which reads the process's working directory.
//! Cleaning follows the usual lexical rules: repeated separators and `.` elements are dropped and
//! `..` cancels the element before it where there is one.

use std::env;
use std::ffi::{OsStr, OsString};
use std::os::unix::ffi::OsStrExt;
use std::path::{Component, MAIN_SEPARATOR_STR, Path, PathBuf, is_separator};

use path_clean::PathClean;

const CURRENT_DIR: &str = ".";

pub fn is_abs(path: &Path) -> bool {
    path.is_absolute()
}

/// Makes `path` absolute against the process's working directory and cleans it. Returns `None` if
/// the working directory can't be determined.
pub fn abs(path: &Path) -> Option<PathBuf> {
    if path.is_absolute() {
        return Some(path.clean());
    }

    let cwd = env::current_dir().ok()?;
    Some(cwd.join(path).clean())
}

/// Everything but the last element of `path`, cleaned. A path with no directory part gives `.`
/// and the root is its own directory.
///
/// Trailing separators don't count as an element, so `dir("a/b/")` is `a`, not `a/b` as Go's
/// `filepath.Dir` would have it.
pub fn dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.clean(),
        None if path.has_root() => path.clean(),
        _ => PathBuf::from(CURRENT_DIR),
    }
}

/// The last element of `path`. Trailing separators are ignored, an empty path gives `.` and the
/// root gives the separator.
pub fn base(path: &Path) -> OsString {
    match path.components().next_back() {
        Some(Component::Normal(name)) =>        name.to_owned(),
        Some(Component::ParentDir) =>           OsString::from(".."),
        Some(Component::RootDir) =>             OsString::from(MAIN_SEPARATOR_STR),
        Some(Component::Prefix(prefix)) =>      prefix.as_os_str().to_owned(),
        Some(Component::CurDir) | None =>       OsString::from(CURRENT_DIR),
    }
}

/// The extension of the last element of `path`, including the leading dot. Empty when the last
/// element has no dot.
pub fn ext(path: &Path) -> OsString {
    let bytes = path.as_os_str().as_bytes();

    for (i, &ch) in bytes.iter().enumerate().rev() {
        match ch {
            b'.' => return OsStr::from_bytes(&bytes[i..]).to_owned(),
            ch if is_separator(ch as char) => break,
            _ => (),
        }
    }
    OsString::new()
}

/// Joins every non-empty part with a separator, then cleans the result.
///
/// Unlike [`Path::join`], an absolute part doesn't discard what came before it: `join(["a",
/// "/b"])` is `a/b`. Joining nothing gives `.`.
pub fn join<I, P>(parts: I) -> PathBuf
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut joined = OsString::new();

    for part in parts {
        let part = part.as_ref().as_os_str();
        if part.is_empty() {
            continue;
        }
        if !joined.is_empty() {
            joined.push(MAIN_SEPARATOR_STR);
        }
        joined.push(part);
    }

    PathBuf::from(joined).clean()
}

/// The path that leads from `base` to `target`, so that `join([base, rel(base, target)])` is
/// `target` once cleaned.
///
/// Returns `None` when there is no such path, which is the case when only one of the two is
/// absolute, or when `base` climbs above a relative `target` with `..`. Equal paths give `.`.
pub fn rel(base: &Path, target: &Path) -> Option<PathBuf> {
    if base.is_absolute() != target.is_absolute() {
        return None;
    }

    let relative = pathdiff::diff_paths(target.clean(), base.clean())?;
    if relative.as_os_str().is_empty() {
        Some(PathBuf::from(CURRENT_DIR))
    } else {
        Some(relative)
    }
}
