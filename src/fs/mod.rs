#![cfg(unix)]

pub mod dir;
pub mod limit;
pub mod path;

mod error;
mod fd;
mod file;
mod file_type;
mod fs;
mod metadata;
mod mod_key;
mod real;
mod syscall;

pub use error::*;
pub use file_type::EntryKind;
pub use fs::*;
pub use mod_key::ModKey;
pub use real::*;
pub use syscall::RawOsError;

pub(crate) use fd::*;
pub(crate) use file_type::FileType;
pub(crate) use metadata::*;
