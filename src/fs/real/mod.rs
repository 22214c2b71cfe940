//! The operating-system backed [`FileSystem`](crate::fs::FileSystem).
//!
//! # Configuring
//! [`RealFs::new`] captures the current working directory and doesn't limit concurrent opens. Use
//! [`RealFs::options`] to plug in an [`OpenLimiter`](crate::fs::limit::OpenLimiter) or pin the
//! working directory, in the same builder style as [`RealFsOptions`].

mod options;
mod real_fs;

pub use options::*;
pub use real_fs::*;
