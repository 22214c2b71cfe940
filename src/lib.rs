//! A caching, lazily-typed view of the real filesystem for build and module resolution tooling.
//!
//! # Purpose
//! Resolvers ask the same questions over and over: what is in this directory, is this name a file
//! or a directory, what does this file contain, has it changed since last time. Asking the OS every
//! time is slow, especially for directories holding tens of thousands of names. This crate answers
//! those questions through a single capability object, [`RealFs`](fs::RealFs), which memoizes
//! directory listings for its whole lifetime and defers per-entry `stat` calls until somebody
//! actually asks for an entry's kind.
//!
//! # Caching
//! The caching policy is deliberately asymmetric:
//! - Directory listings are cached forever, failures included. A directory that couldn't be read
//!   once is treated as unreadable for the remainder of the facade's lifetime.
//! - File contents and modification keys are never cached. Every call goes to the OS.
//! - An [`Entry`](fs::dir::Entry)'s kind is computed once, on first demand. A failed probe is not
//!   remembered, so the caller may try again.
//!
//! # Error Handling
//! All failures are values, never panics. Errors use a small vocabulary of zero-sized types
//! combined into [`FsError`](fs::FsError), with static dispatch through enums rather than boxed
//! trait objects. Platform quirks where "not a directory" really means "does not exist" are folded
//! into [`NotFoundError`](fs::NotFoundError) before they reach the caller, so there is exactly one
//! missing-file condition to check for.
//!
//! # Dependencies
//! The [`fs`] module relies on `libc` for its thin syscall wrappers. Lexical path operations are
//! delegated to `path-clean` and `pathdiff` so that they follow the same rules the platform's own
//! tooling does, and `dunce` handles canonicalization. Logging goes through `tracing`; this crate
//! never installs a subscriber itself.
//!
//! This crate also depends on some derive macros because they're helpful and remove the need for
//! some very repetitive programming.
#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

pub mod fs;

pub(crate) mod util;

pub use fs::{FileSystem, RealFs};
