//! Directory listings and the lazily-typed entries they contain.
//!
//! Listing a directory costs one OS read. The [`Entry`]s it produces know only their name; whether
//! a name is a file or a directory is left open until [`Entry::kind`] is first called, since some
//! directories hold tens of thousands of names and only a handful are ever looked at.
//!
//! Listings are memoized by [`DirCache`], failures included.

mod cache;
mod entry;
mod stream;

pub use cache::*;
pub use entry::*;
pub(crate) use stream::*;

mod tests;
