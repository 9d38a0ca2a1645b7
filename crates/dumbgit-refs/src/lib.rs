//! Dumb git HTTP transport support for dumbgit
//!
//! Reads a repository's `refs/heads` and `refs/tags` directories straight off
//! disk and renders them in the plain `info/refs` format that a git client
//! expects when fetching over the dumb protocol.

pub mod advertise;
pub mod error;
pub mod path;
pub mod refs;

pub use advertise::format_advertisement;
pub use error::{Error, Result};
pub use refs::{FsRefReader, RefEntry, RefKind, RefReader, TagSource};
