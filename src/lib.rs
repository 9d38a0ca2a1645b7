pub mod config;
pub mod server;

pub use config::{Config, RefsConfig, TagsErrorPolicy};
pub use dumbgit_refs::{FsRefReader, RefEntry, RefKind, RefReader, TagSource};
pub use server::DumbGitServer;
