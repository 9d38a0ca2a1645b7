//! Git references read straight from a repository directory
//!
//! Only loose refs are considered:
//! - refs/heads/* - branches
//! - refs/tags/* - tags
//!
//! Each ref file holds a commit id followed by a newline. Packed refs, HEAD
//! and symbolic refs are not looked at.

use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;
use tracing::trace;

use crate::{Error, Result};

/// Common ref constants
pub const REFS_HEADS: &str = "refs/heads";
pub const REFS_TAGS: &str = "refs/tags";

/// Which namespace a ref lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    Head,
    Tag,
}

impl RefKind {
    /// Directory holding refs of this kind, relative to the repository root
    pub fn dir(&self) -> &'static str {
        match self {
            RefKind::Head => REFS_HEADS,
            RefKind::Tag => REFS_TAGS,
        }
    }
}

/// Where tag hashes are looked up.
///
/// `Heads` reproduces the long-standing behaviour of resolving a tag named
/// `v1` through `refs/heads/v1`. Tags without a same-named branch then fail
/// to resolve and the request answers 404. `Tags` reads `refs/tags/v1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagSource {
    #[default]
    Heads,
    Tags,
}

/// A single ref and the hash its file contains
///
/// Both fields keep the raw bytes found on disk, so whatever a ref file or
/// file name holds is echoed verbatim in the advertisement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefEntry {
    /// Trimmed file contents. Not validated as a 40-char hex id.
    pub hash: Vec<u8>,
    /// Base name of the ref file
    pub name: OsString,
    pub kind: RefKind,
}

impl RefEntry {
    pub fn new(hash: impl Into<Vec<u8>>, name: impl Into<OsString>, kind: RefKind) -> Self {
        Self {
            hash: hash.into(),
            name: name.into(),
            kind,
        }
    }

    pub fn head(hash: impl Into<Vec<u8>>, name: impl Into<OsString>) -> Self {
        Self::new(hash, name, RefKind::Head)
    }

    pub fn tag(hash: impl Into<Vec<u8>>, name: impl Into<OsString>) -> Self {
        Self::new(hash, name, RefKind::Tag)
    }

    /// Full ref name, e.g. `refs/heads/main`
    pub fn full_name(&self) -> Vec<u8> {
        let mut full = Vec::with_capacity(self.kind.dir().len() + 1 + self.name.len());
        full.extend_from_slice(self.kind.dir().as_bytes());
        full.push(b'/');
        full.extend_from_slice(self.name.as_encoded_bytes());
        full
    }
}

/// Strip exactly one trailing newline from ref file contents
pub fn trim_hash(contents: &[u8]) -> Vec<u8> {
    contents.strip_suffix(b"\n").unwrap_or(contents).to_vec()
}

/// Source of refs for a repository
pub trait RefReader: Send + Sync {
    /// Collect every branch, then every tag, of the repository at `repo`
    fn read_refs(&self, repo: &Path) -> Result<Vec<RefEntry>>;
}

/// Reads loose refs from the filesystem on every call
#[derive(Debug, Clone, Copy, Default)]
pub struct FsRefReader {
    tag_source: TagSource,
}

impl FsRefReader {
    pub fn new(tag_source: TagSource) -> Self {
        Self { tag_source }
    }
}

impl RefReader for FsRefReader {
    fn read_refs(&self, repo: &Path) -> Result<Vec<RefEntry>> {
        let heads_dir = repo.join(REFS_HEADS);
        let heads = list_names(&heads_dir).map_err(|source| Error::HeadsUnreadable {
            path: heads_dir.clone(),
            source,
        })?;

        let mut entries = Vec::with_capacity(heads.len());
        for name in heads {
            let hash = read_ref_file(&heads_dir.join(&name))?;
            entries.push(RefEntry::head(hash, name));
        }

        let tags_dir = repo.join(REFS_TAGS);
        let tags = list_names(&tags_dir).map_err(|source| Error::TagsUnreadable {
            path: tags_dir.clone(),
            source,
        })?;

        let lookup_dir = match self.tag_source {
            TagSource::Heads => &heads_dir,
            TagSource::Tags => &tags_dir,
        };
        for name in tags {
            let hash = read_ref_file(&lookup_dir.join(&name))?;
            entries.push(RefEntry::tag(hash, name));
        }

        trace!("Read {} refs from {}", entries.len(), repo.display());
        Ok(entries)
    }
}

/// Entry names of a directory, sorted by name
fn list_names(dir: &Path) -> io::Result<Vec<OsString>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        names.push(entry?.file_name());
    }
    names.sort();
    Ok(names)
}

fn read_ref_file(path: &Path) -> Result<Vec<u8>> {
    let contents = fs::read(path).map_err(|source| Error::RefUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(trim_hash(&contents))
}
