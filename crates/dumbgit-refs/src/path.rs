//! URL path handling for `info/refs` requests
//!
//! Paths arrive percent-encoded. They are decoded, then cleaned, then
//! matched, so `/my%20repo/info/refs` addresses the `my repo` directory.

use percent_encoding::percent_decode_str;
use std::path::{Path, PathBuf};

const INFO_REFS_SUFFIX: &str = "/info/refs";

/// Lexically clean a slash-separated path.
///
/// Repeated slashes collapse, `.` segments are dropped and `..` removes the
/// preceding segment. A rooted path never climbs above `/`. An empty
/// relative result becomes `.`.
pub fn clean(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last().copied() {
                Some(last) if last != ".." => {
                    segments.pop();
                }
                _ if rooted => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    if rooted {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Repository part of an `info/refs` request path.
///
/// The request path is cleaned as a rooted path first, then matched
/// against `/<anything>/info/refs`. Returns the cleaned repository path
/// (still rooted), or `None` when the request is not an advertisement
/// request.
pub fn info_refs_repo(url_path: &str) -> Option<String> {
    let cleaned = if url_path.starts_with('/') {
        clean(url_path)
    } else {
        clean(&format!("/{url_path}"))
    };

    let repo = cleaned.strip_suffix(INFO_REFS_SUFFIX)?;
    if repo.starts_with('/') {
        Some(repo.to_string())
    } else {
        None
    }
}

/// Directory of the repository addressed by a decoded `info/refs` request
/// path, always located inside `root`
pub fn resolve_repo(root: &Path, url_path: &str) -> Option<PathBuf> {
    let repo = info_refs_repo(url_path)?;
    Some(root.join(repo.trim_start_matches('/')))
}

/// Percent-decode a request path. `None` when the bytes are not UTF-8.
pub fn decode(raw_path: &str) -> Option<String> {
    percent_decode_str(raw_path)
        .decode_utf8()
        .ok()
        .map(|path| path.into_owned())
}

/// What an incoming request path means for the `info/refs` shim
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefsTarget {
    /// Not an advertisement request
    Other,
    /// Advertisement request for the repository at this directory
    Repo(PathBuf),
    /// Advertisement request whose path does not decode to UTF-8
    Undecodable,
}

/// Classify a raw (still percent-encoded) request path
pub fn refs_target(root: &Path, raw_path: &str) -> RefsTarget {
    match decode(raw_path) {
        Some(path) => match resolve_repo(root, &path) {
            Some(repo) => RefsTarget::Repo(repo),
            None => RefsTarget::Other,
        },
        None => {
            let lossy = percent_decode_str(raw_path).decode_utf8_lossy();
            if info_refs_repo(&lossy).is_some() {
                RefsTarget::Undecodable
            } else {
                RefsTarget::Other
            }
        }
    }
}
