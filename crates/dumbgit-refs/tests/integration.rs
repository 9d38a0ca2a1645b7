//! Reads on-disk repositories and renders their advertisement

use dumbgit_refs::{format_advertisement, Error, FsRefReader, RefEntry, RefReader, TagSource};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const MAIN: &str = "deadbeef01deadbeef01deadbeef01deadbeef01";
const DEV: &str = "cafebabe02cafebabe02cafebabe02cafebabe02";
const TAG: &str = "0123456789abcdef0123456789abcdef01234567";

fn init_repo(repo: &Path, heads: &[(&str, &str)], tags: &[(&str, &str)]) {
    let heads_dir = repo.join("refs/heads");
    let tags_dir = repo.join("refs/tags");
    fs::create_dir_all(&heads_dir).unwrap();
    fs::create_dir_all(&tags_dir).unwrap();
    for (name, hash) in heads {
        fs::write(heads_dir.join(name), format!("{}\n", hash)).unwrap();
    }
    for (name, hash) in tags {
        fs::write(tags_dir.join(name), format!("{}\n", hash)).unwrap();
    }
}

fn render(refs: &[RefEntry]) -> String {
    String::from_utf8(format_advertisement(refs)).unwrap()
}

#[test]
fn test_branches_without_tags() {
    let dir = tempdir().unwrap();
    init_repo(dir.path(), &[("main", MAIN), ("dev", DEV)], &[]);

    let refs = FsRefReader::default().read_refs(dir.path()).unwrap();
    let body = render(&refs);

    // Listing order is by name
    assert_eq!(body, format!("{DEV}\trefs/heads/dev\n{MAIN}\trefs/heads/main\n"));
}

#[test]
fn test_hash_has_no_trailing_newline() {
    let dir = tempdir().unwrap();
    init_repo(dir.path(), &[("main", MAIN)], &[]);

    let refs = FsRefReader::default().read_refs(dir.path()).unwrap();
    assert_eq!(refs[0].hash, MAIN.as_bytes());
    assert!(!refs[0].hash.ends_with(b"\n"));
}

#[test]
fn test_tag_shares_hash_with_same_named_branch() {
    let dir = tempdir().unwrap();
    init_repo(dir.path(), &[("main", MAIN), ("v1", DEV)], &[("v1", TAG)]);

    let body = render(&FsRefReader::default().read_refs(dir.path()).unwrap());
    assert!(body.contains(&format!("{DEV}\trefs/tags/v1\n")));
    assert!(body.contains(&format!("{DEV}\trefs/tags/v1^{{}}\n")));
    assert!(!body.contains(TAG));
}

#[test]
fn test_tag_hash_from_tags_dir() {
    let dir = tempdir().unwrap();
    init_repo(dir.path(), &[("main", MAIN)], &[("v1", TAG)]);

    let reader = FsRefReader::new(TagSource::Tags);
    let body = render(&reader.read_refs(dir.path()).unwrap());
    assert_eq!(
        body,
        format!("{MAIN}\trefs/heads/main\n{TAG}\trefs/tags/v1\n{TAG}\trefs/tags/v1^{{}}\n")
    );
}

#[test]
fn test_line_counts_match_ref_counts() {
    let dir = tempdir().unwrap();
    let heads = [("a", MAIN), ("b", MAIN), ("c", DEV), ("d", DEV)];
    let tags = [("a", ""), ("c", "")];
    init_repo(dir.path(), &heads, &tags);

    let body = render(&FsRefReader::default().read_refs(dir.path()).unwrap());
    let lines: Vec<&str> = body.trim_end_matches('\n').split('\n').collect();
    assert_eq!(lines.iter().filter(|l| l.contains("\trefs/heads/")).count(), 4);
    assert_eq!(lines.iter().filter(|l| l.contains("\trefs/tags/")).count(), 4);
    assert_eq!(lines.len(), 8);
}

#[test]
fn test_not_a_repository() {
    let dir = tempdir().unwrap();
    match FsRefReader::default().read_refs(&dir.path().join("nope")) {
        Err(Error::HeadsUnreadable { path, .. }) => {
            assert!(path.ends_with("refs/heads"));
        }
        other => panic!("expected HeadsUnreadable, got {:?}", other),
    }
}
