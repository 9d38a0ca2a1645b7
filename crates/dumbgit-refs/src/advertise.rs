//! Plain `info/refs` advertisement for the dumb HTTP transport
//!
//! Format, one ref per line:
//!   <hash>\trefs/heads/<name>
//!   <hash>\trefs/tags/<name>
//!   <hash>\trefs/tags/<name>^{}
//!
//! This is not pkt-line framed; smart-protocol clients never see it.

use crate::refs::{RefEntry, RefKind};

/// Suffix marking the peeled value of a tag
pub const PEELED_SUFFIX: &str = "^{}";

/// Render refs into the body served for `GET <repo>/info/refs`.
///
/// Every tag gets a second `^{}` line carrying the same hash as the tag
/// line itself. Annotated tag objects are never dereferenced.
pub fn format_advertisement(refs: &[RefEntry]) -> Vec<u8> {
    let mut lines: Vec<Vec<u8>> = Vec::with_capacity(refs.len() * 2);

    for entry in refs {
        let mut line = entry.hash.clone();
        line.push(b'\t');
        line.extend_from_slice(&entry.full_name());
        if entry.kind == RefKind::Tag {
            let mut peeled = line.clone();
            peeled.extend_from_slice(PEELED_SUFFIX.as_bytes());
            lines.push(line);
            lines.push(peeled);
        } else {
            lines.push(line);
        }
    }

    let mut body = lines.join(&b'\n');
    body.push(b'\n');
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAIN: &str = "deadbeef01deadbeef01deadbeef01deadbeef01";
    const DEV: &str = "cafebabe02cafebabe02cafebabe02cafebabe02";

    fn render(refs: &[RefEntry]) -> String {
        String::from_utf8(format_advertisement(refs)).unwrap()
    }

    #[test]
    fn test_heads_only() {
        let refs = vec![RefEntry::head(MAIN, "main"), RefEntry::head(DEV, "dev")];
        assert_eq!(
            render(&refs),
            format!("{MAIN}\trefs/heads/main\n{DEV}\trefs/heads/dev\n")
        );
    }

    #[test]
    fn test_tag_gets_peeled_line() {
        let refs = vec![RefEntry::head(MAIN, "main"), RefEntry::tag(DEV, "v1.0")];
        let body = render(&refs);
        let lines: Vec<&str> = body.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], format!("{DEV}\trefs/tags/v1.0"));
        assert_eq!(lines[2], format!("{DEV}\trefs/tags/v1.0^{{}}"));
    }

    #[test]
    fn test_line_counts() {
        let refs = vec![
            RefEntry::head(MAIN, "a"),
            RefEntry::head(MAIN, "b"),
            RefEntry::head(MAIN, "c"),
            RefEntry::tag(DEV, "t1"),
            RefEntry::tag(DEV, "t2"),
        ];
        let body = render(&refs);

        let heads = body.lines().filter(|l| l.contains("\trefs/heads/")).count();
        let tags = body.lines().filter(|l| l.contains("\trefs/tags/")).count();
        assert_eq!(heads, 3);
        assert_eq!(tags, 4);
    }

    #[test]
    fn test_empty() {
        assert_eq!(format_advertisement(&[]), b"\n");
    }

    #[test]
    fn test_raw_bytes_echoed() {
        let refs = vec![RefEntry::tag(&b"\xffab"[..], "v1")];
        assert_eq!(
            format_advertisement(&refs),
            b"\xffab\trefs/tags/v1\n\xffab\trefs/tags/v1^{}\n"
        );
    }
}
