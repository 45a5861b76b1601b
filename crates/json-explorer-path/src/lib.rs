//! Node path codec.
//!
//! Every addressable location of a JSON document is identified by a path
//! rooted at the literal `root`. Object keys are appended as `.key` and array
//! indices as `[index]`:
//!
//! ```text
//! root                 the document itself
//! root.users           key "users" of the root object
//! root.users[0].name   key "name" of the first element of "users"
//! ```
//!
//! Keys containing reserved characters are escaped: `~` as `~0`, `.` as `~1`,
//! `[` as `~2` and `]` as `~3`. The empty key is written as the whole-segment
//! token `~e`.
//!
//! # Example
//!
//! ```
//! use json_explorer_path::{decode, parent_of, trailing_ancestors, Segment};
//!
//! let path = decode("root.a[1].b").unwrap();
//! assert_eq!(path.segments()[1], Segment::Index(1));
//! assert_eq!(parent_of(&path).unwrap().to_string(), "root.a[1]");
//!
//! let chain: Vec<String> = trailing_ancestors(&path).iter().map(|p| p.to_string()).collect();
//! assert_eq!(chain, vec!["root", "root.a", "root.a[1]", "root.a[1].b"]);
//! ```

use thiserror::Error;

pub mod types;
pub use types::{Path, Segment};


/// The literal first segment of every path.
pub const ROOT: &str = "root";

/// Whole-segment token standing for the empty key.
const EMPTY_KEY: &str = "~e";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("MALFORMED_PATH: {reason} in `{path}`")]
    Malformed { path: String, reason: &'static str },
    #[error("INVALID_PATH")]
    InvalidPath,
}

fn malformed(path: &str, reason: &'static str) -> PathError {
    PathError::Malformed {
        path: path.to_string(),
        reason,
    }
}

/// Escapes an object key for use inside a path.
///
/// # Example
///
/// ```
/// use json_explorer_path::escape_key;
///
/// assert_eq!(escape_key("plain"), "plain");
/// assert_eq!(escape_key("a.b"), "a~1b");
/// assert_eq!(escape_key("x[0]"), "x~20~3");
/// assert_eq!(escape_key(""), "~e");
/// ```
pub fn escape_key(key: &str) -> String {
    if key.is_empty() {
        return EMPTY_KEY.to_string();
    }
    if !key.contains(['~', '.', '[', ']']) {
        return key.to_string();
    }
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        match c {
            '~' => out.push_str("~0"),
            '.' => out.push_str("~1"),
            '[' => out.push_str("~2"),
            ']' => out.push_str("~3"),
            _ => out.push(c),
        }
    }
    out
}

/// Reverses [`escape_key`]. Returns the reason on a bad escape sequence.
pub fn unescape_key(raw: &str) -> Result<String, &'static str> {
    if raw == EMPTY_KEY {
        return Ok(String::new());
    }
    if !raw.contains('~') {
        return Ok(raw.to_string());
    }
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '~' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('0') => out.push('~'),
            Some('1') => out.push('.'),
            Some('2') => out.push('['),
            Some('3') => out.push(']'),
            _ => return Err("invalid escape sequence"),
        }
    }
    Ok(out)
}

/// Encodes one segment with its leading delimiter: `.key` or `[index]`.
///
/// # Example
///
/// ```
/// use json_explorer_path::{encode_segment, Segment};
///
/// assert_eq!(encode_segment(&Segment::Key("name".into())), ".name");
/// assert_eq!(encode_segment(&Segment::Index(3)), "[3]");
/// ```
pub fn encode_segment(segment: &Segment) -> String {
    match segment {
        Segment::Key(key) => format!(".{}", escape_key(key)),
        Segment::Index(idx) => format!("[{idx}]"),
    }
}

/// Formats a path into its canonical string.
pub fn encode(path: &Path) -> String {
    path.to_string()
}

/// Same rules as an RFC 6901 array index: digits only, no leading zero.
fn parse_index(path: &str, raw: &str) -> Result<usize, PathError> {
    if raw.is_empty() {
        return Err(malformed(path, "empty index"));
    }
    let bytes = raw.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return Err(malformed(path, "leading zero in index"));
    }
    if !bytes.iter().all(|b| b.is_ascii_digit()) {
        return Err(malformed(path, "non-numeric index"));
    }
    raw.parse().map_err(|_| malformed(path, "index out of range"))
}

/// Decodes a canonical path string.
///
/// # Errors
///
/// `PathError::Malformed` - missing `root`, empty segment, unbalanced
/// brackets, invalid index or escape. Length and depth are unbounded: every
/// path [`encode`] produces decodes back.
///
/// # Example
///
/// ```
/// use json_explorer_path::{decode, Segment};
///
/// let path = decode("root.list[2]").unwrap();
/// assert_eq!(path.segments(), &[Segment::Key("list".into()), Segment::Index(2)]);
/// assert!(decode("root..a").is_err());
/// assert!(decode("root.a[1").is_err());
/// ```
pub fn decode(input: &str) -> Result<Path, PathError> {
    let rest = input
        .strip_prefix(ROOT)
        .ok_or_else(|| malformed(input, "path must start with `root`"))?;

    let bytes = rest.as_bytes();
    let mut segments = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        match bytes[pos] {
            b'.' => {
                let start = pos + 1;
                let end = rest[start..]
                    .find(['.', '[', ']'])
                    .map_or(rest.len(), |i| start + i);
                if end < rest.len() && bytes[end] == b']' {
                    return Err(malformed(input, "unbalanced `]`"));
                }
                let raw = &rest[start..end];
                if raw.is_empty() {
                    return Err(malformed(input, "empty segment"));
                }
                let key = unescape_key(raw).map_err(|reason| malformed(input, reason))?;
                segments.push(Segment::Key(key));
                pos = end;
            }
            b'[' => {
                let start = pos + 1;
                let end = rest[start..]
                    .find(']')
                    .map(|i| start + i)
                    .ok_or_else(|| malformed(input, "unbalanced `[`"))?;
                segments.push(Segment::Index(parse_index(input, &rest[start..end])?));
                pos = end + 1;
            }
            b']' => return Err(malformed(input, "unbalanced `]`")),
            _ => return Err(malformed(input, "expected `.` or `[`")),
        }
    }
    Ok(Path::from_segments(segments))
}

/// Returns the parent of `path`.
///
/// # Errors
///
/// Returns `PathError::InvalidPath` for the root, which has no parent.
pub fn parent_of(path: &Path) -> Result<Path, PathError> {
    path.parent().ok_or(PathError::InvalidPath)
}

/// Returns the last segment of `path`; the root has none.
pub fn last_segment(path: &Path) -> Result<&Segment, PathError> {
    path.last().ok_or(PathError::InvalidPath)
}

/// Replaces the last segment of `path`, e.g. after a key rename or when a
/// value changes position inside its array.
///
/// # Example
///
/// ```
/// use json_explorer_path::{decode, rewrite_last_segment, Segment};
///
/// let path = decode("root.a.old").unwrap();
/// let renamed = rewrite_last_segment(&path, Segment::Key("new".into())).unwrap();
/// assert_eq!(renamed.to_string(), "root.a.new");
/// ```
pub fn rewrite_last_segment(path: &Path, segment: Segment) -> Result<Path, PathError> {
    let parent = parent_of(path)?;
    Ok(parent.child(segment))
}

/// Every ancestor of `path` from the root down to `path` itself.
pub fn trailing_ancestors(path: &Path) -> Vec<Path> {
    let segments = path.segments();
    (0..=segments.len())
        .map(|len| Path::from_segments(segments[..len].to_vec()))
        .collect()
}
