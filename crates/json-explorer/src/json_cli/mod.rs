//! `json-cli` - logic behind the `json-tree` binary.
//!
//! - `tree_lines`  - one serialized [`Node`] per line for a document or subtree
//! - `lookup_path` - the value at a path, pretty-printed (`--value`)
//! - `run`         - argument dispatch between the two

use serde_json::Value;
use thiserror::Error;

use json_explorer_path::{Path, PathError};

use crate::accessor::{get, inspect, AccessError};
use crate::node::Node;
use crate::tree::flatten;

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Path(#[from] PathError),
    #[error("{0}")]
    Access(#[from] AccessError),
    #[error("Invalid depth: {0}")]
    Depth(String),
    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),
}

/// Parse a depth argument. `*` or `all` means unbounded.
pub fn parse_depth(raw: &str) -> Result<Option<usize>, CliError> {
    match raw {
        "*" | "all" => Ok(None),
        _ => raw
            .parse::<usize>()
            .map(Some)
            .map_err(|_| CliError::Depth(raw.to_string())),
    }
}

fn parse_path(raw: Option<&str>) -> Result<Path, CliError> {
    match raw {
        Some(raw) => Ok(raw.parse()?),
        None => Ok(Path::root()),
    }
}

// ── json-tree ─────────────────────────────────────────────────────────────

/// The node at `path` (default: root) followed by its descendants up to
/// `depth` levels, each as a single line of JSON.
pub fn tree_lines(json: &str, path: Option<&str>, depth: Option<usize>) -> Result<Vec<String>, CliError> {
    let doc: Value = serde_json::from_str(json)?;
    let path = parse_path(path)?;
    let mut nodes: Vec<Node> = vec![inspect(&doc, &path)?];
    nodes.extend(flatten(&doc, &path, depth)?);
    nodes
        .iter()
        .map(|node| serde_json::to_string(node).map_err(CliError::from))
        .collect()
}

/// Pretty-printed value at `path`.
pub fn lookup_path(json: &str, path: &str) -> Result<String, CliError> {
    let doc: Value = serde_json::from_str(json)?;
    let path = parse_path(Some(path))?;
    let value = get(&doc, &path)?;
    Ok(serde_json::to_string_pretty(value)?)
}

// ── Dispatch ──────────────────────────────────────────────────────────────

/// Run `json-tree` with `args` (program name excluded) against `json`,
/// returning the lines to print.
///
/// `--value <path>` prints the value at `path`; otherwise the arguments are
/// `[path] [depth]` for [`tree_lines`].
pub fn run(args: &[String], json: &str) -> Result<Vec<String>, CliError> {
    match args.first().map(String::as_str) {
        Some("--value") => {
            let path = args.get(1).ok_or(CliError::MissingArgument("path"))?;
            Ok(vec![lookup_path(json, path)?])
        }
        _ => {
            let path = args.first().map(String::as_str);
            let depth = match args.get(1) {
                Some(raw) => parse_depth(raw)?,
                None => None,
            };
            tree_lines(json, path, depth)
        }
    }
}
