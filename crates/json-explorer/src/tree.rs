//! Flattening a document into an ordered list of [`Node`]s.
//!
//! Output is depth-first pre-order: a container precedes its children, object
//! children follow key insertion order and array children index order. The
//! list is recomputed from scratch on every call.

use json_explorer_path::Path;
use serde_json::Value;

use crate::accessor::{get, AccessError};
use crate::node::Node;

/// Compile the whole document: the root node first, then every descendant.
///
/// # Example
///
/// ```
/// use json_explorer::tree::compile;
/// use serde_json::json;
///
/// let ids: Vec<String> = compile(&json!({"a": {"b": 1}, "c": [true]}))
///     .iter()
///     .map(|node| node.id.to_string())
///     .collect();
/// assert_eq!(ids, vec!["root", "root.a", "root.a.b", "root.c", "root.c[0]"]);
/// ```
pub fn compile(doc: &Value) -> Vec<Node> {
    let root = Path::root();
    let mut nodes = vec![Node::new(root.clone(), doc.clone())];
    walk(doc, &root, None, &mut nodes);
    nodes
}

/// Descendants of the node at `path`, limited to `depth` levels below it
/// (`Some(1)` lists direct children only, `None` recurses fully).
pub fn flatten(doc: &Value, path: &Path, depth: Option<usize>) -> Result<Vec<Node>, AccessError> {
    let value = get(doc, path)?;
    Ok(flatten_value(value, path, depth))
}

/// Same as [`flatten`] for a value already resolved at `parent_path`.
pub fn flatten_value(value: &Value, parent_path: &Path, depth: Option<usize>) -> Vec<Node> {
    let mut nodes = Vec::new();
    walk(value, parent_path, depth, &mut nodes);
    nodes
}

/// Direct children of the node at `path`.
pub fn children(doc: &Value, path: &Path) -> Result<Vec<Node>, AccessError> {
    flatten(doc, path, Some(1))
}

fn walk(value: &Value, path: &Path, remaining: Option<usize>, out: &mut Vec<Node>) {
    if remaining == Some(0) {
        return;
    }
    let next = remaining.map(|d| d - 1);
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                visit(child, path.child(key.as_str()), next, out);
            }
        }
        Value::Array(arr) => {
            for (idx, child) in arr.iter().enumerate() {
                visit(child, path.child(idx), next, out);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
    }
}

fn visit(child: &Value, child_path: Path, remaining: Option<usize>, out: &mut Vec<Node>) {
    out.push(Node::new(child_path.clone(), child.clone()));
    walk(child, &child_path, remaining, out);
}
