//! Node projection of a document location.

use json_explorer_path::Path;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Kind of a node as shown by the explorer: a container (`object`,
/// `array`) or a leaf `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Object,
    Array,
    Value,
}

impl NodeKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => NodeKind::Object,
            Value::Array(_) => NodeKind::Array,
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => NodeKind::Value,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Object => "object",
            NodeKind::Array => "array",
            NodeKind::Value => "value",
        }
    }

    pub fn is_container(&self) -> bool {
        !matches!(self, NodeKind::Value)
    }

    /// The value a freshly created or retyped node of this kind starts with.
    pub fn empty_value(&self) -> Value {
        match self {
            NodeKind::Object => Value::Object(Map::new()),
            NodeKind::Array => Value::Array(Vec::new()),
            NodeKind::Value => Value::Null,
        }
    }

    /// Key used for a new object child of this kind when its name is taken.
    pub fn fresh_key(&self) -> &'static str {
        match self {
            NodeKind::Object => "newObject",
            NodeKind::Array => "newArray",
            NodeKind::Value => "newValue",
        }
    }
}

/// One addressable location of a document snapshot.
///
/// Nodes are transient: they describe the snapshot they were computed from
/// and go stale as soon as the document changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: Path,
    pub name: String,
    pub parent_path: Option<Path>,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub value: Value,
    pub depth: usize,
}

impl Node {
    pub fn new(id: Path, value: Value) -> Self {
        Self {
            name: id.name(),
            parent_path: id.parent(),
            kind: NodeKind::of(&value),
            depth: id.depth(),
            id,
            value,
        }
    }

    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_of() {
        assert_eq!(NodeKind::of(&json!({})), NodeKind::Object);
        assert_eq!(NodeKind::of(&json!([])), NodeKind::Array);
        assert_eq!(NodeKind::of(&json!("s")), NodeKind::Value);
        assert_eq!(NodeKind::of(&json!(null)), NodeKind::Value);
    }

    #[test]
    fn test_node_new() {
        let node = Node::new(Path::root().key("list").index(1), json!(3));
        assert_eq!(node.name, "1");
        assert_eq!(node.parent_path, Some(Path::root().key("list")));
        assert_eq!(node.kind, NodeKind::Value);
        assert_eq!(node.depth, 2);
    }

    #[test]
    fn test_node_serializes_ids_as_strings() {
        let node = Node::new(Path::root().key("a"), json!({"b": 1}));
        let out = serde_json::to_value(&node).unwrap();
        assert_eq!(
            out,
            json!({
                "id": "root.a",
                "name": "a",
                "parentPath": "root",
                "type": "object",
                "value": {"b": 1},
                "depth": 1
            })
        );
    }
}
