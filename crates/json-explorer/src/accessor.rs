//! Reading, writing, removing and copying values at a [`Path`].
//!
//! Every function takes the document it works on explicitly; nothing here
//! keeps a reference past the call.

use json_explorer_path::{parent_of, rewrite_last_segment, Path, PathError, Segment};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::node::{Node, NodeKind};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AccessError {
    #[error(transparent)]
    Path(#[from] PathError),
    #[error("PATH_NOT_FOUND: {0}")]
    PathNotFound(Path),
    #[error("NOT_A_CONTAINER: {0}")]
    NotAContainer(Path),
    #[error("KEY_EXISTS: {0}")]
    KeyExists(String),
    #[error("NOT_RENAMABLE: {0}")]
    NotRenamable(Path),
}

// ── Navigation ────────────────────────────────────────────────────────────

/// One navigation step. A key segment only resolves inside an object and an
/// index segment only inside an array.
fn step<'a>(value: &'a Value, segment: &Segment) -> Option<&'a Value> {
    match (value, segment) {
        (Value::Object(map), Segment::Key(key)) => map.get(key),
        (Value::Array(arr), Segment::Index(idx)) => arr.get(*idx),
        _ => None,
    }
}

fn step_mut<'a>(value: &'a mut Value, segment: &Segment) -> Option<&'a mut Value> {
    match (value, segment) {
        (Value::Object(map), Segment::Key(key)) => map.get_mut(key),
        (Value::Array(arr), Segment::Index(idx)) => arr.get_mut(*idx),
        _ => None,
    }
}

/// Get the value at `path`.
///
/// # Errors
///
/// `AccessError::PathNotFound` if any segment is missing or addresses the
/// wrong kind of container.
///
/// # Example
///
/// ```
/// use json_explorer::accessor::get;
/// use json_explorer::Path;
/// use serde_json::json;
///
/// let doc = json!({"list": [1, {"x": true}]});
/// let path: Path = "root.list[1].x".parse().unwrap();
/// assert_eq!(get(&doc, &path).unwrap(), &json!(true));
/// assert!(get(&doc, &"root.list.x".parse().unwrap()).is_err());
/// ```
pub fn get<'a>(doc: &'a Value, path: &Path) -> Result<&'a Value, AccessError> {
    let mut current = doc;
    for segment in path.segments() {
        current = step(current, segment).ok_or_else(|| AccessError::PathNotFound(path.clone()))?;
    }
    Ok(current)
}

/// Mutable counterpart of [`get`].
pub fn get_mut<'a>(doc: &'a mut Value, path: &Path) -> Result<&'a mut Value, AccessError> {
    let mut current = doc;
    for segment in path.segments() {
        current =
            step_mut(current, segment).ok_or_else(|| AccessError::PathNotFound(path.clone()))?;
    }
    Ok(current)
}

/// Resolve `path` to its [`Node`] projection.
/// A detached copy of the value at `path`, ready to be attached elsewhere.
///
/// The copy shares nothing with `doc`, so later edits to either side do not
/// leak into the other.
///
/// # Example
///
/// ```
/// use json_explorer::accessor::deep_clone;
/// use serde_json::json;
///
/// let doc = json!({"a": {"list": [1, 2]}});
/// let copy = deep_clone(&doc, &"root.a".parse().unwrap()).unwrap();
/// assert_eq!(copy, json!({"list": [1, 2]}));
/// assert!(deep_clone(&doc, &"root.b".parse().unwrap()).is_err());
/// ```
pub fn deep_clone(doc: &Value, path: &Path) -> Result<Value, AccessError> {
    get(doc, path).cloned()
}

pub fn inspect(doc: &Value, path: &Path) -> Result<Node, AccessError> {
    let value = get(doc, path)?;
    Ok(Node::new(path.clone(), value.clone()))
}

// ── Writes ────────────────────────────────────────────────────────────────

/// Write `value` at `path`, returning the value it replaced.
///
/// The parent container must already exist. An object key is inserted or
/// overwritten; an array index overwrites an element or, when equal to the
/// array length, appends. The root path replaces the whole document.
///
/// # Example
///
/// ```
/// use json_explorer::accessor::{get, set};
/// use serde_json::json;
///
/// let mut doc = json!({"a": {"b": 1}});
/// let path = "root.a.c".parse().unwrap();
/// assert_eq!(set(&mut doc, &path, json!(2)).unwrap(), None);
/// assert_eq!(get(&doc, &path).unwrap(), &json!(2));
/// ```
pub fn set(doc: &mut Value, path: &Path, value: Value) -> Result<Option<Value>, AccessError> {
    let Some(segment) = path.last() else {
        return Ok(Some(std::mem::replace(doc, value)));
    };
    let parent = get_mut(doc, &parent_of(path)?)?;
    match (parent, segment) {
        (Value::Object(map), Segment::Key(key)) => Ok(map.insert(key.clone(), value)),
        (Value::Array(arr), Segment::Index(idx)) => {
            if *idx < arr.len() {
                Ok(Some(std::mem::replace(&mut arr[*idx], value)))
            } else if *idx == arr.len() {
                arr.push(value);
                Ok(None)
            } else {
                Err(AccessError::PathNotFound(path.clone()))
            }
        }
        _ => Err(AccessError::PathNotFound(path.clone())),
    }
}

/// Remove the child addressed by `segment` from `container`.
///
/// Object removal keeps the order of the remaining keys; array removal shifts
/// every later element down by one so indices stay contiguous.
pub fn remove_child(container: &mut Value, segment: &Segment) -> Option<Value> {
    match (container, segment) {
        (Value::Object(map), Segment::Key(key)) => map.shift_remove(key),
        (Value::Array(arr), Segment::Index(idx)) if *idx < arr.len() => Some(arr.remove(*idx)),
        _ => None,
    }
}

/// Remove the value at `path` from its parent and return it.
///
/// # Errors
///
/// - `PathError::InvalidPath` (wrapped) - `path` is the root
/// - `AccessError::PathNotFound` - the parent or the child does not exist
pub fn remove(doc: &mut Value, path: &Path) -> Result<Value, AccessError> {
    let parent_path = parent_of(path)?;
    let segment = json_explorer_path::last_segment(path)?;
    let parent = get_mut(doc, &parent_path)?;
    remove_child(parent, segment).ok_or_else(|| AccessError::PathNotFound(path.clone()))
}

// ── Copies ────────────────────────────────────────────────────────────────

/// Pick a key for a new child of `map`: `preferred` when free, otherwise
/// `new<Kind>`, then `new<Kind>2`, `new<Kind>3`, ...
pub fn fresh_key(map: &Map<String, Value>, preferred: &str, kind: NodeKind) -> String {
    if !map.contains_key(preferred) {
        return preferred.to_string();
    }
    let base = kind.fresh_key();
    if !map.contains_key(base) {
        return base.to_string();
    }
    (2usize..)
        .map(|n| format!("{base}{n}"))
        .find(|candidate| !map.contains_key(candidate))
        .unwrap_or_else(|| base.to_string())
}

/// Attach `value` as a new child of `container`.
///
/// Objects receive it under `name` (or a fresh key on collision); arrays
/// append it. Returns the segment it landed at, or `None` when `container` is
/// a scalar.
pub fn attach(container: &mut Value, name: &str, value: Value) -> Option<Segment> {
    match container {
        Value::Object(map) => {
            let key = fresh_key(map, name, NodeKind::of(&value));
            map.insert(key.clone(), value);
            Some(Segment::Key(key))
        }
        Value::Array(arr) => {
            arr.push(value);
            Some(Segment::Index(arr.len() - 1))
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => None,
    }
}

/// Deep-clone the value at `from` into the container at `to`.
///
/// Returns the path of the new child.
///
/// # Example
///
/// ```
/// use json_explorer::accessor::copy;
/// use serde_json::json;
///
/// let mut doc = json!({"a": {"x": 1}, "b": {"a": 0}});
/// let new_path = copy(&mut doc, &"root.a".parse().unwrap(), &"root.b".parse().unwrap()).unwrap();
/// assert_eq!(new_path.to_string(), "root.b.newObject");
/// assert_eq!(doc["b"]["newObject"], json!({"x": 1}));
/// ```
pub fn copy(doc: &mut Value, from: &Path, to: &Path) -> Result<Path, AccessError> {
    let value = deep_clone(doc, from)?;
    let container = get_mut(doc, to)?;
    let segment =
        attach(container, &from.name(), value).ok_or_else(|| AccessError::NotAContainer(to.clone()))?;
    Ok(to.child(segment))
}

// ── Renames ───────────────────────────────────────────────────────────────

/// Rename the object key addressed by `path`, keeping its position among its
/// siblings. Returns the renamed path.
pub fn rename_key(doc: &mut Value, path: &Path, new_name: &str) -> Result<Path, AccessError> {
    let old_name = match json_explorer_path::last_segment(path)? {
        Segment::Key(key) => key.clone(),
        Segment::Index(_) => return Err(AccessError::NotRenamable(path.clone())),
    };
    let renamed = rewrite_last_segment(path, Segment::Key(new_name.to_string()))?;
    let parent = get_mut(doc, &parent_of(path)?)?;
    let Value::Object(map) = parent else {
        return Err(AccessError::PathNotFound(path.clone()));
    };
    if !map.contains_key(&old_name) {
        return Err(AccessError::PathNotFound(path.clone()));
    }
    if old_name == new_name {
        return Ok(renamed);
    }
    if map.contains_key(new_name) {
        return Err(AccessError::KeyExists(new_name.to_string()));
    }
    *map = std::mem::take(map)
        .into_iter()
        .map(|(key, value)| {
            if key == old_name {
                (new_name.to_string(), value)
            } else {
                (key, value)
            }
        })
        .collect();
    Ok(renamed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn p(raw: &str) -> Path {
        raw.parse().unwrap()
    }

    #[test]
    fn test_get_root() {
        let doc = json!(42);
        assert_eq!(get(&doc, &Path::root()).unwrap(), &json!(42));
    }

    #[test]
    fn test_get_type_mismatch() {
        let doc = json!({"list": [1, 2], "obj": {"0": "zero"}});
        assert_eq!(
            get(&doc, &p("root.list.0")),
            Err(AccessError::PathNotFound(p("root.list.0")))
        );
        assert!(get(&doc, &p("root.obj[0]")).is_err());
        assert_eq!(get(&doc, &p("root.obj.0")).unwrap(), &json!("zero"));
        assert!(get(&doc, &p("root.list[2]")).is_err());
    }

    #[test]
    fn test_set_overwrite_and_append() {
        let mut doc = json!({"list": [1, 2]});
        assert_eq!(set(&mut doc, &p("root.list[0]"), json!(9)).unwrap(), Some(json!(1)));
        assert_eq!(set(&mut doc, &p("root.list[2]"), json!(3)).unwrap(), None);
        assert_eq!(doc, json!({"list": [9, 2, 3]}));
    }

    #[test]
    fn test_set_rejects_gaps_and_missing_parents() {
        let mut doc = json!({"list": []});
        assert!(set(&mut doc, &p("root.list[1]"), json!(1)).is_err());
        assert!(set(&mut doc, &p("root.missing.x"), json!(1)).is_err());
        assert_eq!(doc, json!({"list": []}));
    }

    #[test]
    fn test_set_root_replaces_document() {
        let mut doc = json!({"a": 1});
        let old = set(&mut doc, &Path::root(), json!([true])).unwrap();
        assert_eq!(old, Some(json!({"a": 1})));
        assert_eq!(doc, json!([true]));
    }

    #[test]
    fn test_remove_array_keeps_contiguity() {
        let mut doc = json!({"list": ["a", "b", "c", "d"]});
        assert_eq!(remove(&mut doc, &p("root.list[1]")).unwrap(), json!("b"));
        assert_eq!(doc, json!({"list": ["a", "c", "d"]}));
        assert_eq!(get(&doc, &p("root.list[1]")).unwrap(), &json!("c"));
    }

    #[test]
    fn test_remove_object_keeps_order() {
        let mut doc = json!({"a": 1, "b": 2, "c": 3});
        remove(&mut doc, &p("root.a")).unwrap();
        let keys: Vec<_> = doc.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["b", "c"]);
    }

    #[test]
    fn test_remove_errors() {
        let mut doc = json!({"a": 1});
        assert_eq!(
            remove(&mut doc, &Path::root()),
            Err(AccessError::Path(PathError::InvalidPath))
        );
        assert!(remove(&mut doc, &p("root.b")).is_err());
    }

    #[test]
    fn test_fresh_key_sequence() {
        let map = json!({"a": 1, "newValue": 2, "newValue2": 3});
        let map = map.as_object().unwrap();
        assert_eq!(fresh_key(map, "b", NodeKind::Value), "b");
        assert_eq!(fresh_key(map, "a", NodeKind::Value), "newValue3");
        assert_eq!(fresh_key(map, "a", NodeKind::Array), "newArray");
    }

    #[test]
    fn test_attach() {
        let mut obj = json!({"x": 1});
        assert_eq!(attach(&mut obj, "x", json!(2)), Some(Segment::Key("newValue".into())));
        let mut arr = json!([0]);
        assert_eq!(attach(&mut arr, "x", json!(2)), Some(Segment::Index(1)));
        assert_eq!(attach(&mut json!(1), "x", json!(2)), None);
    }

    #[test]
    fn test_copy_into_array_and_scalar() {
        let mut doc = json!({"v": {"k": 1}, "arr": [0], "s": "str"});
        let new_path = copy(&mut doc, &p("root.v"), &p("root.arr")).unwrap();
        assert_eq!(new_path, p("root.arr[1]"));
        assert_eq!(doc["arr"], json!([0, {"k": 1}]));
        assert_eq!(
            copy(&mut doc, &p("root.v"), &p("root.s")),
            Err(AccessError::NotAContainer(p("root.s")))
        );
    }

    #[test]
    fn test_deep_clone_is_detached() {
        let mut doc = json!({"a": {"z": [1], "b": 2}});
        let copy = deep_clone(&doc, &p("root.a")).unwrap();
        doc["a"]["z"].as_array_mut().unwrap().push(json!(3));
        assert_eq!(copy, json!({"z": [1], "b": 2}));
        let keys: Vec<_> = copy.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["z", "b"]);
        assert_eq!(
            deep_clone(&doc, &p("root.a.z[5]")),
            Err(AccessError::PathNotFound(p("root.a.z[5]")))
        );
    }

    #[test]
    fn test_inspect() {
        let doc = json!({"a": [1]});
        let node = inspect(&doc, &p("root.a")).unwrap();
        assert_eq!(node.kind, NodeKind::Array);
        assert_eq!(node.value, json!([1]));
    }

    #[test]
    fn test_rename_key_keeps_position() {
        let mut doc = json!({"a": 1, "b": 2, "c": 3});
        let renamed = rename_key(&mut doc, &p("root.b"), "z").unwrap();
        assert_eq!(renamed, p("root.z"));
        let keys: Vec<_> = doc.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["a", "z", "c"]);
    }

    #[test]
    fn test_rename_key_errors() {
        let mut doc = json!({"a": 1, "b": 2, "l": [1]});
        assert_eq!(
            rename_key(&mut doc, &p("root.a"), "b"),
            Err(AccessError::KeyExists("b".into()))
        );
        assert_eq!(
            rename_key(&mut doc, &p("root.l[0]"), "x"),
            Err(AccessError::NotRenamable(p("root.l[0]")))
        );
        assert!(rename_key(&mut doc, &p("root.q"), "x").is_err());
    }
}
