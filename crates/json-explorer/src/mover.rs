//! Selection resolution and relocation of nodes into a target container.
//!
//! A move is applied as copy-then-remove(-then-reposition):
//!
//! 1. redundant selections are filtered out (no-op moves, moves into the
//!    node itself or a descendant, nodes already carried by a selected
//!    ancestor, duplicates, stale paths);
//! 2. the survivors are ordered shallow-to-deep, left-to-right;
//! 3. each is deep-copied into the target;
//! 4. originals are removed in reverse order, so every removal only shifts
//!    positions that were already handled;
//! 5. for array targets with an insertion index, the appended block is moved
//!    from the tail to that index.
//!
//! Everything here is a pure function of its arguments.

use std::collections::HashSet;

use json_explorer_path::{parent_of, trailing_ancestors, Path, PathError, Segment};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::accessor::{attach, deep_clone, get, get_mut, remove_child, AccessError};
use crate::node::NodeKind;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MoveError {
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error(transparent)]
    Path(#[from] PathError),
    #[error("INVALID_TARGET: {0}")]
    InvalidTarget(Path),
    #[error("CYCLE: {0} cannot be moved into itself or a descendant")]
    Cycle(Path),
}

/// Why a selected path was left out of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Already a direct child of the target object.
    NoOp,
    /// The target is this node or one of its descendants.
    Cycle,
    /// A selected container already carries this node.
    Subordinate,
    Duplicate,
    /// The path no longer resolves in the document.
    Stale,
    /// The document root cannot be detached.
    Root,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skipped {
    pub path: Path,
    pub reason: SkipReason,
}

/// Selections that survived filtering, in application order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub ordered: Vec<Path>,
    pub skipped: Vec<Skipped>,
}

/// Options for [`relocate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveOptions {
    /// Insertion index inside an array target; `None` appends.
    pub target_index: Option<usize>,
    /// Fail with `MoveError::Cycle` / `MoveError::InvalidTarget` instead of
    /// dropping cyclic selections and skipping an unplaceable insertion.
    pub strict: bool,
}

impl MoveOptions {
    pub fn at(target_index: usize) -> Self {
        Self {
            target_index: Some(target_index),
            strict: false,
        }
    }

    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }
}

/// Result of a relocation.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveOutcome {
    pub doc: Value,
    /// Paths of the moved nodes in the resulting document.
    pub moved: Vec<Path>,
    pub skipped: Vec<Skipped>,
}

// ── Selection ─────────────────────────────────────────────────────────────

/// Filter and order `selected` against an optional move `target`.
///
/// Without a target (delete, cut) only the root, duplicate, subordinate and
/// stale rules apply.
pub fn resolve_selection(doc: &Value, selected: &[Path], target: Option<&Path>) -> Resolution {
    let target_is_object = target
        .and_then(|t| get(doc, t).ok())
        .is_some_and(Value::is_object);
    let forbidden: HashSet<Path> = target
        .map(trailing_ancestors)
        .unwrap_or_default()
        .into_iter()
        .collect();

    // Ascending depth, so containers are seen before anything they hold.
    let mut by_depth: Vec<&Path> = selected.iter().collect();
    by_depth.sort_by_key(|path| path.depth());

    let mut seen: HashSet<&Path> = HashSet::new();
    let mut folders: Vec<&Path> = Vec::new();
    let mut ordered = Vec::new();
    let mut skipped = Vec::new();
    for path in by_depth {
        let reason = if !seen.insert(path) {
            Some(SkipReason::Duplicate)
        } else if path.is_root() {
            Some(SkipReason::Root)
        } else if forbidden.contains(path) {
            Some(SkipReason::Cycle)
        } else if target_is_object && path.parent().as_ref() == target {
            Some(SkipReason::NoOp)
        } else if folders.iter().any(|folder| folder.is_ancestor_of(path)) {
            Some(SkipReason::Subordinate)
        } else {
            match get(doc, path) {
                Ok(value) => {
                    if NodeKind::of(value).is_container() {
                        folders.push(path);
                    }
                    None
                }
                Err(_) => Some(SkipReason::Stale),
            }
        };
        match reason {
            Some(reason) => {
                trace!(path = %path, ?reason, "selection skipped");
                skipped.push(Skipped {
                    path: path.clone(),
                    reason,
                });
            }
            None => ordered.push(path.clone()),
        }
    }

    ordered.sort_by(|a, b| {
        let pa = a.parent().unwrap_or_default();
        let pb = b.parent().unwrap_or_default();
        pa.depth()
            .cmp(&pb.depth())
            .then_with(|| pa.cmp(&pb))
            .then_with(|| a.cmp(b))
    });
    Resolution { ordered, skipped }
}

// ── Relocation ────────────────────────────────────────────────────────────

/// Shift the index segment of `destination` that sits directly below
/// `parent` after the element at `removed` was taken out of `parent`.
fn shift_after_removal(destination: &Path, parent: &Path, removed: usize) -> Path {
    if !parent.is_ancestor_of(destination) {
        return destination.clone();
    }
    let pos = parent.depth();
    match destination.segments()[pos] {
        Segment::Index(idx) if idx > removed => destination
            .with_segment_at(pos, Segment::Index(idx - 1))
            .unwrap_or_else(|| destination.clone()),
        _ => destination.clone(),
    }
}

/// Where the appended block will be inserted, or `None` if it cannot be.
///
/// Computed on the unmodified document: every selection leaving the target
/// array shortens it, and those sitting before the requested index pull the
/// index down by one.
fn planned_insertion(target_len: usize, ordered: &[Path], target: &Path, index: usize) -> Option<usize> {
    let mut leaving = 0;
    let mut before = 0;
    for path in ordered {
        if path.parent().as_ref() == Some(target) {
            leaving += 1;
            if matches!(path.last(), Some(Segment::Index(own)) if *own < index) {
                before += 1;
            }
        }
    }
    let adjusted = index - before;
    (adjusted <= target_len - leaving).then_some(adjusted)
}

/// Move `selected` into the container at `target`.
///
/// # Errors
///
/// - `MoveError::InvalidTarget` - `target` does not resolve to a container
///   (or, in strict mode, the insertion index cannot hold the block)
/// - `MoveError::Cycle` - strict mode only, a selection contains the target
///
/// # Example
///
/// ```
/// use json_explorer::mover::{relocate, MoveOptions};
/// use serde_json::json;
///
/// let doc = json!({"list": ["a", "b", "c", "d"]});
/// let selected = vec!["root.list[0]".parse().unwrap()];
/// let out = relocate(doc, &selected, &"root.list".parse().unwrap(), &MoveOptions::at(3)).unwrap();
/// assert_eq!(out.doc, json!({"list": ["b", "c", "a", "d"]}));
/// assert_eq!(out.moved[0].to_string(), "root.list[2]");
/// ```
pub fn relocate(
    mut doc: Value,
    selected: &[Path],
    target: &Path,
    options: &MoveOptions,
) -> Result<MoveOutcome, MoveError> {
    let (target_kind, target_len) = match get(&doc, target) {
        Ok(Value::Object(map)) => (NodeKind::Object, map.len()),
        Ok(Value::Array(arr)) => (NodeKind::Array, arr.len()),
        _ => return Err(MoveError::InvalidTarget(target.clone())),
    };

    let Resolution { ordered, skipped } = resolve_selection(&doc, selected, Some(target));
    if options.strict {
        if let Some(cyclic) = skipped.iter().find(|s| s.reason == SkipReason::Cycle) {
            return Err(MoveError::Cycle(cyclic.path.clone()));
        }
    }
    if ordered.is_empty() {
        debug!(target = %target, skipped = skipped.len(), "nothing to move");
        return Ok(MoveOutcome {
            doc,
            moved: Vec::new(),
            skipped,
        });
    }
    let insertion = match (target_kind, options.target_index) {
        (NodeKind::Array, Some(index)) => {
            let planned = planned_insertion(target_len, &ordered, target, index);
            if planned.is_none() && options.strict {
                return Err(MoveError::InvalidTarget(target.clone()));
            }
            Some(planned)
        }
        _ => None,
    };
    debug!(target = %target, count = ordered.len(), index = ?options.target_index, "relocating selection");

    // Copy phase.
    let mut landed = Vec::with_capacity(ordered.len());
    for path in &ordered {
        let value = deep_clone(&doc, path)?;
        let container = get_mut(&mut doc, target)?;
        let segment = attach(container, &path.name(), value)
            .ok_or_else(|| MoveError::InvalidTarget(target.clone()))?;
        trace!(from = %path, to = %target.child(segment.clone()), "copied");
        landed.push(segment);
    }

    // Removal phase, deepest and right-most first.
    let mut destination = target.clone();
    let mut target_index = options.target_index;
    for path in ordered.iter().rev() {
        let parent_path = parent_of(path)?;
        let Some(segment) = path.last() else {
            continue;
        };
        if let (Some(index), Segment::Index(own)) = (target_index, segment) {
            if parent_path == destination && *own < index {
                target_index = Some(index - 1);
            }
        }
        let parent = get_mut(&mut doc, &parent_path)?;
        remove_child(parent, segment).ok_or_else(|| AccessError::PathNotFound(path.clone()))?;
        if let Segment::Index(removed) = segment {
            destination = shift_after_removal(&destination, &parent_path, *removed);
        }
    }

    // Reposition the appended block inside an array target.
    let count = ordered.len();
    let mut block_start = None;
    if let Some(Some(_)) = insertion {
        match (get_mut(&mut doc, &destination), target_index) {
            (Ok(Value::Array(arr)), Some(index)) if arr.len() >= count && index <= arr.len() - count => {
                let tail = arr.len() - count;
                let block: Vec<Value> = arr.drain(tail..).collect();
                arr.splice(index..index, block);
                block_start = Some(index);
            }
            _ => warn!(target = %destination, index = ?target_index, "insertion index unusable, items stay at the tail"),
        }
    } else if let Some(None) = insertion {
        warn!(target = %destination, index = ?options.target_index, "insertion index unusable, items stay at the tail");
    }

    let moved = match get(&doc, &destination)? {
        Value::Array(arr) => {
            let start = block_start.unwrap_or(arr.len() - count);
            (start..start + count).map(|idx| destination.child(idx)).collect()
        }
        _ => landed.into_iter().map(|segment| destination.child(segment)).collect(),
    };
    Ok(MoveOutcome { doc, moved, skipped })
}

/// Move `selected` into `target`, appending (`None`) or inserting at
/// `target_index`. Lenient: see [`relocate`] for the details.
pub fn move_nodes(
    doc: Value,
    selected: &[Path],
    target: &Path,
    target_index: Option<usize>,
) -> Result<Value, MoveError> {
    let options = MoveOptions {
        target_index,
        strict: false,
    };
    relocate(doc, selected, target, &options).map(|outcome| outcome.doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn p(raw: &str) -> Path {
        raw.parse().unwrap()
    }

    fn paths(raw: &[&str]) -> Vec<Path> {
        raw.iter().map(|r| p(r)).collect()
    }

    #[test]
    fn test_resolve_orders_shallow_to_deep_numerically() {
        let doc = json!({"a": [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11], "b": {"c": [1]}});
        let res = resolve_selection(&doc, &paths(&["root.b.c[0]", "root.a[10]", "root.a[2]"]), None);
        let order: Vec<String> = res.ordered.iter().map(|p| p.to_string()).collect();
        assert_eq!(order, vec!["root.a[2]", "root.a[10]", "root.b.c[0]"]);
    }

    #[test]
    fn test_resolve_skips() {
        let doc = json!({"t": {"x": 1}, "f": {"g": {"h": 1}}});
        let res = resolve_selection(
            &doc,
            &paths(&["root", "root.t.x", "root.t", "root.f", "root.f.g.h", "root.f", "root.gone"]),
            Some(&p("root.t")),
        );
        assert_eq!(res.ordered, paths(&["root.f"]));
        let reasons: Vec<(String, SkipReason)> = res
            .skipped
            .iter()
            .map(|s| (s.path.to_string(), s.reason))
            .collect();
        assert_eq!(
            reasons,
            vec![
                ("root".to_string(), SkipReason::Root),
                ("root.t".to_string(), SkipReason::Cycle),
                ("root.f".to_string(), SkipReason::Duplicate),
                ("root.gone".to_string(), SkipReason::Stale),
                ("root.t.x".to_string(), SkipReason::NoOp),
                ("root.f.g.h".to_string(), SkipReason::Subordinate),
            ]
        );
    }

    #[test]
    fn test_array_parent_is_not_a_noop() {
        let doc = json!({"l": [1, 2]});
        let res = resolve_selection(&doc, &paths(&["root.l[0]"]), Some(&p("root.l")));
        assert_eq!(res.ordered, paths(&["root.l[0]"]));
    }

    #[test]
    fn test_move_into_object() {
        let doc = json!({"a": {"k": 1}, "b": 2, "dst": {"b": 0}});
        let out = relocate(doc, &paths(&["root.a", "root.b"]), &p("root.dst"), &MoveOptions::default()).unwrap();
        assert_eq!(out.doc, json!({"dst": {"b": 0, "a": {"k": 1}, "newValue": 2}}));
        assert_eq!(out.moved, paths(&["root.dst.a", "root.dst.newValue"]));
    }

    #[test]
    fn test_move_append_to_array() {
        let doc = json!({"x": {"y": 5}, "z": []});
        let out = move_nodes(doc, &paths(&["root.x"]), &p("root.z"), None).unwrap();
        assert_eq!(out, json!({"z": [{"y": 5}]}));
    }

    #[test]
    fn test_move_within_array_backwards() {
        let doc = json!(["a", "b", "c", "d", "e"]);
        let out = relocate(doc, &paths(&["root[3]", "root[4]"]), &Path::root(), &MoveOptions::at(1)).unwrap();
        assert_eq!(out.doc, json!(["a", "d", "e", "b", "c"]));
        assert_eq!(out.moved, paths(&["root[1]", "root[2]"]));
    }

    #[test]
    fn test_move_within_array_forwards() {
        let doc = json!(["a", "b", "c", "d", "e"]);
        let out = relocate(doc, &paths(&["root[0]", "root[2]"]), &Path::root(), &MoveOptions::at(4)).unwrap();
        assert_eq!(out.doc, json!(["b", "d", "a", "c", "e"]));
    }

    #[test]
    fn test_destination_shifts_when_an_earlier_sibling_leaves() {
        let doc = json!({"l": ["x", "y", {"inner": []}]});
        let out = relocate(doc, &paths(&["root.l[0]"]), &p("root.l[2].inner"), &MoveOptions::default()).unwrap();
        assert_eq!(out.doc, json!({"l": ["y", {"inner": ["x"]}]}));
        assert_eq!(out.moved, paths(&["root.l[1].inner[0]"]));
    }

    #[test]
    fn test_unplaceable_index_leaves_items_at_tail() {
        let doc = json!({"src": [1], "dst": ["a"]});
        let out = relocate(doc, &paths(&["root.src[0]"]), &p("root.dst"), &MoveOptions::at(5)).unwrap();
        assert_eq!(out.doc, json!({"src": [], "dst": ["a", 1]}));
        assert_eq!(out.moved, paths(&["root.dst[1]"]));
    }

    #[test]
    fn test_strict_rejects_bad_index_and_cycles() {
        let doc = json!({"src": [1], "dst": ["a"]});
        let err = relocate(doc.clone(), &paths(&["root.src[0]"]), &p("root.dst"), &MoveOptions::at(5).strict());
        assert_eq!(err, Err(MoveError::InvalidTarget(p("root.dst"))));

        let doc = json!({"f": {"g": {}}});
        let err = relocate(doc, &paths(&["root.f"]), &p("root.f.g"), &MoveOptions::default().strict());
        assert_eq!(err, Err(MoveError::Cycle(p("root.f"))));
    }

    #[test]
    fn test_cycle_is_filtered_leniently() {
        let doc = json!({"f": {"g": {}}, "h": 1});
        let out = relocate(doc.clone(), &paths(&["root.f", "root.h"]), &p("root.f.g"), &MoveOptions::default()).unwrap();
        assert_eq!(out.doc, json!({"f": {"g": {"h": 1}}}));
        assert_eq!(out.skipped[0].reason, SkipReason::Cycle);
    }

    #[test]
    fn test_invalid_target() {
        let doc = json!({"a": 1, "b": 2});
        assert_eq!(
            move_nodes(doc.clone(), &paths(&["root.a"]), &p("root.b"), None),
            Err(MoveError::InvalidTarget(p("root.b")))
        );
        assert_eq!(
            move_nodes(doc, &paths(&["root.a"]), &p("root.c"), None),
            Err(MoveError::InvalidTarget(p("root.c")))
        );
    }

    #[test]
    fn test_shift_after_removal() {
        let dest = p("root.a[3].b");
        assert_eq!(shift_after_removal(&dest, &p("root.a"), 1), p("root.a[2].b"));
        assert_eq!(shift_after_removal(&dest, &p("root.a"), 5), dest);
        assert_eq!(shift_after_removal(&dest, &p("root.z"), 0), dest);
    }
}
