//! Structural edits: create, delete, modify, move and whole-document replace.

use serde::Serialize;
use serde_json::Value;

use json_explorer_path::Path;

use super::{Command, CommandError, Payload, Snapshot};
use crate::accessor::{attach, get, get_mut, remove, rename_key, set, AccessError};
use crate::mover::{relocate, resolve_selection, MoveOptions};
use crate::node::NodeKind;

// ── Create ────────────────────────────────────────────────────────────────

/// Add a new child to an existing container.
pub struct CreateCommand {
    previous: Snapshot,
    parent: Path,
    name: Option<String>,
    value: Value,
}

impl CreateCommand {
    pub fn new(previous: Value, parent: Path, value: Value) -> Self {
        Self {
            previous: Snapshot::new(previous),
            parent,
            name: None,
            value,
        }
    }

    /// An empty object, empty array or `null` child.
    pub fn of_kind(previous: Value, parent: Path, kind: NodeKind) -> Self {
        Self::new(previous, parent, kind.empty_value())
    }

    /// Preferred key when the parent is an object; ignored for arrays.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl Command for CreateCommand {
    fn payload(&self) -> Payload {
        Payload::Create {
            parent: self.parent.clone(),
            name: self.name.clone(),
            kind: NodeKind::of(&self.value),
        }
    }

    fn execute(&self) -> Result<Value, CommandError> {
        let mut doc = self.previous.working_copy();
        let kind = NodeKind::of(&self.value);
        let name = self.name.as_deref().unwrap_or(kind.fresh_key());
        let container = get_mut(&mut doc, &self.parent)?;
        attach(container, name, self.value.clone())
            .ok_or_else(|| AccessError::NotAContainer(self.parent.clone()))?;
        Ok(doc)
    }

    fn undo(&self) -> Result<Value, CommandError> {
        Ok(self.previous.restore())
    }
}

// ── Delete ────────────────────────────────────────────────────────────────

/// Remove every selected node. Nodes inside another selected container are
/// removed with it.
pub struct DeleteCommand {
    previous: Snapshot,
    paths: Vec<Path>,
}

impl DeleteCommand {
    pub fn new(previous: Value, paths: Vec<Path>) -> Self {
        Self {
            previous: Snapshot::new(previous),
            paths,
        }
    }
}

impl Command for DeleteCommand {
    fn payload(&self) -> Payload {
        Payload::Delete {
            paths: self.paths.clone(),
        }
    }

    fn execute(&self) -> Result<Value, CommandError> {
        let mut doc = self.previous.working_copy();
        let resolution = resolve_selection(&doc, &self.paths, None);
        if resolution.ordered.is_empty() {
            return Err(CommandError::NothingSelected);
        }
        for path in resolution.ordered.iter().rev() {
            remove(&mut doc, path)?;
        }
        Ok(doc)
    }

    fn undo(&self) -> Result<Value, CommandError> {
        Ok(self.previous.restore())
    }
}

// ── Modify ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueChange {
    /// Replace the value.
    Revalue(Value),
    /// Switch to another kind, starting from its empty value. Retyping to
    /// the current kind keeps the value.
    Retype(NodeKind),
}

/// Rename, retype or revalue a single node.
pub struct ModifyCommand {
    previous: Snapshot,
    path: Path,
    rename: Option<String>,
    change: Option<ValueChange>,
}

impl ModifyCommand {
    pub fn new(previous: Value, path: Path) -> Self {
        Self {
            previous: Snapshot::new(previous),
            path,
            rename: None,
            change: None,
        }
    }

    pub fn rename(previous: Value, path: Path, name: impl Into<String>) -> Self {
        Self::new(previous, path).with_name(name)
    }

    pub fn revalue(previous: Value, path: Path, value: Value) -> Self {
        Self::new(previous, path).with_change(ValueChange::Revalue(value))
    }

    pub fn retype(previous: Value, path: Path, kind: NodeKind) -> Self {
        Self::new(previous, path).with_change(ValueChange::Retype(kind))
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.rename = Some(name.into());
        self
    }

    pub fn with_change(mut self, change: ValueChange) -> Self {
        self.change = Some(change);
        self
    }
}

impl Command for ModifyCommand {
    fn payload(&self) -> Payload {
        Payload::Modify {
            path: self.path.clone(),
            name: self.rename.clone(),
            change: self.change.clone(),
        }
    }

    fn execute(&self) -> Result<Value, CommandError> {
        if self.rename.is_none() && self.change.is_none() {
            return Err(CommandError::NoChange);
        }
        let mut doc = self.previous.working_copy();
        let current = get(&doc, &self.path)?;
        let next = match &self.change {
            Some(ValueChange::Revalue(value)) => Some(value.clone()),
            Some(ValueChange::Retype(kind)) if NodeKind::of(current) != *kind => {
                Some(kind.empty_value())
            }
            Some(ValueChange::Retype(_)) | None => None,
        };
        if let Some(value) = next {
            set(&mut doc, &self.path, value)?;
        }
        if let Some(name) = &self.rename {
            rename_key(&mut doc, &self.path, name)?;
        }
        Ok(doc)
    }

    fn undo(&self) -> Result<Value, CommandError> {
        Ok(self.previous.restore())
    }
}

// ── Move ──────────────────────────────────────────────────────────────────

/// Relocate the selection into a target container.
pub struct MoveCommand {
    previous: Snapshot,
    paths: Vec<Path>,
    target: Path,
    options: MoveOptions,
}

impl MoveCommand {
    pub fn new(previous: Value, paths: Vec<Path>, target: Path) -> Self {
        Self::with_options(previous, paths, target, MoveOptions::default())
    }

    pub fn with_options(previous: Value, paths: Vec<Path>, target: Path, options: MoveOptions) -> Self {
        Self {
            previous: Snapshot::new(previous),
            paths,
            target,
            options,
        }
    }
}

impl Command for MoveCommand {
    fn payload(&self) -> Payload {
        Payload::Move {
            paths: self.paths.clone(),
            target: self.target.clone(),
            target_index: self.options.target_index,
        }
    }

    fn execute(&self) -> Result<Value, CommandError> {
        let outcome = relocate(
            self.previous.working_copy(),
            &self.paths,
            &self.target,
            &self.options,
        )?;
        if outcome.moved.is_empty() {
            return Err(CommandError::NothingSelected);
        }
        Ok(outcome.doc)
    }

    fn undo(&self) -> Result<Value, CommandError> {
        Ok(self.previous.restore())
    }
}

// ── Replace ───────────────────────────────────────────────────────────────

/// Swap the whole document for another one.
pub struct ReplaceCommand {
    previous: Snapshot,
    document: Snapshot,
}

impl ReplaceCommand {
    pub fn new(previous: Value, document: Value) -> Self {
        Self {
            previous: Snapshot::new(previous),
            document: Snapshot::new(document),
        }
    }
}

impl Command for ReplaceCommand {
    fn payload(&self) -> Payload {
        Payload::Replace
    }

    fn execute(&self) -> Result<Value, CommandError> {
        Ok(self.document.working_copy())
    }

    fn undo(&self) -> Result<Value, CommandError> {
        Ok(self.previous.restore())
    }
}
