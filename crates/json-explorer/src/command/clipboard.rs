//! Clipboard commands.
//!
//! Cut and paste change the document and are reversible with respect to it;
//! the clipboard itself is external and is not rolled back on undo. Copy
//! leaves the document alone and never enters the history.

use std::rc::Rc;

use serde_json::Value;

use json_explorer_path::Path;

use super::{Command, CommandError, Payload, Snapshot};
use crate::accessor::{attach, deep_clone, get_mut, remove, AccessError};
use crate::mover::resolve_selection;
use crate::store::{ClipboardEntry, ClipboardStore};

fn collect_entries(doc: &Value, paths: &[Path]) -> Result<Vec<ClipboardEntry>, CommandError> {
    paths
        .iter()
        .map(|path| -> Result<ClipboardEntry, CommandError> {
            Ok(ClipboardEntry {
                name: path.name(),
                value: deep_clone(doc, path)?,
            })
        })
        .collect()
}

pub struct CutCommand {
    previous: Snapshot,
    paths: Vec<Path>,
    clipboard: Rc<dyn ClipboardStore>,
}

impl CutCommand {
    pub fn new(previous: Value, paths: Vec<Path>, clipboard: Rc<dyn ClipboardStore>) -> Self {
        Self {
            previous: Snapshot::new(previous),
            paths,
            clipboard,
        }
    }
}

impl Command for CutCommand {
    fn payload(&self) -> Payload {
        Payload::Cut {
            paths: self.paths.clone(),
        }
    }

    fn execute(&self) -> Result<Value, CommandError> {
        let mut doc = self.previous.working_copy();
        let resolution = resolve_selection(&doc, &self.paths, None);
        if resolution.ordered.is_empty() {
            return Err(CommandError::NothingSelected);
        }
        let entries = collect_entries(&doc, &resolution.ordered)?;
        for path in resolution.ordered.iter().rev() {
            remove(&mut doc, path)?;
        }
        self.clipboard.write(entries);
        Ok(doc)
    }

    fn undo(&self) -> Result<Value, CommandError> {
        Ok(self.previous.restore())
    }
}

pub struct CopyCommand {
    previous: Snapshot,
    paths: Vec<Path>,
    clipboard: Rc<dyn ClipboardStore>,
}

impl CopyCommand {
    pub fn new(previous: Value, paths: Vec<Path>, clipboard: Rc<dyn ClipboardStore>) -> Self {
        Self {
            previous: Snapshot::new(previous),
            paths,
            clipboard,
        }
    }
}

impl Command for CopyCommand {
    fn payload(&self) -> Payload {
        Payload::Copy {
            paths: self.paths.clone(),
        }
    }

    fn is_reversible(&self) -> bool {
        false
    }

    fn execute(&self) -> Result<Value, CommandError> {
        let doc = self.previous.working_copy();
        let resolution = resolve_selection(&doc, &self.paths, None);
        if resolution.ordered.is_empty() {
            return Err(CommandError::NothingSelected);
        }
        self.clipboard.write(collect_entries(&doc, &resolution.ordered)?);
        Ok(doc)
    }

    fn undo(&self) -> Result<Value, CommandError> {
        Err(CommandError::UndoNotApplicable("copy"))
    }
}

/// Insert the clipboard content into a container.
///
/// The content is read once, when the command is built, so redo pastes the
/// same entries even if the clipboard changed in between.
pub struct PasteCommand {
    previous: Snapshot,
    target: Path,
    entries: Vec<ClipboardEntry>,
}

impl PasteCommand {
    /// # Errors
    ///
    /// `CommandError::ClipboardEmpty` when there is nothing to paste.
    pub fn new(previous: Value, target: Path, clipboard: &dyn ClipboardStore) -> Result<Self, CommandError> {
        if !clipboard.has() {
            return Err(CommandError::ClipboardEmpty);
        }
        let entries = clipboard
            .read()
            .filter(|entries| !entries.is_empty())
            .ok_or(CommandError::ClipboardEmpty)?;
        Ok(Self {
            previous: Snapshot::new(previous),
            target,
            entries,
        })
    }

    /// Whether a paste can be offered at all.
    pub fn is_available(clipboard: &dyn ClipboardStore) -> bool {
        clipboard.has()
    }
}

impl Command for PasteCommand {
    fn payload(&self) -> Payload {
        Payload::Paste {
            target: self.target.clone(),
            entries: self.entries.len(),
        }
    }

    fn execute(&self) -> Result<Value, CommandError> {
        let mut doc = self.previous.working_copy();
        let container = get_mut(&mut doc, &self.target)?;
        for entry in &self.entries {
            attach(container, &entry.name, entry.value.clone())
                .ok_or_else(|| AccessError::NotAContainer(self.target.clone()))?;
        }
        Ok(doc)
    }

    fn undo(&self) -> Result<Value, CommandError> {
        Ok(self.previous.restore())
    }
}
