//! Commands: one unit of work per user intent.
//!
//! Every command owns a snapshot of the document it was created against and
//! never touches the caller's live document. `execute` runs against a deep
//! clone of that snapshot, so it can be repeated for redo; `undo` hands the
//! snapshot back verbatim.
//!
//! Commands that only talk to an external store without changing the
//! document ([`CopyCommand`], [`ExportCommand`]) are not reversible and stay
//! out of the history.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use json_explorer_path::Path;

use crate::accessor::AccessError;
use crate::mover::MoveError;
use crate::node::NodeKind;

pub mod clipboard;
pub mod edit;
pub mod file;

pub use clipboard::{CopyCommand, CutCommand, PasteCommand};
pub use edit::{CreateCommand, DeleteCommand, ModifyCommand, MoveCommand, ReplaceCommand, ValueChange};
pub use file::{ExportCommand, ImportCommand};

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error(transparent)]
    Move(#[from] MoveError),
    #[error("PARSE: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("SERIALIZE: {0}")]
    Serialize(String),
    #[error("CLIPBOARD_EMPTY")]
    ClipboardEmpty,
    #[error("NOTHING_SELECTED")]
    NothingSelected,
    #[error("NO_CHANGE")]
    NoChange,
    #[error("UNDO_NOT_APPLICABLE: `{0}` cannot be undone")]
    UndoNotApplicable(&'static str),
}

/// The intent carried by a command, in a form suitable for logs and
/// history panels.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Payload {
    Create {
        parent: Path,
        name: Option<String>,
        kind: NodeKind,
    },
    Delete {
        paths: Vec<Path>,
    },
    Cut {
        paths: Vec<Path>,
    },
    Copy {
        paths: Vec<Path>,
    },
    Paste {
        target: Path,
        entries: usize,
    },
    Modify {
        path: Path,
        name: Option<String>,
        change: Option<ValueChange>,
    },
    Move {
        paths: Vec<Path>,
        target: Path,
        target_index: Option<usize>,
    },
    Replace,
    Import {
        bytes: usize,
    },
    Export {
        pretty: bool,
    },
}

impl Payload {
    pub fn label(&self) -> &'static str {
        match self {
            Payload::Create { .. } => "create",
            Payload::Delete { .. } => "delete",
            Payload::Cut { .. } => "cut",
            Payload::Copy { .. } => "copy",
            Payload::Paste { .. } => "paste",
            Payload::Modify { .. } => "modify",
            Payload::Move { .. } => "move",
            Payload::Replace => "replace",
            Payload::Import { .. } => "import",
            Payload::Export { .. } => "export",
        }
    }
}

pub trait Command {
    fn payload(&self) -> Payload;

    fn label(&self) -> &'static str {
        self.payload().label()
    }

    fn is_reversible(&self) -> bool {
        true
    }

    /// Apply the intent to a fresh copy of the snapshot.
    fn execute(&self) -> Result<Value, CommandError>;

    /// Return the pre-execution document.
    ///
    /// # Errors
    ///
    /// `CommandError::UndoNotApplicable` for non-reversible commands; the
    /// history never asks for it, so receiving it is a caller bug.
    fn undo(&self) -> Result<Value, CommandError>;
}

/// Pre-mutation document owned by a command.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot(Value);

impl Snapshot {
    pub fn new(doc: Value) -> Self {
        Self(doc)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// A copy to run a mutation against.
    pub fn working_copy(&self) -> Value {
        self.0.clone()
    }

    /// The snapshot itself, handed back on undo.
    pub fn restore(&self) -> Value {
        self.0.clone()
    }
}
