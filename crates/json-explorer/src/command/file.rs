//! Import and export of the whole document as JSON text.

use std::rc::Rc;

use serde_json::Value;

use super::{Command, CommandError, Payload, Snapshot};
use crate::store::DocumentSink;

/// Replace the document with one parsed from JSON text.
pub struct ImportCommand {
    previous: Snapshot,
    text: String,
}

impl ImportCommand {
    pub fn new(previous: Value, text: impl Into<String>) -> Self {
        Self {
            previous: Snapshot::new(previous),
            text: text.into(),
        }
    }
}

impl Command for ImportCommand {
    fn payload(&self) -> Payload {
        Payload::Import {
            bytes: self.text.len(),
        }
    }

    fn execute(&self) -> Result<Value, CommandError> {
        Ok(serde_json::from_str(&self.text)?)
    }

    fn undo(&self) -> Result<Value, CommandError> {
        Ok(self.previous.restore())
    }
}

/// Serialize the document and hand it to a [`DocumentSink`].
pub struct ExportCommand {
    previous: Snapshot,
    sink: Rc<dyn DocumentSink>,
    pretty: bool,
}

impl ExportCommand {
    pub fn new(previous: Value, sink: Rc<dyn DocumentSink>) -> Self {
        Self {
            previous: Snapshot::new(previous),
            sink,
            pretty: true,
        }
    }

    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }
}

impl Command for ExportCommand {
    fn payload(&self) -> Payload {
        Payload::Export {
            pretty: self.pretty,
        }
    }

    fn is_reversible(&self) -> bool {
        false
    }

    fn execute(&self) -> Result<Value, CommandError> {
        let doc = self.previous.as_value();
        let text = if self.pretty {
            serde_json::to_string_pretty(doc)
        } else {
            serde_json::to_string(doc)
        }
        .map_err(|e| CommandError::Serialize(e.to_string()))?;
        self.sink.save(&text);
        Ok(self.previous.working_copy())
    }

    fn undo(&self) -> Result<Value, CommandError> {
        Err(CommandError::UndoNotApplicable("export"))
    }
}
