//! # Undo/Redo History
//!
//! Two bounded stacks of executed commands.
//!
//! ## Rules
//!
//! - Only reversible commands are recorded; the result of every command is
//!   returned either way
//! - Recording a command clears the redo stack
//! - When the undo stack grows past its capacity the oldest command is
//!   dropped
//! - A command whose `execute` fails is not recorded; a failed undo or redo
//!   leaves the command where it was
//!
//! ## Example
//!
//! ```
//! use json_explorer::command::ReplaceCommand;
//! use json_explorer::history::History;
//! use serde_json::json;
//!
//! let mut history = History::new();
//! let doc = history.execute(ReplaceCommand::new(json!(1), json!(2))).unwrap();
//! assert_eq!(doc, json!(2));
//! assert_eq!(history.undo().unwrap(), Some(json!(1)));
//! assert_eq!(history.redo().unwrap(), Some(json!(2)));
//! ```

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::command::{Command, CommandError};

/// Default number of undo levels.
pub const DEFAULT_HISTORY_CAPACITY: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of undo levels.
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

pub struct History {
    /// Executed commands, most recent last.
    undo_stack: VecDeque<Box<dyn Command>>,
    /// Undone commands, most recent last.
    redo_stack: VecDeque<Box<dyn Command>>,
    config: HistoryConfig,
}

impl History {
    pub fn new() -> Self {
        Self::with_config(HistoryConfig::default())
    }

    pub fn with_config(config: HistoryConfig) -> Self {
        Self {
            undo_stack: VecDeque::with_capacity(config.capacity),
            redo_stack: VecDeque::new(),
            config,
        }
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Execute `command` and record it if it is reversible.
    pub fn execute(&mut self, command: impl Command + 'static) -> Result<Value, CommandError> {
        self.execute_boxed(Box::new(command))
    }

    pub fn execute_boxed(&mut self, command: Box<dyn Command>) -> Result<Value, CommandError> {
        let label = command.label();
        let doc = command.execute().inspect_err(|err| {
            debug!(command = label, %err, "command failed, history unchanged");
        })?;
        if command.is_reversible() {
            self.push_undo(command);
            self.redo_stack.clear();
            debug!(command = label, undo_depth = self.undo_stack.len(), "command recorded");
        } else {
            debug!(command = label, "command executed outside history");
        }
        Ok(doc)
    }

    /// Undo the most recent command. `Ok(None)` when there is nothing to undo.
    pub fn undo(&mut self) -> Result<Option<Value>, CommandError> {
        let Some(command) = self.undo_stack.pop_back() else {
            return Ok(None);
        };
        match command.undo() {
            Ok(doc) => {
                debug!(command = command.label(), "undo");
                self.push_redo(command);
                Ok(Some(doc))
            }
            Err(err) => {
                self.undo_stack.push_back(command);
                Err(err)
            }
        }
    }

    /// Re-execute the most recently undone command. `Ok(None)` when there is
    /// nothing to redo.
    pub fn redo(&mut self) -> Result<Option<Value>, CommandError> {
        let Some(command) = self.redo_stack.pop_back() else {
            return Ok(None);
        };
        match command.execute() {
            Ok(doc) => {
                debug!(command = command.label(), "redo");
                self.push_undo(command);
                Ok(Some(doc))
            }
            Err(err) => {
                self.redo_stack.push_back(command);
                Err(err)
            }
        }
    }

    fn push_undo(&mut self, command: Box<dyn Command>) {
        self.undo_stack.push_back(command);
        while self.undo_stack.len() > self.config.capacity {
            if let Some(evicted) = self.undo_stack.pop_front() {
                debug!(command = evicted.label(), "oldest command evicted");
            }
        }
    }

    fn push_redo(&mut self, command: Box<dyn Command>) {
        self.redo_stack.push_back(command);
        while self.redo_stack.len() > self.config.capacity {
            self.redo_stack.pop_front();
        }
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Labels of the undoable commands, oldest first.
    pub fn undo_labels(&self) -> Vec<&'static str> {
        self.undo_stack.iter().map(|command| command.label()).collect()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("History")
            .field("undo", &self.undo_labels())
            .field("redo_depth", &self.redo_stack.len())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{DeleteCommand, ExportCommand, ReplaceCommand};
    use crate::store::MemorySink;
    use serde_json::json;
    use std::rc::Rc;

    #[test]
    fn test_empty_history() {
        let mut history = History::new();
        assert_eq!(history.undo().unwrap(), None);
        assert_eq!(history.redo().unwrap(), None);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_non_reversible_is_not_recorded() {
        let mut history = History::new();
        let sink = Rc::new(MemorySink::new());
        let doc = history.execute(ExportCommand::new(json!([1]), sink.clone())).unwrap();
        assert_eq!(doc, json!([1]));
        assert_eq!(sink.len(), 1);
        assert_eq!(history.undo_depth(), 0);
    }

    #[test]
    fn test_failed_execute_is_not_recorded() {
        let mut history = History::new();
        history.execute(ReplaceCommand::new(json!(0), json!(1))).unwrap();
        history.undo().unwrap();
        let result = history.execute(DeleteCommand::new(json!({}), vec!["root.x".parse().unwrap()]));
        assert!(result.is_err());
        assert_eq!(history.undo_depth(), 0);
        // The redo branch survives a failed command.
        assert_eq!(history.redo_depth(), 1);
    }

    #[test]
    fn test_capacity_from_config() {
        let mut history = History::with_config(HistoryConfig { capacity: 2 });
        for i in 0..5 {
            history.execute(ReplaceCommand::new(json!(i), json!(i + 1))).unwrap();
        }
        assert_eq!(history.undo_depth(), 2);
        assert_eq!(history.undo().unwrap(), Some(json!(4)));
        assert_eq!(history.undo().unwrap(), Some(json!(3)));
        assert_eq!(history.undo().unwrap(), None);
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: HistoryConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, HistoryConfig::default());
        let config: HistoryConfig = serde_json::from_str(r#"{"capacity": 5}"#).unwrap();
        assert_eq!(config.capacity, 5);
    }

    #[test]
    fn test_clear() {
        let mut history = History::new();
        history.execute(ReplaceCommand::new(json!(0), json!(1))).unwrap();
        history.execute(ReplaceCommand::new(json!(1), json!(2))).unwrap();
        history.undo().unwrap();
        history.clear();
        assert_eq!((history.undo_depth(), history.redo_depth()), (0, 0));
        assert_eq!(history.undo_labels(), Vec::<&str>::new());
    }
}
