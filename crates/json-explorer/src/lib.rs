//! json-explorer - path-addressable editing of JSON documents.
//!
//! A document is a [`serde_json::Value`]; every location in it is addressed
//! by a [`Path`] such as `root.users[0].name`. On top of that sit:
//!
//! - [`accessor`] - get/set/remove/copy/rename at a path
//! - [`tree`]     - depth-first [`Node`] lists for presentation
//! - [`mover`]    - conflict-free relocation of a multi-selection
//! - [`command`]  - one reversible (or not) unit of work per user intent
//! - [`history`]  - bounded undo/redo stacks of commands
//!
//! # Example
//!
//! ```
//! use json_explorer::command::{CreateCommand, MoveCommand};
//! use json_explorer::history::History;
//! use json_explorer::Path;
//! use serde_json::json;
//!
//! let mut history = History::new();
//! let doc = json!({"inbox": [], "note": "hi"});
//!
//! let doc = history
//!     .execute(MoveCommand::new(doc, vec!["root.note".parse().unwrap()], "root.inbox".parse().unwrap()))
//!     .unwrap();
//! assert_eq!(doc, json!({"inbox": ["hi"]}));
//!
//! let doc = history
//!     .execute(CreateCommand::new(doc, Path::root(), json!(true)).named("done"))
//!     .unwrap();
//! assert_eq!(doc, json!({"inbox": ["hi"], "done": true}));
//!
//! assert_eq!(history.undo().unwrap(), Some(json!({"inbox": ["hi"]})));
//! ```

pub mod accessor;
pub mod command;
pub mod history;
pub mod json_cli;
pub mod mover;
pub mod node;
pub mod store;
pub mod tree;

pub use json_explorer_path::{decode, encode, Path, PathError, Segment};

pub use accessor::{copy, deep_clone, get, inspect, remove, set, AccessError};
pub use command::{Command, CommandError};
pub use history::{History, HistoryConfig};
pub use mover::{move_nodes, relocate, resolve_selection, MoveError, MoveOptions, MoveOutcome};
pub use node::{Node, NodeKind};
pub use store::{ClipboardEntry, ClipboardStore, DocumentSink, MemoryClipboard, MemorySink};
pub use tree::{compile, flatten};
