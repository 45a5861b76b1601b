//! External stores the commands talk to: the clipboard and the file sink.
//!
//! Both are injected into the commands that need them, so tests can swap in
//! the in-memory implementations below.

use std::cell::RefCell;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One copied node: its name at the time of copying and a detached value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipboardEntry {
    pub name: String,
    pub value: Value,
}

pub trait ClipboardStore {
    /// `true` when there is something to paste.
    fn has(&self) -> bool;
    fn read(&self) -> Option<Vec<ClipboardEntry>>;
    fn write(&self, entries: Vec<ClipboardEntry>);
}

#[derive(Debug, Default)]
pub struct MemoryClipboard {
    slot: RefCell<Option<Vec<ClipboardEntry>>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&self) {
        self.slot.borrow_mut().take();
    }
}

impl ClipboardStore for MemoryClipboard {
    fn has(&self) -> bool {
        self.slot
            .borrow()
            .as_ref()
            .is_some_and(|entries| !entries.is_empty())
    }

    fn read(&self) -> Option<Vec<ClipboardEntry>> {
        self.slot.borrow().clone()
    }

    fn write(&self, entries: Vec<ClipboardEntry>) {
        *self.slot.borrow_mut() = Some(entries);
    }
}

/// Destination of an exported document (a file, a download, ...).
pub trait DocumentSink {
    fn save(&self, text: &str);
}

/// Sink that keeps every saved text in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    saved: RefCell<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<String> {
        self.saved.borrow().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.saved.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.saved.borrow().is_empty()
    }
}

impl DocumentSink for MemorySink {
    fn save(&self, text: &str) {
        self.saved.borrow_mut().push(text.to_string());
    }
}
