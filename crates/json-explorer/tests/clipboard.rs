//! Cut, copy and paste through an injected clipboard.

mod common;

use common::{p, paths};
use json_explorer::command::{CopyCommand, CutCommand, PasteCommand};
use json_explorer::{ClipboardEntry, ClipboardStore, CommandError, History, MemoryClipboard};
use serde_json::json;
use std::rc::Rc;

#[test]
fn cut_and_paste_between_containers() {
    let clipboard = Rc::new(MemoryClipboard::new());
    let mut history = History::new();
    let doc0 = json!({"src": {"a": 1, "b": [true]}, "dst": []});

    let doc1 = history
        .execute(CutCommand::new(doc0.clone(), paths(&["root.src.a", "root.src.b"]), clipboard.clone()))
        .unwrap();
    assert_eq!(doc1, json!({"src": {}, "dst": []}));

    let paste = PasteCommand::new(doc1, p("root.dst"), clipboard.as_ref()).unwrap();
    let doc2 = history.execute(paste).unwrap();
    assert_eq!(doc2, json!({"src": {}, "dst": [1, [true]]}));

    history.undo().unwrap();
    assert_eq!(history.undo().unwrap(), Some(doc0));
    // The clipboard is not rolled back.
    assert!(clipboard.has());
}

#[test]
fn copy_then_paste_twice_into_object() {
    let clipboard = Rc::new(MemoryClipboard::new());
    let mut history = History::new();
    let doc = json!({"item": {"n": 1}});

    history
        .execute(CopyCommand::new(doc.clone(), paths(&["root.item"]), clipboard.clone()))
        .unwrap();
    let doc = history
        .execute(PasteCommand::new(doc, p("root"), clipboard.as_ref()).unwrap())
        .unwrap();
    let doc = history
        .execute(PasteCommand::new(doc, p("root"), clipboard.as_ref()).unwrap())
        .unwrap();
    assert_eq!(
        doc,
        json!({"item": {"n": 1}, "newObject": {"n": 1}, "newObject2": {"n": 1}})
    );
    assert_eq!(history.undo_labels(), vec!["paste", "paste"]);
}

#[test]
fn pasted_values_are_detached_from_the_clipboard() {
    let clipboard = MemoryClipboard::new();
    clipboard.write(vec![ClipboardEntry {
        name: "k".into(),
        value: json!({"deep": [1]}),
    }]);
    let mut history = History::new();
    let doc = history
        .execute(PasteCommand::new(json!({}), p("root"), &clipboard).unwrap())
        .unwrap();
    clipboard.clear();
    assert_eq!(doc, json!({"k": {"deep": [1]}}));
    assert_eq!(history.redo().unwrap(), None);
    assert_eq!(history.undo().unwrap(), Some(json!({})));
    assert_eq!(history.redo().unwrap(), Some(json!({"k": {"deep": [1]}})));
}

#[test]
fn paste_without_content() {
    let clipboard = MemoryClipboard::new();
    clipboard.write(Vec::new());
    assert!(matches!(
        PasteCommand::new(json!({}), p("root"), &clipboard),
        Err(CommandError::ClipboardEmpty)
    ));
}
