//! Helpers shared by the integration tests.

#![allow(dead_code)]

use json_explorer::{Node, Path};

pub fn p(raw: &str) -> Path {
    raw.parse().unwrap()
}

pub fn paths(raw: &[&str]) -> Vec<Path> {
    raw.iter().map(|r| p(r)).collect()
}

pub fn ids(nodes: &[Node]) -> Vec<String> {
    nodes.iter().map(|node| node.id.to_string()).collect()
}

pub fn find<'a>(nodes: &'a [Node], id: &str) -> &'a Node {
    nodes
        .iter()
        .find(|node| node.id.to_string() == id)
        .unwrap_or_else(|| panic!("no node {id}"))
}
