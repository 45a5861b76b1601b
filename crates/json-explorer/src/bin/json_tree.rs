//! `json-tree` - print the node list of a JSON document.
//!
//! Usage:
//!   json-tree [path] [depth]
//!   json-tree --value <path>
//!
//! The document is read from stdin. Each output line is one node as JSON,
//! starting with the node at `path` (default `root`). `depth` limits how many
//! levels below it are listed; `*` lists everything. With `--value` only the
//! value at `path` is printed, pretty.
//!
//! Set `RUST_LOG=debug` for diagnostics on stderr.

use json_explorer::json_cli::run;
use std::io::{self, Read, Write};
use tracing_subscriber::EnvFilter;

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        fail(e);
    }

    let lines = run(&args, buf.trim()).unwrap_or_else(|e| fail(e));
    let mut out = io::stdout().lock();
    for line in lines {
        if let Err(e) = writeln!(out, "{line}") {
            fail(e);
        }
    }
}
