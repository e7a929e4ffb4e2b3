//! `json-fmt` — re-format JSON from stdin to stdout.
//!
//! Usage:
//!   json-fmt [--compact]
//!
//! Pretty-prints by default; `--compact` strips all whitespace instead.

use std::io::{self, Read, Write};

fn main() {
    let compact = std::env::args().any(|arg| arg == "--compact");

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    let value = match brisk_json::parse(&buf) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = if compact {
        brisk_json::to_writer(&value, &mut out)
    } else {
        brisk_json::to_writer_pretty(&value, &mut out)
    };
    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
    let _ = out.write_all(b"\n");
}
