//! # Command-Line Interface
//!
//! User-facing commands and output formatting.
//!
//! | Command | Purpose | Exit status |
//! |---------|---------|-------------|
//! | `lint` | Run every consistency check against one or more tracks | 1 if any track failed |
//! | `fmt` | Canonicalize `config.json` and `config/maintainers.json` | 1 only with `--check` and pending changes |
//! | `tree` | Render the unlock structure | always 0 |
//!
//! All commands support `--format text|json` and `--verbose`.
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod fmt;
mod lint;
mod output;
mod tree;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
