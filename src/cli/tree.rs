//! The `tree` command

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::{Config, UnlockTree};

use super::output::Output;

/// Prints the track's unlock structure. Accepts either a track root or a
/// direct path to a config file. Warnings go to the diagnostic stream and
/// never fail the command.
pub fn run(path: &Path, with_difficulty: bool, output: &Output) -> Result<()> {
    let config_path = if path.extension().is_some_and(|ext| ext == "json") {
        path.to_path_buf()
    } else {
        path.join("config.json")
    };

    output.verbose_ctx("tree", &format!("Reading config: {}", config_path.display()));

    let json = fs::read_to_string(&config_path)
        .with_context(|| format!("path not found: {}", config_path.display()))?;
    let config = Config::from_json(&json)?;

    let tree = UnlockTree::build(&config.exercises);
    for warning in tree.warnings() {
        output.warn(&warning.to_string());
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    tree.render(&mut handle, &config.language, with_difficulty)?;
    handle.flush()?;

    Ok(())
}
