//! The `fmt` command
//!
//! Rewrites `config.json` and `config/maintainers.json` in canonical form.
//! A file already in canonical form is left untouched, so repeated runs are
//! idempotent and the unified diff is the whole story of a run.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde_json::Value;
use similar::TextDiff;

use crate::storage::canon;

use super::output::Output;

/// Formats the track's configuration files. With `check`, nothing is
/// written; the return value says whether changes were (or would be) made.
pub fn run(path: &Path, check: bool, output: &Output) -> Result<bool> {
    let targets: [(PathBuf, fn(Value) -> Value); 2] = [
        (path.join("config.json"), canon::canonical_config),
        (
            path.join("config").join("maintainers.json"),
            canon::canonical_maintainers,
        ),
    ];

    let mut changed: Vec<PathBuf> = Vec::new();

    for (file, canonicalize) in targets {
        if !file.exists() {
            bail!("path not found: {}", file.display());
        }

        let original = fs::read_to_string(&file)
            .with_context(|| format!("failed to read {}", file.display()))?;
        let value: Value = serde_json::from_str(&original)
            .with_context(|| format!("invalid JSON in {}", file.display()))?;

        let rendered = canon::render(&canonicalize(value))
            .with_context(|| format!("failed to render {}", file.display()))?;

        if rendered == original {
            output.verbose_ctx("fmt", &format!("{} already canonical", file.display()));
            continue;
        }

        if output.is_verbose() {
            let diff = TextDiff::from_lines(&original, &rendered)
                .unified_diff()
                .to_string();
            println!("{}\n\n{}", file.display(), diff);
        }

        if !check {
            fs::write(&file, &rendered)
                .with_context(|| format!("failed to write {}", file.display()))?;
        }

        changed.push(file);
    }

    if !changed.is_empty() {
        let heading = if check {
            "changes required in:"
        } else {
            "changes made to:"
        };

        if output.is_json() {
            output.data(&serde_json::json!({
                "check": check,
                "changed": changed
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>(),
            }));
        } else {
            println!("{}", heading);
            for file in &changed {
                println!("{}", file.display());
            }
        }
    }

    Ok(!changed.is_empty())
}
