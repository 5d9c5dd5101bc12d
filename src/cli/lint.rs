//! The `lint` command

use std::path::Path;

use crate::checks;
use crate::checks::remote::RemoteValidator;
use crate::storage::Track;

use super::output::Output;

/// Lints one track. Returns true when the track failed, either because a
/// check found violations or because the track could not be processed at
/// all. Never panics or exits; the caller owns the exit code.
pub fn run(path: &Path, remote: Option<&RemoteValidator>, output: &Output) -> bool {
    output.verbose_ctx("lint", &format!("Linting track at: {}", path.display()));

    let track = match Track::load(path) {
        Ok(track) => track,
        Err(e) => {
            output.error(&e.to_string());
            return true;
        }
    };

    output.verbose_ctx(
        "lint",
        &format!(
            "Loaded {} manifest entries, {} implementations",
            track.config.exercises.len(),
            track.exercises.len()
        ),
    );

    let messages = match checks::lint(&track, remote) {
        Ok(messages) => messages,
        Err(e) => {
            output.error(&e.to_string());
            return true;
        }
    };

    if messages.is_empty() {
        output.verbose_ctx("lint", "No problems found");
        return false;
    }

    if output.is_json() {
        output.data(&serde_json::json!({
            "track": track.id,
            "violations": messages,
        }));
    } else {
        for message in &messages {
            println!("-> {}", message);
        }
    }

    true
}
