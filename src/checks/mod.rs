//! Track consistency checks
//!
//! Each check is a pure function over a loaded [`Track`] returning the
//! slugs (or UUIDs, or patterns) that violate one rule. Checks never abort:
//! the [`lint`] orchestrator runs all of them, turns non-empty results into
//! messages, and leaves exit codes to the CLI.

pub mod folder;
pub mod remote;

use std::collections::BTreeSet;
use std::fmt;

use regex::Regex;

use crate::storage::track::Track;
use folder::Folder;
use remote::{RemoteError, RemoteValidator};

/// Slugs referenced in config.json with no implementation on disk.
/// Foregone slugs are excused.
pub fn missing_implementations(track: &Track) -> Vec<String> {
    Folder::new()
        .add(unique(track.manifest_slugs()))
        .remove(unique(track.config.foregone_slugs.iter().map(String::as_str)))
        .remove(unique(track.discovered_slugs()))
        .over(0)
}

/// Implementations on disk that config.json does not reference. Deprecated
/// and foregone slugs are excused.
pub fn missing_metadata(track: &Track) -> Vec<String> {
    let excused = unique(
        track
            .config
            .deprecated_slugs
            .iter()
            .chain(track.config.foregone_slugs.iter())
            .map(String::as_str),
    );

    Folder::new()
        .add(unique(track.discovered_slugs()))
        .remove(excused)
        .remove(unique(track.manifest_slugs()))
        .over(0)
}

/// Implementations with no example solution file.
pub fn missing_solutions(track: &Track) -> Vec<String> {
    missing_file(track, |e| e.has_solution())
}

/// Implementations with no test-suite file.
pub fn missing_test_suites(track: &Track) -> Vec<String> {
    missing_file(track, |e| e.has_test_suite())
}

/// Implementations with no README.md.
pub fn missing_readmes(track: &Track) -> Vec<String> {
    missing_file(track, |e| e.has_readme())
}

fn missing_file(track: &Track, has_file: impl Fn(&crate::domain::Exercise) -> bool) -> Vec<String> {
    let lacking = track
        .exercises
        .iter()
        .filter(|e| !has_file(e))
        .map(|e| e.slug.as_str());

    Folder::new()
        .add(unique(lacking))
        .remove(unique(track.config.foregone_slugs.iter().map(String::as_str)))
        .over(0)
}

/// Manifest entries with no UUID assigned (whitespace-only counts as none).
pub fn missing_uuids(track: &Track) -> Vec<String> {
    track
        .config
        .exercises
        .iter()
        .filter(|e| e.trimmed_uuid().is_empty())
        .map(|e| e.slug.clone())
        .collect()
}

/// Slugs that are both declared foregone and implemented on disk.
pub fn foregone_violations(track: &Track) -> Vec<String> {
    Folder::new()
        .add(unique(track.config.foregone_slugs.iter().map(String::as_str)))
        .add(unique(track.discovered_slugs()))
        .over(1)
}

/// Slugs declared in more than one mutually-exclusive category
/// (exercises, foregone, deprecated).
pub fn duplicate_slugs(track: &Track) -> Vec<String> {
    Folder::new()
        .add(&track.config.foregone_slugs)
        .add(&track.config.deprecated_slugs)
        .add(track.manifest_slugs())
        .over(1)
}

/// UUID values shared by more than one manifest entry, compared after
/// trimming whitespace. Empty UUIDs are never duplicates.
pub fn duplicate_uuids(track: &Track) -> Vec<String> {
    let uuids = track
        .config
        .exercises
        .iter()
        .map(|e| e.trimmed_uuid())
        .filter(|u| !u.is_empty());

    Folder::new().add(uuids).over(1)
}

/// Configured patterns that fail to compile locally.
pub fn invalid_patterns(track: &Track) -> Vec<String> {
    track
        .config
        .patterns
        .named_patterns()
        .iter()
        .filter(|(_, pattern)| Regex::new(pattern).is_err())
        .map(|(_, pattern)| pattern.to_string())
        .collect()
}

/// A structural violation of the unlock invariant: `unlocked_by` must name
/// a manifest exercise, and that exercise must be core.
#[derive(Debug, PartialEq, Eq)]
pub enum UnlockViolation {
    Unresolved { slug: String, reference: String },
    NotCore { slug: String, reference: String },
}

impl fmt::Display for UnlockViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unresolved { slug, reference } => write!(
                f,
                "The exercise '{slug}' has an unlocked_by reference to '{reference}', which is not defined in config.json."
            ),
            Self::NotCore { slug, reference } => write!(
                f,
                "The exercise '{slug}' has an unlocked_by reference to '{reference}', which is not a core exercise."
            ),
        }
    }
}

/// Manifest entries whose `unlocked_by` is unresolved or resolves to a
/// non-core exercise.
pub fn invalid_unlock_references(track: &Track) -> Vec<UnlockViolation> {
    let mut violations = Vec::new();

    for exercise in &track.config.exercises {
        let Some(reference) = exercise.unlock_slug() else {
            continue;
        };

        match track.config.exercises.iter().find(|e| e.slug == reference) {
            None => violations.push(UnlockViolation::Unresolved {
                slug: exercise.slug.clone(),
                reference: reference.to_string(),
            }),
            Some(parent) if !parent.is_core => violations.push(UnlockViolation::NotCore {
                slug: exercise.slug.clone(),
                reference: reference.to_string(),
            }),
            Some(_) => {}
        }
    }

    violations.sort_by(|a, b| {
        let slug = |v: &UnlockViolation| match v {
            UnlockViolation::Unresolved { slug, .. } | UnlockViolation::NotCore { slug, .. } => {
                slug.clone()
            }
        };
        slug(a).cmp(&slug(b))
    });
    violations
}

/// Runs every check against the track and returns the violation messages.
///
/// `remote` is `None` when HTTP checks are disabled; a transport failure is
/// an error for the caller to surface, not a silent skip.
pub fn lint(track: &Track, remote: Option<&RemoteValidator>) -> Result<Vec<String>, RemoteError> {
    let mut messages = Vec::new();

    for slug in missing_implementations(track) {
        messages.push(format!(
            "An exercise with slug '{slug}' is referenced in config.json, but no implementation was found."
        ));
    }
    for slug in missing_metadata(track) {
        messages.push(format!(
            "An implementation for '{slug}' was found, but config.json does not reference this exercise."
        ));
    }
    for slug in missing_solutions(track) {
        messages.push(format!(
            "The implementation for '{slug}' is missing an example solution."
        ));
    }
    for slug in missing_test_suites(track) {
        messages.push(format!(
            "The implementation for '{slug}' is missing a test suite."
        ));
    }
    for slug in missing_readmes(track) {
        messages.push(format!(
            "The implementation for '{slug}' is missing a README."
        ));
    }
    for slug in missing_uuids(track) {
        messages.push(format!(
            "The exercise '{slug}' was found in config.json, but does not have a UUID."
        ));
    }
    for slug in foregone_violations(track) {
        messages.push(format!(
            "An implementation for '{slug}' was found, but config.json specifies that it should be foregone (not implemented)."
        ));
    }
    for slug in duplicate_slugs(track) {
        messages.push(format!(
            "The exercise '{slug}' was found in multiple (conflicting) categories in config.json."
        ));
    }
    for uuid in duplicate_uuids(track) {
        messages.push(format!(
            "The UUID '{uuid}' occurs multiple times. Each exercise UUID must be unique."
        ));
    }
    for pattern in invalid_patterns(track) {
        messages.push(format!(
            "The pattern '{pattern}' failed to compile. Please check the regex."
        ));
    }
    for violation in invalid_unlock_references(track) {
        messages.push(violation.to_string());
    }

    if let Some(remote) = remote {
        let uuids: Vec<String> = track
            .config
            .exercises
            .iter()
            .map(|e| e.trimmed_uuid())
            .filter(|u| !u.is_empty())
            .map(String::from)
            .collect();

        for uuid in remote.colliding_uuids(&track.id, &uuids)? {
            messages.push(format!(
                "The UUID '{uuid}' was found in multiple tracks. Each exercise UUID must be unique across tracks."
            ));
        }
        for pattern in remote.rejected_patterns(&track.config.patterns)? {
            messages.push(format!(
                "The pattern '{pattern}' was rejected by the validation service. Please check its portability."
            ));
        }
    }

    Ok(messages)
}

fn unique<'a>(slugs: impl IntoIterator<Item = &'a str>) -> BTreeSet<&'a str> {
    slugs.into_iter().collect()
}
