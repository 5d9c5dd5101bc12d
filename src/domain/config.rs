//! Typed model of a track's configuration files
//!
//! `config.json` declares the exercises a track delivers; the loader in
//! `storage::track` pairs it with the implementations found on disk.
//! `config/maintainers.json` is an independent file describing the people
//! behind the track.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config: {0} - try jsonlint.com")]
    Parse(String),
}

/// The regular expressions used to classify files inside an exercise
/// directory. Patterns missing from the source JSON fall back to defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatternGroup {
    #[serde(default = "default_ignore_pattern")]
    pub ignore_pattern: String,

    #[serde(default = "default_solution_pattern")]
    pub solution_pattern: String,

    #[serde(default = "default_test_pattern")]
    pub test_pattern: String,
}

fn default_ignore_pattern() -> String {
    "[Ee]xample".to_string()
}

fn default_solution_pattern() -> String {
    "[Ee]xample".to_string()
}

fn default_test_pattern() -> String {
    "(?i)test".to_string()
}

impl Default for PatternGroup {
    fn default() -> Self {
        Self {
            ignore_pattern: default_ignore_pattern(),
            solution_pattern: default_solution_pattern(),
            test_pattern: default_test_pattern(),
        }
    }
}

impl PatternGroup {
    /// Returns (name, pattern) pairs for every configured pattern.
    pub fn named_patterns(&self) -> [(&'static str, &str); 3] {
        [
            ("ignore_pattern", self.ignore_pattern.as_str()),
            ("solution_pattern", self.solution_pattern.as_str()),
            ("test_pattern", self.test_pattern.as_str()),
        ]
    }
}

/// Metadata for one exercise, as declared in `config.json`.
///
/// Entries are listed in the order the exercises are delivered.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExerciseMetadata {
    pub slug: String,

    /// Globally unique identifier. Empty before one has been assigned.
    pub uuid: String,

    /// Core exercises are the roots of the unlock tree.
    #[serde(rename = "core")]
    pub is_core: bool,

    /// Slug of the core exercise that unlocks this one; `null` for core
    /// and bonus exercises.
    pub unlocked_by: Option<String>,

    pub difficulty: u32,

    /// `None` round-trips as JSON `null`, `Some(vec![])` as `[]`. The
    /// distinction is deliberate and must survive serialization.
    pub topics: Option<Vec<String>>,

    #[serde(rename = "deprecated")]
    pub is_deprecated: bool,

    #[serde(skip_serializing_if = "is_false")]
    pub auto_approve: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl ExerciseMetadata {
    /// The UUID with surrounding whitespace removed. Uniqueness checks
    /// compare trimmed values.
    pub fn trimmed_uuid(&self) -> &str {
        self.uuid.trim()
    }

    /// The unlock reference, treating both `null` and `""` as absent.
    pub fn unlock_slug(&self) -> Option<&str> {
        self.unlocked_by.as_deref().filter(|s| !s.is_empty())
    }
}

/// A track configuration, parsed from `config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub track_id: String,
    pub language: String,
    pub active: bool,
    pub blurb: String,
    pub gitter: Option<String>,
    pub checklist_issue: Option<u64>,

    #[serde(flatten)]
    pub patterns: PatternGroup,

    /// Slugs the track has decided never to implement.
    #[serde(rename = "foregone")]
    pub foregone_slugs: Vec<String>,

    /// Slugs retired from delivery but kept for history.
    #[serde(rename = "deprecated")]
    pub deprecated_slugs: Vec<String>,

    pub exercises: Vec<ExerciseMetadata>,
}

impl Config {
    /// Parses a configuration from raw JSON. Pattern defaults apply only
    /// when the corresponding key is absent from the source.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

/// Contents of `config/maintainers.json`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MaintainerConfig {
    pub docs_url: String,
    pub maintainers: Vec<Maintainer>,
}

/// One track maintainer, current or emeritus.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Maintainer {
    pub github_username: String,
    pub alumnus: bool,
    pub show_on_website: bool,
    pub name: Option<String>,
    pub link_text: Option<String>,
    pub link_url: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
}

impl MaintainerConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}
