//! Track loading
//!
//! A track is loaded fresh from disk per invocation: the `config.json`
//! manifest, the optional maintainer list, and one discovered [`Exercise`]
//! per subdirectory of `exercises/`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::domain::config::{Config, ConfigError, MaintainerConfig};
use crate::domain::exercise::Exercise;

/// Structural problems that abort processing of a track.
#[derive(Debug, Error)]
pub enum TrackError {
    #[error("path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("invalid config {}: {source}", path.display())]
    InvalidConfig {
        path: PathBuf,
        source: ConfigError,
    },

    #[error("invalid {name} '{pattern}': {source}")]
    InvalidPattern {
        name: &'static str,
        pattern: String,
        source: regex::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: io::Error,
    },
}

/// A track: its manifest, its maintainers, and the exercises found on disk.
#[derive(Debug, Default)]
pub struct Track {
    /// Base name of the track directory, e.g. `rust` for `tracks/rust`.
    pub id: String,
    pub config: Config,
    pub maintainers: MaintainerConfig,
    pub exercises: Vec<Exercise>,
}

impl Track {
    /// Loads a track from its root directory.
    pub fn load(root: &Path) -> Result<Self, TrackError> {
        if !root.is_dir() {
            return Err(TrackError::PathNotFound(root.to_path_buf()));
        }

        let id = root
            .canonicalize()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_default();

        let config = load_config(&root.join("config.json"))?;
        let maintainers = load_maintainers(&root.join("config").join("maintainers.json"))?;
        let exercises = discover_exercises(&root.join("exercises"), &config)?;

        Ok(Self {
            id,
            config,
            maintainers,
            exercises,
        })
    }

    /// Slugs declared in the manifest, in manifest order.
    pub fn manifest_slugs(&self) -> impl Iterator<Item = &str> {
        self.config.exercises.iter().map(|e| e.slug.as_str())
    }

    /// Slugs of the implementations found on disk.
    pub fn discovered_slugs(&self) -> impl Iterator<Item = &str> {
        self.exercises.iter().map(|e| e.slug.as_str())
    }
}

fn load_config(path: &Path) -> Result<Config, TrackError> {
    let json = read_file(path)?;
    Config::from_json(&json).map_err(|source| TrackError::InvalidConfig {
        path: path.to_path_buf(),
        source,
    })
}

/// A missing maintainers file means "no maintainers"; a malformed one is a
/// hard error.
fn load_maintainers(path: &Path) -> Result<MaintainerConfig, TrackError> {
    if !path.exists() {
        return Ok(MaintainerConfig::default());
    }
    let json = read_file(path)?;
    MaintainerConfig::from_json(&json).map_err(|source| TrackError::InvalidConfig {
        path: path.to_path_buf(),
        source,
    })
}

fn read_file(path: &Path) -> Result<String, TrackError> {
    if !path.exists() {
        return Err(TrackError::PathNotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(|source| TrackError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn readme_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"README\.md").expect("static pattern"))
}

fn compile(name: &'static str, pattern: &str) -> Result<Regex, TrackError> {
    Regex::new(pattern).map_err(|source| TrackError::InvalidPattern {
        name,
        pattern: pattern.to_string(),
        source,
    })
}

/// Builds one [`Exercise`] per valid subdirectory of `exercises/`.
///
/// Directory names starting with `.` or `_` are not exercises.
fn discover_exercises(dir: &Path, config: &Config) -> Result<Vec<Exercise>, TrackError> {
    if !dir.is_dir() {
        return Err(TrackError::PathNotFound(dir.to_path_buf()));
    }

    let solution = compile("solution_pattern", &config.patterns.solution_pattern)?;
    let test_suite = compile("test_pattern", &config.patterns.test_pattern)?;

    let mut entries: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|source| TrackError::Io {
            path: dir.to_path_buf(),
            source,
        })?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    entries.sort();

    let mut exercises = Vec::new();
    for path in entries {
        let slug = match path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => continue,
        };
        if slug.starts_with('.') || slug.starts_with('_') {
            continue;
        }

        let files = walk_files(&path)?;
        let find = |re: &Regex| {
            files
                .iter()
                .find(|p| re.is_match(&p.to_string_lossy()))
                .cloned()
        };

        exercises.push(Exercise {
            slug,
            readme_path: find(readme_pattern()),
            solution_path: find(&solution),
            test_suite_path: find(&test_suite),
        });
    }

    Ok(exercises)
}

/// Recursively collects the files under `root` as sorted root-relative paths.
fn walk_files(root: &Path) -> Result<Vec<PathBuf>, TrackError> {
    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let entries = fs::read_dir(&dir).map_err(|source| TrackError::Io {
            path: dir.clone(),
            source,
        })?;

        for entry in entries.filter_map(|e| e.ok()) {
            let path = entry.path();
            if path.is_dir() {
                pending.push(path);
            } else if let Ok(relative) = path.strip_prefix(root) {
                files.push(relative.to_path_buf());
            }
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn minimal_config() -> &'static str {
        r#"{
            "track_id": "fake",
            "language": "Fake",
            "active": true,
            "exercises": [
                {"slug": "apple", "uuid": "001"},
                {"slug": "banana", "uuid": "002"}
            ]
        }"#
    }

    #[test]
    fn load_discovers_exercise_files() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();

        write(root, "config.json", minimal_config());
        write(root, "exercises/apple/README.md", "# Apple");
        write(root, "exercises/apple/example.fake", "solution");
        write(root, "exercises/apple/apple_test.fake", "tests");
        write(root, "exercises/banana/notes.txt", "nothing useful");

        let track = Track::load(root).unwrap();

        assert_eq!(track.exercises.len(), 2);

        let apple = &track.exercises[0];
        assert_eq!(apple.slug, "apple");
        assert!(apple.has_readme());
        assert!(apple.has_solution());
        assert!(apple.has_test_suite());
        assert_eq!(apple.solution_path.as_deref(), Some(Path::new("example.fake")));

        let banana = &track.exercises[1];
        assert!(!banana.has_readme());
        assert!(!banana.has_solution());
        assert!(!banana.has_test_suite());
    }

    #[test]
    fn nested_solution_files_are_found() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();

        write(root, "config.json", r#"{"exercises": [{"slug": "apple"}]}"#);
        write(root, "exercises/apple/src/Example.fake", "solution");

        let track = Track::load(root).unwrap();
        assert_eq!(
            track.exercises[0].solution_path.as_deref(),
            Some(Path::new("src/Example.fake"))
        );
    }

    #[test]
    fn hidden_and_underscored_directories_are_skipped() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();

        write(root, "config.json", "{}");
        write(root, "exercises/.meta/notes.md", "meta");
        write(root, "exercises/_template/stub.fake", "template");
        write(root, "exercises/apple/README.md", "# Apple");

        let track = Track::load(root).unwrap();

        assert_eq!(track.exercises.len(), 1);
        assert_eq!(track.exercises[0].slug, "apple");
    }

    #[test]
    fn track_id_is_the_directory_name() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("numbers");
        fs::create_dir_all(&root).unwrap();

        write(&root, "config.json", "{}");
        fs::create_dir_all(root.join("exercises")).unwrap();

        let track = Track::load(&root).unwrap();
        assert_eq!(track.id, "numbers");
    }

    #[test]
    fn missing_root_is_path_not_found() {
        let result = Track::load(Path::new("/no/such/track"));
        assert!(matches!(result, Err(TrackError::PathNotFound(_))));
    }

    #[test]
    fn missing_exercises_dir_is_path_not_found() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "config.json", "{}");

        let result = Track::load(dir.path());
        assert!(matches!(result, Err(TrackError::PathNotFound(_))));
    }

    #[test]
    fn malformed_config_is_invalid_config() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "config.json", "{broken");
        fs::create_dir_all(dir.path().join("exercises")).unwrap();

        let result = Track::load(dir.path());
        assert!(matches!(result, Err(TrackError::InvalidConfig { .. })));
    }

    #[test]
    fn missing_maintainers_file_is_tolerated() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "config.json", "{}");
        fs::create_dir_all(dir.path().join("exercises")).unwrap();

        let track = Track::load(dir.path()).unwrap();
        assert!(track.maintainers.maintainers.is_empty());
    }

    #[test]
    fn malformed_maintainers_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "config.json", "{}");
        write(dir.path(), "config/maintainers.json", "{broken");
        fs::create_dir_all(dir.path().join("exercises")).unwrap();

        let result = Track::load(dir.path());
        assert!(matches!(result, Err(TrackError::InvalidConfig { .. })));
    }

    #[test]
    fn unparseable_solution_pattern_is_invalid_pattern() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "config.json",
            r#"{"solution_pattern": "(unclosed"}"#,
        );
        fs::create_dir_all(dir.path().join("exercises")).unwrap();

        let result = Track::load(dir.path());
        assert!(matches!(result, Err(TrackError::InvalidPattern { .. })));
    }
}
