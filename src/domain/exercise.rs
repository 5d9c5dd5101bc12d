//! A discovered exercise implementation
//!
//! Built by walking an exercise directory and matching each file's relative
//! path against the track's pattern group. A `None` path means no file
//! matched.

use std::path::PathBuf;

/// An implementation of an exercise, as found on disk.
#[derive(Debug, Clone, Default)]
pub struct Exercise {
    pub slug: String,

    /// Relative path of the README, if one was found.
    pub readme_path: Option<PathBuf>,

    /// Relative path of the example solution, if one was found.
    pub solution_path: Option<PathBuf>,

    /// Relative path of the test suite, if one was found.
    pub test_suite_path: Option<PathBuf>,
}

impl Exercise {
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            ..Self::default()
        }
    }

    /// True when the exercise has a README.
    pub fn has_readme(&self) -> bool {
        self.readme_path.is_some()
    }

    /// True when the exercise has an example solution.
    pub fn has_solution(&self) -> bool {
        self.solution_path.is_some()
    }

    /// True when the exercise has a test suite.
    pub fn has_test_suite(&self) -> bool {
        self.test_suite_path.is_some()
    }
}
