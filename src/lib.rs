//! Trackkit - tooling for programming-exercise track repositories
//!
//! A track pairs a `config.json` manifest with the exercise implementations
//! on disk. Trackkit reconciles the two (lint), keeps the configuration
//! files byte-stable (fmt), and renders the unlock tree (tree).

pub mod checks;
pub mod cli;
pub mod domain;
pub mod storage;

pub use domain::{Config, Exercise, ExerciseMetadata, PatternGroup, UnlockTree};
pub use storage::{Track, TrackError};
