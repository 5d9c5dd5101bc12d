//! Core domain model
//!
//! Pure types and logic: the manifest and its pattern group, discovered
//! exercise implementations, topic normalization, and the unlock tree.
//! Nothing in here touches the filesystem or the network.

pub mod config;
pub mod exercise;
pub mod topics;
pub mod tree;

pub use config::{Config, ExerciseMetadata, Maintainer, MaintainerConfig, PatternGroup};
pub use exercise::Exercise;
pub use tree::{GraphWarning, UnlockTree};
