//! Filesystem layer
//!
//! Loads tracks from disk and produces the canonical byte form of the
//! configuration files.

pub mod canon;
pub mod track;

pub use track::{Track, TrackError};
