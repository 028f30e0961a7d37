//! Core types for the gridline grid engine.
//!
//! This crate provides the foundational types used across the other gridline crates:
//! - Grid configuration types (columns, rows, baseline, colors, units)
//! - Preset catalog interface and aspect ratio labels
//! - Saved grid records, drafts and patches
//! - Error types

pub mod errors;
pub mod preset;
pub mod saved;
pub mod types;

pub use errors::*;
pub use preset::*;
pub use saved::*;
pub use types::*;
