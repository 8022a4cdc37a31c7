//! wordhtml-core
//!
//! Pure domain types: style options, presets, per-file conversion results
//! and selection entries. No filesystem or conversion dependency; this is the
//! shared vocabulary of the converter.

pub mod error;
pub mod models;
