//! wordhtml-desktop library root.
//!
//! Re-exports the session, settings and command layers so that integration
//! tests can drive them directly without going through the `wordhtml`
//! binary or the native dialogs.

pub mod commands;
pub mod config;
pub mod dialogs;
pub mod error;
pub mod report;
pub mod session;
pub mod state;
