//! wordhtml-export
//!
//! DOCX to styled HTML: stylesheet compilation, the document shell,
//! conversion directives, the built-in DOCX reader and the single-file and
//! batch conversion drivers.

pub mod convert;
pub mod converter;
pub mod directives;
pub mod docx;
pub mod document;
pub mod error;
pub mod stylesheet;
