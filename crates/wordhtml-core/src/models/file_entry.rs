use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Extensions accepted into a selection (compared case-insensitively).
pub const DOCUMENT_EXTENSIONS: &[&str] = &["docx", "doc"];

/// A file queued for conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub path: PathBuf,
    pub name: String,
    /// Human-readable size, e.g. `1.5 KB`.
    pub size: String,
}

impl FileEntry {
    pub fn new(path: PathBuf, size_bytes: u64) -> Self {
        let name = display_name(&path);
        Self {
            path,
            name,
            size: format_file_size(size_bytes),
        }
    }
}

/// Base name of a path with its extension, lossily decoded.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

pub fn is_document_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .is_some_and(|ext| DOCUMENT_EXTENSIONS.contains(&ext.as_str()))
}

/// Format a byte count with base-1024 units and at most two decimals.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let fixed = format!("{value:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[unit])
}
