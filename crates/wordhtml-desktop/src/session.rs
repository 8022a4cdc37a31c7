use std::path::{Path, PathBuf};

use wordhtml_core::models::file_entry::{FileEntry, is_document_path};
use wordhtml_core::models::options::StyleOptions;
use wordhtml_core::models::preset::Preset;
use wordhtml_core::models::result::ConversionResult;
use wordhtml_export::convert::{BatchProgress, batch_convert_with_progress};
use wordhtml_export::converter::DocumentConverter;

use crate::error::SessionError;

/// Everything the user has chosen so far: the file selection, where the
/// HTML goes, and the style options applied to every file.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    files: Vec<FileEntry>,
    output_dir: Option<PathBuf>,
    options: StyleOptions,
    /// Preset the options were last reset to. Cleared by any manual edit.
    preset: Option<Preset>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            output_dir: None,
            options: Preset::Default.options(),
            preset: Some(Preset::Default),
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session restored from saved settings.
    pub fn with_options(options: StyleOptions, preset: Option<Preset>) -> Self {
        Self {
            options,
            preset,
            ..Self::default()
        }
    }

    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    pub fn options(&self) -> &StyleOptions {
        &self.options
    }

    pub fn preset(&self) -> Option<Preset> {
        self.preset
    }

    /// Add Word documents to the selection and return how many were added.
    ///
    /// Paths without a `.docx`/`.doc` extension and paths already selected
    /// are ignored. Paths that cannot be stat'ed are skipped with a warning.
    pub fn add_files<I>(&mut self, paths: I) -> Result<usize, SessionError>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut documents = 0usize;
        let mut added = 0usize;

        for path in paths {
            if !is_document_path(&path) {
                tracing::debug!(path = %path.display(), "ignoring non-document file");
                continue;
            }
            let size = match std::fs::metadata(&path) {
                Ok(meta) => meta.len(),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable file");
                    continue;
                }
            };
            documents += 1;

            if self.files.iter().any(|f| f.path == path) {
                continue;
            }
            self.files.push(FileEntry::new(path, size));
            added += 1;
        }

        if documents == 0 {
            return Err(SessionError::NoValidDocuments);
        }
        if added == 0 {
            return Err(SessionError::AllAlreadySelected);
        }
        tracing::info!(added, selected = self.files.len(), "files added to selection");
        Ok(added)
    }

    pub fn remove_file(&mut self, index: usize) -> Result<FileEntry, SessionError> {
        if index >= self.files.len() {
            return Err(SessionError::NoSuchFile(index));
        }
        Ok(self.files.remove(index))
    }

    pub fn clear_files(&mut self) {
        self.files.clear();
    }

    pub fn set_output_dir(&mut self, dir: PathBuf) {
        tracing::info!(dir = %dir.display(), "output directory set");
        self.output_dir = Some(dir);
    }

    /// Reset every style option to the preset's values. The selection and
    /// output directory are untouched.
    pub fn apply_preset(&mut self, preset: Preset) {
        self.options.apply_preset(preset);
        self.preset = Some(preset);
        tracing::info!(preset = %preset, "preset applied");
    }

    /// Set one option from its textual form value.
    pub fn set_option(&mut self, key: &str, value: &str) -> Result<(), SessionError> {
        self.options.set_field(key, value)?;
        self.preset = None;
        Ok(())
    }

    /// Apply a `KEY=VALUE` assignment.
    pub fn assign_option(&mut self, assignment: &str) -> Result<(), SessionError> {
        self.options.assign(assignment)?;
        self.preset = None;
        Ok(())
    }

    /// Convert every selected file into the output directory.
    ///
    /// Fails without invoking `converter` when nothing is selected or no
    /// output directory has been chosen. Otherwise returns one result per
    /// selected file, in selection order.
    pub async fn start_conversion<F>(
        &self,
        converter: &dyn DocumentConverter,
        on_progress: F,
    ) -> Result<Vec<ConversionResult>, SessionError>
    where
        F: FnMut(&BatchProgress),
    {
        if self.files.is_empty() {
            return Err(SessionError::NoFilesSelected);
        }
        let output_dir = self
            .output_dir
            .as_deref()
            .ok_or(SessionError::NoOutputDirectory)?;

        let inputs: Vec<PathBuf> = self.files.iter().map(|f| f.path.clone()).collect();
        let results =
            batch_convert_with_progress(converter, &inputs, output_dir, &self.options, on_progress)
                .await;
        Ok(results)
    }
}
