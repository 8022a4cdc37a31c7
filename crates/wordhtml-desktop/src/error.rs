use thiserror::Error;

use wordhtml_core::error::CoreError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no files selected")]
    NoFilesSelected,

    #[error("no output directory selected")]
    NoOutputDirectory,

    #[error("no valid Word documents (.docx, .doc) in the selection")]
    NoValidDocuments,

    #[error("all selected files are already in the list")]
    AllAlreadySelected,

    #[error("no file at position {0}")]
    NoSuchFile(usize),

    #[error(transparent)]
    Core(#[from] CoreError),
}
