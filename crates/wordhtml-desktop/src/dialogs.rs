use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

/// Dialog futures are awaited on the calling task and need not be `Send`.
pub type PickFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Source of user-chosen paths. An empty list or `None` means the user
/// cancelled.
pub trait FilePicker {
    fn pick_documents(&self) -> PickFuture<'_, Vec<PathBuf>>;

    fn pick_output_dir(&self) -> PickFuture<'_, Option<PathBuf>>;
}

/// Native open/folder dialogs.
#[derive(Debug, Clone, Default)]
pub struct NativePicker {
    /// Folder the dialogs open in.
    pub start_dir: Option<PathBuf>,
}

impl NativePicker {
    fn dialog(&self) -> rfd::AsyncFileDialog {
        let dialog = rfd::AsyncFileDialog::new();
        match &self.start_dir {
            Some(dir) => dialog.set_directory(dir),
            None => dialog,
        }
    }
}

impl FilePicker for NativePicker {
    fn pick_documents(&self) -> PickFuture<'_, Vec<PathBuf>> {
        let dialog = self
            .dialog()
            .set_title("Select Word documents")
            .add_filter("Word Documents", &["docx", "doc"]);
        Box::pin(async move {
            dialog
                .pick_files()
                .await
                .unwrap_or_default()
                .iter()
                .map(|handle| handle.path().to_path_buf())
                .collect()
        })
    }

    fn pick_output_dir(&self) -> PickFuture<'_, Option<PathBuf>> {
        let dialog = self.dialog().set_title("Select output folder");
        Box::pin(async move {
            dialog
                .pick_folder()
                .await
                .map(|handle| handle.path().to_path_buf())
        })
    }
}
