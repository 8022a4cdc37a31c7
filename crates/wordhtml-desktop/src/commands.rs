use std::path::PathBuf;

use wordhtml_core::models::file_entry::FileEntry;
use wordhtml_core::models::options::StyleOptions;
use wordhtml_core::models::preset::Preset;
use wordhtml_export::converter::DocumentConverter;

use crate::dialogs::FilePicker;
use crate::report::ConversionReport;
use crate::state::DesktopState;

/// Ask for documents and add them to the selection. Returns the full
/// selection afterwards; a cancelled dialog leaves it unchanged.
pub async fn select_files(
    state: &DesktopState,
    picker: &dyn FilePicker,
) -> Result<Vec<FileEntry>, String> {
    let paths = picker.pick_documents().await;
    let mut session = state.session.lock().await;
    if !paths.is_empty() {
        session.add_files(paths).map_err(|e| e.to_string())?;
    }
    Ok(session.files().to_vec())
}

pub async fn select_output_directory(
    state: &DesktopState,
    picker: &dyn FilePicker,
) -> Result<Option<PathBuf>, String> {
    let picked = picker.pick_output_dir().await;
    let mut session = state.session.lock().await;
    if let Some(dir) = picked {
        session.set_output_dir(dir);
    }
    Ok(session.output_dir().map(|d| d.to_path_buf()))
}

pub async fn remove_file(state: &DesktopState, index: usize) -> Result<Vec<FileEntry>, String> {
    let mut session = state.session.lock().await;
    session.remove_file(index).map_err(|e| e.to_string())?;
    Ok(session.files().to_vec())
}

pub async fn clear_files(state: &DesktopState) -> Result<(), String> {
    state.session.lock().await.clear_files();
    Ok(())
}

pub async fn apply_preset(state: &DesktopState, preset: String) -> Result<StyleOptions, String> {
    let preset = preset.parse::<Preset>().map_err(|e| e.to_string())?;
    let mut session = state.session.lock().await;
    session.apply_preset(preset);
    Ok(session.options().clone())
}

pub async fn set_option(
    state: &DesktopState,
    key: String,
    value: String,
) -> Result<StyleOptions, String> {
    let mut session = state.session.lock().await;
    session
        .set_option(&key, &value)
        .map_err(|e| e.to_string())?;
    Ok(session.options().clone())
}

/// Convert the current selection. The session is snapshotted first so the
/// lock is not held while files convert.
pub async fn start_conversion(
    state: &DesktopState,
    converter: &dyn DocumentConverter,
) -> Result<ConversionReport, String> {
    let session = state.session.lock().await.clone();
    let results = session
        .start_conversion(converter, |progress| {
            tracing::info!(
                file = %progress.file,
                "converting {}/{}",
                progress.index + 1,
                progress.total
            );
        })
        .await
        .map_err(|e| e.to_string())?;
    Ok(ConversionReport::new(results))
}
