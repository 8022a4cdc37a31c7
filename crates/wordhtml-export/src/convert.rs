use std::path::{Path, PathBuf};

use serde::Serialize;

use wordhtml_core::models::file_entry::display_name;
use wordhtml_core::models::options::StyleOptions;
use wordhtml_core::models::result::ConversionResult;

use crate::converter::DocumentConverter;
use crate::directives::Directives;
use crate::document::{assemble_document, document_title};
use crate::error::ExportError;
use crate::stylesheet::compile_stylesheet;

/// Reported before each file of a batch starts converting.
#[derive(Debug, Clone, Serialize)]
pub struct BatchProgress {
    /// Zero-based position of the file in the batch.
    pub index: usize,
    pub total: usize,
    pub file: String,
}

/// `<output_dir>/<input stem>.html`. Same-named inputs from different
/// directories map to the same output path.
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    output_dir.join(format!("{}.html", document_title(input)))
}

/// Convert one document and write the styled HTML to `output`.
///
/// Every failure (bad style map, unreadable input, write error) is folded
/// into the returned [`ConversionResult`]; nothing propagates.
pub async fn convert_file(
    converter: &dyn DocumentConverter,
    input: &Path,
    output: &Path,
    options: &StyleOptions,
) -> ConversionResult {
    let file = display_name(input);
    match try_convert(converter, input, output, options).await {
        Ok(()) => {
            tracing::info!(file = %file, output = %output.display(), "converted");
            ConversionResult::success(file, output.to_path_buf())
        }
        Err(e) => {
            tracing::warn!(file = %file, error = %e, "conversion failed");
            ConversionResult::failure(file, e)
        }
    }
}

async fn try_convert(
    converter: &dyn DocumentConverter,
    input: &Path,
    output: &Path,
    options: &StyleOptions,
) -> Result<(), ExportError> {
    let directives = Directives::derive(options)?;
    let fragment = converter.convert(input, &directives).await?;
    let stylesheet = compile_stylesheet(options)?;
    let html = assemble_document(&fragment, &document_title(input), &stylesheet)?;
    tokio::fs::write(output, html).await?;
    Ok(())
}

/// Convert `inputs` one after another into `output_dir`.
///
/// Returns one result per input, in input order. A failed file never stops
/// the files after it.
pub async fn batch_convert(
    converter: &dyn DocumentConverter,
    inputs: &[PathBuf],
    output_dir: &Path,
    options: &StyleOptions,
) -> Vec<ConversionResult> {
    batch_convert_with_progress(converter, inputs, output_dir, options, |_| {}).await
}

/// [`batch_convert`] with a callback invoked before each file starts.
pub async fn batch_convert_with_progress<F>(
    converter: &dyn DocumentConverter,
    inputs: &[PathBuf],
    output_dir: &Path,
    options: &StyleOptions,
    mut on_progress: F,
) -> Vec<ConversionResult>
where
    F: FnMut(&BatchProgress),
{
    tracing::info!(
        files = inputs.len(),
        output_dir = %output_dir.display(),
        converter = converter.name(),
        "starting batch conversion"
    );

    let mut results = Vec::with_capacity(inputs.len());
    for (index, input) in inputs.iter().enumerate() {
        on_progress(&BatchProgress {
            index,
            total: inputs.len(),
            file: display_name(input),
        });

        let output = output_path_for(input, output_dir);
        results.push(convert_file(converter, input, &output, options).await);
    }

    let failed = results.iter().filter(|r| !r.is_success()).count();
    tracing::info!(
        succeeded = results.len() - failed,
        failed,
        "batch conversion finished"
    );
    results
}
