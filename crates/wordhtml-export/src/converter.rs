use std::future::Future;
use std::path::Path;
use std::pin::Pin;

use crate::directives::Directives;
use crate::error::ExportError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Turns one input document into an HTML body fragment.
///
/// The drivers in [`crate::convert`] only see this trait, so tests and
/// alternative readers can stand in for the built-in
/// [`crate::docx::DocxConverter`]. Methods return boxed futures for dyn
/// compatibility.
pub trait DocumentConverter: Send + Sync {
    /// Short identifier used in logs (e.g. "docx").
    fn name(&self) -> &str;

    /// Convert the document at `input` following `directives`.
    fn convert<'a>(
        &'a self,
        input: &'a Path,
        directives: &'a Directives,
    ) -> BoxFuture<'a, Result<String, ExportError>>;
}
