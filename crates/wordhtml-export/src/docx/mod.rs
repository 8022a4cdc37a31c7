//! Built-in DOCX reader.
//!
//! Reads the OOXML package with `zip` and `roxmltree`, builds a small block
//! tree ([`model`]) and writes it out as an HTML body fragment ([`html`]).

pub mod html;
pub mod model;
pub mod package;
pub mod reader;

use std::io::Cursor;
use std::path::Path;

use zip::ZipArchive;

use crate::converter::{BoxFuture, DocumentConverter};
use crate::directives::{Directives, StyleMap};
use crate::error::ExportError;

use self::html::RenderContext;
use self::package::{
    DOCUMENT_PART, DOCUMENT_RELS_PART, MediaLoader, NUMBERING_PART, Numbering, Relationships,
    STYLES_PART, StyleNames, parse_xml, read_part, w_child,
};
use self::reader::BodyReader;

/// [`DocumentConverter`] backed by the built-in OOXML reader.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxConverter;

impl DocumentConverter for DocxConverter {
    fn name(&self) -> &str {
        "docx"
    }

    fn convert<'a>(
        &'a self,
        input: &'a Path,
        directives: &'a Directives,
    ) -> BoxFuture<'a, Result<String, ExportError>> {
        Box::pin(async move {
            let bytes = tokio::fs::read(input).await?;
            let directives = directives.clone();
            tokio::task::spawn_blocking(move || convert_docx_bytes(&bytes, &directives))
                .await
                .map_err(|e| ExportError::Task(e.to_string()))?
        })
    }
}

/// Convert an in-memory `.docx` package to an HTML body fragment.
pub fn convert_docx_bytes(bytes: &[u8], directives: &Directives) -> Result<String, ExportError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;

    let document_xml = read_part(&mut archive, DOCUMENT_PART)?
        .ok_or_else(|| ExportError::MissingPart(DOCUMENT_PART.to_string()))?;
    let relationships = match read_part(&mut archive, DOCUMENT_RELS_PART)? {
        Some(xml) => Relationships::parse(&xml)?,
        None => Relationships::default(),
    };
    let styles = match read_part(&mut archive, STYLES_PART)? {
        Some(xml) => StyleNames::parse(&xml)?,
        None => StyleNames::default(),
    };
    let numbering = match read_part(&mut archive, NUMBERING_PART)? {
        Some(xml) => Numbering::parse(&xml)?,
        None => Numbering::default(),
    };

    let document = parse_xml(DOCUMENT_PART, &document_xml)?;
    let body = w_child(document.root_element(), "body")
        .ok_or_else(|| ExportError::MissingPart(format!("{DOCUMENT_PART} (w:body)")))?;

    let mut reader = BodyReader {
        relationships: &relationships,
        styles: &styles,
        directives,
        media: MediaLoader::new(&mut archive),
    };
    let blocks = reader.read_blocks(body)?;

    let defaults = StyleMap::defaults();
    let ctx = RenderContext {
        directives,
        defaults: &defaults,
        numbering: &numbering,
    };
    Ok(html::render(&blocks, &ctx))
}
