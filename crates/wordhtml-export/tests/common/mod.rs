#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::Path;

use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const NAMESPACES: &str = concat!(
    r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" "#,
    r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture""#,
);

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Assembles a minimal `.docx` package in memory.
#[derive(Default)]
pub struct DocxBuilder {
    body: String,
    styles: Vec<(String, String)>,
    numbering: Option<String>,
    relationships: Vec<(String, String, bool)>,
    media: Vec<(String, Vec<u8>)>,
    omit_document: bool,
    raw_document: Option<String>,
}

impl DocxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body(mut self, xml: &str) -> Self {
        self.body.push_str(xml);
        self
    }

    /// Declare a paragraph style id with its display name.
    pub fn style(mut self, id: &str, name: &str) -> Self {
        self.styles.push((id.to_string(), name.to_string()));
        self
    }

    pub fn numbering(mut self, xml: &str) -> Self {
        self.numbering = Some(xml.to_string());
        self
    }

    pub fn relationship(mut self, id: &str, target: &str, external: bool) -> Self {
        self.relationships
            .push((id.to_string(), target.to_string(), external));
        self
    }

    pub fn media(mut self, part: &str, bytes: &[u8]) -> Self {
        self.media.push((part.to_string(), bytes.to_vec()));
        self
    }

    pub fn without_document(mut self) -> Self {
        self.omit_document = true;
        self
    }

    pub fn raw_document(mut self, xml: &str) -> Self {
        self.raw_document = Some(xml.to_string());
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let mut add = |name: &str, bytes: &[u8]| {
            let options =
                SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
            zip.start_file(name, options).unwrap();
            zip.write_all(bytes).unwrap();
        };

        if !self.omit_document {
            let document = self.raw_document.clone().unwrap_or_else(|| {
                format!(
                    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document {NAMESPACES}><w:body>{}</w:body></w:document>"#,
                    self.body
                )
            });
            add("word/document.xml", document.as_bytes());
        }

        if !self.styles.is_empty() {
            let styles: String = self
                .styles
                .iter()
                .map(|(id, name)| {
                    format!(
                        r#"<w:style w:type="paragraph" w:styleId="{id}"><w:name w:val="{name}"/></w:style>"#
                    )
                })
                .collect();
            let xml = format!(r#"<w:styles xmlns:w="{W_NS}">{styles}</w:styles>"#);
            add("word/styles.xml", xml.as_bytes());
        }

        if let Some(numbering) = &self.numbering {
            let xml = format!(r#"<w:numbering xmlns:w="{W_NS}">{numbering}</w:numbering>"#);
            add("word/numbering.xml", xml.as_bytes());
        }

        if !self.relationships.is_empty() {
            let rels: String = self
                .relationships
                .iter()
                .map(|(id, target, external)| {
                    let mode = if *external { r#" TargetMode="External""# } else { "" };
                    format!(
                        r#"<Relationship Id="{id}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="{target}"{mode}/>"#
                    )
                })
                .collect();
            let xml = format!(
                r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{rels}</Relationships>"#
            );
            add("word/_rels/document.xml.rels", xml.as_bytes());
        }

        for (part, bytes) in &self.media {
            add(part, bytes);
        }

        zip.finish().unwrap().into_inner()
    }

    pub fn write_to(&self, path: &Path) {
        std::fs::write(path, self.build()).unwrap();
    }
}

pub fn run(text: &str) -> String {
    format!(r#"<w:r><w:t xml:space="preserve">{text}</w:t></w:r>"#)
}

pub fn paragraph(text: &str) -> String {
    format!("<w:p>{}</w:p>", run(text))
}

pub fn styled_paragraph(style_id: &str, text: &str) -> String {
    format!(
        r#"<w:p><w:pPr><w:pStyle w:val="{style_id}"/></w:pPr>{}</w:p>"#,
        run(text)
    )
}

pub fn list_paragraph(num_id: u32, level: u32, text: &str) -> String {
    format!(
        r#"<w:p><w:pPr><w:pStyle w:val="ListParagraph"/><w:numPr><w:ilvl w:val="{level}"/><w:numId w:val="{num_id}"/></w:numPr></w:pPr>{}</w:p>"#,
        run(text)
    )
}
