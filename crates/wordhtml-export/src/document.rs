use std::path::Path;

use tera::{Context, Tera};

use crate::error::ExportError;

const TEMPLATE_NAME: &str = "document.html";

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title | escape }}</title>
    <style>
{{ stylesheet }}
    </style>
</head>
<body>
{{ body }}
</body>
</html>
"#;

/// Wrap a converted body fragment in a complete HTML document.
///
/// The fragment and stylesheet are embedded unmodified; only the title is
/// escaped.
pub fn assemble_document(
    fragment: &str,
    title: &str,
    stylesheet: &str,
) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);
    tera.add_raw_template(TEMPLATE_NAME, TEMPLATE)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let mut context = Context::new();
    context.insert("title", title);
    context.insert("stylesheet", stylesheet);
    context.insert("body", fragment);

    let html = tera.render(TEMPLATE_NAME, &context)?;
    Ok(html)
}

/// Document title for an input file: its base name without the extension.
pub fn document_title(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
