use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("template rendering failed: {0}")]
    TemplateRender(String),

    #[error("template parse error: {0}")]
    TemplateParse(String),

    #[error("invalid style mapping {rule:?}: {reason}")]
    InvalidStyleMapping { rule: String, reason: String },

    #[error("not a valid .docx package: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("missing package part: {0}")]
    MissingPart(String),

    #[error("malformed XML in {part}: {source}")]
    Xml {
        part: String,
        #[source]
        source: roxmltree::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("conversion task failed: {0}")]
    Task(String),
}

impl From<tera::Error> for ExportError {
    fn from(e: tera::Error) -> Self {
        ExportError::TemplateRender(e.to_string())
    }
}
