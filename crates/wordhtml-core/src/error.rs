use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    #[error("unknown style option: {0}")]
    UnknownOption(String),

    #[error("invalid value {value:?} for {field}: {reason}")]
    InvalidOptionValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("malformed option assignment {0:?} (expected KEY=VALUE)")]
    MalformedAssignment(String),
}
