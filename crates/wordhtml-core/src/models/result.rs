use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Message recorded for every successfully converted file.
pub const SUCCESS_MESSAGE: &str = "Conversion succeeded";

/// Outcome of converting one input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConversionOutcome {
    Success { message: String, output_path: PathBuf },
    Failure { message: String },
}

/// Per-file record produced by the single-file and batch drivers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Input base name, extension included.
    pub file: String,
    #[serde(flatten)]
    pub outcome: ConversionOutcome,
}

impl ConversionResult {
    pub fn success(file: impl Into<String>, output_path: PathBuf) -> Self {
        Self {
            file: file.into(),
            outcome: ConversionOutcome::Success {
                message: SUCCESS_MESSAGE.to_string(),
                output_path,
            },
        }
    }

    /// A failed conversion; `cause` is the underlying error text.
    pub fn failure(file: impl Into<String>, cause: impl fmt::Display) -> Self {
        Self {
            file: file.into(),
            outcome: ConversionOutcome::Failure {
                message: format!("Conversion failed: {cause}"),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, ConversionOutcome::Success { .. })
    }

    pub fn message(&self) -> &str {
        match &self.outcome {
            ConversionOutcome::Success { message, .. } | ConversionOutcome::Failure { message } => {
                message
            }
        }
    }

    pub fn output_path(&self) -> Option<&PathBuf> {
        match &self.outcome {
            ConversionOutcome::Success { output_path, .. } => Some(output_path),
            ConversionOutcome::Failure { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    AllSucceeded,
    AllFailed,
    Mixed,
}

/// Success/failure counts over one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[ConversionResult]) -> Self {
        let succeeded = results.iter().filter(|r| r.is_success()).count();
        Self {
            succeeded,
            failed: results.len() - succeeded,
        }
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    pub fn status(&self) -> BatchStatus {
        if self.failed == 0 {
            BatchStatus::AllSucceeded
        } else if self.succeeded == 0 {
            BatchStatus::AllFailed
        } else {
            BatchStatus::Mixed
        }
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status() {
            BatchStatus::AllSucceeded => f.write_str("All files converted successfully!"),
            BatchStatus::AllFailed => f.write_str("All files failed to convert"),
            BatchStatus::Mixed => write!(
                f,
                "Conversion finished: {} succeeded, {} failed",
                self.succeeded, self.failed
            ),
        }
    }
}
