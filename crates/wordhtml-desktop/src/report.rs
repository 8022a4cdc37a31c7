use serde::Serialize;

use wordhtml_core::models::result::{BatchSummary, ConversionOutcome, ConversionResult};

/// Results of one conversion run, as shown to the user.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    pub results: Vec<ConversionResult>,
    pub summary: BatchSummary,
}

impl ConversionReport {
    pub fn new(results: Vec<ConversionResult>) -> Self {
        let summary = BatchSummary::from_results(&results);
        Self { results, summary }
    }

    /// One line per file followed by the summary line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for result in &self.results {
            let line = match &result.outcome {
                ConversionOutcome::Success {
                    message,
                    output_path,
                } => format!(
                    "  ok    {}: {message} -> {}\n",
                    result.file,
                    output_path.display()
                ),
                ConversionOutcome::Failure { message } => {
                    format!("  fail  {}: {message}\n", result.file)
                }
            };
            out.push_str(&line);
        }
        out.push_str(&format!("{}\n", self.summary));
        out
    }
}
