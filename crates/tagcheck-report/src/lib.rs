//! Tagcheck Reporter
//!
//! Renders a checker [`Report`] for people (line-oriented text) or for
//! tools (JSON). Rendering never inspects the source again.
//!
//! ```text
//! Report → render(format) → String
//! ```

pub mod json;
pub mod text;

use tagcheck_checker::Report;

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Text,
    Json,
}

/// Rendering error.
#[derive(Debug, thiserror::Error)]
#[error("Report error: {message}")]
pub struct ReportError {
    pub message: String,
}

/// Render a report in the requested format.
pub fn render(report: &Report, format: Format) -> Result<String, ReportError> {
    match format {
        Format::Text => Ok(text::render(report)),
        Format::Json => json::render(report),
    }
}
