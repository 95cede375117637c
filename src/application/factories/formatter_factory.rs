use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::PathFormatter;

/// Factory for creating path report formatters
///
/// Belongs in the application layer: it selects infrastructure adapters
/// based on the requested output format.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Examples
    /// ```
    /// use sbom_graph::application::dto::OutputFormat;
    /// use sbom_graph::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Json);
    /// ```
    pub fn create(format: OutputFormat) -> Box<dyn PathFormatter> {
        match format {
            OutputFormat::Json => Box::new(JsonFormatter::new()),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new()),
        }
    }

    /// Returns the progress message for the specified output format
    ///
    /// # Examples
    /// ```
    /// use sbom_graph::application::dto::OutputFormat;
    /// use sbom_graph::application::factories::FormatterFactory;
    ///
    /// let message = FormatterFactory::progress_message(OutputFormat::Markdown);
    /// assert_eq!(message, "📝 Generating Markdown path report...");
    /// ```
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Json => "📝 Generating JSON path report...",
            OutputFormat::Markdown => "📝 Generating Markdown path report...",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::MaterializeResponse;
    use crate::graph_materialization::domain::{Materialization, MaterializationStats, ProjectId};
    use chrono::Utc;

    fn empty_response() -> MaterializeResponse {
        let materialization =
            Materialization::new(ProjectId::new(4), Vec::new(), MaterializationStats::default());
        MaterializeResponse::transient(materialization, Utc::now())
    }

    #[test]
    fn test_create_json_formatter() {
        let formatter = FormatterFactory::create(OutputFormat::Json);
        let output = formatter.format(&empty_response()).unwrap();
        assert!(output.trim_start().starts_with('{'));
    }

    #[test]
    fn test_create_markdown_formatter() {
        let formatter = FormatterFactory::create(OutputFormat::Markdown);
        let output = formatter.format(&empty_response()).unwrap();
        assert!(output.starts_with("# "));
    }

    #[test]
    fn test_progress_message_json() {
        let message = FormatterFactory::progress_message(OutputFormat::Json);
        assert_eq!(message, "📝 Generating JSON path report...");
    }
}
