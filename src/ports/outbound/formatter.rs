use crate::application::dto::MaterializeResponse;
use crate::shared::Result;

/// PathFormatter port for rendering materialized paths
///
/// This port abstracts the formatting logic for the supported report
/// formats (JSON, Markdown).
pub trait PathFormatter {
    /// Formats the paths and statistics of one run
    ///
    /// # Errors
    /// Returns an error if formatting or serialization fails
    fn format(&self, response: &MaterializeResponse) -> Result<String>;
}
