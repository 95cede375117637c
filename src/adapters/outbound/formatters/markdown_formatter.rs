use super::report_order;
use crate::application::dto::MaterializeResponse;
use crate::graph_materialization::domain::GraphPath;
use crate::ports::outbound::PathFormatter;
use crate::shared::Result;
use std::fmt::Write;

/// Markdown table header for path rows
const TABLE_HEADER: &str = "| Ancestor | Descendant | Hops | Top-level |\n";

/// Markdown table separator line
const TABLE_SEPARATOR: &str = "|----------|------------|------|-----------|\n";

/// MarkdownFormatter adapter rendering a human readable path report
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper methods for rendering sections
impl MarkdownFormatter {
    fn render_header(&self, output: &mut String, response: &MaterializeResponse) {
        output.push_str("# Dependency Paths\n\n");
        let _ = writeln!(
            output,
            "Closure table of project {} generated at {}.\n",
            response.project_id,
            response.generated_at.to_rfc3339()
        );
    }

    fn render_summary(&self, output: &mut String, response: &MaterializeResponse) {
        let stats = &response.stats;
        output.push_str("## Summary\n\n");
        output.push_str("| Metric | Value |\n");
        output.push_str("|--------|-------|\n");

        if let Some(generation) = &response.generation {
            let _ = writeln!(output, "| Generation | {} |", generation);
            let _ = writeln!(output, "| Records written | {} |", response.persisted);
            let _ = writeln!(
                output,
                "| Generations removed | {} |",
                response.removed_generations
            );
        }
        let _ = writeln!(output, "| Paths | {} |", response.paths.len());
        let _ = writeln!(output, "| Edges | {} |", stats.edges);
        let _ = writeln!(output, "| Start points | {} |", stats.start_points);
        let _ = writeln!(output, "| Cache hits | {} |", stats.cache_hits);
        let _ = writeln!(output, "| Cache misses | {} |", stats.cache_misses);
        let _ = writeln!(output, "| Walks | {} |", stats.walks);
        let _ = writeln!(output, "| Duplicate paths dropped | {} |", stats.duplicate_paths);
        output.push('\n');
    }

    fn render_paths(&self, output: &mut String, paths: &[GraphPath]) {
        output.push_str("## Paths\n\n");
        if paths.is_empty() {
            output.push_str("*No occurrence is reachable from a top-level occurrence.*\n");
            return;
        }

        output.push_str(TABLE_HEADER);
        output.push_str(TABLE_SEPARATOR);
        for path in report_order(paths) {
            let _ = writeln!(
                output,
                "| {} | {} | {} | {} |",
                path.ancestor_id(),
                path.descendant_id(),
                path.path_length(),
                if path.is_top_level_ancestor() { "yes" } else { "no" }
            );
        }
    }
}

impl PathFormatter for MarkdownFormatter {
    fn format(&self, response: &MaterializeResponse) -> Result<String> {
        let mut output = String::new();
        self.render_header(&mut output, response);
        self.render_summary(&mut output, response);
        self.render_paths(&mut output, &response.paths);
        Ok(output)
    }
}
