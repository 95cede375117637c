/// Formatter adapters for the path report formats
mod json_formatter;
mod markdown_formatter;

pub use json_formatter::JsonFormatter;
pub use markdown_formatter::MarkdownFormatter;

use crate::graph_materialization::domain::GraphPath;

/// Report order: by ancestor, then hops, then descendant
pub(crate) fn report_order(paths: &[GraphPath]) -> Vec<&GraphPath> {
    let mut ordered: Vec<&GraphPath> = paths.iter().collect();
    ordered.sort_by_key(|path| (path.ancestor_id(), path.path_length(), path.descendant_id()));
    ordered
}
