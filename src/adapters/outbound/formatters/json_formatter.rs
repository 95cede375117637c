use super::report_order;
use crate::application::dto::MaterializeResponse;
use crate::graph_materialization::domain::{Generation, MaterializationStats, ProjectId};
use crate::ports::outbound::{PathFormatter, PathRecord};
use crate::shared::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize)]
struct PathReport<'a> {
    project_id: ProjectId,
    generated_at: DateTime<Utc>,
    generation: Option<&'a Generation>,
    stats: &'a MaterializationStats,
    paths: Vec<PathRecord>,
}

/// JsonFormatter adapter rendering the run as one JSON document
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl PathFormatter for JsonFormatter {
    fn format(&self, response: &MaterializeResponse) -> Result<String> {
        let report = PathReport {
            project_id: response.project_id,
            generated_at: response.generated_at,
            generation: response.generation.as_ref(),
            stats: &response.stats,
            paths: report_order(&response.paths)
                .into_iter()
                .map(PathRecord::from)
                .collect(),
        };
        let mut json = serde_json::to_string_pretty(&report)?;
        json.push('\n');
        Ok(json)
    }
}
