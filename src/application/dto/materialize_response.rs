use crate::graph_materialization::domain::{
    Generation, GraphPath, Materialization, MaterializationStats, ProjectId,
};
use chrono::{DateTime, Utc};

/// MaterializeResponse - response DTO of the materialization use case
///
/// Carries the rich domain data; formatters decide how it is rendered.
#[derive(Debug, Clone)]
pub struct MaterializeResponse {
    pub project_id: ProjectId,
    /// Deduplicated paths of the run
    pub paths: Vec<GraphPath>,
    pub stats: MaterializationStats,
    pub generated_at: DateTime<Utc>,
    /// Generation the paths were stored under. None when no store is configured.
    pub generation: Option<Generation>,
    /// Records written to the store
    pub persisted: usize,
    /// Older generations scheduled for removal
    pub removed_generations: usize,
}

impl MaterializeResponse {
    /// Response for a run whose paths were not persisted
    pub fn transient(materialization: Materialization, generated_at: DateTime<Utc>) -> Self {
        let project_id = materialization.project_id();
        let stats = materialization.stats();
        Self {
            project_id,
            paths: materialization.into_paths(),
            stats,
            generated_at,
            generation: None,
            persisted: 0,
            removed_generations: 0,
        }
    }

    pub fn with_generation(
        mut self,
        generation: Generation,
        persisted: usize,
        removed_generations: usize,
    ) -> Self {
        self.generation = Some(generation);
        self.persisted = persisted;
        self.removed_generations = removed_generations;
        self
    }
}
