use super::{GraphPath, ProjectId};
use serde::Serialize;

/// Counters reported by one materialization run. Informational only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MaterializationStats {
    pub cache_hits: u64,
    pub cache_misses: u64,
    /// Records discarded because an equal (ancestor, descendant, hops) key was already collected
    pub duplicate_paths: u64,
    /// Occurrences entered by the traversal, counting re-walks of cycle members
    pub walks: u64,
    pub edges: usize,
    pub start_points: usize,
}

/// Result of materializing one project's dependency paths
#[derive(Debug, Clone)]
pub struct Materialization {
    project_id: ProjectId,
    paths: Vec<GraphPath>,
    stats: MaterializationStats,
}

impl Materialization {
    pub fn new(project_id: ProjectId, paths: Vec<GraphPath>, stats: MaterializationStats) -> Self {
        Self {
            project_id,
            paths,
            stats,
        }
    }

    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }

    pub fn paths(&self) -> &[GraphPath] {
        &self.paths
    }

    pub fn into_paths(self) -> Vec<GraphPath> {
        self.paths
    }

    pub fn stats(&self) -> MaterializationStats {
        self.stats
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }
}
