use super::{GraphConstructor, PathCollector, PathTraversal, ReachabilityCache};
use crate::graph_materialization::domain::{
    Materialization, MaterializationStats, Occurrence, ProjectId,
};
use crate::shared::error::GraphError;
use crate::shared::Result;
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// GraphMaterializer service computing the closure table of one project
///
/// Orchestrates reference matching, graph construction, cached traversal
/// and deduplication. A pure computation: the only state it keeps lives for
/// the duration of one [`materialize`](Self::materialize) call.
#[derive(Debug, Clone)]
pub struct GraphMaterializer {
    generated_at: DateTime<Utc>,
    use_cache: bool,
    max_depth: usize,
    max_walks: usize,
}

impl GraphMaterializer {
    /// Default limit on the length of a requirement chain
    pub const DEFAULT_MAX_DEPTH: usize = 512;

    /// Default limit on the occurrences entered by all walks of one run
    pub const DEFAULT_MAX_WALKS: usize = 5_000_000;

    /// Creates a materializer stamping every path with `generated_at`
    pub fn new(generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            use_cache: true,
            max_depth: Self::DEFAULT_MAX_DEPTH,
            max_walks: Self::DEFAULT_MAX_WALKS,
        }
    }

    /// Forces a cache miss on every lookup. Output is unchanged, only slower.
    pub fn without_cache(mut self) -> Self {
        self.use_cache = false;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Bounds total traversal work. Requirement cycles are re-walked under
    /// every in-flight path, which grows exponentially with the cycle's size.
    pub fn with_max_walks(mut self, max_walks: usize) -> Self {
        self.max_walks = max_walks;
        self
    }

    /// Materializes every (top-level ancestor, descendant, hops) path of a project
    ///
    /// # Arguments
    /// * `project_id` - The project owning the occurrences
    /// * `occurrences` - Full snapshot of the project's occurrences
    ///
    /// # Errors
    /// Returns an error if the snapshot is inconsistent (duplicate ids,
    /// occurrences of another project), a requirement chain exceeds the
    /// maximum depth or the walk budget runs out. No partial result is returned.
    pub fn materialize(
        &self,
        project_id: ProjectId,
        occurrences: &[Occurrence],
    ) -> Result<Materialization> {
        Self::validate_snapshot(project_id, occurrences)?;

        let graph = GraphConstructor::build(occurrences);
        let mut cache = if self.use_cache {
            ReachabilityCache::new()
        } else {
            ReachabilityCache::disabled()
        };
        let mut collector = PathCollector::new(project_id, self.generated_at);

        let mut start_points = graph.leaves().len();
        let walks = {
            let mut traversal =
                PathTraversal::new(&graph, &mut cache, &mut collector, self.max_depth)
                    .with_max_walks(self.max_walks);
            for leaf in graph.leaves() {
                traversal.walk_from(*leaf)?;
            }

            // The cycle check cuts walks short inside requirement cycles, so a
            // cycle member may miss paths that only start at itself. Cycles
            // with no leaf below them are not reached from a leaf at all.
            for descendant in graph.descendants() {
                if graph.is_in_cycle(descendant) || !traversal.has_visited(descendant) {
                    tracing::trace!(occurrence = %descendant, "extra walk from cycle member");
                    start_points += 1;
                    traversal.walk_from(descendant)?;
                }
            }
            traversal.walks()
        };

        let stats = MaterializationStats {
            cache_hits: cache.hits(),
            cache_misses: cache.misses(),
            duplicate_paths: collector.duplicates(),
            walks: walks as u64,
            edges: graph.edge_count(),
            start_points,
        };

        tracing::debug!(
            project = %project_id,
            occurrences = occurrences.len(),
            paths = collector.len(),
            cache_hits = stats.cache_hits,
            cache_misses = stats.cache_misses,
            walks = stats.walks,
            "materialized dependency paths"
        );

        Ok(Materialization::new(
            project_id,
            collector.into_paths(),
            stats,
        ))
    }

    fn validate_snapshot(project_id: ProjectId, occurrences: &[Occurrence]) -> Result<()> {
        let mut seen = HashSet::with_capacity(occurrences.len());
        for occurrence in occurrences {
            if occurrence.project_id() != project_id {
                return Err(GraphError::MixedProjects {
                    id: occurrence.id().get(),
                    expected: project_id.get(),
                    found: occurrence.project_id().get(),
                }
                .into());
            }
            if !seen.insert(occurrence.id()) {
                return Err(GraphError::DuplicateOccurrence {
                    id: occurrence.id().get(),
                    project_id: project_id.get(),
                }
                .into());
            }
        }
        Ok(())
    }
}
