use crate::graph_materialization::domain::{GraphPath, OccurrenceId, PathKey, ProjectId};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// PathCollector deduplicates discovered paths on (ancestor, descendant, hops)
///
/// Records keep the order in which they were first discovered.
pub struct PathCollector {
    project_id: ProjectId,
    timestamp: DateTime<Utc>,
    seen: HashSet<PathKey>,
    paths: Vec<GraphPath>,
    duplicates: u64,
}

impl PathCollector {
    pub fn new(project_id: ProjectId, timestamp: DateTime<Utc>) -> Self {
        Self {
            project_id,
            timestamp,
            seen: HashSet::new(),
            paths: Vec::new(),
            duplicates: 0,
        }
    }

    /// Records that top-level `ancestor` reaches `descendant` in `path_length` hops.
    ///
    /// Returns false when the same key was already collected.
    pub fn collect(
        &mut self,
        ancestor: OccurrenceId,
        descendant: OccurrenceId,
        path_length: u32,
    ) -> bool {
        let key = PathKey {
            ancestor,
            descendant,
            path_length,
        };
        if !self.seen.insert(key) {
            self.duplicates += 1;
            return false;
        }

        self.paths.push(GraphPath::new(
            ancestor,
            descendant,
            self.project_id,
            path_length,
            true,
            self.timestamp,
        ));
        true
    }

    pub fn paths(&self) -> &[GraphPath] {
        &self.paths
    }

    pub fn duplicates(&self) -> u64 {
        self.duplicates
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn into_paths(self) -> Vec<GraphPath> {
        self.paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(value: u64) -> OccurrenceId {
        OccurrenceId::new(value)
    }

    #[test]
    fn test_collect_deduplicates_on_key() {
        let mut collector = PathCollector::new(ProjectId::new(1), Utc::now());

        assert!(collector.collect(id(1), id(4), 2));
        assert!(!collector.collect(id(1), id(4), 2));
        assert!(collector.collect(id(1), id(4), 3));
        assert!(collector.collect(id(2), id(4), 2));

        assert_eq!(collector.len(), 3);
        assert_eq!(collector.duplicates(), 1);
    }

    #[test]
    fn test_collect_preserves_discovery_order() {
        let mut collector = PathCollector::new(ProjectId::new(9), Utc::now());
        collector.collect(id(5), id(6), 1);
        collector.collect(id(1), id(6), 2);

        let paths = collector.into_paths();
        assert_eq!(paths[0].ancestor_id(), id(5));
        assert_eq!(paths[1].ancestor_id(), id(1));
        assert!(paths.iter().all(|p| p.project_id() == ProjectId::new(9)));
        assert!(paths.iter().all(GraphPath::is_top_level_ancestor));
    }

    #[test]
    fn test_new_collector_is_empty() {
        let collector = PathCollector::new(ProjectId::new(1), Utc::now());
        assert!(collector.is_empty());
        assert!(collector.paths().is_empty());
    }
}
