use super::{OccurrenceId, ProjectId};
use chrono::{DateTime, Utc};

/// Uniqueness key of a materialized path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathKey {
    pub ancestor: OccurrenceId,
    pub descendant: OccurrenceId,
    pub path_length: u32,
}

/// GraphPath - one row of the closure table
///
/// States that `ancestor` (a top-level occurrence) pulls in `descendant`
/// `path_length` requirement hops away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphPath {
    ancestor_id: OccurrenceId,
    descendant_id: OccurrenceId,
    project_id: ProjectId,
    path_length: u32,
    top_level_ancestor: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl GraphPath {
    pub fn new(
        ancestor_id: OccurrenceId,
        descendant_id: OccurrenceId,
        project_id: ProjectId,
        path_length: u32,
        top_level_ancestor: bool,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            ancestor_id,
            descendant_id,
            project_id,
            path_length,
            top_level_ancestor,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    pub fn key(&self) -> PathKey {
        PathKey {
            ancestor: self.ancestor_id,
            descendant: self.descendant_id,
            path_length: self.path_length,
        }
    }

    pub fn ancestor_id(&self) -> OccurrenceId {
        self.ancestor_id
    }

    pub fn descendant_id(&self) -> OccurrenceId {
        self.descendant_id
    }

    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }

    pub fn path_length(&self) -> u32 {
        self.path_length
    }

    pub fn is_top_level_ancestor(&self) -> bool {
        self.top_level_ancestor
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
