use crate::graph_materialization::domain::{GraphPath, OccurrenceId, ProjectId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// PathRecord is the serialized shape of a [`GraphPath`]
///
/// Shared by the JSON report and the path store so that both write the
/// same columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathRecord {
    pub ancestor_id: OccurrenceId,
    pub descendant_id: OccurrenceId,
    pub project_id: ProjectId,
    pub path_length: u32,
    pub top_level_ancestor: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&GraphPath> for PathRecord {
    fn from(path: &GraphPath) -> Self {
        Self {
            ancestor_id: path.ancestor_id(),
            descendant_id: path.descendant_id(),
            project_id: path.project_id(),
            path_length: path.path_length(),
            top_level_ancestor: path.is_top_level_ancestor(),
            created_at: path.created_at(),
            updated_at: path.updated_at(),
        }
    }
}
