use crate::graph_materialization::domain::{Occurrence, ProjectId};
use crate::shared::Result;
use std::path::Path;

/// One project's complete occurrence snapshot
#[derive(Debug, Clone)]
pub struct OccurrenceInventory {
    pub project_id: ProjectId,
    pub occurrences: Vec<Occurrence>,
}

impl OccurrenceInventory {
    pub fn new(project_id: ProjectId, occurrences: Vec<Occurrence>) -> Self {
        Self {
            project_id,
            occurrences,
        }
    }
}

/// OccurrenceReader port supplying the input of a materialization run
///
/// Implementations must return a fully materialized snapshot: the traversal
/// revisits occurrences by id, so a lazy or streaming source does not fit.
pub trait OccurrenceReader {
    /// Reads the occurrence inventory found at `source`
    ///
    /// # Errors
    /// Returns an error if:
    /// - The inventory does not exist or cannot be read
    /// - The document is malformed or contains an invalid occurrence
    fn read_occurrences(&self, source: &Path) -> Result<OccurrenceInventory>;
}
