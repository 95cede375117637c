use crate::graph_materialization::domain::{Generation, ProjectId};
use crate::shared::Result;

/// CleanupScheduler port removing path generations superseded by a new run
pub trait CleanupScheduler {
    /// Schedules removal of every generation older than the newest `keep`
    /// ones. The `current` generation is never removed.
    ///
    /// # Returns
    /// The number of generations scheduled for removal
    fn schedule_cleanup(
        &self,
        project_id: ProjectId,
        current: &Generation,
        keep: usize,
    ) -> Result<usize>;
}
