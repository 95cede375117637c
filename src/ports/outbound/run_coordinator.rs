use crate::graph_materialization::domain::{Generation, ProjectId};
use crate::shared::Result;

/// RunLease guards exclusive materialization of one project.
///
/// The lease is released when the guard is dropped.
pub struct RunLease {
    project_id: ProjectId,
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl RunLease {
    pub fn new(project_id: ProjectId, release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            project_id,
            release: Some(Box::new(release)),
        }
    }

    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }
}

impl Drop for RunLease {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl std::fmt::Debug for RunLease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunLease")
            .field("project_id", &self.project_id)
            .finish_non_exhaustive()
    }
}

/// RunCoordinator port preventing concurrent runs for the same project and
/// publishing which generation is current.
pub trait RunCoordinator {
    /// Acquires the project's lease
    ///
    /// # Errors
    /// Returns [`GraphError::LeaseUnavailable`](crate::shared::error::GraphError::LeaseUnavailable)
    /// if another run holds it
    fn acquire(&self, project_id: ProjectId) -> Result<RunLease>;

    /// Generation downstream readers currently consider current
    fn current_generation(&self, project_id: ProjectId) -> Result<Option<Generation>>;

    /// Publishes `generation` as current once its paths are persisted
    fn mark_current(&self, project_id: ProjectId, generation: &Generation) -> Result<()>;
}
