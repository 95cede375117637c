use crate::graph_materialization::domain::{Generation, GraphPath, ProjectId};
use crate::shared::Result;

/// GraphPathRepository port - the bulk writer for materialized paths
///
/// The materializer does not paginate its output; the repository decides
/// how records are batched on their way to storage.
pub trait GraphPathRepository {
    /// Persists all paths of `generation` in batches of `batch_size`
    ///
    /// # Arguments
    /// * `project_id` - Project the paths belong to
    /// * `generation` - Generation the paths are written under
    /// * `paths` - Complete, deduplicated path set of the run
    /// * `batch_size` - Maximum number of records per batch
    /// * `on_batch` - Called with (records written, total) after every batch
    ///
    /// # Returns
    /// The number of records written
    ///
    /// # Errors
    /// Returns an error if any batch fails. A failed generation must not
    /// become visible to readers.
    fn persist(
        &self,
        project_id: ProjectId,
        generation: &Generation,
        paths: &[GraphPath],
        batch_size: usize,
        on_batch: &dyn Fn(usize, usize),
    ) -> Result<usize>;

    /// Numbers of every stored generation of the project, oldest first
    fn generations(&self, project_id: ProjectId) -> Result<Vec<i64>>;

    /// Deletes the paths of one stored generation
    fn remove_generation(&self, project_id: ProjectId, number: i64) -> Result<()>;
}
