use crate::application::dto::{MaterializeRequest, MaterializeResponse};
use crate::graph_materialization::domain::{Generation, Materialization, ProjectId};
use crate::graph_materialization::services::GraphMaterializer;
use crate::ports::inbound::GraphMaterializationPort;
use crate::ports::outbound::{
    CleanupScheduler, GraphPathRepository, OccurrenceInventory, OccurrenceReader,
    ProgressReporter, RunCoordinator,
};
use crate::shared::Result;
use chrono::{DateTime, Utc};

/// MaterializeGraphUseCase - orchestrates one materialization run
///
/// Reads a project's occurrence inventory, materializes its closure table
/// and, when a path store is configured, persists the result as a new
/// generation under the project's run lease.
///
/// # Type Parameters
/// * `OR` - OccurrenceReader implementation
/// * `PR` - ProgressReporter implementation
/// * `STORE` - Path store implementation (optional)
pub struct MaterializeGraphUseCase<OR, PR, STORE> {
    occurrence_reader: OR,
    progress_reporter: PR,
    store: Option<STORE>,
}

impl<OR, PR, STORE> MaterializeGraphUseCase<OR, PR, STORE>
where
    OR: OccurrenceReader,
    PR: ProgressReporter,
    STORE: GraphPathRepository + RunCoordinator + CleanupScheduler,
{
    /// Creates a new MaterializeGraphUseCase with injected dependencies
    pub fn new(occurrence_reader: OR, progress_reporter: PR, store: Option<STORE>) -> Self {
        Self {
            occurrence_reader,
            progress_reporter,
            store,
        }
    }

    /// Executes the materialization use case
    ///
    /// # Returns
    /// MaterializeResponse with the deduplicated paths, run statistics and
    /// the stored generation (if any)
    pub fn execute(&self, request: MaterializeRequest) -> Result<MaterializeResponse> {
        let started_at = Utc::now();

        // Step 1: Read the inventory
        let inventory = self.read_and_report_inventory(&request)?;
        let project_id = inventory.project_id;

        // Step 2: Hold the project's lease for the rest of the run
        let _lease = match &self.store {
            Some(store) => Some(store.acquire(project_id)?),
            None => None,
        };

        // Step 3: Materialize. Any failure here aborts before the store is touched.
        let materialization = self.materialize_inventory(&request, &inventory, started_at)?;

        // Step 4: Persist as a new generation
        let Some(store) = &self.store else {
            return Ok(MaterializeResponse::transient(materialization, started_at));
        };
        self.persist_generation(store, &request, materialization, started_at)
    }

    fn read_and_report_inventory(&self, request: &MaterializeRequest) -> Result<OccurrenceInventory> {
        self.progress_reporter.report(&format!(
            "📖 Loading occurrence inventory from: {}",
            request.inventory_path.display()
        ));

        let inventory = self
            .occurrence_reader
            .read_occurrences(&request.inventory_path)?;

        self.progress_reporter.report(&format!(
            "✅ Detected {} occurrence(s) in project {}",
            inventory.occurrences.len(),
            inventory.project_id
        ));

        Ok(inventory)
    }

    fn materialize_inventory(
        &self,
        request: &MaterializeRequest,
        inventory: &OccurrenceInventory,
        generated_at: DateTime<Utc>,
    ) -> Result<Materialization> {
        self.progress_reporter
            .report("🔗 Materializing dependency paths...");

        let mut materializer = GraphMaterializer::new(generated_at)
            .with_max_depth(request.max_depth)
            .with_max_walks(request.max_walks);
        if !request.use_cache {
            materializer = materializer.without_cache();
        }

        let materialization = materializer.materialize(inventory.project_id, &inventory.occurrences)?;

        let stats = materialization.stats();
        self.progress_reporter.report(&format!(
            "   - Edges: {}, start points: {}",
            stats.edges, stats.start_points
        ));
        self.progress_reporter.report(&format!(
            "   - Paths: {} ({} duplicate(s) dropped)",
            materialization.path_count(),
            stats.duplicate_paths
        ));

        Ok(materialization)
    }

    /// Writes the paths under a fresh generation, publishes it and schedules
    /// removal of superseded generations
    fn persist_generation(
        &self,
        store: &STORE,
        request: &MaterializeRequest,
        materialization: Materialization,
        started_at: DateTime<Utc>,
    ) -> Result<MaterializeResponse> {
        let project_id = materialization.project_id();
        let previous = store.current_generation(project_id)?;
        let generation = Generation::start(started_at, previous.as_ref());

        self.progress_reporter.report(&format!(
            "💾 Persisting {} path(s) as generation {}...",
            materialization.path_count(),
            generation
        ));

        let on_batch = |written: usize, total: usize| {
            self.progress_reporter
                .report_progress(written, total, Some("Writing path records"));
        };
        let persisted = store.persist(
            project_id,
            &generation,
            materialization.paths(),
            request.batch_size,
            &on_batch,
        )?;

        store.mark_current(project_id, &generation)?;
        let removed = self.cleanup_old_generations(store, project_id, &generation, request);

        self.progress_reporter.report_completion(&format!(
            "✅ Generation {} is current ({} record(s) written)",
            generation, persisted
        ));

        Ok(MaterializeResponse::transient(materialization, started_at).with_generation(
            generation,
            persisted,
            removed,
        ))
    }

    /// Cleanup failures do not fail the run: the new generation is already
    /// current and stale files are retried on the next run.
    fn cleanup_old_generations(
        &self,
        store: &STORE,
        project_id: ProjectId,
        generation: &Generation,
        request: &MaterializeRequest,
    ) -> usize {
        match store.schedule_cleanup(project_id, generation, request.keep_generations) {
            Ok(removed) => {
                if removed > 0 {
                    self.progress_reporter.report(&format!(
                        "🧹 Removed {} superseded generation(s)",
                        removed
                    ));
                }
                removed
            }
            Err(e) => {
                tracing::warn!(project = %project_id, error = %e, "generation cleanup failed");
                self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: Failed to clean up old generations: {}",
                    e
                ));
                0
            }
        }
    }
}

impl<OR, PR, STORE> GraphMaterializationPort for MaterializeGraphUseCase<OR, PR, STORE>
where
    OR: OccurrenceReader,
    PR: ProgressReporter,
    STORE: GraphPathRepository + RunCoordinator + CleanupScheduler,
{
    fn materialize(&self, request: MaterializeRequest) -> Result<MaterializeResponse> {
        self.execute(request)
    }
}
