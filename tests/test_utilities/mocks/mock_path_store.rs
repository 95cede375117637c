use sbom_graph::prelude::*;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct StoreState {
    generations: BTreeMap<i64, Vec<PathRecord>>,
    current: Option<Generation>,
    lease_held: bool,
    batch_sizes: Vec<usize>,
}

/// In-memory path store implementing the repository, coordinator and
/// cleanup ports. Clones share state so tests can inspect it after handing
/// a copy to the use case.
#[derive(Clone, Default)]
pub struct MockPathStore {
    state: Arc<Mutex<StoreState>>,
    pub fail_persist: bool,
}

impl MockPathStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failing_persist() -> Self {
        Self {
            fail_persist: true,
            ..Self::default()
        }
    }

    /// Simulates a lease held by another run
    pub fn hold_lease(&self) {
        self.state.lock().unwrap().lease_held = true;
    }

    pub fn lease_held(&self) -> bool {
        self.state.lock().unwrap().lease_held
    }

    pub fn current(&self) -> Option<Generation> {
        self.state.lock().unwrap().current.clone()
    }

    pub fn generation_numbers(&self) -> Vec<i64> {
        self.state.lock().unwrap().generations.keys().copied().collect()
    }

    pub fn records(&self, number: i64) -> Vec<PathRecord> {
        self.state
            .lock()
            .unwrap()
            .generations
            .get(&number)
            .cloned()
            .unwrap_or_default()
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.state.lock().unwrap().batch_sizes.clone()
    }
}

impl GraphPathRepository for MockPathStore {
    fn persist(
        &self,
        _project_id: ProjectId,
        generation: &Generation,
        paths: &[GraphPath],
        batch_size: usize,
        on_batch: &dyn Fn(usize, usize),
    ) -> Result<usize> {
        if self.fail_persist {
            anyhow::bail!("Mock persist failure");
        }
        let mut records = Vec::new();
        for batch in paths.chunks(batch_size) {
            records.extend(batch.iter().map(PathRecord::from));
            self.state.lock().unwrap().batch_sizes.push(batch.len());
            on_batch(records.len(), paths.len());
        }
        let written = records.len();
        self.state
            .lock()
            .unwrap()
            .generations
            .insert(generation.number(), records);
        Ok(written)
    }

    fn generations(&self, _project_id: ProjectId) -> Result<Vec<i64>> {
        Ok(self.generation_numbers())
    }

    fn remove_generation(&self, _project_id: ProjectId, number: i64) -> Result<()> {
        self.state.lock().unwrap().generations.remove(&number);
        Ok(())
    }
}

impl RunCoordinator for MockPathStore {
    fn acquire(&self, project_id: ProjectId) -> Result<RunLease> {
        let mut state = self.state.lock().unwrap();
        if state.lease_held {
            return Err(GraphError::LeaseUnavailable {
                project_id: project_id.get(),
                path: "mock".into(),
            }
            .into());
        }
        state.lease_held = true;

        let shared = self.state.clone();
        Ok(RunLease::new(project_id, move || {
            shared.lock().unwrap().lease_held = false;
        }))
    }

    fn current_generation(&self, _project_id: ProjectId) -> Result<Option<Generation>> {
        Ok(self.current())
    }

    fn mark_current(&self, _project_id: ProjectId, generation: &Generation) -> Result<()> {
        self.state.lock().unwrap().current = Some(generation.clone());
        Ok(())
    }
}

impl CleanupScheduler for MockPathStore {
    fn schedule_cleanup(
        &self,
        project_id: ProjectId,
        current: &Generation,
        keep: usize,
    ) -> Result<usize> {
        let stale: Vec<i64> = self
            .generations(project_id)?
            .into_iter()
            .rev()
            .filter(|number| *number < current.number())
            .skip(keep.saturating_sub(1))
            .collect();
        for number in &stale {
            self.remove_generation(project_id, *number)?;
        }
        Ok(stale.len())
    }
}
