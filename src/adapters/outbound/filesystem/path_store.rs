use crate::graph_materialization::domain::{Generation, GraphPath, ProjectId};
use crate::ports::outbound::{
    CleanupScheduler, GraphPathRepository, PathRecord, RunCoordinator, RunLease,
};
use crate::shared::error::GraphError;
use crate::shared::security::read_checked_file;
use crate::shared::Result;
use chrono::Utc;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const LEASE_FILE: &str = ".lease";
const CURRENT_FILE: &str = "CURRENT";
const GENERATION_PREFIX: &str = "generation-";
const GENERATION_SUFFIX: &str = ".jsonl";

/// Contents of a lease file, for whoever finds one left behind
#[derive(Serialize)]
struct LeaseOwner {
    pid: u32,
    acquired_at: chrono::DateTime<Utc>,
}

/// FileSystemPathStore adapter persisting path generations under a directory
///
/// Layout per project:
///
/// ```text
/// <root>/project-<id>/.lease                 held while a run is active
/// <root>/project-<id>/generation-<n>.jsonl   one PathRecord per line
/// <root>/project-<id>/CURRENT                the published Generation
/// ```
///
/// Generation files and the marker are written to a temporary file in the
/// same directory and renamed into place, so readers never see partial data.
#[derive(Debug, Clone)]
pub struct FileSystemPathStore {
    root: PathBuf,
}

impl FileSystemPathStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn project_dir(&self, project_id: ProjectId) -> PathBuf {
        self.root.join(format!("project-{}", project_id))
    }

    pub fn generation_path(&self, project_id: ProjectId, number: i64) -> PathBuf {
        self.project_dir(project_id)
            .join(format!("{}{}{}", GENERATION_PREFIX, number, GENERATION_SUFFIX))
    }

    /// Reads back every record of one stored generation
    pub fn read_generation(&self, project_id: ProjectId, number: i64) -> Result<Vec<PathRecord>> {
        let path = self.generation_path(project_id, number);
        let content = read_checked_file(&path, "path generation")?;
        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str::<PathRecord>(line).map_err(|e| {
                    anyhow::Error::from(GraphError::FileReadError {
                        path: path.clone(),
                        details: e.to_string(),
                    })
                })
            })
            .collect()
    }

    fn ensure_project_dir(&self, project_id: ProjectId) -> Result<PathBuf> {
        let dir = self.project_dir(project_id);
        fs::create_dir_all(&dir).map_err(|e| GraphError::FileWriteError {
            path: dir.clone(),
            details: e.to_string(),
        })?;
        Ok(dir)
    }

    fn write_error(path: &Path, e: impl std::fmt::Display) -> GraphError {
        GraphError::FileWriteError {
            path: path.to_path_buf(),
            details: e.to_string(),
        }
    }

    fn parse_generation_number(file_name: &str) -> Option<i64> {
        file_name
            .strip_prefix(GENERATION_PREFIX)?
            .strip_suffix(GENERATION_SUFFIX)?
            .parse()
            .ok()
    }
}

impl GraphPathRepository for FileSystemPathStore {
    fn persist(
        &self,
        project_id: ProjectId,
        generation: &Generation,
        paths: &[GraphPath],
        batch_size: usize,
        on_batch: &dyn Fn(usize, usize),
    ) -> Result<usize> {
        let dir = self.ensure_project_dir(project_id)?;
        let target = self.generation_path(project_id, generation.number());

        let temp = NamedTempFile::new_in(&dir).map_err(|e| Self::write_error(&dir, e))?;
        let mut writer = BufWriter::new(temp);
        let mut written = 0;

        for batch in paths.chunks(batch_size.max(1)) {
            for path in batch {
                serde_json::to_writer(&mut writer, &PathRecord::from(path))
                    .map_err(|e| Self::write_error(&target, e))?;
                writer
                    .write_all(b"\n")
                    .map_err(|e| Self::write_error(&target, e))?;
            }
            writer.flush().map_err(|e| Self::write_error(&target, e))?;
            written += batch.len();
            tracing::trace!(project = %project_id, written, total = paths.len(), "batch written");
            on_batch(written, paths.len());
        }

        let temp = writer
            .into_inner()
            .map_err(|e| Self::write_error(&target, e.error()))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| Self::write_error(&target, e))?;
        temp.persist(&target)
            .map_err(|e| Self::write_error(&target, e.error))?;

        tracing::debug!(
            project = %project_id,
            generation = generation.number(),
            records = written,
            "persisted path generation"
        );
        Ok(written)
    }

    fn generations(&self, project_id: ProjectId) -> Result<Vec<i64>> {
        let dir = self.project_dir(project_id);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(GraphError::FileReadError {
                    path: dir,
                    details: e.to_string(),
                }
                .into())
            }
        };

        let mut numbers = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| GraphError::FileReadError {
                path: dir.clone(),
                details: e.to_string(),
            })?;
            if let Some(number) = entry
                .file_name()
                .to_str()
                .and_then(Self::parse_generation_number)
            {
                numbers.push(number);
            }
        }
        numbers.sort_unstable();
        Ok(numbers)
    }

    fn remove_generation(&self, project_id: ProjectId, number: i64) -> Result<()> {
        let path = self.generation_path(project_id, number);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::write_error(&path, e).into()),
        }
    }
}

impl RunCoordinator for FileSystemPathStore {
    fn acquire(&self, project_id: ProjectId) -> Result<RunLease> {
        let dir = self.ensure_project_dir(project_id)?;
        let lease_path = dir.join(LEASE_FILE);

        let file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&lease_path)
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                tracing::warn!(
                    project = %project_id,
                    lease = %lease_path.display(),
                    "lease held by another run"
                );
                return Err(GraphError::LeaseUnavailable {
                    project_id: project_id.get(),
                    path: lease_path,
                }
                .into());
            }
            Err(e) => return Err(Self::write_error(&lease_path, e).into()),
        };

        let owner = LeaseOwner {
            pid: std::process::id(),
            acquired_at: Utc::now(),
        };
        if let Err(e) = serde_json::to_writer(file, &owner) {
            let _ = fs::remove_file(&lease_path);
            return Err(Self::write_error(&lease_path, e).into());
        }

        tracing::debug!(project = %project_id, "acquired run lease");
        Ok(RunLease::new(project_id, move || {
            if let Err(e) = fs::remove_file(&lease_path) {
                tracing::warn!(lease = %lease_path.display(), error = %e, "failed to release lease");
            }
        }))
    }

    fn current_generation(&self, project_id: ProjectId) -> Result<Option<Generation>> {
        let path = self.project_dir(project_id).join(CURRENT_FILE);
        let content = match fs::symlink_metadata(&path) {
            Ok(_) => read_checked_file(&path, "generation marker")?,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(GraphError::FileReadError {
                    path,
                    details: e.to_string(),
                }
                .into())
            }
        };

        let generation = serde_json::from_str(&content).map_err(|e| GraphError::FileReadError {
            path: path.clone(),
            details: e.to_string(),
        })?;
        Ok(Some(generation))
    }

    fn mark_current(&self, project_id: ProjectId, generation: &Generation) -> Result<()> {
        let dir = self.ensure_project_dir(project_id)?;
        let path = dir.join(CURRENT_FILE);

        let mut temp = NamedTempFile::new_in(&dir).map_err(|e| Self::write_error(&dir, e))?;
        serde_json::to_writer_pretty(&mut temp, generation)
            .map_err(|e| Self::write_error(&path, e))?;
        temp.persist(&path)
            .map_err(|e| Self::write_error(&path, e.error))?;

        tracing::info!(project = %project_id, generation = generation.number(), "generation marked current");
        Ok(())
    }
}

impl CleanupScheduler for FileSystemPathStore {
    fn schedule_cleanup(
        &self,
        project_id: ProjectId,
        current: &Generation,
        keep: usize,
    ) -> Result<usize> {
        // Newer files than the current one belong to runs that never published
        let stale: Vec<i64> = self
            .generations(project_id)?
            .into_iter()
            .rev()
            .filter(|number| *number < current.number())
            .skip(keep.saturating_sub(1))
            .collect();

        for number in &stale {
            self.remove_generation(project_id, *number)?;
            tracing::debug!(project = %project_id, generation = number, "removed stale generation");
        }
        Ok(stale.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph_materialization::domain::OccurrenceId;
    use std::cell::RefCell;
    use tempfile::TempDir;
    use uuid::Uuid;

    const PROJECT: ProjectId = ProjectId::new(9);

    fn generation(number: i64) -> Generation {
        Generation::new(number, Uuid::new_v4(), Utc::now())
    }

    fn paths(count: u64) -> Vec<GraphPath> {
        let now = Utc::now();
        (0..count)
            .map(|i| GraphPath::new(OccurrenceId::new(1), OccurrenceId::new(i + 2), PROJECT, 1, true, now))
            .collect()
    }

    #[test]
    fn test_persist_writes_batches_and_reads_back() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSystemPathStore::new(temp_dir.path());
        let progress = RefCell::new(Vec::new());

        let written = store
            .persist(PROJECT, &generation(100), &paths(5), 2, &|done, total| {
                progress.borrow_mut().push((done, total))
            })
            .unwrap();

        assert_eq!(written, 5);
        assert_eq!(*progress.borrow(), vec![(2, 5), (4, 5), (5, 5)]);

        let records = store.read_generation(PROJECT, 100).unwrap();
        assert_eq!(records.len(), 5);
        assert_eq!(records[0].descendant_id, OccurrenceId::new(2));
        assert_eq!(records[0].project_id, PROJECT);
        assert!(records[0].top_level_ancestor);
    }

    #[test]
    fn test_persist_empty_generation_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSystemPathStore::new(temp_dir.path());

        let written = store
            .persist(PROJECT, &generation(1), &[], 10, &|_, _| {})
            .unwrap();

        assert_eq!(written, 0);
        assert_eq!(store.generations(PROJECT).unwrap(), vec![1]);
    }

    #[test]
    fn test_generations_ignores_unrelated_files() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSystemPathStore::new(temp_dir.path());
        assert!(store.generations(PROJECT).unwrap().is_empty());

        for number in [30, 10, 20] {
            store
                .persist(PROJECT, &generation(number), &paths(1), 10, &|_, _| {})
                .unwrap();
        }
        let dir = store.project_dir(PROJECT);
        fs::write(dir.join("generation-abc.jsonl"), "").unwrap();
        fs::write(dir.join("notes.txt"), "").unwrap();

        assert_eq!(store.generations(PROJECT).unwrap(), vec![10, 20, 30]);
    }

    #[test]
    fn test_lease_is_exclusive_and_released_on_drop() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSystemPathStore::new(temp_dir.path());

        let lease = store.acquire(PROJECT).unwrap();
        assert!(store.project_dir(PROJECT).join(LEASE_FILE).exists());

        let err = store.acquire(PROJECT).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GraphError>(),
            Some(GraphError::LeaseUnavailable { project_id: 9, .. })
        ));

        // Other projects are unaffected
        let other = store.acquire(ProjectId::new(10)).unwrap();
        drop(other);

        drop(lease);
        assert!(!store.project_dir(PROJECT).join(LEASE_FILE).exists());
        assert!(store.acquire(PROJECT).is_ok());
    }

    #[test]
    fn test_mark_current_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSystemPathStore::new(temp_dir.path());
        assert!(store.current_generation(PROJECT).unwrap().is_none());

        let first = generation(5);
        store.mark_current(PROJECT, &first).unwrap();
        let second = generation(6);
        store.mark_current(PROJECT, &second).unwrap();

        assert_eq!(store.current_generation(PROJECT).unwrap(), Some(second));
    }

    #[test]
    fn test_corrupt_marker_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSystemPathStore::new(temp_dir.path());
        fs::create_dir_all(store.project_dir(PROJECT)).unwrap();
        fs::write(store.project_dir(PROJECT).join(CURRENT_FILE), "not json").unwrap();

        assert!(store.current_generation(PROJECT).is_err());
    }

    #[test]
    fn test_cleanup_keeps_newest_generations() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSystemPathStore::new(temp_dir.path());
        for number in [1, 2, 3, 4, 5] {
            store
                .persist(PROJECT, &generation(number), &paths(1), 10, &|_, _| {})
                .unwrap();
        }

        let removed = store.schedule_cleanup(PROJECT, &generation(4), 2).unwrap();

        // 4 is current, 3 is kept, 5 is newer than current and left alone
        assert_eq!(removed, 2);
        assert_eq!(store.generations(PROJECT).unwrap(), vec![3, 4, 5]);
    }

    #[test]
    fn test_cleanup_never_removes_current() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSystemPathStore::new(temp_dir.path());
        for number in [1, 2] {
            store
                .persist(PROJECT, &generation(number), &paths(1), 10, &|_, _| {})
                .unwrap();
        }

        let removed = store.schedule_cleanup(PROJECT, &generation(2), 0).unwrap();

        assert_eq!(removed, 1);
        assert_eq!(store.generations(PROJECT).unwrap(), vec![2]);
    }

    #[test]
    fn test_remove_missing_generation_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSystemPathStore::new(temp_dir.path());

        assert!(store.remove_generation(PROJECT, 77).is_ok());
    }
}
