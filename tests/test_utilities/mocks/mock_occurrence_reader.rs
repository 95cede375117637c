use sbom_graph::prelude::*;
use std::path::Path;

/// Mock OccurrenceReader returning a fixed inventory
pub struct MockOccurrenceReader {
    pub inventory: OccurrenceInventory,
    pub should_fail: bool,
}

impl MockOccurrenceReader {
    pub fn new(project_id: u64, occurrences: Vec<Occurrence>) -> Self {
        Self {
            inventory: OccurrenceInventory::new(ProjectId::new(project_id), occurrences),
            should_fail: false,
        }
    }

    pub fn with_failure() -> Self {
        Self {
            inventory: OccurrenceInventory::new(ProjectId::new(0), Vec::new()),
            should_fail: true,
        }
    }
}

impl OccurrenceReader for MockOccurrenceReader {
    fn read_occurrences(&self, _source: &Path) -> Result<OccurrenceInventory> {
        if self.should_fail {
            anyhow::bail!("Mock inventory read failure");
        }
        Ok(self.inventory.clone())
    }
}
