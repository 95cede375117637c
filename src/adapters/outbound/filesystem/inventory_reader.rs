use crate::graph_materialization::domain::{AncestorRef, Occurrence, OccurrenceId, ProjectId};
use crate::ports::outbound::{OccurrenceInventory, OccurrenceReader};
use crate::shared::error::GraphError;
use crate::shared::security::read_checked_file;
use crate::shared::Result;
use serde::Deserialize;
use std::path::Path;

/// Inventory document as stored on disk
#[derive(Debug, Deserialize)]
struct RawInventory {
    project_id: u64,
    #[serde(default)]
    occurrences: Vec<RawOccurrence>,
}

#[derive(Debug, Deserialize)]
struct RawOccurrence {
    id: u64,
    /// Overrides the document's project. Only useful to reproduce bad exports.
    project_id: Option<u64>,
    name: String,
    #[serde(default)]
    version: String,
    #[serde(default)]
    input_file_path: String,
    #[serde(default)]
    ancestors: Vec<RawAncestor>,
    #[serde(default)]
    top_level: bool,
}

/// `{}` placeholders deserialize to an empty reference and are ignored later
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawAncestor {
    name: String,
    version: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InventoryFormat {
    Json,
    Toml,
}

impl InventoryFormat {
    /// `.toml` selects TOML, anything else is read as JSON
    fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => InventoryFormat::Toml,
            _ => InventoryFormat::Json,
        }
    }
}

/// FileSystemReader adapter reading occurrence inventories from disk
///
/// Implements the OccurrenceReader port for JSON and TOML documents.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }

    fn parse(&self, path: &Path, content: &str) -> Result<RawInventory> {
        let parsed = match InventoryFormat::for_path(path) {
            InventoryFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            InventoryFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        };
        parsed.map_err(|details| {
            GraphError::InventoryParseError {
                path: path.to_path_buf(),
                details,
            }
            .into()
        })
    }

    fn to_domain(&self, path: &Path, raw: RawInventory) -> Result<OccurrenceInventory> {
        let project_id = ProjectId::new(raw.project_id);
        let mut occurrences = Vec::with_capacity(raw.occurrences.len());

        for entry in raw.occurrences {
            let ancestors = entry
                .ancestors
                .into_iter()
                .map(|ancestor| AncestorRef::new(ancestor.name, ancestor.version))
                .collect();

            let occurrence = Occurrence::new(
                OccurrenceId::new(entry.id),
                entry.project_id.map_or(project_id, ProjectId::new),
                entry.name,
                entry.version,
                entry.input_file_path,
            )
            .and_then(|occurrence| occurrence.with_ancestors(ancestors))
            .map_err(|e| GraphError::InventoryParseError {
                path: path.to_path_buf(),
                details: e.to_string(),
            })?
            .with_top_level(entry.top_level);

            occurrences.push(occurrence);
        }

        Ok(OccurrenceInventory::new(project_id, occurrences))
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl OccurrenceReader for FileSystemReader {
    fn read_occurrences(&self, source: &Path) -> Result<OccurrenceInventory> {
        if !source.exists() {
            return Err(GraphError::InventoryNotFound {
                path: source.to_path_buf(),
                suggestion: "Export the project's occurrences to a JSON or TOML inventory and pass its path".to_string(),
            }
            .into());
        }
        if source.is_dir() {
            return Err(GraphError::InvalidProjectPath {
                path: source.to_path_buf(),
                reason: "Path is a directory, not an inventory file".to_string(),
            }
            .into());
        }

        let content = read_checked_file(source, "occurrence inventory")?;
        let raw = self.parse(source, &content)?;
        let inventory = self.to_domain(source, raw)?;

        tracing::debug!(
            path = %source.display(),
            project = %inventory.project_id,
            occurrences = inventory.occurrences.len(),
            "read occurrence inventory"
        );
        Ok(inventory)
    }
}
