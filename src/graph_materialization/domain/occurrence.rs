use crate::shared::Result;
use serde::{Deserialize, Serialize};

/// Security: Maximum length for component names to prevent DoS
const MAX_NAME_LENGTH: usize = 512;

/// Security: Maximum number of ancestor references on one occurrence
const MAX_ANCESTORS: usize = 10_000;

/// Identifier of an occurrence, unique within one project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OccurrenceId(u64);

impl OccurrenceId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for OccurrenceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the project owning an inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(u64);

impl ProjectId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw reference to the package that pulled an occurrence in, as recorded by
/// the scanner. It names the ancestor but does not point at it; see
/// [`ReferenceMatcher`](crate::graph_materialization::services::ReferenceMatcher).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AncestorRef {
    name: String,
    version: String,
}

impl AncestorRef {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Scanners emit `{}` placeholders for unknown ancestors
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

impl std::fmt::Display for AncestorRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

/// One detected package instance within a project's dependency inventory.
///
/// Immutable once built; a materialization run never modifies its input.
#[derive(Debug, Clone, PartialEq)]
pub struct Occurrence {
    id: OccurrenceId,
    project_id: ProjectId,
    name: String,
    version: String,
    input_file_path: String,
    ancestors: Vec<AncestorRef>,
    top_level: bool,
}

impl Occurrence {
    /// Creates a transitive occurrence without ancestor references
    ///
    /// # Errors
    /// Returns an error if the component name is empty or unreasonably long
    pub fn new(
        id: OccurrenceId,
        project_id: ProjectId,
        name: impl Into<String>,
        version: impl Into<String>,
        input_file_path: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            anyhow::bail!("Occurrence {} has an empty component name", id);
        }
        if name.len() > MAX_NAME_LENGTH {
            anyhow::bail!(
                "Occurrence {} component name is too long ({} bytes). Maximum allowed: {} bytes",
                id,
                name.len(),
                MAX_NAME_LENGTH
            );
        }

        Ok(Self {
            id,
            project_id,
            name,
            version: version.into(),
            input_file_path: input_file_path.into(),
            ancestors: Vec::new(),
            top_level: false,
        })
    }

    /// Replaces the ancestor references, keeping their order
    pub fn with_ancestors(mut self, ancestors: Vec<AncestorRef>) -> Result<Self> {
        if ancestors.len() > MAX_ANCESTORS {
            anyhow::bail!(
                "Occurrence {} lists {} ancestors. Maximum allowed: {}",
                self.id,
                ancestors.len(),
                MAX_ANCESTORS
            );
        }
        self.ancestors = ancestors;
        Ok(self)
    }

    pub fn with_top_level(mut self, top_level: bool) -> Self {
        self.top_level = top_level;
        self
    }

    pub fn id(&self) -> OccurrenceId {
        self.id
    }

    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn input_file_path(&self) -> &str {
        &self.input_file_path
    }

    pub fn ancestors(&self) -> &[AncestorRef] {
        &self.ancestors
    }

    /// Whether the project declares this package directly
    pub fn is_top_level(&self) -> bool {
        self.top_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occurrence(id: u64, name: &str) -> Result<Occurrence> {
        Occurrence::new(
            OccurrenceId::new(id),
            ProjectId::new(1),
            name,
            "1.0.0",
            "package-lock.json",
        )
    }

    #[test]
    fn test_occurrence_new_valid() {
        let occ = occurrence(10, "lodash").unwrap();
        assert_eq!(occ.id(), OccurrenceId::new(10));
        assert_eq!(occ.name(), "lodash");
        assert_eq!(occ.version(), "1.0.0");
        assert_eq!(occ.input_file_path(), "package-lock.json");
        assert!(occ.ancestors().is_empty());
        assert!(!occ.is_top_level());
    }

    #[test]
    fn test_occurrence_new_empty_name() {
        assert!(occurrence(1, "").is_err());
        assert!(occurrence(1, "   ").is_err());
    }

    #[test]
    fn test_occurrence_name_too_long() {
        let long_name = "a".repeat(MAX_NAME_LENGTH + 1);
        let err = occurrence(1, &long_name).unwrap_err();
        assert!(err.to_string().contains("too long"));
    }

    #[test]
    fn test_occurrence_with_ancestors_keeps_order() {
        let occ = occurrence(2, "express")
            .unwrap()
            .with_ancestors(vec![
                AncestorRef::new("b", "2.0.0"),
                AncestorRef::new("a", "1.0.0"),
            ])
            .unwrap()
            .with_top_level(true);

        assert!(occ.is_top_level());
        assert_eq!(occ.ancestors()[0].name(), "b");
        assert_eq!(occ.ancestors()[1].to_string(), "a@1.0.0");
    }

    #[test]
    fn test_ancestor_ref_empty_placeholder() {
        assert!(AncestorRef::new("", "").is_empty());
        assert!(!AncestorRef::new("react", "").is_empty());
    }

    #[test]
    fn test_ids_display() {
        assert_eq!(format!("{}", OccurrenceId::new(5)), "5");
        assert_eq!(ProjectId::new(9).get(), 9);
    }
}
