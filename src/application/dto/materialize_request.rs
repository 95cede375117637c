use crate::graph_materialization::services::GraphMaterializer;
use crate::shared::error::GraphError;
use crate::shared::Result;
use std::path::PathBuf;

/// Default number of path records per persisted batch
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Default number of stored generations kept after cleanup
pub const DEFAULT_KEEP_GENERATIONS: usize = 1;

/// MaterializeRequest - request DTO for the materialization use case
#[derive(Debug, Clone)]
pub struct MaterializeRequest {
    /// Inventory document listing the project's occurrences
    pub inventory_path: PathBuf,
    /// Records per batch handed to the path repository
    pub batch_size: usize,
    /// Longest requirement chain the traversal follows before aborting
    pub max_depth: usize,
    /// Occurrences the traversal may enter over the whole run before aborting
    pub max_walks: usize,
    /// Whether traversals share the reachability cache
    pub use_cache: bool,
    /// Stored generations to keep, including the new one
    pub keep_generations: usize,
}

impl MaterializeRequest {
    pub fn builder() -> MaterializeRequestBuilder {
        MaterializeRequestBuilder::default()
    }
}

/// Builder for [`MaterializeRequest`] validating numeric options
#[derive(Debug, Default)]
pub struct MaterializeRequestBuilder {
    inventory_path: Option<PathBuf>,
    batch_size: Option<usize>,
    max_depth: Option<usize>,
    max_walks: Option<usize>,
    use_cache: Option<bool>,
    keep_generations: Option<usize>,
}

impl MaterializeRequestBuilder {
    pub fn inventory_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.inventory_path = Some(path.into());
        self
    }

    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn max_walks(mut self, max_walks: usize) -> Self {
        self.max_walks = Some(max_walks);
        self
    }

    pub fn use_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = Some(use_cache);
        self
    }

    pub fn keep_generations(mut self, keep_generations: usize) -> Self {
        self.keep_generations = Some(keep_generations);
        self
    }

    /// # Errors
    /// Returns [`GraphError::Validation`] when the inventory path is missing
    /// or a numeric option is zero
    pub fn build(self) -> Result<MaterializeRequest> {
        let inventory_path = self.inventory_path.ok_or_else(|| GraphError::Validation {
            message: "inventory_path is required".to_string(),
        })?;

        let batch_size = Self::positive("batch_size", self.batch_size, DEFAULT_BATCH_SIZE)?;
        let max_depth = Self::positive(
            "max_depth",
            self.max_depth,
            GraphMaterializer::DEFAULT_MAX_DEPTH,
        )?;
        let max_walks = Self::positive(
            "max_walks",
            self.max_walks,
            GraphMaterializer::DEFAULT_MAX_WALKS,
        )?;
        let keep_generations = Self::positive(
            "keep_generations",
            self.keep_generations,
            DEFAULT_KEEP_GENERATIONS,
        )?;

        Ok(MaterializeRequest {
            inventory_path,
            batch_size,
            max_depth,
            max_walks,
            use_cache: self.use_cache.unwrap_or(true),
            keep_generations,
        })
    }

    fn positive(name: &str, value: Option<usize>, default: usize) -> Result<usize> {
        match value {
            Some(0) => Err(GraphError::Validation {
                message: format!("{} must be greater than zero", name),
            }
            .into()),
            Some(value) => Ok(value),
            None => Ok(default),
        }
    }
}
