use crate::application::dto::{MaterializeRequest, MaterializeResponse};
use crate::shared::Result;

/// GraphMaterializationPort - Inbound port for the path materialization use case
///
/// This port is the application's public API: one call materializes (and,
/// when a store is configured, persists) the dependency paths of one project.
pub trait GraphMaterializationPort {
    /// Runs one materialization
    ///
    /// # Errors
    /// Returns an error if:
    /// - The inventory cannot be read or is inconsistent
    /// - Another run holds the project's lease
    /// - Traversal aborts (requirement chain deeper than the configured limit)
    /// - Persisting the paths fails
    fn materialize(&self, request: MaterializeRequest) -> Result<MaterializeResponse>;
}
