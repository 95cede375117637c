//! sbom-graph - dependency path materialization for SBOM occurrence inventories
//!
//! Given every package occurrence of one project, this library computes the
//! closure table of (top-level ancestor, descendant, hops) paths that lets
//! downstream queries answer "which direct dependency pulled this in?" without
//! walking the graph at read time. It follows hexagonal architecture and
//! Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`graph_materialization`): occurrences, edges, paths and
//!   the traversal services
//! - **Application Layer** (`application`): Use cases, DTOs and factories
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use sbom_graph::prelude::*;
//!
//! # fn main() -> Result<()> {
//! // Create adapters
//! let occurrence_reader = FileSystemReader::new();
//! let progress_reporter = StderrProgressReporter::new();
//! let store = Some(FileSystemPathStore::new("/var/lib/sbom-graph"));
//!
//! // Create use case
//! let use_case = MaterializeGraphUseCase::new(occurrence_reader, progress_reporter, store);
//!
//! // Execute
//! let request = MaterializeRequest::builder()
//!     .inventory_path("inventory.json")
//!     .build()?;
//! let response = use_case.execute(request)?;
//!
//! // Format output
//! let output = JsonFormatter::new().format(&response)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod graph_materialization;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemPathStore, FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
    pub use crate::application::dto::{MaterializeRequest, MaterializeResponse, OutputFormat};
    pub use crate::application::use_cases::MaterializeGraphUseCase;
    pub use crate::graph_materialization::domain::{
        AncestorRef, Edge, Generation, GraphPath, Materialization, MaterializationStats,
        Occurrence, OccurrenceId, PathKey, ProjectId,
    };
    pub use crate::graph_materialization::services::GraphMaterializer;
    pub use crate::ports::inbound::GraphMaterializationPort;
    pub use crate::ports::outbound::{
        CleanupScheduler, GraphPathRepository, OccurrenceInventory, OccurrenceReader,
        OutputPresenter, PathFormatter, PathRecord, ProgressReporter, RunCoordinator, RunLease,
    };
    pub use crate::shared::error::{ExitCode, GraphError};
    pub use crate::shared::Result;
}
