pub mod edge;
pub mod generation;
pub mod graph_path;
pub mod materialization;
pub mod occurrence;

pub use edge::Edge;
pub use generation::Generation;
pub use graph_path::{GraphPath, PathKey};
pub use materialization::{Materialization, MaterializationStats};
pub use occurrence::{AncestorRef, Occurrence, OccurrenceId, ProjectId};
