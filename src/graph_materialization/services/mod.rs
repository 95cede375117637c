mod graph_constructor;
mod graph_materializer;
mod path_collector;
mod path_traversal;
mod reachability_cache;
mod reference_matcher;

pub use graph_constructor::{GraphConstructor, RequirementGraph};
pub use graph_materializer::GraphMaterializer;
pub use path_collector::PathCollector;
pub use path_traversal::PathTraversal;
pub use reachability_cache::{Reach, ReachabilityCache};
pub use reference_matcher::ReferenceMatcher;
