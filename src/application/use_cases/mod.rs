/// Use cases module containing application business logic orchestration
mod materialize_graph;

pub use materialize_graph::MaterializeGraphUseCase;
