/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod materialize_request;
mod materialize_response;
mod output_format;

pub use materialize_request::{MaterializeRequest, MaterializeRequestBuilder};
pub use materialize_response::MaterializeResponse;
pub use output_format::OutputFormat;
