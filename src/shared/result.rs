/// Type alias for Result with anyhow::Error as the error type.
/// Every layer of sbom-graph returns this so errors compose with `?`.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
