/// Adapters layer - Infrastructure implementations
///
/// This layer contains concrete implementations of the ports,
/// providing the actual integration with the file system and console.
/// The CLI (`cli` and `main`) is the only inbound adapter.
pub mod outbound;
