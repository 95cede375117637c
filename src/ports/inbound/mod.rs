/// Inbound ports (Driving ports) - Use case interfaces
///
/// These ports define the interfaces that external adapters (e.g., CLI)
/// use to interact with the application core.
pub mod graph_materialization_port;

pub use graph_materialization_port::GraphMaterializationPort;
