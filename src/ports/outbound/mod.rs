/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, console, path store, etc.).
pub mod cleanup_scheduler;
pub mod formatter;
pub mod graph_path_repository;
pub mod occurrence_reader;
pub mod output_presenter;
pub mod path_record;
pub mod progress_reporter;
pub mod run_coordinator;

pub use cleanup_scheduler::CleanupScheduler;
pub use formatter::PathFormatter;
pub use graph_path_repository::GraphPathRepository;
pub use occurrence_reader::{OccurrenceInventory, OccurrenceReader};
pub use output_presenter::OutputPresenter;
pub use path_record::PathRecord;
pub use progress_reporter::ProgressReporter;
pub use run_coordinator::{RunCoordinator, RunLease};
