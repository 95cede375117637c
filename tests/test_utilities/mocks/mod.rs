/// Mock implementations for testing
mod mock_occurrence_reader;
mod mock_path_store;
mod mock_progress_reporter;

pub use mock_occurrence_reader::MockOccurrenceReader;
pub use mock_path_store::MockPathStore;
pub use mock_progress_reporter::MockProgressReporter;
