use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems and schedulers to distinguish a run that lost
/// the race for the project lease from a genuine failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - paths were materialized (and persisted, when a store is configured)
    Success = 0,
    /// Another run currently holds the lease for the same project
    RunInProgress = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (malformed inventory, file I/O error, traversal abort, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Maps a failed run to its exit code
    pub fn for_error(error: &anyhow::Error) -> Self {
        match error.downcast_ref::<GraphError>() {
            Some(GraphError::LeaseUnavailable { .. }) => ExitCode::RunInProgress,
            _ => ExitCode::ApplicationError,
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::RunInProgress => write!(f, "Run In Progress (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for dependency path materialization.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// keeping the hint text next to the failure it explains.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Occurrence inventory not found: {path}\n\n💡 Hint: {suggestion}")]
    InventoryNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to parse occurrence inventory: {path}\nDetails: {details}\n\n💡 Hint: The inventory must be a JSON or TOML document with `project_id` and `occurrences`")]
    InventoryParseError { path: PathBuf, details: String },

    #[error("Invalid project path: {path}\nReason: {reason}\n\n💡 Hint: Please specify an existing inventory file")]
    InvalidProjectPath { path: PathBuf, reason: String },

    #[error("Duplicate occurrence id {id} in project {project_id}\n\n💡 Hint: Occurrence ids must be unique within one project snapshot")]
    DuplicateOccurrence { id: u64, project_id: u64 },

    #[error("Occurrence {id} belongs to project {found}, expected project {expected}\n\n💡 Hint: A materialization run covers exactly one project")]
    MixedProjects { id: u64, expected: u64, found: u64 },

    #[error("Traversal exceeded the maximum depth of {max_depth} at occurrence {id}\n\n💡 Hint: Raise `max_depth` if the dependency chain is genuinely this deep")]
    TraversalDepthExceeded { id: u64, max_depth: usize },

    #[error("Traversal gave up after {max_walks} walks at occurrence {id}\n\n💡 Hint: The inventory contains large requirement cycles. Raise `max_walks` to let the run finish")]
    TraversalBudgetExceeded { id: u64, max_walks: usize },

    #[error("Another materialization run holds the lease for project {project_id}: {path}\n\n💡 Hint: Wait for the running job to finish, or remove the lease file if that job crashed")]
    LeaseUnavailable { project_id: u64, path: PathBuf },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    /// Validation error for builders and configuration values
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}
