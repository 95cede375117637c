/// Filesystem adapters: inventory input, report output and the path store
mod file_writer;
mod inventory_reader;
mod path_store;

pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use inventory_reader::FileSystemReader;
pub use path_store::FileSystemPathStore;
