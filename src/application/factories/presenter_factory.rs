use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
use crate::ports::outbound::OutputPresenter;
use std::path::PathBuf;

/// Destination of the rendered path report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterType {
    Stdout,
    File(PathBuf),
}

impl PresenterType {
    /// Stdout unless an output file was requested
    pub fn for_output(output: Option<PathBuf>) -> Self {
        output.map_or(PresenterType::Stdout, PresenterType::File)
    }
}

/// Factory for creating output presenters
pub struct PresenterFactory;

impl PresenterFactory {
    /// Creates a presenter writing the path report to the chosen destination
    ///
    /// # Examples
    /// ```
    /// use sbom_graph::application::factories::{PresenterFactory, PresenterType};
    ///
    /// let presenter = PresenterFactory::create(PresenterType::for_output(None));
    /// ```
    pub fn create(presenter_type: PresenterType) -> Box<dyn OutputPresenter> {
        match presenter_type {
            PresenterType::Stdout => Box::new(StdoutPresenter::new()),
            PresenterType::File(path) => Box::new(FileSystemWriter::new(path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presenter_type_for_output() {
        assert_eq!(PresenterType::for_output(None), PresenterType::Stdout);
        assert_eq!(
            PresenterType::for_output(Some(PathBuf::from("paths.json"))),
            PresenterType::File(PathBuf::from("paths.json"))
        );
    }

    #[test]
    fn test_file_presenter_writes_report() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("paths.md");

        let presenter = PresenterFactory::create(PresenterType::File(path.clone()));
        presenter.present("# Dependency Paths\n").unwrap();

        assert_eq!(std::fs::read_to_string(path).unwrap(), "# Dependency Paths\n");
    }

    #[test]
    fn test_presenter_type_equality() {
        let file1 = PresenterType::File(PathBuf::from("/tmp/paths-1.json"));
        let file2 = PresenterType::File(PathBuf::from("/tmp/paths-1.json"));
        assert_eq!(file1, file2);
        assert_ne!(file1, PresenterType::File(PathBuf::from("/tmp/paths-2.json")));
        assert_ne!(file1, PresenterType::Stdout);
    }
}
