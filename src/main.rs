mod cli;

use cli::Args;
use owo_colors::OwoColorize;
use sbom_graph::adapters::outbound::console::StderrProgressReporter;
use sbom_graph::adapters::outbound::filesystem::{FileSystemPathStore, FileSystemReader};
use sbom_graph::application::dto::{MaterializeRequest, MaterializeResponse, OutputFormat};
use sbom_graph::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use sbom_graph::application::use_cases::MaterializeGraphUseCase;
use sbom_graph::config::{self, ConfigFile};
use sbom_graph::ports::inbound::GraphMaterializationPort;
use sbom_graph::shared::error::{ExitCode, GraphError};
use sbom_graph::shared::Result;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse_args();
    init_tracing(args.log_filter());

    if let Err(e) = run(args) {
        eprintln!("\n{}\n", "❌ An error occurred:".red().bold());
        eprintln!("{}", e);

        // Display error chain
        for cause in e.chain().skip(1) {
            eprintln!("\nCaused by: {}", cause);
        }

        let code = ExitCode::for_error(&e);
        tracing::debug!(exit_code = %code, "run failed");
        eprintln!();
        process::exit(code.as_i32());
    }
}

/// Logs go to stderr; stdout carries the report
fn init_tracing(filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Options after applying CLI > config file > default precedence
#[derive(Debug)]
struct Settings {
    format: OutputFormat,
    store_dir: Option<PathBuf>,
    request: MaterializeRequest,
}

fn run(args: Args) -> Result<()> {
    validate_inventory_path(&args.inventory)?;

    let config = load_config(&args)?;
    let settings = resolve_settings(&args, config.unwrap_or_default())?;

    // Create adapters (Dependency Injection)
    let occurrence_reader = FileSystemReader::new();
    let progress_reporter = StderrProgressReporter::new();
    let store = settings.store_dir.as_ref().map(FileSystemPathStore::new);

    let use_case = MaterializeGraphUseCase::new(occurrence_reader, progress_reporter, store);
    let response = use_case.materialize(settings.request)?;

    eprintln!("{}", FormatterFactory::progress_message(settings.format));
    let formatter = FormatterFactory::create(settings.format);
    let formatted_output = formatter.format(&response)?;

    let presenter = PresenterFactory::create(PresenterType::for_output(args.output));
    presenter.present(&formatted_output)?;

    eprintln!("{}", stats_line(&response));
    Ok(())
}

fn load_config(args: &Args) -> Result<Option<ConfigFile>> {
    match &args.config {
        Some(path) => config::load_config_from_path(path).map(Some),
        None => {
            let dir = match args.inventory.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            config::discover_config(dir)
        }
    }
}

fn resolve_settings(args: &Args, config: ConfigFile) -> Result<Settings> {
    let to_usize = |value: u64| usize::try_from(value).unwrap_or(usize::MAX);

    let mut builder = MaterializeRequest::builder()
        .inventory_path(args.inventory.clone())
        .use_cache(!(args.no_cache || config.disable_cache.unwrap_or(false)));
    if let Some(batch_size) = args.batch_size.map(to_usize).or(config.batch_size) {
        builder = builder.batch_size(batch_size);
    }
    if let Some(max_depth) = args.max_depth.map(to_usize).or(config.max_depth) {
        builder = builder.max_depth(max_depth);
    }
    if let Some(max_walks) = args.max_walks.map(to_usize).or(config.max_walks) {
        builder = builder.max_walks(max_walks);
    }
    if let Some(keep) = args.keep_generations.map(to_usize).or(config.keep_generations) {
        builder = builder.keep_generations(keep);
    }

    Ok(Settings {
        format: args.format.or(config.format).unwrap_or_default(),
        store_dir: args.store.clone().or(config.store_dir),
        request: builder.build()?,
    })
}

fn stats_line(response: &MaterializeResponse) -> String {
    format!(
        "📊 {} path record(s), {} cache hit(s), {} cache miss(es)",
        response.paths.len(),
        response.stats.cache_hits,
        response.stats.cache_misses
    )
}

fn validate_inventory_path(path: &Path) -> Result<()> {
    let metadata = match std::fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(_) => {
            return Err(GraphError::InventoryNotFound {
                path: path.to_path_buf(),
                suggestion: "Check the inventory path passed on the command line".to_string(),
            }
            .into())
        }
    };

    if metadata.is_symlink() {
        return Err(GraphError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Security: Inventory path is a symbolic link. For security reasons, symbolic links are not allowed.".to_string(),
        }
        .into());
    }

    if !metadata.is_file() {
        return Err(GraphError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Not a regular file".to_string(),
        }
        .into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["sbom-graph"];
        argv.extend_from_slice(extra);
        argv.push("inventory.json");
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_resolve_settings_defaults() {
        let settings = resolve_settings(&args(&[]), ConfigFile::default()).unwrap();

        assert_eq!(settings.format, OutputFormat::Json);
        assert!(settings.store_dir.is_none());
        assert_eq!(settings.request.batch_size, 1000);
        assert_eq!(settings.request.max_depth, 512);
        assert_eq!(settings.request.max_walks, 5_000_000);
        assert!(settings.request.use_cache);
    }

    #[test]
    fn test_resolve_settings_config_applies() {
        let config = ConfigFile {
            format: Some(OutputFormat::Markdown),
            batch_size: Some(10),
            disable_cache: Some(true),
            store_dir: Some(PathBuf::from("/srv/paths")),
            ..ConfigFile::default()
        };

        let settings = resolve_settings(&args(&[]), config).unwrap();

        assert_eq!(settings.format, OutputFormat::Markdown);
        assert_eq!(settings.request.batch_size, 10);
        assert!(!settings.request.use_cache);
        assert_eq!(settings.store_dir, Some(PathBuf::from("/srv/paths")));
    }

    #[test]
    fn test_resolve_settings_cli_overrides_config() {
        let config = ConfigFile {
            format: Some(OutputFormat::Markdown),
            batch_size: Some(10),
            keep_generations: Some(4),
            max_walks: Some(40),
            store_dir: Some(PathBuf::from("/srv/paths")),
            ..ConfigFile::default()
        };

        let settings = resolve_settings(
            &args(&[
                "-f",
                "json",
                "--batch-size",
                "99",
                "--keep-generations",
                "2",
                "--max-walks",
                "80",
                "-s",
                "local",
            ]),
            config,
        )
        .unwrap();

        assert_eq!(settings.format, OutputFormat::Json);
        assert_eq!(settings.request.batch_size, 99);
        assert_eq!(settings.request.keep_generations, 2);
        assert_eq!(settings.request.max_walks, 80);
        assert_eq!(settings.store_dir, Some(PathBuf::from("local")));
    }

    #[test]
    fn test_validate_inventory_path_missing() {
        let temp_dir = TempDir::new().unwrap();
        let err = validate_inventory_path(&temp_dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().contains("Occurrence inventory not found"));
    }

    #[test]
    fn test_validate_inventory_path_directory() {
        let temp_dir = TempDir::new().unwrap();
        let err = validate_inventory_path(temp_dir.path()).unwrap_err();
        assert!(err.to_string().contains("Not a regular file"));
    }

    #[test]
    fn test_validate_inventory_path_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("inventory.json");
        fs::write(&path, "{}").unwrap();
        assert!(validate_inventory_path(&path).is_ok());
    }
}
