use clap::{ArgAction, Parser};
use sbom_graph::application::dto::OutputFormat;
use std::path::PathBuf;

/// Materialize the dependency paths of an SBOM occurrence inventory
#[derive(Parser, Debug)]
#[command(name = "sbom-graph")]
#[command(version)]
#[command(
    about = "Materialize (top-level ancestor, descendant, hops) paths from an SBOM occurrence inventory",
    long_about = None
)]
pub struct Args {
    /// Occurrence inventory (JSON, or TOML with a .toml extension)
    #[arg(value_name = "INVENTORY")]
    pub inventory: PathBuf,

    /// Output format: json or markdown [default: json]
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file (defaults to sbom-graph.config.yml next to the inventory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory of the path store. Paths are only persisted when set.
    #[arg(short, long = "store", value_name = "DIR")]
    pub store: Option<PathBuf>,

    /// Path records per persisted batch [default: 1000]
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub batch_size: Option<u64>,

    /// Longest requirement chain followed before the run aborts [default: 512]
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub max_depth: Option<u64>,

    /// Occurrences entered over the whole run before it aborts [default: 5000000]
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub max_walks: Option<u64>,

    /// Re-walk every ancestor instead of reusing cached reachability
    #[arg(long)]
    pub no_cache: bool,

    /// Stored generations to keep, including the new one [default: 1]
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub keep_generations: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Default log filter for the chosen verbosity
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
