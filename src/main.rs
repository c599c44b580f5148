//! Ideas Harvester main entry point
//!
//! Command-line interface: runs one query and prints each item as a line of
//! JSON on stdout. Logs go to stderr.

use clap::{Parser, ValueEnum};
use futures::StreamExt;
use ideas_harvester::config::{load_config, validate, Config, SchemaVersion};
use ideas_harvester::Harvester;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Ideas Harvester: recent TradingView ideas as JSON lines
///
/// Fetches the recent-ideas listing once, keeps the posts published within
/// the age window and prints at most the requested number of them.
#[derive(Parser, Debug)]
#[command(name = "ideas-harvester")]
#[command(version)]
#[command(about = "Harvest recent TradingView ideas", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Maximum age of a post, in seconds
    #[arg(long)]
    max_oldness_seconds: Option<u64>,

    /// Maximum number of items to print
    #[arg(long)]
    maximum_items_to_collect: Option<u64>,

    /// Minimum body length, in characters
    #[arg(long)]
    min_post_length: Option<u64>,

    /// Markup layout to expect
    #[arg(long, value_enum)]
    schema: Option<SchemaArg>,

    /// Never fetch detail pages; keep only cards with an inline description
    #[arg(long)]
    no_details: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum SchemaArg {
    Auto,
    Current,
    Legacy,
}

impl From<SchemaArg> for SchemaVersion {
    fn from(arg: SchemaArg) -> Self {
        match arg {
            SchemaArg::Auto => SchemaVersion::Auto,
            SchemaArg::Current => SchemaVersion::Current,
            SchemaArg::Legacy => SchemaVersion::Legacy,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    handle_query(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("ideas_harvester=info,warn"),
            1 => EnvFilter::new("ideas_harvester=debug,info"),
            2 => EnvFilter::new("ideas_harvester=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file, if any, and applies command-line overrides
fn resolve_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => Config::default(),
    };

    if let Some(seconds) = cli.max_oldness_seconds {
        config.query.max_oldness_seconds = seconds;
    }
    if let Some(cap) = cli.maximum_items_to_collect {
        config.query.maximum_items_to_collect = cap;
    }
    if let Some(length) = cli.min_post_length {
        config.query.min_post_length = length;
    }
    if let Some(schema) = cli.schema {
        config.harvester.schema = schema.into();
    }
    if cli.no_details {
        config.harvester.fetch_details = false;
    }

    validate(&config)?;

    Ok(config)
}

/// Runs the query and prints every item as it arrives
async fn handle_query(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let harvester = Harvester::new(config.harvester)?;

    let items = harvester.query(config.query);
    futures::pin_mut!(items);

    let stdout = std::io::stdout();
    let mut printed = 0usize;
    while let Some(item) = items.next().await {
        let line = serde_json::to_string(&item)?;
        let mut out = stdout.lock();
        writeln!(out, "{}", line)?;
        out.flush()?;
        printed += 1;
    }

    tracing::info!("Harvest finished: {} items", printed);

    Ok(())
}
