//! Mint-Bench: NFT mint gas cost analysis
//!
//! Mints a token with synthetic metadata of increasing size on each
//! configured network through `cast send` and records the receipts.

mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use bench_telemetry::{init_telemetry, service_span, TelemetryConfig};
use clap::{Args, Parser, Subcommand};
use mint_bench::BenchConfig;
use tracing::Instrument;

/// Mint-Bench: NFT mint gas cost analysis
#[derive(Parser, Debug)]
#[command(name = "mint-bench", version)]
#[command(about = "Measure NFT mint gas cost across networks and metadata sizes")]
struct Cli {
    /// TOML config file (defaults to the built-in tables)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Root directory for result files
    #[arg(long, global = true)]
    results_dir: Option<PathBuf>,

    /// External transaction tool executable
    #[arg(long, global = true)]
    tool: Option<String>,

    /// Output machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log at debug level (shows rendered commands)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show every invocation of a run without executing anything
    Plan {
        #[command(flatten)]
        matrix: MatrixArgs,
    },
    /// Execute the full network x length matrix
    Run {
        #[command(flatten)]
        matrix: MatrixArgs,

        /// Record failed invocations and continue
        #[arg(long)]
        keep_going: bool,

        /// Kill an invocation after this many seconds
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Write Prometheus metrics here after the run
        #[arg(long)]
        metrics_file: Option<PathBuf>,

        /// Skip writing the JSON summary file
        #[arg(long)]
        no_summary: bool,
    },
    /// Mint one item from the content table on one network
    Mint {
        /// Content table key
        #[arg(long)]
        content: String,

        /// Target network
        #[arg(short, long)]
        network: String,

        /// Kill the invocation after this many seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
    /// List the content table
    Content,
}

/// Narrow the run matrix.
#[derive(Args, Debug, Default)]
struct MatrixArgs {
    /// Only these networks (repeatable), in configured order
    #[arg(short, long = "network")]
    networks: Vec<String>,

    /// Payload lengths, comma separated
    #[arg(long, value_delimiter = ',')]
    lengths: Option<Vec<usize>>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let telemetry_config = TelemetryConfig::from_env().with_verbose(cli.verbose);
    let _telemetry =
        init_telemetry(telemetry_config.clone()).context("Failed to initialize telemetry")?;

    execute(cli).instrument(service_span(&telemetry_config)).await
}

async fn execute(cli: Cli) -> Result<()> {
    let mut config = load_config(&cli)?;

    match cli.command {
        Commands::Plan { matrix } => {
            apply_matrix_args(&mut config, matrix)?;
            commands::plan(&config, cli.json)
        }
        Commands::Run {
            matrix,
            keep_going,
            timeout_secs,
            metrics_file,
            no_summary,
        } => {
            apply_matrix_args(&mut config, matrix)?;
            config.keep_going |= keep_going;
            if timeout_secs.is_some() {
                config.timeout_secs = timeout_secs;
            }
            commands::run(
                config,
                commands::RunOutputs {
                    json: cli.json,
                    metrics_file,
                    write_summary: !no_summary,
                },
            )
            .await
        }
        Commands::Mint {
            content,
            network,
            timeout_secs,
        } => {
            if timeout_secs.is_some() {
                config.timeout_secs = timeout_secs;
            }
            commands::mint(config, &content, &network, cli.json).await
        }
        Commands::Content => commands::list_content(&config, cli.json),
    }
}

/// Defaults, then the config file, then environment, then global flags.
fn load_config(cli: &Cli) -> Result<BenchConfig> {
    let mut config = match &cli.config {
        Some(path) => BenchConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => BenchConfig::default(),
    };
    config.apply_env();

    if let Some(dir) = &cli.results_dir {
        config.results_dir = dir.clone();
    }
    if let Some(tool) = &cli.tool {
        config.tool = tool.clone();
    }
    Ok(config)
}

fn apply_matrix_args(config: &mut BenchConfig, matrix: MatrixArgs) -> Result<()> {
    config
        .select_networks(&matrix.networks)
        .context("Invalid --network")?;
    if let Some(lengths) = matrix.lengths {
        config.lengths = lengths;
    }
    config.validate().context("Invalid configuration")
}
