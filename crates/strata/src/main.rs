use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use strata_core::pipeline::{AnalysisOutcome, ProjectAnalyzer};
use strata_core::Config;
use strata_extract::{default_annotators, default_extractors};
use strata_report::{html, json, text};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Html,
}

#[derive(Parser)]
#[command(name = "strata")]
#[command(about = "Analyze a source workspace into a layered architectural model")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a workspace and print the structural report
    Analyze {
        /// Path to the workspace root
        path: PathBuf,
        /// Config file path (defaults to .strata.toml in the workspace)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Compact output (single-line JSON)
        #[arg(long)]
        compact: bool,
        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Create a default .strata.toml configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            path,
            config,
            format,
            compact,
            output,
        } => cmd_analyze(&path, config.as_deref(), format, compact, output.as_deref()).await,
        Commands::Init { force } => cmd_init(force),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(2);
        }
    }
}

fn validate_path(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("path '{}' does not exist", path.display());
    }
    if !path.is_dir() {
        anyhow::bail!("path '{}' is not a directory", path.display());
    }
    Ok(())
}

async fn cmd_analyze(
    path: &Path,
    config_path: Option<&Path>,
    format: OutputFormat,
    compact: bool,
    output: Option<&Path>,
) -> Result<i32> {
    validate_path(path)?;

    let config = match config_path {
        Some(explicit) => Config::load(explicit)
            .with_context(|| format!("failed to load config from {}", explicit.display()))?,
        None => Config::load_or_default(path),
    };

    let analyzer = ProjectAnalyzer::new(config, default_extractors(), default_annotators());

    // Ctrl-C cancels at the next suspension point.
    let token = analyzer.cancellation_token();
    tokio::spawn(cancel_on_ctrl_c(token));

    let outcome = analyzer.analyze(path).await?;
    let structure = match outcome {
        AnalysisOutcome::Completed(structure) => structure,
        AnalysisOutcome::Cancelled => {
            eprintln!("analysis cancelled");
            return Ok(130);
        }
    };

    let rendered = match format {
        OutputFormat::Text => text::format_structure(&structure),
        OutputFormat::Json => json::format_structure(&structure, compact),
        OutputFormat::Html => html::format_structure(&structure),
    };

    match output {
        Some(target) => {
            std::fs::write(target, rendered)
                .with_context(|| format!("failed to write {}", target.display()))?;
        }
        None => println!("{rendered}"),
    }

    Ok(0)
}

async fn cancel_on_ctrl_c(token: CancellationToken) {
    if tokio::signal::ctrl_c().await.is_ok() {
        token.cancel();
    }
}

fn cmd_init(force: bool) -> Result<i32> {
    let target = PathBuf::from(".strata.toml");
    if target.exists() && !force {
        anyhow::bail!(".strata.toml already exists (use --force to overwrite)");
    }
    std::fs::write(&target, Config::default_toml()).context("failed to write .strata.toml")?;
    println!("Created .strata.toml");
    Ok(0)
}
