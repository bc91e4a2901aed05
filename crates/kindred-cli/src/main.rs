//! Kindred CLI - Build and analyse family trees from a plain-text notation

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;
mod report;

use commands::{build, check, completions, export, stats, svg};
use config::{config_file_path, Config};
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "kindred")]
#[command(author, version, about = "Family tree builder and analyser")]
pub struct Cli {
    /// Config file (default: <config dir>/kindred/config.toml)
    #[arg(long, global = true, env = "KINDRED_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format: text, json
    #[arg(short, long, default_value = "text", global = true)]
    pub format: String,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(config_file_path)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse, analyse and render the family tree
    Build(build::BuildArgs),
    /// Validate the source and report data-quality issues
    Check(check::CheckArgs),
    /// Print the analytics report
    Stats(stats::StatsArgs),
    /// Export the graph as DOT, scene JSON, notation or SVG
    Export(export::ExportArgs),
    /// Repair the viewBox of a rendered SVG file
    FixSvg(svg::FixSvgArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
    /// Manage configuration
    Config(commands::config::ConfigArgs),
}

/// Application context shared by the commands
pub struct AppContext {
    pub config: Config,
    pub format: OutputFormat,
}

impl AppContext {
    pub fn new(cli: &Cli) -> anyhow::Result<Self> {
        let path = cli.config_path();
        tracing::debug!("Using config at: {:?}", path);

        Ok(Self {
            config: Config::load(&path)?,
            format: OutputFormat::from(cli.format.as_str()),
        })
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting kindred CLI");

    // Commands that must work even with a broken config file
    match &cli.command {
        Commands::Completions(args) => return completions::run(args),
        Commands::Config(args) => return commands::config::run(args, &cli.config_path()),
        Commands::FixSvg(args) => return svg::run(args),
        _ => {}
    }

    let ctx = AppContext::new(&cli)?;

    match &cli.command {
        Commands::Build(args) => build::run(args, &ctx)?,
        Commands::Check(args) => check::run(args, &ctx)?,
        Commands::Stats(args) => stats::run(args, &ctx)?,
        Commands::Export(args) => export::run(args, &ctx)?,
        Commands::FixSvg(_) | Commands::Completions(_) | Commands::Config(_) => {}
    }

    Ok(())
}
