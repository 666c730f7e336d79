//! # mseq-cli
//!
//! Command-line interface for motion sequences.
//!
//! - `mseq run` — run the configured sequence against the simulated robot
//! - `mseq show` — list the expanded steps of the configured sequence
//! - `mseq default-config` — print the built-in gripper demo as TOML

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Plan and execute gripper/arm motion sequences.
#[derive(Parser)]
#[command(name = "mseq", version, about)]
struct Cli {
    /// Sequence config file (defaults to ./mseq.toml, or the built-in demo if absent).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log planning and execution details.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the sequence against the simulated robot.
    Run(commands::run::RunArgs),
    /// Show the expanded step list.
    Show,
    /// Print the built-in gripper demo configuration.
    DefaultConfig,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    // Logs go to stderr so step summaries on stdout stay clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("mseq={}", level).parse()?)
                .add_directive(format!("mseq_orchestrator={}", level).parse()?)
                .add_directive(format!("mseq_sim={}", level).parse()?)
                .add_directive(format!("mseq_config={}", level).parse()?),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config_path = cli.config.as_deref();

    match &cli.command {
        Commands::Run(args) => commands::run::execute(args, config_path),
        Commands::Show => commands::show::execute(config_path),
        Commands::DefaultConfig => commands::default_config::execute(),
    }
}
