//! Tutor CLI - Train and query the adaptive difficulty policy
//!
//! Runs the Q-learning difficulty-selection scenario from the command line
//! and prints the learned value table and recommendations.

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::float_cmp)]

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;

use commands::{config as config_cmd, recommend, train};
use crate::config::{Config, LoggingConfig};

#[derive(Parser)]
#[command(name = "tutor")]
#[command(author, version, about = "Adaptive tutor - Q-learning difficulty selection", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a configuration file (defaults to TUTOR_CONFIG, ./tutor.toml, ~/.config/tutor/tutor.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Train on the configured scenario and print the learned policy
    Train(train::TrainArgs),

    /// Train, then recommend a difficulty for one proficiency level
    Recommend(recommend::RecommendArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(config_cmd::ConfigCommands),
}

fn init_logging(logging: &LoggingConfig, verbose: bool) {
    // RUST_LOG wins, then --verbose, then the configured level
    let level = if verbose { "debug" } else { logging.level.as_str() };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("tutor_cli={level},tutor_rl={level}").into());

    let registry = tracing_subscriber::registry().with(filter);
    if logging.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    init_logging(&config.logging, cli.verbose);

    match &config.source {
        Some(path) => tracing::debug!("Loaded config from: {}", path.display()),
        None => tracing::debug!("No config file found, using defaults"),
    }

    match cli.command {
        Commands::Train(args) => train::run(args, &config),
        Commands::Recommend(args) => recommend::run(args, &config),
        Commands::Config(cmd) => config_cmd::run(cmd, &config),
    }
}
