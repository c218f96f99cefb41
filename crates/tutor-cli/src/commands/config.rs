//! Configuration management commands

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Subcommand;

use crate::config::{Config, CONFIG_FILE_NAME};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration (file + environment + defaults)
    Show,
    /// Initialize a configuration file with default values
    Init {
        /// Where to write the file
        #[arg(short, long, default_value = CONFIG_FILE_NAME)]
        output: PathBuf,

        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

pub fn run(cmd: ConfigCommands, config: &Config) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show(config),
        ConfigCommands::Init { output, force } => init(&output, force).map(|_| ()),
    }
}

fn show(config: &Config) -> Result<()> {
    println!("Current Configuration");
    println!("=====================\n");

    match &config.source {
        Some(path) => println!("# Config file: {}\n", path.display()),
        None => println!("# No configuration file found. Using defaults.\n"),
    }
    println!("{}", config.to_toml()?);

    Ok(())
}

/// Write the default configuration; returns whether a file was written
fn init(path: &Path, force: bool) -> Result<bool> {
    if path.exists() && !force {
        println!("Configuration file already exists: {}", path.display());
        println!("Use --force to overwrite");
        return Ok(false);
    }

    std::fs::write(path, Config::default().to_toml()?)?;
    println!("Configuration file created: {}", path.display());

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_loadable_defaults() {
        let _guard = crate::config::env_lock();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        assert!(init(&path, false).unwrap());
        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.learner, Config::default().learner);
        assert_eq!(loaded.scenario, Config::default().scenario);
    }

    #[test]
    fn test_init_respects_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[learner]\nepisodes = 5\n").unwrap();

        assert!(!init(&path, false).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[learner]\nepisodes = 5\n");

        assert!(init(&path, true).unwrap());
        assert_ne!(std::fs::read_to_string(&path).unwrap(), "[learner]\nepisodes = 5\n");
    }
}
