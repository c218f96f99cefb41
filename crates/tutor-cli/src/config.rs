//! Configuration loading for the tutor CLI

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};

use tutor_core::Scenario;
use tutor_rl::{Exploration, LearnerParams};

/// Name of the configuration file looked up in the working and config directories
pub const CONFIG_FILE_NAME: &str = "tutor.toml";

/// Configuration for the tutor CLI
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub learner: LearnerConfig,
    pub logging: LoggingConfig,
    pub scenario: Scenario,
    /// File the configuration was read from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearnerConfig {
    pub learning_rate: f64,
    pub discount_factor: f64,
    pub episodes: u64,
    /// Fixed RNG seed; drawn from OS entropy when unset
    pub seed: Option<u64>,
    /// Number of recent episodes kept for inspection (0 = none)
    pub history_capacity: usize,
    pub exploration: Exploration,
}

impl Default for LearnerConfig {
    fn default() -> Self {
        let params = LearnerParams::default();
        Self {
            learning_rate: params.learning_rate,
            discount_factor: params.discount_factor,
            episodes: 1000,
            seed: None,
            history_capacity: 0,
            exploration: params.exploration,
        }
    }
}

impl LearnerConfig {
    pub fn params(&self) -> LearnerParams {
        LearnerParams::new(self.learning_rate, self.discount_factor)
            .with_exploration(self.exploration)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl Config {
    /// Load configuration from file and environment.
    ///
    /// An explicit `path` must exist; otherwise the standard locations are
    /// searched and defaults are used when none is found.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file not found: {}", path.display());
                }
                Some(path.to_path_buf())
            }
            None => Self::find_config_file(),
        };

        let mut builder = ConfigBuilder::<config::builder::DefaultState>::default();

        if let Some(path) = &config_path {
            builder = builder.add_source(File::from(path.clone()).required(false));
        }

        // Environment variables: TUTOR__LEARNER__EPISODES=500 etc.
        builder = builder.add_source(
            Environment::with_prefix("TUTOR")
                .separator("__")
                .try_parsing(true),
        );

        let mut config: Self = builder
            .build()?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        config.source = config_path;

        config.validate()?;
        Ok(config)
    }

    /// Check the scenario and learner parameters before anything is built
    pub fn validate(&self) -> Result<()> {
        self.scenario
            .validate()
            .context("Invalid scenario configuration")?;
        self.learner
            .params()
            .validate()
            .context("Invalid learner configuration")?;
        Ok(())
    }

    /// Serialize as TOML, the format `config init` writes
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    /// Find the configuration file
    pub fn find_config_file() -> Option<PathBuf> {
        // Check in order: TUTOR_CONFIG env, ./tutor.toml, ~/.config/tutor/tutor.toml
        if let Ok(path) = std::env::var("TUTOR_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            return Some(local);
        }

        dirs::config_dir()
            .map(|dir| dir.join("tutor").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }
}

/// Serializes tests that load configuration, since `TUTOR__*` variables are process-wide
#[cfg(test)]
pub(crate) fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
