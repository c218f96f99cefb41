//! CLI command modules

pub mod config;
pub mod recommend;
pub mod train;

use anyhow::{Context, Result};

use tutor_rl::{PolicyLearner, RewardTable};

use crate::config::Config;

/// Build a learner for the configured scenario.
///
/// `seed` overrides the configured seed; with neither, the RNG is seeded
/// from OS entropy.
pub fn build_learner(config: &Config, seed: Option<u64>) -> Result<PolicyLearner> {
    let scenario = &config.scenario;
    let rewards = RewardTable::new(
        scenario.num_states(),
        scenario.num_actions(),
        scenario.rewards.clone(),
    )
    .context("Invalid reward table")?;

    let learner = PolicyLearner::new(rewards, config.learner.params())
        .context("Failed to create policy learner")?
        .with_history(config.learner.history_capacity);

    Ok(match seed.or(config.learner.seed) {
        Some(seed) => learner.with_seed(seed),
        None => learner,
    })
}
