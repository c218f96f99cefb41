//! Recommend a difficulty for a single proficiency level

use anyhow::{Context, Result};
use clap::Args;

use crate::config::Config;

#[derive(Args, Debug)]
pub struct RecommendArgs {
    /// Proficiency level (state index), e.g. 0 = Beginner
    #[arg(allow_negative_numbers = true)]
    pub state: i64,

    /// Number of simulated episodes to train first (defaults to learner.episodes)
    #[arg(short, long)]
    pub episodes: Option<u64>,

    /// RNG seed for a reproducible run (defaults to learner.seed)
    #[arg(short, long)]
    pub seed: Option<u64>,
}

pub fn run(args: RecommendArgs, config: &Config) -> Result<()> {
    let episodes = args.episodes.unwrap_or(config.learner.episodes);
    let mut learner = super::build_learner(config, args.seed)?;

    learner.train(episodes).context("Training failed")?;
    let action = learner
        .recommend(args.state)
        .with_context(|| format!("Cannot recommend for state {}", args.state))?;

    let state = usize::try_from(args.state)?;
    println!(
        "For a '{}' learner, the agent recommends a '{}' question.",
        config.scenario.state_label(state),
        config.scenario.action_label(action)
    );

    Ok(())
}
