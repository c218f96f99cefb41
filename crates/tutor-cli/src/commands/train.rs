//! Train the policy learner on the configured scenario

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use tutor_core::Scenario;
use tutor_rl::{LearnerStats, PolicyLearner, QTableSnapshot, TrainingReport};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Number of simulated episodes (defaults to learner.episodes)
    #[arg(short, long)]
    pub episodes: Option<u64>,

    /// RNG seed for a reproducible run (defaults to learner.seed)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Print a JSON document instead of the text report
    #[arg(long)]
    pub json: bool,
}

/// Recommended action for one state, with presentation labels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub state: usize,
    pub state_label: String,
    pub action: usize,
    pub action_label: String,
}

#[derive(Debug, Serialize)]
struct TrainOutput {
    initial_q_table: QTableSnapshot,
    final_q_table: QTableSnapshot,
    recommendations: Vec<Recommendation>,
    report: TrainingReport,
    stats: LearnerStats,
}

/// Greedy recommendation for every state of the scenario
pub fn recommendations(learner: &PolicyLearner, scenario: &Scenario) -> Result<Vec<Recommendation>> {
    (0..learner.num_states())
        .map(|state| -> Result<Recommendation> {
            let action = learner.recommend(state)?;
            Ok(Recommendation {
                state,
                state_label: scenario.state_label(state),
                action,
                action_label: scenario.action_label(action),
            })
        })
        .collect()
}

pub fn run(args: TrainArgs, config: &Config) -> Result<()> {
    let episodes = args.episodes.unwrap_or(config.learner.episodes);
    let mut learner = super::build_learner(config, args.seed)?;

    let initial_q_table = learner.q_table();
    let report = learner.train(episodes).context("Training failed")?;
    let recommendations = recommendations(&learner, &config.scenario)?;

    if args.json {
        let output = TrainOutput {
            initial_q_table,
            final_q_table: learner.q_table(),
            recommendations,
            report,
            stats: learner.stats(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Q-Learning Difficulty Selection");
    println!("===============================\n");
    println!("Initial Q-Table (all zeros):");
    print!("{initial_q_table}");
    println!("{}", "-".repeat(30));

    println!("Training finished ({episodes} episodes).");
    println!("Final Q-Table:");
    print!("{}", learner.q_table());
    println!("{}", "-".repeat(30));

    println!("Recommendations:");
    for rec in &recommendations {
        println!(
            "  - For a '{}' learner, the agent recommends a '{}' question.",
            rec.state_label, rec.action_label
        );
    }
    println!("{}", "-".repeat(30));

    println!("Mean reward:         {:.3}", report.mean_reward);
    println!("Mean |TD error|:     {:.4}", report.mean_abs_td_error);
    println!("Advancements:        {}", report.advancements);
    println!("Exploratory actions: {}", report.exploratory_actions);
    println!("Duration:            {} ms", report.duration_ms());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::build_learner;

    #[test]
    fn test_recommendations_after_training() {
        let config = Config::default();
        let mut learner = build_learner(&config, Some(2024)).unwrap();
        learner.train(1000).unwrap();

        let recs = recommendations(&learner, &config.scenario).unwrap();
        let labels: Vec<(&str, &str)> = recs
            .iter()
            .map(|r| (r.state_label.as_str(), r.action_label.as_str()))
            .collect();

        assert_eq!(
            labels,
            vec![
                ("Beginner", "Easy"),
                ("Intermediate", "Medium"),
                ("Advanced", "Hard"),
            ]
        );
    }

    #[test]
    fn test_recommendations_untrained() {
        let config = Config::default();
        let learner = build_learner(&config, Some(1)).unwrap();

        let recs = recommendations(&learner, &config.scenario).unwrap();
        assert!(recs.iter().all(|r| r.action == 0));
    }

    #[test]
    fn test_train_output_serializes() {
        let config = Config::default();
        let mut learner = build_learner(&config, Some(3)).unwrap();
        let initial_q_table = learner.q_table();
        let report = learner.train(10).unwrap();

        let output = TrainOutput {
            initial_q_table,
            final_q_table: learner.q_table(),
            recommendations: recommendations(&learner, &config.scenario).unwrap(),
            report,
            stats: learner.stats(),
        };
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["report"]["episodes"], 10);
        assert_eq!(json["initial_q_table"]["num_states"], 3);
        assert_eq!(json["recommendations"].as_array().map(Vec::len), Some(3));
    }
}
