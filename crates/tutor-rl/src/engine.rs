//! Policy learner - runs simulated episodes and answers policy queries

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info, trace};

use tutor_core::{Result, TutorError};

use crate::algorithm::{Exploration, LearnerParams, QLearning};
use crate::experience::{Experience, ExperienceBuffer};
use crate::state::{QTableSnapshot, RewardTable};
use crate::transition::{AdvanceOnPositiveReward, TransitionModel};

/// Learns which action (difficulty) to take in each state (proficiency)
/// from simulated episodes, and recommends the greedy action afterwards.
///
/// Training is sequential and cumulative: every `train` call continues
/// refining the same value table.
pub struct PolicyLearner<R: Rng = StdRng> {
    rewards: RewardTable,
    algorithm: QLearning,
    params: LearnerParams,
    epsilon: Option<f64>,
    transition: Box<dyn TransitionModel>,
    rng: R,
    history: ExperienceBuffer,
    total_episodes: u64,
    total_rewards: f64,
    advancements: u64,
    exploratory_actions: u64,
}

impl PolicyLearner<StdRng> {
    /// Create a learner with a zeroed value table and an entropy-seeded RNG
    pub fn new(rewards: RewardTable, params: LearnerParams) -> Result<Self> {
        Self::with_parts(rewards, params, StdRng::from_entropy())
    }

    /// Replace the random source with one seeded from `seed`
    pub fn with_seed(self, seed: u64) -> Self {
        self.with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> PolicyLearner<R> {
    /// Create a learner drawing from the given random source
    pub fn with_parts(rewards: RewardTable, params: LearnerParams, rng: R) -> Result<Self> {
        let algorithm = QLearning::new(rewards.num_states(), rewards.num_actions(), &params)?;
        let epsilon = match params.exploration {
            Exploration::Greedy => None,
            Exploration::EpsilonGreedy { epsilon, .. } => Some(epsilon),
        };

        debug!(
            "Policy learner created: {}x{} table, alpha={}, gamma={}, exploration={:?}",
            rewards.num_states(),
            rewards.num_actions(),
            params.learning_rate,
            params.discount_factor,
            params.exploration
        );

        Ok(Self {
            rewards,
            algorithm,
            params,
            epsilon,
            transition: Box::new(AdvanceOnPositiveReward),
            rng,
            history: ExperienceBuffer::default(),
            total_episodes: 0,
            total_rewards: 0.0,
            advancements: 0,
            exploratory_actions: 0,
        })
    }

    /// Swap the random source, keeping everything learned so far
    pub fn with_rng<R2: Rng>(self, rng: R2) -> PolicyLearner<R2> {
        PolicyLearner {
            rewards: self.rewards,
            algorithm: self.algorithm,
            params: self.params,
            epsilon: self.epsilon,
            transition: self.transition,
            rng,
            history: self.history,
            total_episodes: self.total_episodes,
            total_rewards: self.total_rewards,
            advancements: self.advancements,
            exploratory_actions: self.exploratory_actions,
        }
    }

    /// Use a custom environment transition model
    pub fn with_transition(mut self, transition: impl TransitionModel + 'static) -> Self {
        self.transition = Box::new(transition);
        self
    }

    /// Keep the last `capacity` episodes for inspection
    pub fn with_history(mut self, capacity: usize) -> Self {
        self.history = ExperienceBuffer::new(capacity);
        self
    }

    pub fn num_states(&self) -> usize {
        self.rewards.num_states()
    }

    pub fn num_actions(&self) -> usize {
        self.rewards.num_actions()
    }

    pub fn rewards(&self) -> &RewardTable {
        &self.rewards
    }

    /// Run `episodes` simulated episodes, updating the value table in place
    pub fn train(&mut self, episodes: u64) -> Result<TrainingReport> {
        let started_at = Utc::now();
        let mut total_reward = 0.0;
        let mut total_abs_td = 0.0;
        let mut advancements = 0;
        let mut explored = 0;

        for _ in 0..episodes {
            let experience = self.run_episode()?;

            total_reward += experience.reward;
            total_abs_td += experience.td_error.abs();
            if experience.advanced() {
                advancements += 1;
            }
            if experience.explored {
                explored += 1;
            }
        }

        let report = TrainingReport {
            episodes,
            total_reward,
            mean_reward: if episodes > 0 {
                total_reward / episodes as f64
            } else {
                0.0
            },
            mean_abs_td_error: if episodes > 0 {
                total_abs_td / episodes as f64
            } else {
                0.0
            },
            advancements,
            exploratory_actions: explored,
            started_at,
            finished_at: Utc::now(),
        };

        info!(
            "Training complete: {} episodes, mean reward {:.3}, mean |td| {:.4}, policy {:?}",
            report.episodes,
            report.mean_reward,
            report.mean_abs_td_error,
            self.policy()
        );

        Ok(report)
    }

    /// One episode: draw a start state, act, observe, transition, update
    fn run_episode(&mut self) -> Result<Experience> {
        let num_states = self.num_states();
        let state = self.rng.gen_range(0..num_states);

        let (action, explored) = self.select_action(state)?;
        let reward = self.rewards.get(state, action)?;

        let next_state = self
            .transition
            .next_state(state, action, reward, num_states);
        if next_state >= num_states {
            return Err(TutorError::InvalidState(format!(
                "transition from state {state} with action {action} led to state {next_state}, \
                 outside [0, {num_states})"
            )));
        }

        let td_error = self.algorithm.update(state, action, reward, next_state)?;
        self.decay_epsilon();

        let experience = Experience {
            state,
            action,
            reward,
            next_state,
            td_error,
            explored,
        };
        trace!(?experience, "episode {}", self.total_episodes);

        self.total_episodes += 1;
        self.total_rewards += reward;
        if experience.advanced() {
            self.advancements += 1;
        }
        if explored {
            self.exploratory_actions += 1;
        }
        self.history.push(experience);

        Ok(experience)
    }

    fn select_action(&mut self, state: usize) -> Result<(usize, bool)> {
        if let Some(epsilon) = self.epsilon {
            if self.rng.gen::<f64>() < epsilon {
                let num_actions = self.num_actions();
                return Ok((self.rng.gen_range(0..num_actions), true));
            }
        }
        Ok((self.algorithm.best_action(state)?, false))
    }

    fn decay_epsilon(&mut self) {
        if let (
            Some(epsilon),
            Exploration::EpsilonGreedy {
                decay, min_epsilon, ..
            },
        ) = (self.epsilon, self.params.exploration)
        {
            self.epsilon = Some((epsilon * decay).max(min_epsilon));
        }
    }

    /// Greedy action for `state`, lowest index on ties.
    ///
    /// Accepts any integer type so that negative input is reported as
    /// `InvalidState` rather than failing to convert at the call site.
    pub fn recommend<S>(&self, state: S) -> Result<usize>
    where
        S: TryInto<usize> + Copy + std::fmt::Display,
    {
        let num_states = self.num_states();
        let index = state
            .try_into()
            .ok()
            .filter(|&s| s < num_states)
            .ok_or_else(|| TutorError::out_of_range("state", state, num_states))?;

        self.algorithm.best_action(index)
    }

    /// Greedy action for every state, in state order
    pub fn policy(&self) -> Vec<usize> {
        (0..self.num_states())
            .map(|s| self.algorithm.best_action(s).unwrap_or(0))
            .collect()
    }

    /// Action values for one state
    pub fn q_values(&self, state: usize) -> Result<&[f64]> {
        self.algorithm.table().row(state)
    }

    /// Read-only copy of the value table
    pub fn q_table(&self) -> QTableSnapshot {
        QTableSnapshot::from(self.algorithm.table())
    }

    /// Most recent episodes, if history was enabled
    pub fn history(&self) -> &ExperienceBuffer {
        &self.history
    }

    /// Current exploration rate, `None` when acting greedily
    pub fn current_epsilon(&self) -> Option<f64> {
        self.epsilon
    }

    /// Get statistics
    pub fn stats(&self) -> LearnerStats {
        LearnerStats {
            total_episodes: self.total_episodes,
            total_rewards: self.total_rewards,
            average_reward: if self.total_episodes > 0 {
                self.total_rewards / self.total_episodes as f64
            } else {
                0.0
            },
            advancements: self.advancements,
            exploratory_actions: self.exploratory_actions,
            history_size: self.history.len(),
        }
    }

    /// Get learner parameters as JSON
    pub fn get_params(&self) -> serde_json::Value {
        let mut params = self.algorithm.get_params();
        params["exploration"] =
            serde_json::to_value(self.params.exploration).unwrap_or(serde_json::Value::Null);
        params["current_epsilon"] = serde_json::json!(self.epsilon);
        params
    }
}

/// Summary of a single `train` call
#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub episodes: u64,
    pub total_reward: f64,
    pub mean_reward: f64,
    pub mean_abs_td_error: f64,
    pub advancements: u64,
    pub exploratory_actions: u64,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl TrainingReport {
    pub fn duration_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }
}

/// Learner statistics since construction
#[derive(Debug, Clone, Serialize)]
pub struct LearnerStats {
    pub total_episodes: u64,
    pub total_rewards: f64,
    pub average_reward: f64,
    pub advancements: u64,
    pub exploratory_actions: u64,
    pub history_size: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Reward;

    fn diagonal_rewards() -> RewardTable {
        RewardTable::new(
            3,
            3,
            vec![
                vec![10.0, -5.0, -5.0],
                vec![-5.0, 10.0, -5.0],
                vec![-5.0, -5.0, 10.0],
            ],
        )
        .unwrap()
    }

    fn learner(seed: u64) -> PolicyLearner {
        PolicyLearner::new(diagonal_rewards(), LearnerParams::new(0.8, 0.95))
            .unwrap()
            .with_seed(seed)
    }

    #[test]
    fn test_learner_creation() {
        let learner = learner(1);
        assert_eq!(learner.num_states(), 3);
        assert_eq!(learner.num_actions(), 3);
        assert_eq!(learner.stats().total_episodes, 0);
        assert!(learner.current_epsilon().is_none());
    }

    #[test]
    fn test_invalid_params_rejected() {
        let result = PolicyLearner::new(diagonal_rewards(), LearnerParams::new(0.0, 0.95));
        assert!(matches!(result, Err(TutorError::InvalidConfiguration(_))));

        let result = PolicyLearner::new(diagonal_rewards(), LearnerParams::new(0.5, 1.5));
        assert!(matches!(result, Err(TutorError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_untrained_recommends_first_action() {
        let learner = learner(2);
        for state in 0..3 {
            assert_eq!(learner.recommend(state).unwrap(), 0);
        }
    }

    #[test]
    fn test_recommend_rejects_out_of_range() {
        let learner = learner(3);
        assert!(matches!(learner.recommend(3), Err(TutorError::InvalidState(_))));
        assert!(matches!(learner.recommend(-1), Err(TutorError::InvalidState(_))));
        assert!(matches!(
            learner.recommend(usize::MAX),
            Err(TutorError::InvalidState(_))
        ));
    }

    #[test]
    fn test_train_zero_is_identity() {
        let mut learner = learner(4);
        let report = learner.train(0).unwrap();

        assert_eq!(report.episodes, 0);
        assert_eq!(report.mean_reward, 0.0);
        assert!(learner.q_table().values.iter().flatten().all(|&v| v == 0.0));
    }

    #[test]
    fn test_train_updates_stats_and_history() {
        let mut learner = learner(5).with_history(10);
        let report = learner.train(25).unwrap();

        assert_eq!(report.episodes, 25);
        let stats = learner.stats();
        assert_eq!(stats.total_episodes, 25);
        assert_eq!(stats.history_size, 10);
        assert_eq!(stats.exploratory_actions, 0);
        assert!((stats.total_rewards - report.total_reward).abs() < 1e-9);
        assert_eq!(stats.advancements, report.advancements);
    }

    #[test]
    fn test_single_episode_unit_alpha_replaces_value() {
        let mut learner = PolicyLearner::new(diagonal_rewards(), LearnerParams::new(1.0, 0.95))
            .unwrap()
            .with_seed(6)
            .with_history(1);
        learner.train(1).unwrap();

        let exp = *learner.history().last().unwrap();
        // Untrained table: greedy action is 0 and every future value is 0
        assert_eq!(exp.action, 0);
        assert_eq!(learner.q_values(exp.state).unwrap()[0], exp.reward);
    }

    #[test]
    fn test_failing_transition_is_reported() {
        let mut learner = learner(7).with_transition(|_s: usize, _a: usize, _r: Reward| -> usize { 99 });
        let result = learner.train(1);

        assert!(matches!(result, Err(TutorError::InvalidState(_))));
        assert!(learner.q_table().values.iter().flatten().all(|&v| v == 0.0));
        assert_eq!(learner.stats().total_episodes, 0);
    }

    #[test]
    fn test_epsilon_decays_to_floor() {
        let params = LearnerParams::new(0.8, 0.95).with_exploration(Exploration::EpsilonGreedy {
            epsilon: 0.5,
            decay: 0.5,
            min_epsilon: 0.1,
        });
        let mut learner = PolicyLearner::new(diagonal_rewards(), params)
            .unwrap()
            .with_seed(8);

        learner.train(1).unwrap();
        assert_eq!(learner.current_epsilon(), Some(0.25));

        learner.train(10).unwrap();
        assert_eq!(learner.current_epsilon(), Some(0.1));
    }

    #[test]
    fn test_full_exploration_marks_every_episode() {
        let params = LearnerParams::new(0.8, 0.95).with_exploration(Exploration::EpsilonGreedy {
            epsilon: 1.0,
            decay: 1.0,
            min_epsilon: 1.0,
        });
        let mut learner = PolicyLearner::new(diagonal_rewards(), params)
            .unwrap()
            .with_seed(9);

        let report = learner.train(50).unwrap();
        assert_eq!(report.exploratory_actions, 50);
    }

    #[test]
    fn test_get_params() {
        let learner = learner(10);
        let params = learner.get_params();
        assert_eq!(params["learning_rate"], 0.8);
        assert_eq!(params["exploration"]["strategy"], "greedy");
        assert!(params["current_epsilon"].is_null());
    }
}
