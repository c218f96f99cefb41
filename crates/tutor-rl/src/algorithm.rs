//! Tabular Q-learning: hyperparameters, exploration and the update rule

use serde::{Deserialize, Serialize};

use tutor_core::{Result, TutorError};

use crate::state::{Reward, ValueTable};

/// Action selection strategy used while training
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum Exploration {
    /// Always exploit the current value estimate (no exploration)
    #[default]
    Greedy,

    /// Random action with probability `epsilon`, decayed after every episode
    EpsilonGreedy {
        epsilon: f64,
        decay: f64,
        min_epsilon: f64,
    },
}

impl Exploration {
    /// Epsilon-greedy with the usual slow decay toward 0.01
    pub fn epsilon_greedy(epsilon: f64) -> Self {
        Exploration::EpsilonGreedy {
            epsilon,
            decay: 0.999,
            min_epsilon: 0.01,
        }
    }

    fn validate(&self) -> Result<()> {
        if let Exploration::EpsilonGreedy {
            epsilon,
            decay,
            min_epsilon,
        } = *self
        {
            if !(0.0..=1.0).contains(&epsilon) {
                return Err(TutorError::InvalidConfiguration(format!(
                    "epsilon {epsilon} outside [0, 1]"
                )));
            }
            if !(0.0..=1.0).contains(&min_epsilon) {
                return Err(TutorError::InvalidConfiguration(format!(
                    "min_epsilon {min_epsilon} outside [0, 1]"
                )));
            }
            if !(decay > 0.0 && decay <= 1.0) {
                return Err(TutorError::InvalidConfiguration(format!(
                    "epsilon decay {decay} outside (0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Hyperparameters, fixed once a learner is built
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearnerParams {
    /// Alpha, in (0, 1]
    pub learning_rate: f64,
    /// Gamma, in [0, 1]
    pub discount_factor: f64,
    pub exploration: Exploration,
}

impl LearnerParams {
    pub fn new(learning_rate: f64, discount_factor: f64) -> Self {
        Self {
            learning_rate,
            discount_factor,
            exploration: Exploration::Greedy,
        }
    }

    pub fn with_exploration(mut self, exploration: Exploration) -> Self {
        self.exploration = exploration;
        self
    }

    pub fn validate(&self) -> Result<()> {
        // Written so NaN fails both checks
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(TutorError::InvalidConfiguration(format!(
                "learning rate {} outside (0, 1]",
                self.learning_rate
            )));
        }
        if !(self.discount_factor >= 0.0 && self.discount_factor <= 1.0) {
            return Err(TutorError::InvalidConfiguration(format!(
                "discount factor {} outside [0, 1]",
                self.discount_factor
            )));
        }
        self.exploration.validate()
    }
}

impl Default for LearnerParams {
    fn default() -> Self {
        Self::new(0.8, 0.95)
    }
}

/// Q-Learning implementation (tabular, dense)
#[derive(Debug, Clone)]
pub struct QLearning {
    q_table: ValueTable,
    learning_rate: f64,
    discount_factor: f64,
}

impl QLearning {
    pub fn new(num_states: usize, num_actions: usize, params: &LearnerParams) -> Result<Self> {
        if num_states == 0 || num_actions == 0 {
            return Err(TutorError::InvalidConfiguration(format!(
                "value table dimensions must be positive, got {num_states}x{num_actions}"
            )));
        }
        params.validate()?;

        Ok(Self {
            q_table: ValueTable::zeros(num_states, num_actions),
            learning_rate: params.learning_rate,
            discount_factor: params.discount_factor,
        })
    }

    pub fn table(&self) -> &ValueTable {
        &self.q_table
    }

    /// Greedy action for a state, lowest index on ties
    pub fn best_action(&self, state: usize) -> Result<usize> {
        self.q_table.best_action(state)
    }

    /// Apply one temporal-difference update in place and return the TD error.
    ///
    /// `Q[s][a] += alpha * (r + gamma * max Q[s'] - Q[s][a])`, with the
    /// pre-update `Q[s][a]` on the right-hand side.
    pub fn update(
        &mut self,
        state: usize,
        action: usize,
        reward: Reward,
        next_state: usize,
    ) -> Result<f64> {
        let current_q = self.q_table.get(state, action)?;
        let max_next_q = self.q_table.max_value(next_state)?;

        let target = reward + self.discount_factor * max_next_q;
        let td_error = target - current_q;
        self.q_table
            .set(state, action, current_q + self.learning_rate * td_error)?;

        Ok(td_error)
    }

    /// Algorithm parameters as JSON
    pub fn get_params(&self) -> serde_json::Value {
        serde_json::json!({
            "algorithm": "q_learning",
            "learning_rate": self.learning_rate,
            "discount_factor": self.discount_factor,
            "num_states": self.q_table.num_states(),
            "num_actions": self.q_table.num_actions(),
        })
    }
}
