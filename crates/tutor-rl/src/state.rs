//! Reward and value tables over (state, action) pairs

use serde::{Deserialize, Serialize};

use tutor_core::{Result, TutorError};

/// Reward value from environment
pub type Reward = f64;

/// Index of the greatest value, lowest index on ties.
///
/// A strict `>` left-to-right scan keeps the first maximum.
pub(crate) fn argmax(values: &[f64]) -> usize {
    let mut best_idx = 0;
    let mut best = f64::NEG_INFINITY;
    for (idx, &value) in values.iter().enumerate() {
        if value > best {
            best = value;
            best_idx = idx;
        }
    }
    best_idx
}

fn max_value(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

/// Immutable immediate-reward lookup, dense `num_states x num_actions`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RewardTable {
    num_states: usize,
    num_actions: usize,
    rewards: Vec<Reward>,
}

impl RewardTable {
    /// Build a reward table, checking `rows` has exactly the given shape
    pub fn new(num_states: usize, num_actions: usize, rows: Vec<Vec<Reward>>) -> Result<Self> {
        if num_states == 0 {
            return Err(TutorError::InvalidConfiguration(
                "number of states must be positive".into(),
            ));
        }
        if num_actions == 0 {
            return Err(TutorError::InvalidConfiguration(
                "number of actions must be positive".into(),
            ));
        }
        if rows.len() != num_states {
            return Err(TutorError::InvalidConfiguration(format!(
                "reward table has {} rows, expected {num_states}",
                rows.len()
            )));
        }

        let mut rewards = Vec::with_capacity(num_states * num_actions);
        for (state, row) in rows.into_iter().enumerate() {
            if row.len() != num_actions {
                return Err(TutorError::InvalidConfiguration(format!(
                    "reward table row {state} has {} columns, expected {num_actions}",
                    row.len()
                )));
            }
            if let Some(action) = row.iter().position(|r| !r.is_finite()) {
                return Err(TutorError::InvalidConfiguration(format!(
                    "reward for state {state}, action {action} is not finite"
                )));
            }
            rewards.extend(row);
        }

        Ok(Self {
            num_states,
            num_actions,
            rewards,
        })
    }

    /// Build from rows, taking the shape from the first row
    pub fn from_rows(rows: Vec<Vec<Reward>>) -> Result<Self> {
        let num_states = rows.len();
        let num_actions = rows.first().map_or(0, Vec::len);
        Self::new(num_states, num_actions, rows)
    }

    pub fn num_states(&self) -> usize {
        self.num_states
    }

    pub fn num_actions(&self) -> usize {
        self.num_actions
    }

    /// Immediate reward for taking `action` in `state`
    pub fn get(&self, state: usize, action: usize) -> Result<Reward> {
        if state >= self.num_states {
            return Err(TutorError::out_of_range("state", state, self.num_states));
        }
        if action >= self.num_actions {
            return Err(TutorError::out_of_range("action", action, self.num_actions));
        }
        Ok(self.rewards[state * self.num_actions + action])
    }
}

/// Learned value estimates, dense `num_states x num_actions`, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct ValueTable {
    num_states: usize,
    num_actions: usize,
    values: Vec<f64>,
}

impl ValueTable {
    /// Zero-initialized table
    pub(crate) fn zeros(num_states: usize, num_actions: usize) -> Self {
        Self {
            num_states,
            num_actions,
            values: vec![0.0; num_states * num_actions],
        }
    }

    pub fn num_states(&self) -> usize {
        self.num_states
    }

    pub fn num_actions(&self) -> usize {
        self.num_actions
    }

    /// All action values for a state
    pub fn row(&self, state: usize) -> Result<&[f64]> {
        if state >= self.num_states {
            return Err(TutorError::out_of_range("state", state, self.num_states));
        }
        let start = state * self.num_actions;
        Ok(&self.values[start..start + self.num_actions])
    }

    pub fn get(&self, state: usize, action: usize) -> Result<f64> {
        let row = self.row(state)?;
        row.get(action)
            .copied()
            .ok_or_else(|| TutorError::out_of_range("action", action, self.num_actions))
    }

    pub(crate) fn set(&mut self, state: usize, action: usize, value: f64) -> Result<()> {
        if state >= self.num_states {
            return Err(TutorError::out_of_range("state", state, self.num_states));
        }
        if action >= self.num_actions {
            return Err(TutorError::out_of_range("action", action, self.num_actions));
        }
        self.values[state * self.num_actions + action] = value;
        Ok(())
    }

    /// Greedy action for a state, lowest index on ties
    pub fn best_action(&self, state: usize) -> Result<usize> {
        self.row(state).map(argmax)
    }

    /// Highest action value for a state
    pub fn max_value(&self, state: usize) -> Result<f64> {
        self.row(state).map(max_value)
    }

    /// Copy of the table as one `Vec` per state
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.values
            .chunks(self.num_actions)
            .map(<[f64]>::to_vec)
            .collect()
    }
}

/// Read-only snapshot of a value table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QTableSnapshot {
    pub num_states: usize,
    pub num_actions: usize,
    pub values: Vec<Vec<f64>>,
}

impl From<&ValueTable> for QTableSnapshot {
    fn from(table: &ValueTable) -> Self {
        Self {
            num_states: table.num_states,
            num_actions: table.num_actions,
            values: table.to_rows(),
        }
    }
}

impl std::fmt::Display for QTableSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.values {
            let cells: Vec<String> = row.iter().map(|v| format!("{v:>10.4}")).collect();
            writeln!(f, "[{}]", cells.join(" "))?;
        }
        Ok(())
    }
}
