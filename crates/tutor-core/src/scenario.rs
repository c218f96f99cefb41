//! Tutoring scenarios: a reward matrix plus the labels used to present it

use serde::{Deserialize, Serialize};

use crate::error::{Result, TutorError};
use crate::types::{Difficulty, ProficiencyLevel};

/// Reward for offering the difficulty that matches the learner's level
pub const MATCH_REWARD: f64 = 10.0;

/// Reward for any mismatch between difficulty and level
pub const MISMATCH_REWARD: f64 = -5.0;

/// A reward matrix (rows = states, columns = actions) and its labels
///
/// When deserializing, omitted rewards are the difficulty-matching matrix
/// and omitted labels are empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default = "difficulty_matching_rewards")]
    pub rewards: Vec<Vec<f64>>,
    #[serde(default)]
    pub state_labels: Vec<String>,
    #[serde(default)]
    pub action_labels: Vec<String>,
}

/// Diagonal reward matrix: [`MATCH_REWARD`] where difficulty meets level
fn difficulty_matching_rewards() -> Vec<Vec<f64>> {
    ProficiencyLevel::ALL
        .iter()
        .map(|level| {
            Difficulty::ALL
                .iter()
                .map(|difficulty| {
                    if level.to_index() == difficulty.to_index() {
                        MATCH_REWARD
                    } else {
                        MISMATCH_REWARD
                    }
                })
                .collect()
        })
        .collect()
}

impl Scenario {
    /// The Beginner/Intermediate/Advanced vs Easy/Medium/Hard scenario.
    ///
    /// Offering the difficulty aligned with the learner's level earns
    /// [`MATCH_REWARD`]; everything else earns [`MISMATCH_REWARD`].
    pub fn difficulty_matching() -> Self {
        Self {
            rewards: difficulty_matching_rewards(),
            state_labels: ProficiencyLevel::ALL
                .iter()
                .map(|l| l.label().to_string())
                .collect(),
            action_labels: Difficulty::ALL
                .iter()
                .map(|d| d.label().to_string())
                .collect(),
        }
    }

    pub fn num_states(&self) -> usize {
        self.rewards.len()
    }

    pub fn num_actions(&self) -> usize {
        self.rewards.first().map_or(0, Vec::len)
    }

    /// Check that the reward matrix is rectangular and labels line up with it.
    ///
    /// Empty label lists are allowed; indices are then shown as-is.
    pub fn validate(&self) -> Result<()> {
        if self.rewards.is_empty() || self.num_actions() == 0 {
            return Err(TutorError::Config(
                "scenario reward matrix must have at least one state and one action".into(),
            ));
        }
        if let Some((state, row)) = self
            .rewards
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != self.num_actions())
        {
            return Err(TutorError::Config(format!(
                "scenario reward row {state} has {} actions, expected {}",
                row.len(),
                self.num_actions()
            )));
        }
        if !self.state_labels.is_empty() && self.state_labels.len() != self.num_states() {
            return Err(TutorError::Config(format!(
                "scenario has {} state labels for {} states",
                self.state_labels.len(),
                self.num_states()
            )));
        }
        if !self.action_labels.is_empty() && self.action_labels.len() != self.num_actions() {
            return Err(TutorError::Config(format!(
                "scenario has {} action labels for {} actions",
                self.action_labels.len(),
                self.num_actions()
            )));
        }
        Ok(())
    }

    /// Label for a state index, falling back to the index itself
    pub fn state_label(&self, state: usize) -> String {
        self.state_labels
            .get(state)
            .cloned()
            .unwrap_or_else(|| state.to_string())
    }

    /// Label for an action index, falling back to the index itself
    pub fn action_label(&self, action: usize) -> String {
        self.action_labels
            .get(action)
            .cloned()
            .unwrap_or_else(|| action.to_string())
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self::difficulty_matching()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_matching_is_diagonal() {
        let scenario = Scenario::difficulty_matching();
        assert_eq!(
            scenario.rewards,
            vec![
                vec![10.0, -5.0, -5.0],
                vec![-5.0, 10.0, -5.0],
                vec![-5.0, -5.0, 10.0],
            ]
        );
        assert_eq!(scenario.num_states(), 3);
        assert_eq!(scenario.num_actions(), 3);
        assert!(scenario.validate().is_ok());
    }

    #[test]
    fn test_labels() {
        let scenario = Scenario::default();
        assert_eq!(scenario.state_label(0), "Beginner");
        assert_eq!(scenario.action_label(2), "Hard");
        assert_eq!(scenario.action_label(9), "9");
    }

    #[test]
    fn test_validate_label_mismatch() {
        let mut scenario = Scenario::default();
        scenario.action_labels.pop();
        assert!(matches!(scenario.validate(), Err(TutorError::Config(_))));
    }

    #[test]
    fn test_validate_unlabelled_is_fine() {
        let scenario = Scenario {
            rewards: vec![vec![1.0, 0.0]],
            state_labels: vec![],
            action_labels: vec![],
        };
        assert!(scenario.validate().is_ok());
        assert_eq!(scenario.state_label(0), "0");
    }

    #[test]
    fn test_validate_ragged_rows() {
        let scenario = Scenario {
            rewards: vec![vec![1.0, 0.0], vec![0.0]],
            state_labels: vec![],
            action_labels: vec![],
        };
        let err = scenario.validate().unwrap_err();
        assert!(matches!(err, TutorError::Config(_)));
        assert!(err.to_string().contains("row 1 has 1 actions, expected 2"));
    }

    #[test]
    fn test_validate_empty() {
        let scenario = Scenario {
            rewards: vec![],
            state_labels: vec![],
            action_labels: vec![],
        };
        assert!(scenario.validate().is_err());
    }
}
