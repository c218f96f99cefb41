//! Environment transition models

use crate::state::Reward;

/// Simulated environment: where a learner ends up after answering
pub trait TransitionModel: Send + Sync {
    /// Next state after taking `action` in `state` and receiving `reward`.
    ///
    /// The learner rejects any result outside `[0, num_states)`.
    fn next_state(&self, state: usize, action: usize, reward: Reward, num_states: usize) -> usize;
}

/// A positive reward advances proficiency by one level, capped at the top
/// state. Any other reward leaves the state unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvanceOnPositiveReward;

impl TransitionModel for AdvanceOnPositiveReward {
    fn next_state(&self, state: usize, _action: usize, reward: Reward, num_states: usize) -> usize {
        if reward > 0.0 && state + 1 < num_states {
            state + 1
        } else {
            state
        }
    }
}

impl<F> TransitionModel for F
where
    F: Fn(usize, usize, Reward) -> usize + Send + Sync,
{
    fn next_state(&self, state: usize, action: usize, reward: Reward, _num_states: usize) -> usize {
        self(state, action, reward)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_reward_advances() {
        let model = AdvanceOnPositiveReward;
        assert_eq!(model.next_state(0, 0, 10.0, 3), 1);
        assert_eq!(model.next_state(1, 1, 0.5, 3), 2);
    }

    #[test]
    fn test_non_positive_reward_stays() {
        let model = AdvanceOnPositiveReward;
        assert_eq!(model.next_state(1, 0, -5.0, 3), 1);
        assert_eq!(model.next_state(1, 2, 0.0, 3), 1);
    }

    #[test]
    fn test_top_state_is_clamped() {
        let model = AdvanceOnPositiveReward;
        assert_eq!(model.next_state(2, 2, 10.0, 3), 2);
        assert_eq!(model.next_state(0, 0, 10.0, 1), 0);
    }

    #[test]
    fn test_closure_model() {
        let regress = |state: usize, _action: usize, reward: Reward| {
            if reward < 0.0 {
                state.saturating_sub(1)
            } else {
                state
            }
        };
        assert_eq!(regress.next_state(2, 0, -5.0, 3), 1);
        assert_eq!(regress.next_state(0, 0, -5.0, 3), 0);
        assert_eq!(regress.next_state(1, 1, 10.0, 3), 1);
    }
}
