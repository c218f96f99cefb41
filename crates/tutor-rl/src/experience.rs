//! Episode history buffer

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::state::Reward;

/// One simulated episode (s, a, r, s') and the TD error it produced
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub state: usize,
    pub action: usize,
    pub reward: Reward,
    pub next_state: usize,
    pub td_error: f64,
    /// Whether the action was drawn at random rather than greedily
    pub explored: bool,
}

impl Experience {
    /// Whether the learner moved to a higher proficiency level
    pub fn advanced(&self) -> bool {
        self.next_state > self.state
    }
}

/// Bounded FIFO of the most recent episodes. Capacity 0 records nothing.
#[derive(Debug, Clone)]
pub struct ExperienceBuffer {
    buffer: VecDeque<Experience>,
    capacity: usize,
}

impl ExperienceBuffer {
    /// Create a new experience buffer with given capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Add an experience, evicting the oldest when full
    pub fn push(&mut self, experience: Experience) {
        if self.capacity == 0 {
            return;
        }
        if self.buffer.len() >= self.capacity {
            self.buffer.pop_front();
        }
        self.buffer.push_back(experience);
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Most recent experience, if any
    pub fn last(&self) -> Option<&Experience> {
        self.buffer.back()
    }

    /// Experiences from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &Experience> {
        self.buffer.iter()
    }

    /// Get all experiences, oldest first
    pub fn all(&self) -> Vec<Experience> {
        self.buffer.iter().copied().collect()
    }
}

impl Default for ExperienceBuffer {
    fn default() -> Self {
        Self::new(0)
    }
}
