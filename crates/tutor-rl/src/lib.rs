//! Tutor RL - Reinforcement learning for adaptive difficulty selection
//!
//! This crate provides a tabular Q-learning policy learner that picks the
//! question difficulty to offer a learner at a given proficiency level.

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::float_cmp)]
#![allow(clippy::similar_names)]

pub mod algorithm;
pub mod engine;
pub mod experience;
pub mod state;
pub mod transition;

pub use algorithm::{Exploration, LearnerParams, QLearning};
pub use engine::{LearnerStats, PolicyLearner, TrainingReport};
pub use experience::{Experience, ExperienceBuffer};
pub use state::{QTableSnapshot, Reward, RewardTable, ValueTable};
pub use transition::{AdvanceOnPositiveReward, TransitionModel};
