//! Proficiency and difficulty vocabulary of the tutoring scenario

use serde::{Deserialize, Serialize};

/// Discrete proficiency level of a learner. Higher index = more proficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProficiencyLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl ProficiencyLevel {
    pub const ALL: [ProficiencyLevel; 3] = [
        ProficiencyLevel::Beginner,
        ProficiencyLevel::Intermediate,
        ProficiencyLevel::Advanced,
    ];

    /// Convert to a state index
    pub fn to_index(self) -> usize {
        match self {
            ProficiencyLevel::Beginner => 0,
            ProficiencyLevel::Intermediate => 1,
            ProficiencyLevel::Advanced => 2,
        }
    }

    /// Create from a state index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Human readable label
    pub fn label(self) -> &'static str {
        match self {
            ProficiencyLevel::Beginner => "Beginner",
            ProficiencyLevel::Intermediate => "Intermediate",
            ProficiencyLevel::Advanced => "Advanced",
        }
    }
}

impl std::fmt::Display for ProficiencyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Discrete difficulty of the next question offered to a learner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Convert to an action index
    pub fn to_index(self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }

    /// Create from an action index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Human readable label
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proficiency_index_roundtrip() {
        for level in ProficiencyLevel::ALL {
            assert_eq!(ProficiencyLevel::from_index(level.to_index()), Some(level));
        }
        assert!(ProficiencyLevel::from_index(3).is_none());
    }

    #[test]
    fn test_proficiency_ordering_follows_index() {
        assert!(ProficiencyLevel::Beginner < ProficiencyLevel::Intermediate);
        assert!(ProficiencyLevel::Intermediate < ProficiencyLevel::Advanced);
    }

    #[test]
    fn test_difficulty_labels() {
        assert_eq!(Difficulty::Easy.to_string(), "Easy");
        assert_eq!(Difficulty::from_index(2), Some(Difficulty::Hard));
        assert!(Difficulty::from_index(7).is_none());
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&Difficulty::Medium).unwrap();
        assert_eq!(json, "\"medium\"");

        let parsed: ProficiencyLevel = serde_json::from_str("\"advanced\"").unwrap();
        assert_eq!(parsed, ProficiencyLevel::Advanced);
    }
}
