use serde::{Deserialize, Serialize};

/// Point scale applied by the scoring engine.
///
/// Missing a requirement costs half of meeting it and a premature pick costs
/// less than either, so a minimal complete architecture outscores an over-built one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub required_points: i32,
    pub missing_required_points: i32,
    pub beneficial_points: i32,
    pub premature_points: i32,
    /// Bonus for a complete selection of at most `|required| + |beneficial| / 2` groups.
    #[serde(default)]
    pub lean_bonus: Option<i32>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            required_points: 10,
            missing_required_points: -5,
            beneficial_points: 5,
            premature_points: -3,
            lean_bonus: None,
        }
    }
}
