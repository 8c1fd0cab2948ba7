//! Speed Requirement: a direct lookup on how fast the process has to run.

use crate::response::{Answers, SpeedRequirement};
use crate::types::Dimension;

use super::DimensionCalculator;

/// Score used when the answer is missing or unrecognized.
pub const DEFAULT_SPEED_SCORE: f64 = 5.0;

/// The Speed Requirement calculator.
pub struct SpeedCalculator;

impl SpeedCalculator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SpeedCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl DimensionCalculator for SpeedCalculator {
    fn dimension(&self) -> Dimension {
        Dimension::SpeedRequirement
    }

    fn score(&self, answers: &Answers) -> f64 {
        match answers.speed_requirement {
            Some(SpeedRequirement::Instant) => 10.0,
            Some(SpeedRequirement::Fast) => 7.0,
            Some(SpeedRequirement::Medium) => 4.0,
            Some(SpeedRequirement::Slow) => 2.0,
            None => DEFAULT_SPEED_SCORE,
        }
    }
}
