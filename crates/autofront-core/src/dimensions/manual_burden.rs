//! Manual Burden
//!
//! How much of the process is carried by people by hand, and how much time it
//! eats.
//!
//! | Input | Contribution |
//! |-------|--------------|
//! | executionMode | mess: 4.0, Manually: 3.5, Not sure: 2.0, otherwise 1.0 |
//! | dependency | single person: 3, multiple people: 2, No: 0 |
//! | timeSavings | 10+h: 3, 5-10h: 2.5, 3-5h: 2, otherwise 0 |

use crate::response::{Answers, Dependency, ExecutionMode, TimeSavings};
use crate::types::{Dimension, DimensionScore};

use super::DimensionCalculator;

/// The Manual Burden calculator.
pub struct ManualBurdenCalculator;

impl ManualBurdenCalculator {
    pub fn new() -> Self {
        Self
    }

    fn execution_points(mode: Option<ExecutionMode>) -> f64 {
        match mode {
            Some(ExecutionMode::Mess) => 4.0,
            Some(ExecutionMode::Manual) => 3.5,
            Some(ExecutionMode::NotSure) => 2.0,
            Some(ExecutionMode::PartiallyAutomated) | None => 1.0,
        }
    }

    fn dependency_points(dependency: Option<Dependency>) -> f64 {
        match dependency {
            Some(Dependency::SinglePerson) => 3.0,
            Some(Dependency::MultiplePeople) => 2.0,
            Some(Dependency::No) | None => 0.0,
        }
    }

    fn savings_points(savings: Option<TimeSavings>) -> f64 {
        match savings {
            Some(TimeSavings::TenPlus) => 3.0,
            Some(TimeSavings::FiveToTen) => 2.5,
            Some(TimeSavings::ThreeToFive) => 2.0,
            Some(TimeSavings::OneToTwo) | Some(TimeSavings::NoIdea) | None => 0.0,
        }
    }
}

impl Default for ManualBurdenCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl DimensionCalculator for ManualBurdenCalculator {
    fn dimension(&self) -> Dimension {
        Dimension::ManualBurden
    }

    fn score(&self, answers: &Answers) -> f64 {
        let score = Self::execution_points(answers.execution_mode)
            + Self::dependency_points(answers.dependency)
            + Self::savings_points(answers.time_savings);

        score.min(DimensionScore::MAX)
    }
}
