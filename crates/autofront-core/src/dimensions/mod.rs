//! The four dimension calculators.
//!
//! Each calculator is a small additive model over a handful of categorical
//! answers and produces one score on a 0-10 scale. Calculators are independent:
//! none reads another calculator's output, and no answer feeds more than one
//! dimension's arithmetic except through its own lookup.
//!
//! ## Dimensions
//!
//! | Dimension | Inputs |
//! |-----------|--------|
//! | Process Complexity | toolCount, teamSize, documentation |
//! | Manual Burden | executionMode, dependency, timeSavings |
//! | Error Frequency | errorFrequency |
//! | Speed Requirement | speedRequirement |

mod complexity;
mod error_frequency;
mod manual_burden;
mod speed;

pub use complexity::ComplexityCalculator;
pub use error_frequency::ErrorFrequencyCalculator;
pub use manual_burden::ManualBurdenCalculator;
pub use speed::SpeedCalculator;

use crate::response::Answers;
use crate::types::{Dimension, DimensionScore};

/// Trait implemented by all dimension calculators.
pub trait DimensionCalculator {
    /// The dimension this calculator scores.
    fn dimension(&self) -> Dimension;

    /// Raw score for the answers. Callers clamp through [`DimensionScore::new`].
    fn score(&self, answers: &Answers) -> f64;

    /// Score wrapped with the dimension's label and color.
    fn evaluate(&self, answers: &Answers) -> DimensionScore {
        DimensionScore::new(self.dimension(), self.score(answers))
    }
}

/// Score every dimension, in [`Dimension::ALL`] order.
pub fn score_all(answers: &Answers) -> Vec<DimensionScore> {
    Dimension::ALL
        .iter()
        .map(|dimension| calculator_for(*dimension).evaluate(answers))
        .collect()
}

/// The calculator responsible for `dimension`.
pub fn calculator_for(dimension: Dimension) -> Box<dyn DimensionCalculator> {
    match dimension {
        Dimension::ProcessComplexity => Box::new(ComplexityCalculator::new()),
        Dimension::ManualBurden => Box::new(ManualBurdenCalculator::new()),
        Dimension::ErrorFrequency => Box::new(ErrorFrequencyCalculator::new()),
        Dimension::SpeedRequirement => Box::new(SpeedCalculator::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::ResponseRecord;

    #[test]
    fn test_score_all_fixed_order() {
        let record = ResponseRecord::default();
        let scores = score_all(&record.answers());

        let labels: Vec<&str> = scores.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Process Complexity", "Manual Burden", "Error Frequency", "Speed Requirement"]
        );
    }

    #[test]
    fn test_calculator_for_matches_dimension() {
        for dimension in Dimension::ALL {
            assert_eq!(calculator_for(dimension).dimension(), dimension);
        }
    }
}
