//! Process Complexity
//!
//! More tools, a bigger team and missing documentation all make a process
//! harder to run by hand, which is where automation pays off most.
//!
//! | Input | Contribution |
//! |-------|--------------|
//! | toolCount | <5: 1.0, 5-10: 1.5, 10-20: 2.5, 20+: 3.0 |
//! | teamSize | 1-5: 1.0, 6-20: 1.5, 21-50: 2.0, 50+: 2.5 |
//! | documentation | No / tried but failed: 2.5, Somewhat: 1.5, thorough: 0 |
//!
//! Unanswered tool count and team size score as the smallest bucket;
//! unanswered documentation adds nothing.

use crate::response::{Answers, Documentation, TeamSize, ToolCount};
use crate::types::{Dimension, DimensionScore};

use super::DimensionCalculator;

/// The Process Complexity calculator.
pub struct ComplexityCalculator;

impl ComplexityCalculator {
    pub fn new() -> Self {
        Self
    }

    fn tool_points(tool_count: Option<ToolCount>) -> f64 {
        match tool_count {
            Some(ToolCount::TwentyPlus) => 3.0,
            Some(ToolCount::TenToTwenty) => 2.5,
            Some(ToolCount::FiveToTen) => 1.5,
            Some(ToolCount::UnderFive) | None => 1.0,
        }
    }

    fn team_points(team_size: Option<TeamSize>) -> f64 {
        match team_size {
            Some(TeamSize::FiftyPlus) => 2.5,
            Some(TeamSize::TwentyOneToFifty) => 2.0,
            Some(TeamSize::SixToTwenty) => 1.5,
            Some(TeamSize::OneToFive) | None => 1.0,
        }
    }

    fn documentation_points(documentation: Option<Documentation>) -> f64 {
        match documentation {
            Some(Documentation::No) | Some(Documentation::TriedButFailed) => 2.5,
            Some(Documentation::Somewhat) => 1.5,
            Some(Documentation::Thorough) | None => 0.0,
        }
    }
}

impl Default for ComplexityCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl DimensionCalculator for ComplexityCalculator {
    fn dimension(&self) -> Dimension {
        Dimension::ProcessComplexity
    }

    fn score(&self, answers: &Answers) -> f64 {
        let score = Self::tool_points(answers.tool_count)
            + Self::team_points(answers.team_size)
            + Self::documentation_points(answers.documentation);

        score.min(DimensionScore::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::{Field, ResponseRecord};

    fn score(record: &ResponseRecord) -> f64 {
        ComplexityCalculator::new().score(&record.answers())
    }

    #[test]
    fn test_unanswered_scores_baseline() {
        assert_eq!(score(&ResponseRecord::default()), 2.0);
    }

    #[test]
    fn test_highest_buckets() {
        let record = ResponseRecord::default()
            .with(Field::ToolCount, "20+")
            .with(Field::TeamSize, "50+")
            .with(Field::Documentation, "No");
        assert_eq!(score(&record), 8.0);
    }

    #[test]
    fn test_documentation_tiers() {
        let base = ResponseRecord::default()
            .with(Field::ToolCount, "5-10")
            .with(Field::TeamSize, "21-50");

        let failed = base.clone().with(Field::Documentation, "We tried but failed");
        let somewhat = base.clone().with(Field::Documentation, "Somewhat");
        let thorough = base.clone().with(Field::Documentation, "Yes, thoroughly");

        assert_eq!(score(&failed), 6.0);
        assert_eq!(score(&somewhat), 5.0);
        assert_eq!(score(&thorough), 3.5);
    }

    #[test]
    fn test_unrecognized_tool_count_uses_lowest_tier() {
        let record = ResponseRecord::default().with(Field::ToolCount, "a lot");
        assert_eq!(score(&record), 2.0);
    }
}
