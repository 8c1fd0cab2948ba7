//! Priority and confidence classification.
//!
//! Priority is a step function of the total score (see
//! [`PriorityBand::from_score`]). Confidence measures how much of the input was
//! concrete rather than vague, and never looks at the score.
//!
//! ## Confidence points
//!
//! | Signal | Points |
//! |--------|--------|
//! | documentation thorough / somewhat / other | 3 / 2 / 0 |
//! | pain point longer than 20 characters (trimmed) | 2 |
//! | time savings answered with a real bucket (not "No idea") | 2 |
//! | execution mode answered with something other than "Not sure" | 1 |
//!
//! 6 or more points is high, 4 or more is medium, anything less is low.

use crate::response::{Answers, Documentation, ExecutionMode, TimeSavings};
use crate::types::{ConfidenceLevel, PriorityBand};

/// A pain point longer than this (in characters, after trimming) counts as
/// substantive.
pub const SUBSTANTIVE_PAIN_POINT_CHARS: usize = 20;

/// Priority band for a total score.
pub fn priority_band(total_score: u8) -> PriorityBand {
    PriorityBand::from_score(total_score)
}

/// Raw confidence points for the answers.
pub fn confidence_points(answers: &Answers) -> u8 {
    let documentation = match answers.documentation {
        Some(Documentation::Thorough) => 3,
        Some(Documentation::Somewhat) => 2,
        Some(Documentation::No) | Some(Documentation::TriedButFailed) | None => 0,
    };

    let pain_point = if answers.pain_point().trim().chars().count() > SUBSTANTIVE_PAIN_POINT_CHARS {
        2
    } else {
        0
    };

    let savings = match answers.time_savings {
        Some(TimeSavings::NoIdea) | None => 0,
        Some(_) => 2,
    };

    let execution = match answers.execution_mode {
        Some(ExecutionMode::NotSure) | None => 0,
        Some(_) => 1,
    };

    documentation + pain_point + savings + execution
}

/// Confidence level for the answers.
pub fn confidence_level(answers: &Answers) -> ConfidenceLevel {
    ConfidenceLevel::from_points(confidence_points(answers))
}
