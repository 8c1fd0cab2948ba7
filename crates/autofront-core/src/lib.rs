//! # autofront-core
//!
//! Deterministic scoring engine for the automation-potential questionnaire.
//!
//! Given a completed (or partially completed) response record, the engine
//! answers:
//! - How much would automating this process pay off?
//! - How urgent is it?
//! - How far can the answers be trusted?
//! - What should happen first?
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: Same record always produces the same result
//! 2. **Total**: Empty or unrecognized answers score with documented defaults
//! 3. **Stateless**: No ambient state, no clock, safe to call from any thread
//! 4. **Independent dimensions**: Each calculator reads only its own answers
//!
//! ## Example
//!
//! ```rust,ignore
//! use autofront_core::{evaluate, ResponseRecord};
//!
//! let record = ResponseRecord::from_yaml_file("responses.yaml")?;
//! let result = evaluate(&record);
//!
//! println!("{} ({})", result.total_score, result.priority_band);
//! for rec in &result.recommendations {
//!     println!("- {}", rec.title);
//! }
//! ```

pub mod bottleneck;
pub mod classification;
pub mod dimensions;
pub mod projection;
pub mod questionnaire;
pub mod recommendations;
pub mod response;
pub mod synthesizer;
pub mod types;

// Re-export main types at crate root
pub use dimensions::{
    ComplexityCalculator, DimensionCalculator, ErrorFrequencyCalculator, ManualBurdenCalculator,
    SpeedCalculator,
};
pub use projection::Projection;
pub use questionnaire::{Question, QuestionKind, QUESTIONS, STEP_COUNT};
pub use response::{AnswerOption, Answers, Field, ResponseError, ResponseIssue, ResponseRecord};
pub use synthesizer::Synthesizer;
pub use types::{
    ConfidenceLevel, DiagnosticResult, Dimension, DimensionScore, PriorityBand, Recommendation,
    RecommendationType,
};

/// Score a response record.
///
/// This is the main entry point. It never fails: answers that are empty or
/// not one of a field's labels fall back to that field's default.
pub fn evaluate(record: &ResponseRecord) -> DiagnosticResult {
    let answers = record.answers();

    // Fan-out: each dimension independently
    let dimensions = dimensions::score_all(&answers);

    // Fan-in
    let result = Synthesizer::new().synthesize(&answers, dimensions);

    tracing::debug!(
        total_score = result.total_score,
        priority = %result.priority_band,
        confidence = %result.confidence_level,
        recommendations = result.recommendations.len(),
        "Evaluated response record"
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const INVOICING: &str = r#"
teamSize: "50+"
toolCount: "20+"
primaryProcess: "invoicing"
executionMode: "Manually"
errorFrequency: "Daily"
dependency: "Yes"
speedRequirement: "Instant"
annoyance: "copy pasting numbers"
documentation: "No"
timeSavings: "10+ hours"
hourlyRate: "Mid-level ($40-70/hr)"
"#;

    #[test]
    fn test_high_potential_record() {
        let record = ResponseRecord::from_yaml(INVOICING).unwrap();
        let result = evaluate(&record);

        let scores: Vec<f64> = result.dimensions.iter().map(|d| d.score).collect();
        assert_eq!(scores, vec![8.0, 9.5, 8.0, 10.0]);
        assert_eq!(result.total_score, 89);
        assert_eq!(result.priority_band, PriorityBand::Critical);
        assert_eq!(result.confidence_level, ConfidenceLevel::Low);
        assert_eq!(result.weekly_savings, 12.0);
        assert_eq!(result.annual_value, 34_320);
        assert_eq!(result.bottleneck, "copy pasting numbers");
        assert_eq!(result.recommendations[0].kind, RecommendationType::Immediate);
    }

    #[test]
    fn test_empty_record_uses_defaults() {
        let result = evaluate(&ResponseRecord::default());

        let scores: Vec<f64> = result.dimensions.iter().map(|d| d.score).collect();
        assert_eq!(scores, vec![2.0, 1.0, 5.0, 5.0]);
        assert_eq!(result.total_score, 33);
        assert_eq!(result.priority_band, PriorityBand::Low);
        assert_eq!(result.confidence_level, ConfidenceLevel::Low);
        assert_eq!(result.weekly_savings, 3.0);
        assert_eq!(result.annual_value, 7_800);
        assert_eq!(result.estimated_build_hours, 20);
        assert_eq!(result.break_even_months, 2);
        assert_eq!(
            result.bottleneck,
            " process with  error frequency and dependency on multiple people"
        );
        assert_eq!(result.recommendations.len(), 3);
    }

    #[test]
    fn test_unrecognized_labels_score_like_empty() {
        let garbage = ResponseRecord::default()
            .with(Field::TeamSize, "a lot")
            .with(Field::ErrorFrequency, "DAILY")
            .with(Field::TimeSavings, "forty");

        let empty = evaluate(&ResponseRecord::default());
        let result = evaluate(&garbage);

        assert_eq!(result.dimensions, empty.dimensions);
        assert_eq!(result.weekly_savings, empty.weekly_savings);
        assert_eq!(result.total_score, empty.total_score);
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let record = ResponseRecord::from_yaml(INVOICING).unwrap();
        assert_eq!(evaluate(&record), evaluate(&record));
        assert_eq!(evaluate(&ResponseRecord::default()), evaluate(&ResponseRecord::default()));
    }

    #[test]
    fn test_evaluate_from_many_threads() {
        let record = ResponseRecord::from_yaml(INVOICING).unwrap();
        let expected = evaluate(&record);

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8).map(|_| scope.spawn(|| evaluate(&record))).collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }
}
