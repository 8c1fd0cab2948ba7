//! Synthesizer: assembles dimension scores into the final result.
//!
//! The synthesizer is the only place where facets meet. Dimension scores come
//! in already computed; everything else (aggregate, classification,
//! projection, bottleneck, roadmap) is derived here in a fixed order:
//!
//! 1. Total score = round(mean of the four dimensions × 10), equal weights
//! 2. Priority band from the total score
//! 3. Confidence from the answers alone
//! 4. Projection (needs the Error Frequency score for the build estimate)
//! 5. Bottleneck
//! 6. Recommendations (need band and projection)

use crate::bottleneck::select_bottleneck;
use crate::classification::{confidence_level, priority_band};
use crate::projection::Projection;
use crate::recommendations::{self, RuleInput};
use crate::response::Answers;
use crate::types::{DiagnosticResult, Dimension, DimensionScore};

/// The Synthesizer turns dimension scores into a [`DiagnosticResult`].
pub struct Synthesizer;

impl Synthesizer {
    pub fn new() -> Self {
        Self
    }

    /// Equal-weight aggregate on a 0-100 scale.
    ///
    /// An empty slice scores 0.
    pub fn total_score(dimensions: &[DimensionScore]) -> u8 {
        if dimensions.is_empty() {
            return 0;
        }

        let mean = dimensions.iter().map(|d| d.score).sum::<f64>() / dimensions.len() as f64;
        (mean * 10.0).round().clamp(0.0, 100.0) as u8
    }

    /// Build the full result.
    ///
    /// `dimensions` must be in [`Dimension::ALL`] order, as produced by
    /// [`crate::dimensions::score_all`].
    pub fn synthesize(&self, answers: &Answers, dimensions: Vec<DimensionScore>) -> DiagnosticResult {
        let total_score = Self::total_score(&dimensions);
        let priority_band = priority_band(total_score);
        let confidence_level = confidence_level(answers);

        let error_score = dimensions
            .iter()
            .find(|d| d.label == Dimension::ErrorFrequency.label())
            .map(|d| d.score)
            .unwrap_or(0.0);
        let projection = Projection::compute(answers, error_score);

        let bottleneck = select_bottleneck(answers);

        let recommendations = recommendations::generate(&RuleInput {
            answers,
            priority_band,
            projection: &projection,
        });

        DiagnosticResult {
            total_score,
            priority_band,
            confidence_level,
            dimensions,
            bottleneck,
            weekly_savings: projection.weekly_savings,
            annual_value: projection.annual_value,
            break_even_months: projection.break_even_months,
            estimated_build_hours: projection.estimated_build_hours,
            recommendations,
        }
    }
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self::new()
    }
}
