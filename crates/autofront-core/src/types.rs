//! Core types for the diagnostic result.
//!
//! These are the structures the engine hands to renderers and outbound
//! payload builders. They are produced once per evaluation and never mutated.

use serde::{Deserialize, Serialize};

/// The four scoring dimensions.
///
/// Declaration order is the display order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    ProcessComplexity,
    ManualBurden,
    ErrorFrequency,
    SpeedRequirement,
}

impl Dimension {
    /// All dimensions in display order.
    pub const ALL: [Dimension; 4] = [
        Dimension::ProcessComplexity,
        Dimension::ManualBurden,
        Dimension::ErrorFrequency,
        Dimension::SpeedRequirement,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Dimension::ProcessComplexity => "Process Complexity",
            Dimension::ManualBurden => "Manual Burden",
            Dimension::ErrorFrequency => "Error Frequency",
            Dimension::SpeedRequirement => "Speed Requirement",
        }
    }

    /// Display color used by the results chart.
    pub fn color(&self) -> &'static str {
        match self {
            Dimension::ProcessComplexity => "#F97316",
            Dimension::ManualBurden => "#FB923C",
            Dimension::ErrorFrequency => "#FDBA74",
            Dimension::SpeedRequirement => "#FED7AA",
        }
    }
}

/// Score for one dimension, on a 0-10 scale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DimensionScore {
    pub label: String,
    pub score: f64,
    pub color: String,
}

impl DimensionScore {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 10.0;

    /// Build a score for `dimension`, clamped to `[MIN, MAX]`.
    pub fn new(dimension: Dimension, score: f64) -> Self {
        Self {
            label: dimension.label().to_string(),
            score: score.clamp(Self::MIN, Self::MAX),
            color: dimension.color().to_string(),
        }
    }
}

/// Coarse urgency classification of the total score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PriorityBand {
    Critical,
    High,
    Medium,
    Low,
}

impl PriorityBand {
    pub const CRITICAL_THRESHOLD: u8 = 80;
    pub const HIGH_THRESHOLD: u8 = 60;
    pub const MEDIUM_THRESHOLD: u8 = 40;

    /// Threshold ladder; each band includes its lower bound.
    pub fn from_score(total_score: u8) -> Self {
        match total_score {
            s if s >= Self::CRITICAL_THRESHOLD => PriorityBand::Critical,
            s if s >= Self::HIGH_THRESHOLD => PriorityBand::High,
            s if s >= Self::MEDIUM_THRESHOLD => PriorityBand::Medium,
            _ => PriorityBand::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityBand::Critical => "critical",
            PriorityBand::High => "high",
            PriorityBand::Medium => "medium",
            PriorityBand::Low => "low",
        }
    }
}

impl std::fmt::Display for PriorityBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How concrete the answers were, independent of the score itself.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub const HIGH_THRESHOLD: u8 = 6;
    pub const MEDIUM_THRESHOLD: u8 = 4;

    pub fn from_points(points: u8) -> Self {
        match points {
            p if p >= Self::HIGH_THRESHOLD => ConfidenceLevel::High,
            p if p >= Self::MEDIUM_THRESHOLD => ConfidenceLevel::Medium,
            _ => ConfidenceLevel::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLevel::High => "high",
            ConfidenceLevel::Medium => "medium",
            ConfidenceLevel::Low => "low",
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// When a recommendation should be acted on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationType {
    /// Do it now.
    Immediate,

    /// Plan it this quarter.
    Strategic,

    /// Changes how the team or system is organised.
    Structural,
}

impl RecommendationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationType::Immediate => "immediate",
            RecommendationType::Strategic => "strategic",
            RecommendationType::Structural => "structural",
        }
    }
}

/// One roadmap entry.
///
/// Text interpolates user answers verbatim; renderers must treat it as
/// untrusted display text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: RecommendationType,
}

impl Recommendation {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        kind: RecommendationType,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            kind,
        }
    }
}

/// Result of evaluating a response record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticResult {
    /// Automation potential, 0-100
    pub total_score: u8,

    /// Urgency derived from `total_score`
    pub priority_band: PriorityBand,

    /// How specific the answers were
    pub confidence_level: ConfidenceLevel,

    /// The four dimension scores, always in [`Dimension::ALL`] order
    pub dimensions: Vec<DimensionScore>,

    /// The described or inferred primary friction point
    pub bottleneck: String,

    /// Projected hours saved per week
    pub weekly_savings: f64,

    /// Projected yearly value of the saved hours, whole currency units
    pub annual_value: u64,

    /// Months until savings cover the build effort, capped
    pub break_even_months: u32,

    /// Estimated implementation effort in hours
    pub estimated_build_hours: u32,

    /// Ranked roadmap, 3 to 5 entries
    pub recommendations: Vec<Recommendation>,
}

impl DiagnosticResult {
    /// Score for a single dimension.
    pub fn dimension(&self, dimension: Dimension) -> Option<&DimensionScore> {
        self.dimensions.iter().find(|d| d.label == dimension.label())
    }
}
