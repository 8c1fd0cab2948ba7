//! The Response Record: answers to the fixed questionnaire.
//!
//! The record keeps every answer exactly as the form produced it (strings,
//! possibly empty). Scoring never reads the strings directly; it works on the
//! typed [`Answers`] view, where each enumerated field is an `Option` of a
//! closed enum. Empty and unrecognized labels both become `None`, and every
//! calculator handles `None` with an explicit default arm.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading a response record.
#[derive(Error, Debug)]
pub enum ResponseError {
    #[error("Failed to read responses file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A closed set of answer labels for one questionnaire field.
pub trait AnswerOption: Copy + Sized + 'static {
    /// Every option, in questionnaire order.
    const ALL: &'static [Self];

    /// The exact label the form submits for this option.
    fn label(self) -> &'static str;

    /// Exact-match lookup. Anything else (including the empty string) is `None`.
    fn from_label(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|option| option.label() == value)
    }
}

/// How big is the team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TeamSize {
    OneToFive,
    SixToTwenty,
    TwentyOneToFifty,
    FiftyPlus,
}

impl AnswerOption for TeamSize {
    const ALL: &'static [Self] = &[
        Self::OneToFive,
        Self::SixToTwenty,
        Self::TwentyOneToFifty,
        Self::FiftyPlus,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::OneToFive => "1-5",
            Self::SixToTwenty => "6-20",
            Self::TwentyOneToFifty => "21-50",
            Self::FiftyPlus => "50+",
        }
    }
}

/// Number of tools the team touches daily.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolCount {
    UnderFive,
    FiveToTen,
    TenToTwenty,
    TwentyPlus,
}

impl AnswerOption for ToolCount {
    const ALL: &'static [Self] = &[
        Self::UnderFive,
        Self::FiveToTen,
        Self::TenToTwenty,
        Self::TwentyPlus,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::UnderFive => "Less than 5",
            Self::FiveToTen => "5-10",
            Self::TenToTwenty => "10-20",
            Self::TwentyPlus => "20+",
        }
    }
}

/// How the process is executed today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionMode {
    Manual,
    PartiallyAutomated,
    NotSure,
    Mess,
}

impl AnswerOption for ExecutionMode {
    const ALL: &'static [Self] = &[
        Self::Manual,
        Self::PartiallyAutomated,
        Self::NotSure,
        Self::Mess,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Manual => "Manually",
            Self::PartiallyAutomated => "Partially automated",
            Self::NotSure => "Not sure",
            Self::Mess => "It's a mess",
        }
    }
}

/// How often errors or delays happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorFrequency {
    Never,
    Sometimes,
    Weekly,
    Daily,
    Constantly,
}

impl AnswerOption for ErrorFrequency {
    const ALL: &'static [Self] = &[
        Self::Never,
        Self::Sometimes,
        Self::Weekly,
        Self::Daily,
        Self::Constantly,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Never => "Never",
            Self::Sometimes => "Sometimes",
            Self::Weekly => "Weekly",
            Self::Daily => "Daily",
            Self::Constantly => "Constantly",
        }
    }
}

/// Whether the process depends on one specific person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dependency {
    /// One person holds the process ("Yes").
    SinglePerson,
    No,
    MultiplePeople,
}

impl AnswerOption for Dependency {
    const ALL: &'static [Self] = &[Self::SinglePerson, Self::No, Self::MultiplePeople];

    fn label(self) -> &'static str {
        match self {
            Self::SinglePerson => "Yes",
            Self::No => "No",
            Self::MultiplePeople => "Multiple people can do it",
        }
    }
}

/// How quickly the process needs to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpeedRequirement {
    Slow,
    Medium,
    Fast,
    Instant,
}

impl AnswerOption for SpeedRequirement {
    const ALL: &'static [Self] = &[Self::Slow, Self::Medium, Self::Fast, Self::Instant];

    fn label(self) -> &'static str {
        match self {
            Self::Slow => "Slow (days)",
            Self::Medium => "Medium (hours)",
            Self::Fast => "Fast (minutes)",
            Self::Instant => "Instant",
        }
    }
}

/// Documentation status of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Documentation {
    Thorough,
    Somewhat,
    No,
    TriedButFailed,
}

impl Documentation {
    /// "No" and "We tried but failed" are treated the same everywhere.
    pub fn is_missing(self) -> bool {
        matches!(self, Self::No | Self::TriedButFailed)
    }
}

impl AnswerOption for Documentation {
    const ALL: &'static [Self] = &[
        Self::Thorough,
        Self::Somewhat,
        Self::No,
        Self::TriedButFailed,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Thorough => "Yes, thoroughly",
            Self::Somewhat => "Somewhat",
            Self::No => "No",
            Self::TriedButFailed => "We tried but failed",
        }
    }
}

/// Weekly time a fully automated version would save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeSavings {
    OneToTwo,
    ThreeToFive,
    FiveToTen,
    TenPlus,
    NoIdea,
}

impl AnswerOption for TimeSavings {
    const ALL: &'static [Self] = &[
        Self::OneToTwo,
        Self::ThreeToFive,
        Self::FiveToTen,
        Self::TenPlus,
        Self::NoIdea,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::OneToTwo => "1-2 hours",
            Self::ThreeToFive => "3-5 hours",
            Self::FiveToTen => "5-10 hours",
            Self::TenPlus => "10+ hours",
            Self::NoIdea => "No idea",
        }
    }
}

/// Seniority of the people doing the work, used to price their time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HourlyRate {
    Junior,
    Mid,
    Senior,
    Leadership,
}

impl AnswerOption for HourlyRate {
    const ALL: &'static [Self] = &[Self::Junior, Self::Mid, Self::Senior, Self::Leadership];

    fn label(self) -> &'static str {
        match self {
            Self::Junior => "Junior (under $40/hr)",
            Self::Mid => "Mid-level ($40-70/hr)",
            Self::Senior => "Senior ($70-120/hr)",
            Self::Leadership => "Leadership ($120+/hr)",
        }
    }
}

/// The eleven questionnaire fields, in question order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    TeamSize,
    ToolCount,
    PrimaryProcess,
    ExecutionMode,
    ErrorFrequency,
    Dependency,
    SpeedRequirement,
    Annoyance,
    Documentation,
    TimeSavings,
    HourlyRate,
}

impl Field {
    pub const ALL: [Field; 11] = [
        Field::TeamSize,
        Field::ToolCount,
        Field::PrimaryProcess,
        Field::ExecutionMode,
        Field::ErrorFrequency,
        Field::Dependency,
        Field::SpeedRequirement,
        Field::Annoyance,
        Field::Documentation,
        Field::TimeSavings,
        Field::HourlyRate,
    ];

    /// The camelCase key used in the serialized record and in stored state.
    pub fn key(&self) -> &'static str {
        match self {
            Field::TeamSize => "teamSize",
            Field::ToolCount => "toolCount",
            Field::PrimaryProcess => "primaryProcess",
            Field::ExecutionMode => "executionMode",
            Field::ErrorFrequency => "errorFrequency",
            Field::Dependency => "dependency",
            Field::SpeedRequirement => "speedRequirement",
            Field::Annoyance => "annoyance",
            Field::Documentation => "documentation",
            Field::TimeSavings => "timeSavings",
            Field::HourlyRate => "hourlyRate",
        }
    }

    pub fn from_key(key: &str) -> Option<Field> {
        Field::ALL.iter().copied().find(|f| f.key() == key)
    }

    /// Free-text fields accept any string; the rest take a fixed label.
    pub fn is_free_text(&self) -> bool {
        matches!(self, Field::PrimaryProcess | Field::Annoyance)
    }

    /// The accepted labels for an enumerated field (empty for free text).
    pub fn labels(&self) -> Vec<&'static str> {
        fn labels_of<T: AnswerOption>() -> Vec<&'static str> {
            T::ALL.iter().map(|o| o.label()).collect()
        }

        match self {
            Field::TeamSize => labels_of::<TeamSize>(),
            Field::ToolCount => labels_of::<ToolCount>(),
            Field::ExecutionMode => labels_of::<ExecutionMode>(),
            Field::ErrorFrequency => labels_of::<ErrorFrequency>(),
            Field::Dependency => labels_of::<Dependency>(),
            Field::SpeedRequirement => labels_of::<SpeedRequirement>(),
            Field::Documentation => labels_of::<Documentation>(),
            Field::TimeSavings => labels_of::<TimeSavings>(),
            Field::HourlyRate => labels_of::<HourlyRate>(),
            Field::PrimaryProcess | Field::Annoyance => Vec::new(),
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl Serialize for Field {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

/// A problem found by [`ResponseRecord::validate`].
///
/// Validation is advisory. The engine scores any record; these issues are for
/// callers that want to reject bad input before it gets that far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseIssue {
    /// The field has no answer.
    Missing { field: Field },

    /// The field holds a value outside its label set.
    Unrecognized { field: Field, value: String },
}

impl ResponseIssue {
    pub fn field(&self) -> Field {
        match self {
            ResponseIssue::Missing { field } | ResponseIssue::Unrecognized { field, .. } => *field,
        }
    }

    pub fn is_unrecognized(&self) -> bool {
        matches!(self, ResponseIssue::Unrecognized { .. })
    }
}

impl std::fmt::Display for ResponseIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseIssue::Missing { field } => write!(f, "{}: no answer", field),
            ResponseIssue::Unrecognized { field, value } => {
                write!(f, "{}: unrecognized value {:?}", field, value)
            }
        }
    }
}

/// Answers to the questionnaire, exactly as submitted.
///
/// Every field defaults to the empty string, so partially completed sessions
/// and the first revision of the form (which had no `hourlyRate`) both load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResponseRecord {
    pub team_size: String,
    pub tool_count: String,
    pub primary_process: String,
    pub execution_mode: String,
    pub error_frequency: String,
    pub dependency: String,
    pub speed_requirement: String,
    pub annoyance: String,
    pub documentation: String,
    pub time_savings: String,
    pub hourly_rate: String,

    /// Lead-capture address; never read by the engine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ResponseRecord {
    /// Parse a record from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ResponseError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse a record from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ResponseError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ResponseError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ResponseError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load a record, picking the format from the file extension.
    ///
    /// `.json` is read as JSON; anything else as YAML (which also accepts
    /// plain JSON documents).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ResponseError> {
        let path = path.as_ref();
        if path.extension().map(|e| e == "json").unwrap_or(false) {
            Self::from_json_file(path)
        } else {
            Self::from_yaml_file(path)
        }
    }

    /// Raw answer for a field.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::TeamSize => &self.team_size,
            Field::ToolCount => &self.tool_count,
            Field::PrimaryProcess => &self.primary_process,
            Field::ExecutionMode => &self.execution_mode,
            Field::ErrorFrequency => &self.error_frequency,
            Field::Dependency => &self.dependency,
            Field::SpeedRequirement => &self.speed_requirement,
            Field::Annoyance => &self.annoyance,
            Field::Documentation => &self.documentation,
            Field::TimeSavings => &self.time_savings,
            Field::HourlyRate => &self.hourly_rate,
        }
    }

    /// Replace the answer for a field.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::TeamSize => self.team_size = value,
            Field::ToolCount => self.tool_count = value,
            Field::PrimaryProcess => self.primary_process = value,
            Field::ExecutionMode => self.execution_mode = value,
            Field::ErrorFrequency => self.error_frequency = value,
            Field::Dependency => self.dependency = value,
            Field::SpeedRequirement => self.speed_requirement = value,
            Field::Annoyance => self.annoyance = value,
            Field::Documentation => self.documentation = value,
            Field::TimeSavings => self.time_savings = value,
            Field::HourlyRate => self.hourly_rate = value,
        }
    }

    /// Builder-style [`set`](Self::set), handy in tests and fixtures.
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Typed view used by every calculator.
    pub fn answers(&self) -> Answers<'_> {
        Answers {
            record: self,
            team_size: TeamSize::from_label(&self.team_size),
            tool_count: ToolCount::from_label(&self.tool_count),
            execution_mode: ExecutionMode::from_label(&self.execution_mode),
            error_frequency: ErrorFrequency::from_label(&self.error_frequency),
            dependency: Dependency::from_label(&self.dependency),
            speed_requirement: SpeedRequirement::from_label(&self.speed_requirement),
            documentation: Documentation::from_label(&self.documentation),
            time_savings: TimeSavings::from_label(&self.time_savings),
            hourly_rate: HourlyRate::from_label(&self.hourly_rate),
        }
    }

    /// List missing answers and unrecognized labels, in question order.
    pub fn validate(&self) -> Vec<ResponseIssue> {
        let mut issues = Vec::new();

        for field in Field::ALL {
            let value = self.get(field);
            if value.trim().is_empty() {
                issues.push(ResponseIssue::Missing { field });
            } else if !field.is_free_text() && !field.labels().contains(&value) {
                issues.push(ResponseIssue::Unrecognized {
                    field,
                    value: value.to_string(),
                });
            }
        }

        issues
    }
}

/// Typed, borrowed view of a [`ResponseRecord`].
///
/// `None` means the answer was empty or not one of the field's labels.
#[derive(Debug, Clone, Copy)]
pub struct Answers<'a> {
    record: &'a ResponseRecord,
    pub team_size: Option<TeamSize>,
    pub tool_count: Option<ToolCount>,
    pub execution_mode: Option<ExecutionMode>,
    pub error_frequency: Option<ErrorFrequency>,
    pub dependency: Option<Dependency>,
    pub speed_requirement: Option<SpeedRequirement>,
    pub documentation: Option<Documentation>,
    pub time_savings: Option<TimeSavings>,
    pub hourly_rate: Option<HourlyRate>,
}

impl<'a> Answers<'a> {
    /// The record this view was built from.
    pub fn record(&self) -> &'a ResponseRecord {
        self.record
    }

    /// Name of the workflow, verbatim.
    pub fn process_name(&self) -> &'a str {
        &self.record.primary_process
    }

    /// The free-text pain point, verbatim (not trimmed).
    pub fn pain_point(&self) -> &'a str {
        &self.record.annoyance
    }

    /// Raw answer for a field.
    pub fn raw(&self, field: Field) -> &'a str {
        self.record.get(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_exact_match_only() {
        assert_eq!(TeamSize::from_label("50+"), Some(TeamSize::FiftyPlus));
        assert_eq!(TeamSize::from_label(" 50+"), None);
        assert_eq!(TeamSize::from_label(""), None);
        assert_eq!(Dependency::from_label("Yes"), Some(Dependency::SinglePerson));
        assert_eq!(ExecutionMode::from_label("It's a mess"), Some(ExecutionMode::Mess));
        assert_eq!(ExecutionMode::from_label("it's a mess"), None);
    }

    #[test]
    fn test_labels_round_trip() {
        for field in Field::ALL {
            for label in field.labels() {
                let record = ResponseRecord::default().with(field, label);
                assert!(
                    record.validate().iter().all(|i| i.field() != field || !i.is_unrecognized()),
                    "{} should accept {:?}",
                    field,
                    label
                );
            }
        }
    }

    #[test]
    fn test_field_keys() {
        for field in Field::ALL {
            assert_eq!(Field::from_key(field.key()), Some(field));
        }
        assert_eq!(Field::from_key("email"), None);
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let record = ResponseRecord::from_json(r#"{"teamSize": "6-20"}"#).unwrap();
        assert_eq!(record.team_size, "6-20");
        assert_eq!(record.hourly_rate, "");
        assert!(record.email.is_none());

        let answers = record.answers();
        assert_eq!(answers.team_size, Some(TeamSize::SixToTwenty));
        assert_eq!(answers.hourly_rate, None);
    }

    #[test]
    fn test_yaml_and_json_agree() {
        let yaml = r#"
teamSize: "21-50"
toolCount: "10-20"
primaryProcess: "client onboarding"
executionMode: "Partially automated"
errorFrequency: "Weekly"
dependency: "No"
speedRequirement: "Medium (hours)"
annoyance: "chasing signatures"
documentation: "Somewhat"
timeSavings: "3-5 hours"
hourlyRate: "Senior ($70-120/hr)"
"#;
        let from_yaml = ResponseRecord::from_yaml(yaml).unwrap();
        let json = serde_json::to_string(&from_yaml).unwrap();
        assert!(json.contains("\"primaryProcess\":\"client onboarding\""));
        assert!(!json.contains("email"));

        let from_json = ResponseRecord::from_json(&json).unwrap();
        assert_eq!(from_yaml, from_json);
        assert!(from_json.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_missing_and_unrecognized() {
        let record = ResponseRecord::default()
            .with(Field::TeamSize, "huge")
            .with(Field::PrimaryProcess, "invoicing");

        let issues = record.validate();
        assert!(issues.contains(&ResponseIssue::Unrecognized {
            field: Field::TeamSize,
            value: "huge".to_string(),
        }));
        assert!(issues.contains(&ResponseIssue::Missing { field: Field::Annoyance }));
        assert!(!issues.iter().any(|i| i.field() == Field::PrimaryProcess));
    }

    #[test]
    fn test_unrecognized_answer_is_none() {
        let record = ResponseRecord::default().with(Field::ErrorFrequency, "Hourly");
        let answers = record.answers();
        assert_eq!(answers.error_frequency, None);
        assert_eq!(answers.raw(Field::ErrorFrequency), "Hourly");
    }
}
