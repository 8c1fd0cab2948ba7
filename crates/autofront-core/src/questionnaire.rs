//! The fixed questionnaire.
//!
//! Eleven questions, asked in order, one per [`Field`]. Radio options are the
//! exact labels the scoring enums accept.

use serde::Serialize;

use crate::response::Field;

/// How a question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Pick one of `options`.
    Radio,

    /// Single-line free text.
    Text,

    /// Multi-line free text.
    TextArea,
}

/// One questionnaire step.
#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub id: Field,
    pub text: &'static str,
    pub tooltip: Option<&'static str>,
    pub example: Option<&'static str>,
    pub placeholder: Option<&'static str>,
    pub kind: QuestionKind,
    pub options: &'static [&'static str],
}

/// Number of steps in the questionnaire.
pub const STEP_COUNT: usize = 11;

/// The questionnaire, in step order.
pub static QUESTIONS: [Question; STEP_COUNT] = [
    Question {
        id: Field::TeamSize,
        text: "How big is your team?",
        tooltip: Some("Larger teams suffer more from \"communication debt\" which automation can solve."),
        example: None,
        placeholder: None,
        kind: QuestionKind::Radio,
        options: &["1-5", "6-20", "21-50", "50+"],
    },
    Question {
        id: Field::ToolCount,
        text: "How many tools does your team use daily?",
        tooltip: Some("The more tools you use, the higher the risk of data silos and manual context switching."),
        example: None,
        placeholder: None,
        kind: QuestionKind::Radio,
        options: &["Less than 5", "5-10", "10-20", "20+"],
    },
    Question {
        id: Field::PrimaryProcess,
        text: "Which process takes the most time each week?",
        tooltip: Some("Focus on a single recurring workflow rather than general tasks."),
        example: Some("Generating monthly investor reports or client onboarding."),
        placeholder: Some("e.g., customer onboarding, expense approvals, reporting"),
        kind: QuestionKind::Text,
        options: &[],
    },
    Question {
        id: Field::ExecutionMode,
        text: "How is this process currently executed?",
        tooltip: Some("Manual processes have the highest \"Automation Alpha\": the greatest return on effort."),
        example: None,
        placeholder: None,
        kind: QuestionKind::Radio,
        options: &["Manually", "Partially automated", "Not sure", "It's a mess"],
    },
    Question {
        id: Field::ErrorFrequency,
        text: "How often do errors or delays happen in this process?",
        tooltip: Some("Frequent errors indicate a process that is too complex for consistent human execution."),
        example: None,
        placeholder: None,
        kind: QuestionKind::Radio,
        options: &["Never", "Sometimes", "Weekly", "Daily", "Constantly"],
    },
    Question {
        id: Field::Dependency,
        text: "Does this process depend on one specific person?",
        tooltip: Some("Single-person dependency is a \"Bus Factor\" risk that creates operational fragility."),
        example: None,
        placeholder: None,
        kind: QuestionKind::Radio,
        options: &["Yes", "No", "Multiple people can do it"],
    },
    Question {
        id: Field::SpeedRequirement,
        text: "How quickly does this process need to run?",
        tooltip: Some("Processes requiring \"instant\" speed are the primary candidates for API-led automation."),
        example: None,
        placeholder: None,
        kind: QuestionKind::Radio,
        options: &["Slow (days)", "Medium (hours)", "Fast (minutes)", "Instant"],
    },
    Question {
        id: Field::Annoyance,
        text: "If you could remove one annoyance from this workflow, what would it be?",
        tooltip: Some("Identifying the emotional pain point often reveals the true technical bottleneck."),
        example: Some("Copy-pasting data from the CRM to the invoice generator 20 times a day."),
        placeholder: Some("Describe the biggest pain point"),
        kind: QuestionKind::TextArea,
        options: &[],
    },
    Question {
        id: Field::Documentation,
        text: "Do you currently document your processes?",
        tooltip: Some("Documentation is the \"pseudo-code\" of automation. If you can describe it, it can be automated."),
        example: None,
        placeholder: None,
        kind: QuestionKind::Radio,
        options: &["Yes, thoroughly", "Somewhat", "No", "We tried but failed"],
    },
    Question {
        id: Field::TimeSavings,
        text: "What would a fully automated version save you each week?",
        tooltip: Some("This feeds the \"Hidden Labor Cost\": the money lost to manual tasks."),
        example: None,
        placeholder: None,
        kind: QuestionKind::Radio,
        options: &["1-2 hours", "3-5 hours", "5-10 hours", "10+ hours", "No idea"],
    },
    Question {
        id: Field::HourlyRate,
        text: "Who usually does this work?",
        tooltip: Some("Used to price the hours this process consumes. Pick the closest fit."),
        example: None,
        placeholder: None,
        kind: QuestionKind::Radio,
        options: &[
            "Junior (under $40/hr)",
            "Mid-level ($40-70/hr)",
            "Senior ($70-120/hr)",
            "Leadership ($120+/hr)",
        ],
    },
];

/// The question for a 1-based step number.
pub fn question_for_step(step: usize) -> Option<&'static Question> {
    step.checked_sub(1).and_then(|index| QUESTIONS.get(index))
}

/// The question that asks for `field`.
pub fn question_for_field(field: Field) -> &'static Question {
    // QUESTIONS is in Field::ALL order
    &QUESTIONS[field as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_questions_follow_field_order() {
        for (question, field) in QUESTIONS.iter().zip(Field::ALL) {
            assert_eq!(question.id, field);
            assert_eq!(question_for_field(field).id, field);
        }
    }

    #[test]
    fn test_radio_options_match_enum_labels() {
        for question in &QUESTIONS {
            match question.kind {
                QuestionKind::Radio => {
                    assert_eq!(question.options.to_vec(), question.id.labels(), "{}", question.id)
                }
                QuestionKind::Text | QuestionKind::TextArea => {
                    assert!(question.options.is_empty());
                    assert!(question.id.is_free_text());
                }
            }
        }
    }

    #[test]
    fn test_step_lookup_is_one_based() {
        assert!(question_for_step(0).is_none());
        assert_eq!(question_for_step(1).map(|q| q.id), Some(Field::TeamSize));
        assert_eq!(question_for_step(STEP_COUNT).map(|q| q.id), Some(Field::HourlyRate));
        assert!(question_for_step(STEP_COUNT + 1).is_none());
    }
}
