//! Bottleneck selection.
//!
//! The user's own description of the pain point wins. When they left it blank
//! a sentence is built from the execution mode, error frequency and
//! dependency answers, using the raw answer text.

use crate::response::{Answers, Dependency, Field};

/// Pick or synthesize the bottleneck description.
pub fn select_bottleneck(answers: &Answers) -> String {
    let pain_point = answers.pain_point();
    if !pain_point.trim().is_empty() {
        return pain_point.to_string();
    }

    let holder = match answers.dependency {
        Some(Dependency::SinglePerson) => "a single person",
        Some(Dependency::No) | Some(Dependency::MultiplePeople) | None => "multiple people",
    };

    format!(
        "{} process with {} error frequency and dependency on {}",
        answers.raw(Field::ExecutionMode),
        answers.raw(Field::ErrorFrequency).to_lowercase(),
        holder
    )
}
