//! Error Frequency: a direct lookup on how often the process breaks.

use crate::response::{Answers, ErrorFrequency};
use crate::types::Dimension;

use super::DimensionCalculator;

/// Score used when the answer is missing or unrecognized.
pub const DEFAULT_ERROR_SCORE: f64 = 5.0;

/// The Error Frequency calculator.
pub struct ErrorFrequencyCalculator;

impl ErrorFrequencyCalculator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ErrorFrequencyCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl DimensionCalculator for ErrorFrequencyCalculator {
    fn dimension(&self) -> Dimension {
        Dimension::ErrorFrequency
    }

    fn score(&self, answers: &Answers) -> f64 {
        match answers.error_frequency {
            Some(ErrorFrequency::Constantly) => 10.0,
            Some(ErrorFrequency::Daily) => 8.0,
            Some(ErrorFrequency::Weekly) => 6.0,
            Some(ErrorFrequency::Sometimes) => 3.0,
            Some(ErrorFrequency::Never) => 1.0,
            None => DEFAULT_ERROR_SCORE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::{Field, ResponseRecord};

    #[test]
    fn test_lookup_table() {
        let cases = [
            ("Never", 1.0),
            ("Sometimes", 3.0),
            ("Weekly", 6.0),
            ("Daily", 8.0),
            ("Constantly", 10.0),
            ("", DEFAULT_ERROR_SCORE),
            ("every hour", DEFAULT_ERROR_SCORE),
        ];

        for (label, expected) in cases {
            let record = ResponseRecord::default().with(Field::ErrorFrequency, label);
            assert_eq!(
                ErrorFrequencyCalculator::new().score(&record.answers()),
                expected,
                "errorFrequency = {:?}",
                label
            );
        }
    }
}
