//! Financial and effort projection.
//!
//! Turns the time-savings and hourly-rate buckets into representative numbers,
//! then derives the annual value, a rough build estimate and the break-even
//! period.
//!
//! Break-even compares build cost (`hours × rate`) with monthly savings
//! (`weekly hours × 4.33 × rate`). The rate appears on both sides and cancels,
//! so only hours are used here and the result does not depend on the rate.

use crate::response::{Answers, Documentation, ExecutionMode, HourlyRate, TimeSavings, ToolCount};

/// Weekly hours assumed when the answer is "No idea" or missing.
pub const DEFAULT_WEEKLY_SAVINGS: f64 = 3.0;

/// Hourly rate used when the answer is missing or unrecognized.
pub const DEFAULT_HOURLY_RATE: u32 = 50;

pub const WEEKS_PER_YEAR: f64 = 52.0;
pub const WEEKS_PER_MONTH: f64 = 4.33;

pub const BASE_BUILD_HOURS: i32 = 20;
pub const MIN_BUILD_HOURS: u32 = 15;

/// Error dimension score at or above which error handling adds build time.
pub const ERROR_HEAVY_SCORE: f64 = 8.0;

/// Break-even value standing for "never pays back".
pub const BREAK_EVEN_NEVER: u32 = 999;

/// Upper bound on reported break-even months.
pub const BREAK_EVEN_CAP_MONTHS: u32 = 36;

/// Representative weekly hours saved for a bucket.
pub fn weekly_savings(savings: Option<TimeSavings>) -> f64 {
    match savings {
        Some(TimeSavings::TenPlus) => 12.0,
        Some(TimeSavings::FiveToTen) => 7.5,
        Some(TimeSavings::ThreeToFive) => 4.0,
        Some(TimeSavings::OneToTwo) => 1.5,
        Some(TimeSavings::NoIdea) | None => DEFAULT_WEEKLY_SAVINGS,
    }
}

/// Representative dollar rate for a seniority bucket.
pub fn hourly_rate(rate: Option<HourlyRate>) -> u32 {
    match rate {
        Some(HourlyRate::Junior) => 32,
        Some(HourlyRate::Mid) => 55,
        Some(HourlyRate::Senior) => 95,
        Some(HourlyRate::Leadership) => 150,
        None => DEFAULT_HOURLY_RATE,
    }
}

/// Yearly value of the saved hours, rounded to whole units.
pub fn annual_value(weekly_savings: f64, hourly_rate: u32) -> u64 {
    (weekly_savings * WEEKS_PER_YEAR * f64::from(hourly_rate))
        .round()
        .max(0.0) as u64
}

/// Rough implementation effort in hours.
///
/// `error_score` is the Error Frequency dimension score.
pub fn estimated_build_hours(answers: &Answers, error_score: f64) -> u32 {
    let mut hours = BASE_BUILD_HOURS;

    hours += match answers.tool_count {
        Some(ToolCount::TwentyPlus) => 30,
        Some(ToolCount::TenToTwenty) => 20,
        Some(ToolCount::FiveToTen) => 10,
        Some(ToolCount::UnderFive) | None => 0,
    };

    hours += match answers.execution_mode {
        Some(ExecutionMode::Mess) => 15,
        Some(ExecutionMode::NotSure) => 10,
        Some(ExecutionMode::Manual) | Some(ExecutionMode::PartiallyAutomated) | None => 0,
    };

    if answers.documentation == Some(Documentation::Thorough) {
        hours -= 10;
    }

    if error_score >= ERROR_HEAVY_SCORE {
        hours += 10;
    }

    (hours.max(0) as u32).max(MIN_BUILD_HOURS)
}

/// Months until the savings pay for the build, capped at
/// [`BREAK_EVEN_CAP_MONTHS`].
pub fn break_even_months(build_hours: u32, weekly_savings: f64) -> u32 {
    let months = if weekly_savings > 0.0 {
        let monthly_hours = weekly_savings * WEEKS_PER_MONTH;
        (f64::from(build_hours) / monthly_hours).ceil() as u32
    } else {
        BREAK_EVEN_NEVER
    };

    months.min(BREAK_EVEN_CAP_MONTHS)
}

/// All projected figures for one record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub weekly_savings: f64,
    pub hourly_rate: u32,
    pub annual_value: u64,
    pub estimated_build_hours: u32,
    pub break_even_months: u32,
}

impl Projection {
    pub fn compute(answers: &Answers, error_score: f64) -> Self {
        let weekly = weekly_savings(answers.time_savings);
        let rate = hourly_rate(answers.hourly_rate);
        let build_hours = estimated_build_hours(answers, error_score);

        Self {
            weekly_savings: weekly,
            hourly_rate: rate,
            annual_value: annual_value(weekly, rate),
            estimated_build_hours: build_hours,
            break_even_months: break_even_months(build_hours, weekly),
        }
    }
}
