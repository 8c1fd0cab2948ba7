//! Recommendation generator.
//!
//! An ordered list of independent rules. Each rule looks at the answers and
//! the already computed classification and projection, and contributes at most
//! one [`Recommendation`]. Generation order is priority order: the
//! priority-band opener is always first, and the list is cut to
//! [`MAX_RECOMMENDATIONS`] entries after the rules run.
//!
//! | # | Rule | Type |
//! |---|------|------|
//! | 1 | Priority-band opener (always) | by band |
//! | 2 | Pain point longer than 10 characters | immediate |
//! | 3 | Documentation missing / partial | immediate |
//! | 4 | 10 or more tools | strategic |
//! | 5 | Daily or constant errors / weekly errors | immediate / strategic |
//! | 6 | Single-person dependency | structural |
//! | 7 | Savings of 5+ / 2+ hours a week | strategic |
//! | 8 | Instant or fast speed requirement | structural |
//! | 9 | Fewer than 3 so far: start small, then pilot | immediate |
//!
//! Descriptions quote the process name and pain point as the user typed them.

use crate::projection::{Projection, WEEKS_PER_YEAR};
use crate::response::{
    Answers, Dependency, Documentation, ErrorFrequency, Field, SpeedRequirement, ToolCount,
};
use crate::types::{PriorityBand, Recommendation, RecommendationType};

/// Upper bound on the roadmap length.
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Below this many entries the fallbacks are appended.
pub const MIN_RECOMMENDATIONS: usize = 3;

/// A pain point longer than this (trimmed) gets its own recommendation.
pub const PAIN_POINT_MIN_CHARS: usize = 10;

/// Weekly hours at or above which savings are framed in dollars.
pub const MAJOR_SAVINGS_HOURS: f64 = 5.0;

/// Weekly hours at or above which savings are mentioned at all.
pub const MINOR_SAVINGS_HOURS: f64 = 2.0;

/// Everything a rule may look at.
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    pub answers: &'a Answers<'a>,
    pub priority_band: PriorityBand,
    pub projection: &'a Projection,
}

impl RuleInput<'_> {
    fn process(&self) -> &str {
        self.answers.process_name()
    }
}

type Rule = fn(&RuleInput) -> Option<Recommendation>;

/// Rules 1-8, in priority order.
const RULES: [Rule; 8] = [
    priority_opener,
    pain_point_fix,
    documentation_gap,
    tool_consolidation,
    error_remediation,
    dependency_risk,
    savings_framing,
    real_time_framing,
];

/// Fillers appended in order while the roadmap is shorter than
/// [`MIN_RECOMMENDATIONS`].
const FALLBACKS: [fn(&RuleInput) -> Recommendation; 2] = [start_small, pilot_automation];

/// Run every rule and return the ranked roadmap (3 to 5 entries).
pub fn generate(input: &RuleInput) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> =
        RULES.iter().filter_map(|rule| rule(input)).collect();

    for fallback in FALLBACKS {
        if recommendations.len() >= MIN_RECOMMENDATIONS {
            break;
        }
        recommendations.push(fallback(input));
    }

    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}

fn priority_opener(input: &RuleInput) -> Option<Recommendation> {
    let process = input.process();

    let recommendation = match input.priority_band {
        PriorityBand::Critical => Recommendation::new(
            "Automate This Process Now",
            format!(
                "\"{}\" scores in the critical band. Every week it stays manual costs real hours, \
                 real errors and real money. Treat automation here as an operational fix, \
                 not a nice-to-have, and scope the first build this week.",
                process
            ),
            RecommendationType::Immediate,
        ),
        PriorityBand::High => Recommendation::new(
            "Make This Your Next Automation Project",
            format!(
                "\"{}\" is a strong automation candidate. Put it at the top of the next planning \
                 cycle, assign an owner, and define what \"done\" looks like before building.",
                process
            ),
            RecommendationType::Strategic,
        ),
        PriorityBand::Medium => Recommendation::new(
            "Plan a Targeted Automation Pilot",
            format!(
                "\"{}\" has clear automation potential in specific steps rather than end to end. \
                 Pick the single most repetitive step and pilot automating it before committing \
                 to a larger build.",
                process
            ),
            RecommendationType::Strategic,
        ),
        PriorityBand::Low => Recommendation::new(
            "Standardise Before You Automate",
            format!(
                "\"{}\" is not yet a high-return automation target. Make the process consistent \
                 first: agree on the steps, the owners and the inputs. A stable process is \
                 cheaper to automate later.",
                process
            ),
            RecommendationType::Structural,
        ),
    };

    Some(recommendation)
}

fn pain_point_fix(input: &RuleInput) -> Option<Recommendation> {
    let pain_point = input.answers.pain_point();
    if pain_point.trim().chars().count() <= PAIN_POINT_MIN_CHARS {
        return None;
    }

    Some(Recommendation::new(
        "Fix the Biggest Pain Point First",
        format!(
            "You mentioned: \"{}\". This is where to start. Automate or eliminate this specific \
             friction point in \"{}\" before building a comprehensive solution. \
             Quick wins build momentum.",
            pain_point,
            input.process()
        ),
        RecommendationType::Immediate,
    ))
}

fn documentation_gap(input: &RuleInput) -> Option<Recommendation> {
    let process = input.process();

    match input.answers.documentation {
        Some(doc) if doc.is_missing() => Some(Recommendation::new(
            "Document Before You Automate",
            format!(
                "Map out \"{}\" step-by-step: what happens, who does it, where data lives, \
                 what breaks. Without documentation, you're automating blind. This takes 2-3 hours \
                 and reveals exactly what to build.",
                process
            ),
            RecommendationType::Immediate,
        )),
        Some(Documentation::Somewhat) => Some(Recommendation::new(
            "Complete Your Process Documentation",
            format!(
                "You have partial documentation for \"{}\". Fill in the gaps: edge cases, \
                 error handling, data sources. Complete docs = clear automation roadmap.",
                process
            ),
            RecommendationType::Immediate,
        )),
        _ => None,
    }
}

fn tool_consolidation(input: &RuleInput) -> Option<Recommendation> {
    match input.answers.tool_count {
        Some(ToolCount::TenToTwenty) | Some(ToolCount::TwentyPlus) => Some(Recommendation::new(
            format!("Connect Your {} Tools", input.answers.raw(Field::ToolCount)),
            format!(
                "\"{}\" likely involves copying data between multiple tools. Use Zapier, Make, \
                 or n8n to connect these systems automatically. Start with the 2-3 tools you \
                 touch most often.",
                input.process()
            ),
            RecommendationType::Strategic,
        )),
        _ => None,
    }
}

fn error_remediation(input: &RuleInput) -> Option<Recommendation> {
    let process = input.process();

    match input.answers.error_frequency {
        Some(ErrorFrequency::Daily) | Some(ErrorFrequency::Constantly) => Some(Recommendation::new(
            "Eliminate Error-Prone Manual Steps",
            format!(
                "With {} errors in \"{}\", automation isn't optional. It's a reliability fix. \
                 Humans make transcription errors, forget steps, and get distracted. \
                 Systems don't.",
                input.answers.raw(Field::ErrorFrequency).to_lowercase(),
                process
            ),
            RecommendationType::Immediate,
        )),
        Some(ErrorFrequency::Weekly) => Some(Recommendation::new(
            "Reduce Error Rate Through Automation",
            format!(
                "Weekly errors in \"{}\" suggest manual steps that should be systematised. \
                 Identify which steps fail most often and automate those first.",
                process
            ),
            RecommendationType::Strategic,
        )),
        _ => None,
    }
}

fn dependency_risk(input: &RuleInput) -> Option<Recommendation> {
    if input.answers.dependency != Some(Dependency::SinglePerson) {
        return None;
    }

    Some(Recommendation::new(
        "Remove Single-Person Dependency",
        format!(
            "\"{}\" depends on one person. This is an operational risk (bus factor = 1). \
             Build a system, automated or documented, so anyone can execute this process. \
             Start by recording a walkthrough, then automate the repetitive parts.",
            input.process()
        ),
        RecommendationType::Structural,
    ))
}

fn savings_framing(input: &RuleInput) -> Option<Recommendation> {
    let weekly = input.projection.weekly_savings;
    let yearly_hours = (weekly * WEEKS_PER_YEAR).round();

    if weekly >= MAJOR_SAVINGS_HOURS {
        Some(Recommendation::new(
            format!(
                "Recover {} Hours/Week = ${}/Year",
                weekly,
                group_thousands(input.projection.annual_value)
            ),
            format!(
                "You're spending {} hours every week on \"{}\". That's {} hours annually. \
                 Automate the most repetitive 30% of this workflow to unlock 60-70% of the \
                 time savings immediately.",
                weekly,
                input.process(),
                yearly_hours
            ),
            RecommendationType::Strategic,
        ))
    } else if weekly >= MINOR_SAVINGS_HOURS {
        Some(Recommendation::new(
            "Small Process, Big Impact Over Time",
            format!(
                "{} hours/week on \"{}\" might not seem like much, but over a year that's {} hours. \
                 Automate it once, benefit forever.",
                weekly,
                input.process(),
                yearly_hours
            ),
            RecommendationType::Strategic,
        ))
    } else {
        None
    }
}

fn real_time_framing(input: &RuleInput) -> Option<Recommendation> {
    match input.answers.speed_requirement {
        Some(SpeedRequirement::Instant) | Some(SpeedRequirement::Fast) => Some(Recommendation::new(
            "Build Real-Time Automation",
            format!(
                "\"{}\" needs to run {}. Manual execution can't reliably hit this speed. \
                 Use APIs, webhooks, or real-time integrations to eliminate the human \
                 bottleneck entirely.",
                input.process(),
                input.answers.raw(Field::SpeedRequirement).to_lowercase()
            ),
            RecommendationType::Structural,
        )),
        _ => None,
    }
}

fn start_small(input: &RuleInput) -> Recommendation {
    Recommendation::new(
        "Start Small: Automate 20% of the Workflow",
        format!(
            "Don't try to automate all of \"{}\" at once. Pick the most repetitive 20%, usually \
             data entry or status updates, and build that first. Prove the ROI, then expand.",
            input.process()
        ),
        RecommendationType::Immediate,
    )
}

fn pilot_automation(input: &RuleInput) -> Recommendation {
    Recommendation::new(
        "Build a Pilot Automation",
        format!(
            "Start with a low-risk 10-20% automation of \"{}\" to validate cost recovery and \
             build organisational confidence in automation. Focus on the most annoying step \
             first: \"{}\".",
            input.process(),
            input.answers.pain_point()
        ),
        RecommendationType::Immediate,
    )
}

/// `34320` -> `"34,320"`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::ResponseRecord;

    fn roadmap(record: &ResponseRecord, band: PriorityBand) -> Vec<Recommendation> {
        let answers = record.answers();
        let projection = Projection::compute(&answers, 5.0);
        generate(&RuleInput {
            answers: &answers,
            priority_band: band,
            projection: &projection,
        })
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(7_800), "7,800");
        assert_eq!(group_thousands(34_320), "34,320");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_opener_type_follows_band() {
        let record = ResponseRecord::default().with(Field::PrimaryProcess, "payroll");
        let cases = [
            (PriorityBand::Critical, RecommendationType::Immediate),
            (PriorityBand::High, RecommendationType::Strategic),
            (PriorityBand::Medium, RecommendationType::Strategic),
            (PriorityBand::Low, RecommendationType::Structural),
        ];

        for (band, kind) in cases {
            let recs = roadmap(&record, band);
            assert_eq!(recs[0].kind, kind, "band {}", band);
            assert!(recs[0].description.contains("\"payroll\""));
        }
    }

    #[test]
    fn test_empty_answers_get_fallback() {
        // opener + light savings framing (3h default) + start small
        let recs = roadmap(&ResponseRecord::default(), PriorityBand::Low);
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[1].title, "Small Process, Big Impact Over Time");
        assert_eq!(recs[2].title, "Start Small: Automate 20% of the Workflow");
        assert_eq!(recs[2].kind, RecommendationType::Immediate);
    }

    #[test]
    fn test_truncated_to_five_in_rule_order() {
        let record = ResponseRecord::default()
            .with(Field::PrimaryProcess, "invoicing")
            .with(Field::Annoyance, "copy pasting numbers")
            .with(Field::Documentation, "No")
            .with(Field::ToolCount, "20+")
            .with(Field::ErrorFrequency, "Daily")
            .with(Field::Dependency, "Yes")
            .with(Field::TimeSavings, "10+ hours")
            .with(Field::SpeedRequirement, "Instant");

        let recs = roadmap(&record, PriorityBand::Critical);
        let titles: Vec<&str> = recs.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Automate This Process Now",
                "Fix the Biggest Pain Point First",
                "Document Before You Automate",
                "Connect Your 20+ Tools",
                "Eliminate Error-Prone Manual Steps",
            ]
        );
    }

    #[test]
    fn test_pain_point_threshold() {
        let short = ResponseRecord::default().with(Field::Annoyance, "  slow sync  ");
        assert!(!roadmap(&short, PriorityBand::Low)
            .iter()
            .any(|r| r.title == "Fix the Biggest Pain Point First"));

        let long = ResponseRecord::default().with(Field::Annoyance, "slow syncing");
        let recs = roadmap(&long, PriorityBand::Low);
        assert_eq!(recs[1].title, "Fix the Biggest Pain Point First");
        assert!(recs[1].description.contains("\"slow syncing\""));
    }

    #[test]
    fn test_documentation_variants() {
        let somewhat = ResponseRecord::default().with(Field::Documentation, "Somewhat");
        let recs = roadmap(&somewhat, PriorityBand::Medium);
        assert!(recs.iter().any(|r| r.title == "Complete Your Process Documentation"
            && r.kind == RecommendationType::Immediate));

        let thorough = ResponseRecord::default().with(Field::Documentation, "Yes, thoroughly");
        let recs = roadmap(&thorough, PriorityBand::Medium);
        assert!(!recs.iter().any(|r| r.title.contains("Document")));
    }

    #[test]
    fn test_weekly_errors_are_strategic() {
        let record = ResponseRecord::default().with(Field::ErrorFrequency, "Weekly");
        let recs = roadmap(&record, PriorityBand::Medium);
        let rec = recs
            .iter()
            .find(|r| r.title == "Reduce Error Rate Through Automation")
            .unwrap();
        assert_eq!(rec.kind, RecommendationType::Strategic);
    }

    #[test]
    fn test_savings_framing_uses_annual_value() {
        let record = ResponseRecord::default()
            .with(Field::TimeSavings, "10+ hours")
            .with(Field::HourlyRate, "Mid-level ($40-70/hr)");

        let recs = roadmap(&record, PriorityBand::High);
        assert!(recs.iter().any(|r| r.title == "Recover 12 Hours/Week = $34,320/Year"));
    }

    #[test]
    fn test_small_savings_not_mentioned() {
        let record = ResponseRecord::default().with(Field::TimeSavings, "1-2 hours");
        let recs = roadmap(&record, PriorityBand::Low);
        assert!(!recs.iter().any(|r| r.kind == RecommendationType::Strategic));
    }

    #[test]
    fn test_both_fallbacks_fill_to_minimum() {
        // Only the opener fires: 1.5 hours/week is below the savings threshold
        let record = ResponseRecord::default().with(Field::TimeSavings, "1-2 hours");
        let recs = roadmap(&record, PriorityBand::Low);

        assert_eq!(recs.len(), MIN_RECOMMENDATIONS);
        assert_eq!(recs[1].title, "Start Small: Automate 20% of the Workflow");
        assert_eq!(recs[2].title, "Build a Pilot Automation");
    }

    #[test]
    fn test_real_time_framing_lowercases_speed() {
        let record = ResponseRecord::default()
            .with(Field::PrimaryProcess, "lead routing")
            .with(Field::SpeedRequirement, "Fast (minutes)");
        let recs = roadmap(&record, PriorityBand::Medium);
        let rec = recs.iter().find(|r| r.title == "Build Real-Time Automation").unwrap();
        assert!(rec.description.contains("needs to run fast (minutes)"));
        assert_eq!(rec.kind, RecommendationType::Structural);
    }
}
