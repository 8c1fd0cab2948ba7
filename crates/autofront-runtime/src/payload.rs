//! Outbound payloads built from a record and its result.
//!
//! **These conversions are pure data transformations with no semantic logic.**
//! Every figure comes from the already computed [`DiagnosticResult`]; nothing
//! here re-scores anything.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use autofront_core::{ConfidenceLevel, DiagnosticResult, PriorityBand, Recommendation, ResponseRecord};

/// Everything a payload may draw from.
#[derive(Debug, Clone, Copy)]
pub struct LeadContext<'a> {
    pub email: &'a str,
    pub record: &'a ResponseRecord,
    pub result: &'a DiagnosticResult,
    pub submitted_at: DateTime<Utc>,
}

/// Body sent to the lead capture form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmailCapturePayload {
    pub email: String,
    pub automation_score: u8,
    pub priority_band: PriorityBand,
    pub confidence_level: ConfidenceLevel,
    pub process_name: String,
    pub weekly_savings: f64,
    pub annual_value: u64,
    pub break_even_months: u32,
    pub primary_bottleneck: String,
    /// RFC 3339, millisecond precision
    pub timestamp: String,
    pub full_responses: ResponseRecord,
}

impl From<&LeadContext<'_>> for EmailCapturePayload {
    fn from(ctx: &LeadContext<'_>) -> Self {
        Self {
            email: ctx.email.to_string(),
            automation_score: ctx.result.total_score,
            priority_band: ctx.result.priority_band,
            confidence_level: ctx.result.confidence_level,
            process_name: ctx.record.primary_process.clone(),
            weekly_savings: ctx.result.weekly_savings,
            annual_value: ctx.result.annual_value,
            break_even_months: ctx.result.break_even_months,
            primary_bottleneck: ctx.result.bottleneck.clone(),
            timestamp: ctx.submitted_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            full_responses: ctx.record.clone(),
        }
    }
}

/// Body sent to the workflow webhook.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    pub email: String,
    pub score: u8,
    pub priority: PriorityBand,
    pub confidence: ConfidenceLevel,
    pub annual_value: u64,
    pub weekly_savings: f64,
    pub break_even_months: u32,
    pub process_name: String,
    pub bottleneck: String,
    pub hourly_rate: String,
    pub team_size: String,
    pub tool_count: String,
    pub error_frequency: String,
    pub recommendations: Vec<Recommendation>,
}

impl WebhookPayload {
    /// Build the payload with the first `recommendation_limit` recommendations.
    pub fn new(ctx: &LeadContext<'_>, recommendation_limit: usize) -> Self {
        Self {
            email: ctx.email.to_string(),
            score: ctx.result.total_score,
            priority: ctx.result.priority_band,
            confidence: ctx.result.confidence_level,
            annual_value: ctx.result.annual_value,
            weekly_savings: ctx.result.weekly_savings,
            break_even_months: ctx.result.break_even_months,
            process_name: ctx.record.primary_process.clone(),
            bottleneck: ctx.result.bottleneck.clone(),
            hourly_rate: ctx.record.hourly_rate.clone(),
            team_size: ctx.record.team_size.clone(),
            tool_count: ctx.record.tool_count.clone(),
            error_frequency: ctx.record.error_frequency.clone(),
            recommendations: ctx
                .result
                .recommendations
                .iter()
                .take(recommendation_limit)
                .cloned()
                .collect(),
        }
    }
}
