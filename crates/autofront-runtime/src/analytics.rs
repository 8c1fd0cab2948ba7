//! Privacy-first event tracking.
//!
//! Events are structured `tracing` events under the `analytics` target; route
//! them wherever the subscriber sends logs. No answers leave the process
//! through here beyond the few properties each event names.

use chrono::{SecondsFormat, Utc};
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};

use autofront_core::ResponseRecord;

/// Tracing target for every analytics event.
pub const ANALYTICS_TARGET: &str = "analytics";

/// The tracked events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsEvent {
    DiagnosticStarted,
    DiagnosticFinished,
    ReportViewed,
    LeadCaptureSubmitted,
    DiagnosticReset,
}

impl AnalyticsEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalyticsEvent::DiagnosticStarted => "diagnostic_started",
            AnalyticsEvent::DiagnosticFinished => "diagnostic_finished",
            AnalyticsEvent::ReportViewed => "report_viewed",
            AnalyticsEvent::LeadCaptureSubmitted => "lead_capture_submitted",
            AnalyticsEvent::DiagnosticReset => "diagnostic_reset",
        }
    }
}

impl std::fmt::Display for AnalyticsEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event sink plus start/finish counters for the completion rate.
#[derive(Debug)]
pub struct Analytics {
    enabled: bool,
    starts: AtomicU64,
    finishes: AtomicU64,
}

impl Analytics {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            starts: AtomicU64::new(0),
            finishes: AtomicU64::new(0),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Emit one event. `properties` should be a JSON object (or null).
    pub fn track(&self, event: AnalyticsEvent, properties: serde_json::Value) {
        if !self.enabled {
            return;
        }

        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        tracing::info!(
            target: ANALYTICS_TARGET,
            event = event.as_str(),
            %timestamp,
            properties = %properties,
            "Analytics event"
        );
    }

    /// Count a started questionnaire.
    pub fn record_start(&self, source: &str) {
        let starts = self.starts.fetch_add(1, Ordering::Relaxed) + 1;
        self.track(
            AnalyticsEvent::DiagnosticStarted,
            json!({ "source": source, "session_starts": starts }),
        );
    }

    /// Count a finished questionnaire and log the running completion rate.
    pub fn record_finish(&self, record: &ResponseRecord) {
        let finishes = self.finishes.fetch_add(1, Ordering::Relaxed) + 1;
        self.track(
            AnalyticsEvent::DiagnosticFinished,
            json!({
                "process_name": record.primary_process,
                "manual_hours_leak": record.time_savings,
                "session_finishes": finishes,
            }),
        );
        self.log_session_summary();
    }

    pub fn starts(&self) -> u64 {
        self.starts.load(Ordering::Relaxed)
    }

    pub fn finishes(&self) -> u64 {
        self.finishes.load(Ordering::Relaxed)
    }

    /// Finishes as a percentage of starts. `None` before the first start.
    pub fn completion_rate(&self) -> Option<f64> {
        let starts = self.starts();
        if starts == 0 {
            return None;
        }
        Some(self.finishes() as f64 / starts as f64 * 100.0)
    }

    pub fn log_session_summary(&self) {
        if !self.enabled {
            return;
        }

        match self.completion_rate() {
            Some(rate) => tracing::info!(
                target: ANALYTICS_TARGET,
                starts = self.starts(),
                finishes = self.finishes(),
                "Completion Rate: {:.1}%",
                rate
            ),
            None => tracing::info!(
                target: ANALYTICS_TARGET,
                finishes = self.finishes(),
                "Completion Rate: no sessions started"
            ),
        }
    }
}

impl Default for Analytics {
    fn default() -> Self {
        Self::new(true)
    }
}
