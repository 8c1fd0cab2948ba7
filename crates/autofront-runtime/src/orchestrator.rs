//! Runtime orchestrator around the scoring engine.
//!
//! The orchestrator ties one questionnaire run together:
//! - Session start, finish and reset with analytics
//! - Deterministic scoring through `autofront_core::evaluate`
//! - Lead capture fan-out to both sinks via the [`Submitter`]
//!
//! Scoring is synchronous and never fails; only submission touches the
//! network.

use std::sync::Arc;
use std::time::Duration;
use serde_json::json;
use thiserror::Error;

use autofront_core::{evaluate, DiagnosticResult, ResponseRecord};

use crate::analytics::{Analytics, AnalyticsEvent};
use crate::config::RuntimeConfig;
use crate::session::SessionState;
use crate::submission::{Sink, SubmissionError, SubmissionReport, Submitter};

/// Errors from the runtime orchestrator.
#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Submission setup failed: {0}")]
    Submission(#[from] SubmissionError),
}

/// Runs a diagnostic session end to end.
pub struct DiagnosticOrchestrator {
    /// Configuration
    config: RuntimeConfig,

    /// Outbound sinks
    submitter: Submitter,

    /// Event tracking and completion counters
    analytics: Analytics,
}

impl DiagnosticOrchestrator {
    /// Create an orchestrator with HTTP sinks taken from `config`.
    pub fn new(config: RuntimeConfig) -> Result<Self, RuntimeError> {
        let submitter = Submitter::from_config(&config.submission)?;
        Ok(Self::with_submitter(config, submitter))
    }

    fn with_submitter(config: RuntimeConfig, submitter: Submitter) -> Self {
        let analytics = Analytics::new(config.analytics.enabled);
        Self {
            config,
            submitter,
            analytics,
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn analytics(&self) -> &Analytics {
        &self.analytics
    }

    /// Move the session to the first question and count the start.
    pub fn start_session(&self, state: &mut SessionState, source: &str) {
        state.start();
        self.analytics.record_start(source);
    }

    /// Score a record and track the report view.
    pub fn diagnose(&self, record: &ResponseRecord) -> DiagnosticResult {
        let result = evaluate(record);
        self.analytics
            .track(AnalyticsEvent::ReportViewed, json!({ "process": record.primary_process }));
        result
    }

    /// Count a finished questionnaire and score it.
    pub fn finish_session(&self, state: &SessionState) -> DiagnosticResult {
        self.analytics.record_finish(&state.responses);
        self.diagnose(&state.responses)
    }

    /// Discard the session.
    pub fn reset_session(&self, state: &mut SessionState) {
        self.analytics.track(AnalyticsEvent::DiagnosticReset, serde_json::Value::Null);
        state.reset();
    }

    /// Send the lead to both sinks.
    ///
    /// The payload timestamp is `determinism.submitted_at` when configured.
    pub async fn capture_lead(
        &self,
        record: &ResponseRecord,
        result: &DiagnosticResult,
        email: &str,
    ) -> SubmissionReport {
        let submitted_at = self.config.determinism.timestamp();
        let report = self.submitter.submit(record, result, email, submitted_at).await;

        if report.lead_captured() {
            self.analytics.track(
                AnalyticsEvent::LeadCaptureSubmitted,
                json!({ "score": result.total_score }),
            );
        } else {
            tracing::warn!(
                email_capture = ?report.email_capture,
                webhook = ?report.webhook,
                "Lead was not captured"
            );
        }

        report
    }
}

/// Builder for DiagnosticOrchestrator.
pub struct DiagnosticOrchestratorBuilder {
    config: RuntimeConfig,
    email_capture: Option<(Arc<dyn Sink>, Duration)>,
    webhook: Option<(Arc<dyn Sink>, Duration)>,
}

impl DiagnosticOrchestratorBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            email_capture: None,
            webhook: None,
        }
    }

    /// Set the configuration.
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a custom email capture sink instead of the configured endpoint.
    pub fn email_capture_sink(mut self, sink: Arc<dyn Sink>) -> Self {
        let timeout = self.config.submission.email_capture.timeout;
        self.email_capture = Some((sink, timeout));
        self
    }

    /// Use a custom webhook sink instead of the configured endpoint.
    pub fn webhook_sink(mut self, sink: Arc<dyn Sink>) -> Self {
        let timeout = self.config.submission.webhook.timeout;
        self.webhook = Some((sink, timeout));
        self
    }

    /// Build the orchestrator.
    pub fn build(self) -> Result<DiagnosticOrchestrator, RuntimeError> {
        let mut submitter = Submitter::from_config(&self.config.submission)?;
        if let Some((sink, timeout)) = self.email_capture {
            submitter = submitter.with_email_capture(sink, timeout);
        }
        if let Some((sink, timeout)) = self.webhook {
            submitter = submitter.with_webhook(sink, timeout);
        }

        Ok(DiagnosticOrchestrator::with_submitter(self.config, submitter))
    }
}

impl Default for DiagnosticOrchestratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::{SinkError, SinkOutcome};
    use async_trait::async_trait;
    use autofront_core::{Field, PriorityBand};
    use chrono::{TimeZone, Utc};
    use std::sync::Mutex;

    #[derive(Default)]
    struct CaptureSink {
        payloads: Mutex<Vec<serde_json::Value>>,
    }

    #[async_trait]
    impl Sink for CaptureSink {
        fn name(&self) -> &str {
            "capture"
        }

        async fn send(&self, payload: &serde_json::Value) -> Result<(), SinkError> {
            self.payloads.lock().unwrap().push(payload.clone());
            Ok(())
        }
    }

    fn completed_session() -> SessionState {
        let mut state = SessionState::new();
        state.responses = ResponseRecord::default()
            .with(Field::TeamSize, "50+")
            .with(Field::ToolCount, "20+")
            .with(Field::PrimaryProcess, "invoicing")
            .with(Field::ExecutionMode, "Manually")
            .with(Field::ErrorFrequency, "Daily")
            .with(Field::Dependency, "Yes")
            .with(Field::SpeedRequirement, "Instant")
            .with(Field::Annoyance, "copy pasting numbers")
            .with(Field::Documentation, "No")
            .with(Field::TimeSavings, "10+ hours")
            .with(Field::HourlyRate, "Mid-level ($40-70/hr)");
        state.current_step = 11;
        state
    }

    #[tokio::test]
    async fn test_orchestrator_without_sinks() {
        let orchestrator = DiagnosticOrchestrator::new(RuntimeConfig::default()).unwrap();
        let state = completed_session();

        let result = orchestrator.finish_session(&state);
        assert_eq!(result.total_score, 89);
        assert_eq!(result.priority_band, PriorityBand::Critical);

        let report = orchestrator
            .capture_lead(&state.responses, &result, "ops@example.com")
            .await;
        assert_eq!(report.email_capture, SinkOutcome::Skipped);
        assert!(!report.lead_captured());
    }

    #[tokio::test]
    async fn test_capture_lead_uses_fixed_timestamp() {
        let mut config = RuntimeConfig::default();
        config.determinism.submitted_at = Some(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap());

        let sink = Arc::new(CaptureSink::default());
        let orchestrator = DiagnosticOrchestratorBuilder::new()
            .config(config)
            .email_capture_sink(sink.clone())
            .build()
            .unwrap();

        let state = completed_session();
        let result = orchestrator.diagnose(&state.responses);
        let report = orchestrator
            .capture_lead(&state.responses, &result, "ops@example.com")
            .await;

        assert!(report.lead_captured());
        let payloads = sink.payloads.lock().unwrap();
        assert_eq!(payloads[0]["timestamp"], "2026-01-15T10:00:00.000Z");
        assert_eq!(payloads[0]["annualValue"], 34_320);
    }

    #[tokio::test]
    async fn test_session_lifecycle_counts() {
        let orchestrator = DiagnosticOrchestratorBuilder::default().build().unwrap();

        let mut first = SessionState::new();
        orchestrator.start_session(&mut first, "cli");
        assert_eq!(first.current_step, 1);

        let mut second = completed_session();
        orchestrator.start_session(&mut second, "cli");
        orchestrator.finish_session(&second);

        assert_eq!(orchestrator.analytics().completion_rate(), Some(50.0));

        orchestrator.reset_session(&mut second);
        assert_eq!(second, SessionState::default());
    }
}
