//! Outbound lead submission.
//!
//! Two independent sinks receive JSON payloads: the lead capture form and the
//! workflow webhook. They are dispatched concurrently; one failing never
//! cancels the other, and nothing here can change the result being
//! submitted.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use autofront_core::{DiagnosticResult, ResponseRecord};

use crate::config::{SinkConfig, SubmissionConfig};
use crate::payload::{EmailCapturePayload, LeadContext, WebhookPayload};

/// Errors from a single sink.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("Payload encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Errors that stop a submission before any sink is tried.
#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("Invalid email address: '{0}'")]
    InvalidEmail(String),

    #[error("Sink setup failed: {0}")]
    Sink(#[from] SinkError),
}

/// A destination for one JSON payload.
#[async_trait]
pub trait Sink: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    async fn send(&self, payload: &serde_json::Value) -> Result<(), SinkError>;
}

/// POSTs the payload as JSON. Any non-2xx status is a failure.
pub struct HttpSink {
    name: String,
    endpoint: String,
    http_client: reqwest::Client,
}

impl HttpSink {
    pub fn new(
        name: impl Into<String>,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SinkError> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            name: name.into(),
            endpoint: endpoint.into(),
            http_client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Sink for HttpSink {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&self, payload: &serde_json::Value) -> Result<(), SinkError> {
        let response = self.http_client.post(&self.endpoint).json(payload).send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        Err(SinkError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

/// What happened to one payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkOutcome {
    Delivered,

    /// Not attempted: no sink configured, or the submission was rejected.
    Skipped,

    Failed(String),
}

impl SinkOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, SinkOutcome::Delivered)
    }
}

/// Per-sink outcomes for one submission.
#[derive(Debug)]
pub struct SubmissionReport {
    pub email_capture: SinkOutcome,
    pub webhook: SinkOutcome,

    /// Set when the submission was refused before dispatch.
    pub rejected: Option<SubmissionError>,
}

impl SubmissionReport {
    fn rejected(error: SubmissionError) -> Self {
        Self {
            email_capture: SinkOutcome::Skipped,
            webhook: SinkOutcome::Skipped,
            rejected: Some(error),
        }
    }

    /// The lead counts as captured once the email capture sink has it.
    pub fn lead_captured(&self) -> bool {
        self.email_capture.is_delivered()
    }
}

/// A sink plus the deadline applied around it.
#[derive(Clone)]
struct Dispatch {
    sink: Arc<dyn Sink>,
    timeout: Duration,
}

impl Dispatch {
    fn from_config(name: &str, config: &SinkConfig) -> Result<Option<Self>, SinkError> {
        let Some(endpoint) = config.active_endpoint() else {
            return Ok(None);
        };

        let sink = HttpSink::new(name, endpoint, config.timeout)?;
        Ok(Some(Self {
            sink: Arc::new(sink),
            timeout: config.timeout,
        }))
    }
}

/// Default deadline for sinks supplied directly.
pub const DEFAULT_SINK_TIMEOUT: Duration = Duration::from_secs(10);

/// Sends lead payloads to the configured sinks.
#[derive(Clone)]
pub struct Submitter {
    email_capture: Option<Dispatch>,
    webhook: Option<Dispatch>,
    webhook_recommendations: usize,
}

impl Submitter {
    /// No sinks; every submission reports both as skipped.
    pub fn new() -> Self {
        Self {
            email_capture: None,
            webhook: None,
            webhook_recommendations: 3,
        }
    }

    /// HTTP sinks for every enabled endpoint in `config`.
    pub fn from_config(config: &SubmissionConfig) -> Result<Self, SubmissionError> {
        Ok(Self {
            email_capture: Dispatch::from_config("email_capture", &config.email_capture)?,
            webhook: Dispatch::from_config("webhook", &config.webhook)?,
            webhook_recommendations: config.webhook_recommendations,
        })
    }

    pub fn with_email_capture(mut self, sink: Arc<dyn Sink>, timeout: Duration) -> Self {
        self.email_capture = Some(Dispatch { sink, timeout });
        self
    }

    pub fn with_webhook(mut self, sink: Arc<dyn Sink>, timeout: Duration) -> Self {
        self.webhook = Some(Dispatch { sink, timeout });
        self
    }

    pub fn with_webhook_recommendations(mut self, count: usize) -> Self {
        self.webhook_recommendations = count;
        self
    }

    /// Send both payloads concurrently.
    ///
    /// Never fails: errors end up in the report.
    pub async fn submit(
        &self,
        record: &ResponseRecord,
        result: &DiagnosticResult,
        email: &str,
        submitted_at: DateTime<Utc>,
    ) -> SubmissionReport {
        let email = match validate_email(email) {
            Ok(email) => email,
            Err(e) => {
                tracing::warn!(error = %e, "Submission rejected");
                return SubmissionReport::rejected(e);
            }
        };

        let ctx = LeadContext {
            email,
            record,
            result,
            submitted_at,
        };

        let capture_body = serde_json::to_value(EmailCapturePayload::from(&ctx));
        let webhook_body = serde_json::to_value(WebhookPayload::new(&ctx, self.webhook_recommendations));

        let (email_capture, webhook) = tokio::join!(
            dispatch(self.email_capture.as_ref(), capture_body),
            dispatch(self.webhook.as_ref(), webhook_body),
        );

        SubmissionReport {
            email_capture,
            webhook,
            rejected: None,
        }
    }
}

impl Default for Submitter {
    fn default() -> Self {
        Self::new()
    }
}

async fn dispatch(
    target: Option<&Dispatch>,
    body: Result<serde_json::Value, serde_json::Error>,
) -> SinkOutcome {
    let Some(target) = target else {
        return SinkOutcome::Skipped;
    };
    let name = target.sink.name();

    let sent = match body {
        Ok(body) => match tokio::time::timeout(target.timeout, target.sink.send(&body)).await {
            Ok(sent) => sent,
            Err(_) => Err(SinkError::Timeout(target.timeout)),
        },
        Err(e) => Err(e.into()),
    };

    match sent {
        Ok(()) => {
            tracing::debug!(sink = name, "Payload delivered");
            SinkOutcome::Delivered
        }
        Err(e) => {
            tracing::warn!(sink = name, error = %e, "Payload delivery failed");
            SinkOutcome::Failed(e.to_string())
        }
    }
}

/// Trimmed address, if it is non-empty and contains `@`.
pub fn validate_email(email: &str) -> Result<&str, SubmissionError> {
    let trimmed = email.trim();
    if trimmed.is_empty() || !trimmed.contains('@') {
        return Err(SubmissionError::InvalidEmail(email.to_string()));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use autofront_core::{evaluate, Field};
    use std::sync::Mutex;

    /// Records payloads; optionally fails or stalls.
    struct RecordingSink {
        name: &'static str,
        fail: bool,
        delay: Option<Duration>,
        received: Mutex<Vec<serde_json::Value>>,
    }

    impl RecordingSink {
        fn new(name: &'static str) -> Self {
            Self {
                name,
                fail: false,
                delay: None,
                received: Mutex::new(Vec::new()),
            }
        }

        fn failing(name: &'static str) -> Self {
            Self {
                fail: true,
                ..Self::new(name)
            }
        }

        fn received(&self) -> Vec<serde_json::Value> {
            self.received.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Sink for RecordingSink {
        fn name(&self) -> &str {
            self.name
        }

        async fn send(&self, payload: &serde_json::Value) -> Result<(), SinkError> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.received.lock().unwrap().push(payload.clone());
            if self.fail {
                return Err(SinkError::Status {
                    status: 500,
                    body: "boom".to_string(),
                });
            }
            Ok(())
        }
    }

    fn sample() -> (ResponseRecord, DiagnosticResult) {
        let record = ResponseRecord::default()
            .with(Field::PrimaryProcess, "expense approvals")
            .with(Field::TimeSavings, "3-5 hours");
        let result = evaluate(&record);
        (record, result)
    }

    #[test]
    fn test_validate_email() {
        assert_eq!(validate_email(" ops@example.com ").unwrap(), "ops@example.com");
        assert!(validate_email("").is_err());
        assert!(validate_email("   ").is_err());
        assert!(validate_email("ops.example.com").is_err());
    }

    #[tokio::test]
    async fn test_both_sinks_receive_payloads() {
        let (record, result) = sample();
        let capture = Arc::new(RecordingSink::new("capture"));
        let hook = Arc::new(RecordingSink::new("hook"));

        let submitter = Submitter::new()
            .with_email_capture(capture.clone(), DEFAULT_SINK_TIMEOUT)
            .with_webhook(hook.clone(), DEFAULT_SINK_TIMEOUT)
            .with_webhook_recommendations(2);

        let report = submitter.submit(&record, &result, "ops@example.com", Utc::now()).await;
        assert!(report.lead_captured());
        assert!(report.webhook.is_delivered());
        assert!(report.rejected.is_none());

        let sent = capture.received();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0]["automationScore"], result.total_score);
        assert_eq!(sent[0]["processName"], "expense approvals");

        let sent = hook.received();
        assert_eq!(sent[0]["recommendations"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_failing_sink_does_not_affect_other() {
        let (record, result) = sample();
        let before = result.clone();
        let hook = Arc::new(RecordingSink::new("hook"));

        let submitter = Submitter::new()
            .with_email_capture(Arc::new(RecordingSink::failing("capture")), DEFAULT_SINK_TIMEOUT)
            .with_webhook(hook.clone(), DEFAULT_SINK_TIMEOUT);

        let report = submitter.submit(&record, &result, "ops@example.com", Utc::now()).await;
        assert!(matches!(report.email_capture, SinkOutcome::Failed(ref msg) if msg.contains("500")));
        assert!(report.webhook.is_delivered());
        assert!(!report.lead_captured());
        assert_eq!(hook.received().len(), 1);
        assert_eq!(result, before);
    }

    #[tokio::test]
    async fn test_slow_sink_times_out() {
        let (record, result) = sample();
        let slow = RecordingSink {
            delay: Some(Duration::from_secs(5)),
            ..RecordingSink::new("slow")
        };

        let submitter = Submitter::new().with_webhook(Arc::new(slow), Duration::from_millis(20));
        let report = submitter.submit(&record, &result, "ops@example.com", Utc::now()).await;

        assert!(matches!(report.webhook, SinkOutcome::Failed(_)));
        assert_eq!(report.email_capture, SinkOutcome::Skipped);
    }

    #[tokio::test]
    async fn test_invalid_email_skips_everything() {
        let (record, result) = sample();
        let capture = Arc::new(RecordingSink::new("capture"));

        let submitter = Submitter::new().with_email_capture(capture.clone(), DEFAULT_SINK_TIMEOUT);
        let report = submitter.submit(&record, &result, "not-an-email", Utc::now()).await;

        assert_eq!(report.email_capture, SinkOutcome::Skipped);
        assert_eq!(report.webhook, SinkOutcome::Skipped);
        assert!(matches!(report.rejected, Some(SubmissionError::InvalidEmail(_))));
        assert!(capture.received().is_empty());
    }

    #[tokio::test]
    async fn test_http_sink_posts_json() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/f/lead")
            .match_header("content-type", "application/json")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "email": "ops@example.com",
                "processName": "expense approvals",
            })))
            .with_status(200)
            .create_async()
            .await;

        let config = SubmissionConfig {
            email_capture: SinkConfig {
                endpoint: Some(format!("{}/f/lead", server.url())),
                ..SinkConfig::default()
            },
            ..SubmissionConfig::default()
        };

        let (record, result) = sample();
        let submitter = Submitter::from_config(&config).unwrap();
        let report = submitter.submit(&record, &result, "ops@example.com", Utc::now()).await;

        mock.assert_async().await;
        assert!(report.lead_captured());
        assert_eq!(report.webhook, SinkOutcome::Skipped);
    }

    #[tokio::test]
    async fn test_http_sink_non_success_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/webhook/automation-diagnostic")
            .with_status(502)
            .with_body("bad gateway")
            .create_async()
            .await;

        let sink = HttpSink::new(
            "webhook",
            format!("{}/webhook/automation-diagnostic", server.url()),
            Duration::from_secs(5),
        )
        .unwrap();

        let err = sink.send(&serde_json::json!({"score": 42})).await.unwrap_err();
        assert!(matches!(err, SinkError::Status { status: 502, ref body } if body == "bad gateway"));
    }
}
