//! # autofront-runtime
//!
//! Everything around the scoring engine that touches the outside world:
//! configuration, questionnaire sessions and their persistence, outbound lead
//! submission, and analytics events.
//!
//! The engine itself stays in `autofront-core` and never depends on anything
//! here.

pub mod analytics;
pub mod config;
pub mod orchestrator;
pub mod payload;
pub mod session;
pub mod submission;

pub use analytics::{Analytics, AnalyticsEvent};
pub use config::{ConfigError, RuntimeConfig, SinkConfig, SubmissionConfig};
pub use orchestrator::{DiagnosticOrchestrator, DiagnosticOrchestratorBuilder, RuntimeError};
pub use payload::{EmailCapturePayload, LeadContext, WebhookPayload};
pub use session::{
    FileSessionStore, MemorySessionStore, SessionError, SessionRepository, SessionState,
    SessionStore, StepOutcome, CURRENT_STEP_KEY, STORAGE_KEY,
};
pub use submission::{HttpSink, Sink, SinkError, SinkOutcome, SubmissionError, SubmissionReport, Submitter};
