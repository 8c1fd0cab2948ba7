//! AutomationFront CLI
//!
//! Command-line front end for the automation-potential diagnostic.
//!
//! ## Usage
//!
//! ```bash
//! # Score a completed questionnaire
//! autofront evaluate --responses responses.yaml
//!
//! # Pipe from stdin, JSON output
//! cat responses.json | autofront evaluate --format json
//!
//! # Walk through the questionnaire one step at a time
//! autofront session start
//! autofront session answer "6-20"
//! autofront session next
//!
//! # Send the lead to the configured sinks
//! autofront --config autofront.yaml submit --responses responses.yaml --email ops@example.com
//! ```
//!
//! ## Exit Codes
//!
//! - 0: Success
//! - 1: Invalid input (validation issues, unanswered step, rejected email)
//! - 3: Error

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use autofront_core::questionnaire::{question_for_step, Question, QUESTIONS, STEP_COUNT};
use autofront_core::recommendations::group_thousands;
use autofront_core::{DiagnosticResult, ResponseRecord};
use autofront_runtime::{
    DiagnosticOrchestrator, FileSessionStore, RuntimeConfig, SessionError, SessionRepository,
    SessionState, SinkOutcome, StepOutcome,
};

/// AutomationFront: find out what your manual process is costing you
#[derive(Parser)]
#[command(name = "autofront")]
#[command(version)]
#[command(about = "Score a business process for automation potential", long_about = None)]
struct Cli {
    /// Runtime configuration file (YAML or JSON)
    #[arg(long, global = true, env = "AUTOFRONT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a response record
    Evaluate {
        /// Path to the responses (YAML or JSON; reads from stdin if not provided)
        #[arg(short, long)]
        responses: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Show dimension breakdown
        #[arg(long)]
        explain: bool,
    },

    /// List the questionnaire
    Questions,

    /// Response record commands
    Response {
        #[command(subcommand)]
        action: ResponseAction,
    },

    /// Step through the questionnaire, saved between runs
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Score a record and send the lead to the configured sinks
    Submit {
        /// Path to the responses (YAML or JSON)
        #[arg(short, long)]
        responses: PathBuf,

        /// Contact address for the report
        #[arg(short, long)]
        email: String,

        /// Explicit payload timestamp (ISO 8601 / RFC 3339).
        /// Example: --submitted-at 2026-01-15T10:00:00Z
        #[arg(long, value_parser = parse_datetime)]
        submitted_at: Option<DateTime<Utc>>,
    },
}

#[derive(Subcommand)]
enum ResponseAction {
    /// Check every answer is present and recognized
    Validate {
        /// Path to the responses file
        path: PathBuf,
    },

    /// Show the answers
    Show {
        /// Path to the responses file
        path: PathBuf,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Show progress and the current question
    Show,

    /// Begin (or resume) at the first question
    Start,

    /// Answer the current question
    Answer {
        /// Option label or free text
        value: String,
    },

    /// Fill the current question with its example answer
    Example,

    /// Move to the next question
    Next,

    /// Go back one question
    Back,

    /// Discard the saved session
    Reset,

    /// Score the answers given so far
    Evaluate {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Show dimension breakdown
        #[arg(long)]
        explain: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Parse ISO 8601 / RFC 3339 datetime string to DateTime<Utc>.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("Invalid datetime format: {}. Expected ISO 8601/RFC 3339 (e.g., 2026-01-15T10:00:00Z)", e))
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(io::stderr)
        .init();

    match run() {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(3)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Evaluate {
            responses,
            format,
            explain,
        } => evaluate_command(&config, responses, format, explain),

        Commands::Questions => list_questions(),

        Commands::Response { action } => match action {
            ResponseAction::Validate { path } => validate_response(path),
            ResponseAction::Show { path } => show_response(path),
        },

        Commands::Session { action } => session_command(config, action),

        Commands::Submit {
            responses,
            email,
            submitted_at,
        } => submit_command(config, responses, email, submitted_at),
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<RuntimeConfig> {
    match path {
        Some(path) => RuntimeConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {:?}", path)),
        None => Ok(RuntimeConfig::default()),
    }
}

fn load_record(path: &PathBuf) -> Result<ResponseRecord> {
    ResponseRecord::from_file(path).with_context(|| format!("Failed to load responses from {:?}", path))
}

fn parse_record(content: &str) -> Result<ResponseRecord> {
    let record = if content.trim_start().starts_with('{') {
        ResponseRecord::from_json(content)
    } else {
        ResponseRecord::from_yaml(content)
    };
    record.context("Failed to parse responses from stdin")
}

fn evaluate_command(
    config: &RuntimeConfig,
    responses_path: Option<PathBuf>,
    format: OutputFormat,
    explain: bool,
) -> Result<ExitCode> {
    let record = match responses_path {
        Some(path) => load_record(&path)?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            parse_record(&buffer)?
        }
    };

    for issue in record.validate() {
        tracing::warn!(field = %issue.field(), "{}", issue);
    }

    let orchestrator = DiagnosticOrchestrator::new(config.clone()).context("Failed to set up runtime")?;
    let result = orchestrator.diagnose(&record);
    print_result(&record, &result, format, explain)?;

    Ok(ExitCode::from(0))
}

fn print_result(
    record: &ResponseRecord,
    result: &DiagnosticResult,
    format: OutputFormat,
    explain: bool,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(result)?;
            println!("{}", json);
        }
        OutputFormat::Text => print_text_result(record, result, explain),
    }
    Ok(())
}

fn print_text_result(record: &ResponseRecord, result: &DiagnosticResult, explain: bool) {
    println!(
        "AUTOMATION SCORE: {}/100 ({})",
        result.total_score,
        result.priority_band.as_str().to_uppercase()
    );
    println!();
    if !record.primary_process.trim().is_empty() {
        println!("Process: {}", record.primary_process);
    }
    println!("Bottleneck: {}", result.bottleneck);
    println!();
    println!("Weekly savings: {} hours", result.weekly_savings);
    println!("Annual value: ${}", group_thousands(result.annual_value));
    println!("Estimated build: {} hours", result.estimated_build_hours);
    println!("Break-even: {} months", result.break_even_months);
    println!();
    println!("Roadmap:");
    for (i, rec) in result.recommendations.iter().enumerate() {
        println!("  {}. [{}] {}", i + 1, rec.kind.as_str(), rec.title);
        println!("     {}", rec.description);
    }
    println!();
    println!("Confidence: {}", result.confidence_level);

    if explain {
        println!();
        println!("--- Dimensions ---");
        println!();

        for dimension in &result.dimensions {
            let filled = dimension.score.round() as usize;
            println!(
                "{:<18} {:>4.1}  {}{}",
                dimension.label,
                dimension.score,
                "#".repeat(filled),
                ".".repeat(10 - filled.min(10))
            );
        }
    }
}

fn list_questions() -> Result<ExitCode> {
    for (i, question) in QUESTIONS.iter().enumerate() {
        print_question(i + 1, question);
        println!();
    }
    Ok(ExitCode::from(0))
}

fn print_question(step: usize, question: &Question) {
    println!("{}/{} [{}] {}", step, STEP_COUNT, question.id, question.text);
    if let Some(tooltip) = question.tooltip {
        println!("  {}", tooltip);
    }
    for option in question.options {
        println!("  - {}", option);
    }
    if let Some(example) = question.example {
        println!("  Example: {}", example);
    }
}

fn validate_response(path: PathBuf) -> Result<ExitCode> {
    let record = match ResponseRecord::from_file(&path) {
        Ok(record) => record,
        Err(e) => {
            eprintln!("Response validation failed: {}", e);
            return Ok(ExitCode::from(1));
        }
    };

    let issues = record.validate();
    if issues.is_empty() {
        println!("Responses are complete: {}", record.primary_process);
        return Ok(ExitCode::from(0));
    }

    eprintln!("Response validation failed: {} issue(s)", issues.len());
    for issue in &issues {
        eprintln!("  - {}", issue);
    }
    Ok(ExitCode::from(1))
}

fn show_response(path: PathBuf) -> Result<ExitCode> {
    let record = load_record(&path)?;

    for question in &QUESTIONS {
        let value = record.get(question.id);
        let shown = if value.trim().is_empty() { "(unanswered)" } else { value };
        println!("{:<17} {}", question.id.key(), shown);
    }
    if let Some(email) = &record.email {
        println!("{:<17} {}", "email", email);
    }

    Ok(ExitCode::from(0))
}

fn session_command(config: RuntimeConfig, action: SessionAction) -> Result<ExitCode> {
    let directory = config.session.resolved_directory();
    let mut repo = SessionRepository::new(FileSessionStore::new(&directory));
    let mut state = repo
        .load()
        .with_context(|| format!("Failed to load session from {:?}", directory))?;
    let orchestrator = DiagnosticOrchestrator::new(config).context("Failed to set up runtime")?;

    let exit_code = match action {
        SessionAction::Show => {
            print_session(&state);
            ExitCode::from(0)
        }
        SessionAction::Start => {
            orchestrator.start_session(&mut state, "cli");
            print_session(&state);
            ExitCode::from(0)
        }
        SessionAction::Answer { value } => match state.answer(value) {
            Ok(()) => ExitCode::from(0),
            Err(e @ (SessionError::NoActiveQuestion(_) | SessionError::UnrecognizedOption { .. })) => {
                eprintln!("{}", e);
                ExitCode::from(1)
            }
            Err(e) => return Err(e.into()),
        },
        SessionAction::Example => {
            if !state.apply_example() {
                eprintln!("This question has no example answer");
                return Ok(ExitCode::from(1));
            }
            ExitCode::from(0)
        }
        SessionAction::Next => match state.next() {
            StepOutcome::Advanced(_) => {
                print_session(&state);
                ExitCode::from(0)
            }
            StepOutcome::Completed => {
                let result = orchestrator.finish_session(&state);
                print_text_result(&state.responses, &result, false);
                ExitCode::from(0)
            }
            StepOutcome::Invalid => {
                eprintln!("Answer the current question before moving on");
                ExitCode::from(1)
            }
        },
        SessionAction::Back => {
            state.back();
            print_session(&state);
            ExitCode::from(0)
        }
        SessionAction::Reset => {
            orchestrator.reset_session(&mut state);
            repo.clear().context("Failed to clear session")?;
            println!("Session reset");
            return Ok(ExitCode::from(0));
        }
        SessionAction::Evaluate { format, explain } => {
            let result = orchestrator.diagnose(&state.responses);
            print_result(&state.responses, &result, format, explain)?;
            ExitCode::from(0)
        }
    };

    repo.save(&state).context("Failed to save session")?;
    Ok(exit_code)
}

fn print_session(state: &SessionState) {
    println!("Progress: {:.0}%", state.progress());
    println!();

    match question_for_step(state.current_step) {
        Some(question) => {
            print_question(state.current_step, question);
            let answer = state.responses.get(question.id);
            if !answer.is_empty() {
                println!();
                println!("Current answer: {}", answer);
            }
        }
        None => println!("Not started. Run `autofront session start`."),
    }
}

fn submit_command(
    mut config: RuntimeConfig,
    responses_path: PathBuf,
    email: String,
    submitted_at: Option<DateTime<Utc>>,
) -> Result<ExitCode> {
    if submitted_at.is_some() {
        config.determinism.submitted_at = submitted_at;
    }

    let record = load_record(&responses_path)?;
    let orchestrator = DiagnosticOrchestrator::new(config).context("Failed to set up runtime")?;
    let result = orchestrator.diagnose(&record);

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let report = runtime.block_on(orchestrator.capture_lead(&record, &result, &email));

    if let Some(rejected) = &report.rejected {
        eprintln!("Submission rejected: {}", rejected);
        return Ok(ExitCode::from(1));
    }

    println!("Score: {}/100 ({})", result.total_score, result.priority_band);
    println!("Email capture: {}", describe_outcome(&report.email_capture));
    println!("Webhook: {}", describe_outcome(&report.webhook));

    let failed = matches!(report.email_capture, SinkOutcome::Failed(_))
        || matches!(report.webhook, SinkOutcome::Failed(_));
    Ok(if failed { ExitCode::from(3) } else { ExitCode::from(0) })
}

fn describe_outcome(outcome: &SinkOutcome) -> String {
    match outcome {
        SinkOutcome::Delivered => "delivered".to_string(),
        SinkOutcome::Skipped => "skipped (not configured)".to_string(),
        SinkOutcome::Failed(reason) => format!("FAILED - {}", reason),
    }
}
