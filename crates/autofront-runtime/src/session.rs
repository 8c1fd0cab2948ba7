//! Questionnaire session: state, form controller and persistence.
//!
//! A session is an explicit [`SessionState`] value. The controller methods
//! mutate it; a [`SessionRepository`] moves it in and out of a
//! [`SessionStore`]. The scoring engine never sees any of this, it only gets
//! the finished record.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

use autofront_core::questionnaire::{question_for_step, Question, STEP_COUNT};
use autofront_core::{Field, ResponseRecord};

/// Storage key for the JSON-encoded response record.
pub const STORAGE_KEY: &str = "automation_front_state";

/// Storage key for the current step, as a decimal integer.
pub const CURRENT_STEP_KEY: &str = "automation_front_step";

/// Errors from session handling.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("No question is active (step {0}); start the session first")]
    NoActiveQuestion(usize),

    #[error("'{value}' is not an option for {field} (expected one of: {})", .field.labels().join(", "))]
    UnrecognizedOption { field: Field, value: String },
}

/// Result of trying to move past the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Moved to the given step.
    Advanced(usize),

    /// The last step was answered; the record is ready to evaluate.
    Completed,

    /// The current step has no usable answer (or no step is active).
    Invalid,
}

/// Responses collected so far plus the position in the questionnaire.
///
/// Step 0 means not started; steps 1 through [`STEP_COUNT`] index the
/// questions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub responses: ResponseRecord,
    pub current_step: usize,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_started(&self) -> bool {
        self.current_step >= 1
    }

    /// Begin at the first question. Answers already given are kept.
    pub fn start(&mut self) {
        self.current_step = 1;
    }

    pub fn current_question(&self) -> Option<&'static Question> {
        question_for_step(self.current_step)
    }

    /// Answer the current question.
    ///
    /// Radio questions only take one of their option labels.
    pub fn answer(&mut self, value: impl Into<String>) -> Result<(), SessionError> {
        let question = self
            .current_question()
            .ok_or(SessionError::NoActiveQuestion(self.current_step))?;
        let value = value.into();

        if !question.options.is_empty() && !question.options.contains(&value.as_str()) {
            return Err(SessionError::UnrecognizedOption {
                field: question.id,
                value,
            });
        }

        self.responses.set(question.id, value);
        Ok(())
    }

    /// Fill the current question with its example answer, if it has one.
    pub fn apply_example(&mut self) -> bool {
        match self.current_question() {
            Some(Question {
                id,
                example: Some(example),
                ..
            }) => {
                self.responses.set(*id, *example);
                true
            }
            _ => false,
        }
    }

    /// The current question has a non-blank answer.
    pub fn is_current_step_valid(&self) -> bool {
        self.current_question()
            .map(|q| !self.responses.get(q.id).trim().is_empty())
            .unwrap_or(false)
    }

    /// Advance past the current step.
    pub fn next(&mut self) -> StepOutcome {
        if !self.is_current_step_valid() {
            return StepOutcome::Invalid;
        }

        if self.current_step < STEP_COUNT {
            self.current_step += 1;
            StepOutcome::Advanced(self.current_step)
        } else {
            StepOutcome::Completed
        }
    }

    /// Go back one step, never below the first question.
    pub fn back(&mut self) -> usize {
        if self.current_step > 1 {
            self.current_step -= 1;
        }
        self.current_step
    }

    /// Completion percentage, 0 to 100.
    pub fn progress(&self) -> f64 {
        self.current_step as f64 / STEP_COUNT as f64 * 100.0
    }

    /// Discard all answers and return to the not-started state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// String key/value storage.
pub trait SessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError>;
    fn remove(&mut self, key: &str) -> Result<(), SessionError>;
}

/// In-process store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: HashMap<String, String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SessionError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One file per key inside a directory.
///
/// The directory is created on first write.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    directory: PathBuf,
}

impl FileSessionStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path(&self, key: &str) -> PathBuf {
        self.directory.join(key)
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        match fs::read_to_string(self.path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError> {
        fs::create_dir_all(&self.directory)?;
        fs::write(self.path(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SessionError> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Loads and saves [`SessionState`] under [`STORAGE_KEY`] and
/// [`CURRENT_STEP_KEY`].
pub struct SessionRepository<S: SessionStore> {
    store: S,
}

impl<S: SessionStore> SessionRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load the saved session.
    ///
    /// Missing keys give a fresh session. Unreadable values are logged and
    /// replaced by defaults rather than failing.
    pub fn load(&self) -> Result<SessionState, SessionError> {
        let responses = match self.store.get(STORAGE_KEY)? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(key = STORAGE_KEY, error = %e, "Discarding unreadable saved responses");
                ResponseRecord::default()
            }),
            None => ResponseRecord::default(),
        };

        let current_step = match self.store.get(CURRENT_STEP_KEY)? {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(step) if step <= STEP_COUNT => step,
                _ => {
                    tracing::warn!(key = CURRENT_STEP_KEY, value = %raw, "Discarding invalid saved step");
                    0
                }
            },
            None => 0,
        };

        Ok(SessionState {
            responses,
            current_step,
        })
    }

    pub fn save(&mut self, state: &SessionState) -> Result<(), SessionError> {
        let responses = serde_json::to_string(&state.responses)?;
        self.store.set(STORAGE_KEY, &responses)?;
        self.store.set(CURRENT_STEP_KEY, &state.current_step.to_string())?;
        Ok(())
    }

    /// Remove both keys.
    pub fn clear(&mut self) -> Result<(), SessionError> {
        self.store.remove(STORAGE_KEY)?;
        self.store.remove(CURRENT_STEP_KEY)?;
        Ok(())
    }
}
