//! Handler interface for harness commands.
//!
//! A handler performs one concrete operation (a build, a test run, a
//! submission). Commands construct handlers from validated arguments; the
//! command façade only ever sees this trait.

use std::path::PathBuf;

use crate::error::Result;

/// Settings every handler receives, resolved from the common keywords and the
/// script scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerOptions {
    /// Directory the handler works in. Never empty.
    pub build_dir: PathBuf,

    /// Source tree, when known
    pub source_dir: Option<PathBuf>,

    /// Submission index from `SUBMIT_INDEX`
    pub submit_index: Option<u32>,

    /// Results are appended to those already submitted
    pub append: bool,

    /// Suppress handler output
    pub quiet: bool,
}

impl HandlerOptions {
    pub fn new(build_dir: impl Into<PathBuf>) -> Self {
        Self {
            build_dir: build_dir.into(),
            source_dir: None,
            submit_index: None,
            append: false,
            quiet: false,
        }
    }
}

/// What a handler reports after running.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandlerOutcome {
    pub success: bool,

    /// Value written to the command's return variable, if any
    pub result: Option<String>,

    /// Human-readable detail, relayed as-is
    pub message: Option<String>,
}

impl HandlerOutcome {
    pub fn success() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            result: None,
            message: Some(message.into()),
        }
    }

    pub fn with_result(mut self, result: impl Into<String>) -> Self {
        self.result = Some(result.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Core trait for all handlers.
pub trait Handler {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Run the operation.
    ///
    /// Returning an error means the handler could not complete at all; a
    /// completed run that found problems returns an unsuccessful outcome.
    fn execute(&mut self) -> Result<HandlerOutcome>;
}
