//! Script scope: variables and execution status shared with the host script.

use std::collections::BTreeMap;

/// Variable consulted when a command has no `BUILD` argument.
pub const BINARY_DIRECTORY_VAR: &str = "HARNESS_BINARY_DIRECTORY";

/// Variable consulted when a command has no `SOURCE` argument.
pub const SOURCE_DIRECTORY_VAR: &str = "HARNESS_SOURCE_DIRECTORY";

/// Script-level errors reported by commands.
///
/// Reporting an error never stops the host script; it only records the
/// message for the host to surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionStatus {
    errors: Vec<String>,
}

impl ExecutionStatus {
    pub fn report_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.errors.last().map(String::as_str)
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Drain the recorded errors
    pub fn take_errors(&mut self) -> Vec<String> {
        std::mem::take(&mut self.errors)
    }
}

/// Variables visible to a running script.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    variables: BTreeMap<String, String>,
    status: ExecutionStatus,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(name.into(), value.into());
    }

    pub fn unset(&mut self, name: &str) -> Option<String> {
        self.variables.remove(name)
    }

    pub fn variables(&self) -> &BTreeMap<String, String> {
        &self.variables
    }

    pub fn status(&self) -> &ExecutionStatus {
        &self.status
    }

    pub fn status_mut(&mut self) -> &mut ExecutionStatus {
        &mut self.status
    }
}
