//! Line-oriented script runner.
//!
//! Each non-blank, non-comment line is one command. The line is split into
//! words with POSIX shell quoting rules, then every word has `${NAME}` and
//! `$NAME` references expanded from the scope, and the first word names the
//! command. Expansion happens after the quotes are gone, so quoting (single
//! quotes included) groups words but never stops expansion, and an expanded
//! value never splits a word. A failing command is counted and reported; the
//! script always runs to the end.

use std::path::Path;

use harness_core::{CommandRegistry, Scope};
use tracing::{debug, error};

/// Result of running a whole script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptReport {
    /// Commands dispatched, built-ins included
    pub commands: usize,
    /// Commands that returned false or could not be dispatched
    pub failed: usize,
    /// Reported errors, prefixed with their line number
    pub errors: Vec<String>,
}

impl ScriptReport {
    pub fn success(&self) -> bool {
        self.failed == 0 && self.errors.is_empty()
    }
}

pub struct ScriptRunner<'r> {
    registry: &'r CommandRegistry,
    scope: Scope,
}

impl<'r> ScriptRunner<'r> {
    pub fn new(registry: &'r CommandRegistry, scope: Scope) -> Self {
        Self { registry, scope }
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn run_file(&mut self, path: impl AsRef<Path>) -> std::io::Result<ScriptReport> {
        let source = std::fs::read_to_string(path)?;
        Ok(self.run_source(&source))
    }

    pub fn run_source(&mut self, source: &str) -> ScriptReport {
        let mut report = ScriptReport::default();

        for (index, raw) in source.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let tokens = match shell_words::split(line) {
                Ok(tokens) => tokens,
                Err(e) => {
                    report.failed += 1;
                    self.scope.status_mut().report_error(format!("cannot split line: {}", e));
                    self.collect_errors(line_no, &mut report);
                    continue;
                }
            };
            let tokens: Vec<String> = tokens.iter().map(|t| self.expand(t)).collect();
            let Some((name, args)) = tokens.split_first() else {
                continue;
            };

            debug!(line = line_no, command = %name, ?args, "dispatching");
            report.commands += 1;
            if !self.dispatch(name, args) {
                report.failed += 1;
            }
            self.collect_errors(line_no, &mut report);
        }

        report
    }

    fn dispatch(&mut self, name: &str, args: &[String]) -> bool {
        match name {
            "set" => match args.split_first() {
                Some((variable, values)) => {
                    self.scope.set(variable.as_str(), values.join(";"));
                    true
                }
                None => {
                    self.scope.status_mut().report_error("set: missing variable name");
                    false
                }
            },
            "unset" => match args {
                [variable] => {
                    self.scope.unset(variable);
                    true
                }
                _ => {
                    self.scope
                        .status_mut()
                        .report_error("unset: expected exactly one variable name");
                    false
                }
            },
            "message" => {
                println!("{}", args.join(" "));
                true
            }
            _ => match self.registry.invoke(name, args, &mut self.scope) {
                Ok(success) => success,
                Err(e) => {
                    self.scope.status_mut().report_error(e.to_string());
                    false
                }
            },
        }
    }

    /// Expand `${NAME}` and `$NAME` from the scope. Undefined names expand to
    /// nothing.
    fn expand(&self, token: &str) -> String {
        let scope = &self.scope;
        shellexpand::env_with_context_no_errors(token, |name: &str| Some(scope.get(name).unwrap_or("")))
            .into_owned()
    }

    fn collect_errors(&mut self, line_no: usize, report: &mut ScriptReport) {
        for message in self.scope.status_mut().take_errors() {
            error!(line = line_no, "{}", message);
            report.errors.push(format!("line {}: {}", line_no, message));
        }
    }
}
