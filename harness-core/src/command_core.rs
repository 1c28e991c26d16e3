//! Command façade.
//!
//! CommandCore drives one invocation of a handler command through its
//! lifecycle: parse the tokens, build the handler, execute it, and report the
//! outcome back into the script scope. A failure is reported to the scope and
//! turned into a `false` return unless the caller captured it through
//! `CAPTURE_ERROR`. Nothing here aborts the host script.

use tracing::{debug, error, info, warn};

use crate::args_processor::{ArgsProcessor, ParsedArguments};
use crate::command::{resolve_options, HandlerCommand};
use crate::error::{HarnessError, Result};
use crate::handler::{Handler, HandlerOutcome};
use crate::scope::Scope;

/// Value written for a successful run that reported no result.
pub const SUCCESS_VALUE: &str = "0";

/// Value written for a failed run that reported no result.
pub const FAILURE_VALUE: &str = "-1";

/// Lifecycle of one command invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Parsing,
    ParseFailed,
    Parsed,
    Initializing,
    InitFailed,
    Initialized,
    Executing,
    Done,
}

impl Stage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::ParseFailed | Stage::InitFailed | Stage::Done)
    }
}

/// Drives a single invocation of a handler command.
pub struct CommandCore<'c> {
    /// The command being run
    command: &'c dyn HandlerCommand,

    /// Where the invocation currently is
    stage: Stage,

    /// Outcome of the handler, once executed
    outcome: Option<HandlerOutcome>,
}

impl<'c> CommandCore<'c> {
    /// Create a new CommandCore.
    pub fn new(command: &'c dyn HandlerCommand) -> Self {
        Self {
            command,
            stage: Stage::Idle,
            outcome: None,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn outcome(&self) -> Option<&HandlerOutcome> {
        self.outcome.as_ref()
    }

    /// Run the command once. Returns the handler's success, or `true` for a
    /// failure captured through `CAPTURE_ERROR`.
    pub fn run(&mut self, tokens: &[String], scope: &mut Scope) -> bool {
        let name = self.command.name().to_string();

        self.stage = Stage::Parsing;
        let processor = ArgsProcessor::new(self.command.argument_table());
        let args = match processor.process_args(tokens) {
            Ok(args) => args,
            Err(e) => {
                self.stage = Stage::ParseFailed;
                error!(command = %name, "{}", e);
                scope.status_mut().report_error(format!("{}: {}", name, e));
                return false;
            }
        };
        self.stage = Stage::Parsed;

        self.stage = Stage::Initializing;
        let mut handler = match self.initialize(&args, scope) {
            Ok(handler) => handler,
            Err(e) => {
                self.stage = Stage::InitFailed;
                return self.report_failure(&args, scope, &e.to_string());
            }
        };
        self.stage = Stage::Initialized;

        self.stage = Stage::Executing;
        if args.quiet() {
            debug!(command = %name, handler = handler.name(), "executing");
        } else {
            info!(command = %name, handler = handler.name(), "executing");
        }
        let outcome = match handler.execute() {
            Ok(outcome) => outcome,
            Err(e) => HandlerOutcome::failure(e.to_string()),
        };
        self.stage = Stage::Done;

        if let Some(variable) = args.return_variable() {
            let fallback = if outcome.success { SUCCESS_VALUE } else { FAILURE_VALUE };
            let value = outcome.result.clone().unwrap_or_else(|| fallback.to_string());
            debug!(variable, value = %value, "writing return value");
            scope.set(variable, value);
        }

        let success = if outcome.success {
            if let Some(variable) = args.capture_variable() {
                scope.set(variable, SUCCESS_VALUE);
            }
            if args.quiet() {
                debug!(command = %name, "finished");
            } else {
                info!(command = %name, "finished");
            }
            true
        } else {
            let message = outcome
                .message
                .clone()
                .unwrap_or_else(|| "handler reported failure".to_string());
            self.report_failure(&args, scope, &message)
        };

        self.outcome = Some(outcome);
        success
    }

    fn initialize(&self, args: &ParsedArguments, scope: &Scope) -> Result<Box<dyn Handler>> {
        let options = resolve_options(args, scope)?;
        debug!(command = self.command.name(), ?options, "initializing handler");
        self.command
            .initialize_handler(args, &options, scope)
            .map_err(|e| match e {
                HarnessError::Initialization(_) => e,
                other => HarnessError::Initialization(other.to_string()),
            })
    }

    /// Record a post-parse failure, honouring `CAPTURE_ERROR`.
    ///
    /// Returns the command's result: a captured failure still succeeds.
    fn report_failure(&self, args: &ParsedArguments, scope: &mut Scope, message: &str) -> bool {
        let name = self.command.name();
        match args.capture_variable() {
            Some(variable) => {
                warn!(command = name, capture = variable, "{}", message);
                scope.set(variable, FAILURE_VALUE);
                true
            }
            None => {
                error!(command = name, "{}", message);
                scope.status_mut().report_error(format!("{}: {}", name, message));
                false
            }
        }
    }
}

/// Run a command once against a scope.
pub fn run_command(command: &dyn HandlerCommand, tokens: &[String], scope: &mut Scope) -> bool {
    CommandCore::new(command).run(tokens, scope)
}
