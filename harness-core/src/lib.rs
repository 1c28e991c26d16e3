//! Core types and functionality for harness handler commands.
//!
//! This crate provides the pieces shared by every script command that builds
//! and runs a handler: the keyword-driven argument state machine, the handler
//! and command traits, the command façade that reports results back into the
//! script scope, and a registry for looking commands up by name.

pub mod args_processor;
mod command;
mod command_core;
mod error;
mod handler;
mod registry;
mod scope;

// Re-export core types
pub use args_processor::{
    keywords, parse_arguments, ArgsProcessor, ArgumentParser, ArgumentSpec, ArgumentTable, Arity,
    ParsedArguments,
};
pub use command::{resolve_options, HandlerCommand};
pub use command_core::{run_command, CommandCore, Stage, FAILURE_VALUE, SUCCESS_VALUE};
pub use error::{HarnessError, ParseError, Result};
pub use handler::{Handler, HandlerOptions, HandlerOutcome};
pub use registry::{CommandFactory, CommandRegistry};
pub use scope::{ExecutionStatus, Scope, BINARY_DIRECTORY_VAR, SOURCE_DIRECTORY_VAR};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
