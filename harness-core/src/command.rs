//! Handler commands: script commands that build and run a handler.
//!
//! A command contributes its keywords on top of the shared base table and
//! knows how to turn validated arguments into a handler. Everything else
//! (scanning, option resolution, reporting) is shared in [`CommandCore`].
//!
//! [`CommandCore`]: crate::CommandCore

use std::path::PathBuf;

use crate::args_processor::{keywords, ArgumentTable, ParsedArguments};
use crate::error::{HarnessError, Result};
use crate::handler::{Handler, HandlerOptions};
use crate::scope::{Scope, BINARY_DIRECTORY_VAR, SOURCE_DIRECTORY_VAR};

/// A script command backed by a handler.
pub trait HandlerCommand {
    /// Name the command is invoked by.
    fn name(&self) -> &str;

    /// Add command-specific keywords to the base table.
    fn extend_arguments(&self, table: ArgumentTable) -> ArgumentTable {
        table
    }

    /// Full keyword table for this command.
    fn argument_table(&self) -> ArgumentTable {
        self.extend_arguments(ArgumentTable::base())
    }

    /// Build the handler for one invocation.
    ///
    /// Called exactly once per successful parse. An error here means the
    /// handler is never executed.
    fn initialize_handler(
        &self,
        args: &ParsedArguments,
        options: &HandlerOptions,
        scope: &Scope,
    ) -> Result<Box<dyn Handler>>;
}

/// Resolve the common handler settings from the arguments and the scope.
///
/// `BUILD` wins over the scope's binary directory; an empty result is an
/// initialization error. The same fallback applies to `SOURCE`.
pub fn resolve_options(args: &ParsedArguments, scope: &Scope) -> Result<HandlerOptions> {
    let build_dir = args
        .value(keywords::BUILD)
        .or_else(|| scope.get(BINARY_DIRECTORY_VAR))
        .filter(|dir| !dir.trim().is_empty())
        .ok_or_else(|| {
            HarnessError::Initialization(format!(
                "build directory not specified; use {} or set {}",
                keywords::BUILD,
                BINARY_DIRECTORY_VAR
            ))
        })?;

    let source_dir = args
        .value(keywords::SOURCE)
        .or_else(|| scope.get(SOURCE_DIRECTORY_VAR))
        .filter(|dir| !dir.trim().is_empty())
        .map(PathBuf::from);

    let submit_index = match args.value(keywords::SUBMIT_INDEX) {
        Some(raw) => Some(raw.trim().parse::<u32>().map_err(|_| {
            HarnessError::Initialization(format!(
                "{} expects a non-negative integer, got \"{}\"",
                keywords::SUBMIT_INDEX,
                raw
            ))
        })?),
        None => None,
    };

    Ok(HandlerOptions {
        build_dir: PathBuf::from(build_dir),
        source_dir,
        submit_index,
        append: args.append(),
        quiet: args.quiet(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args_processor::parse_arguments;

    fn parse(values: &[&str]) -> ParsedArguments {
        let tokens: Vec<String> = values.iter().map(|s| s.to_string()).collect();
        parse_arguments(&ArgumentTable::base(), &tokens).unwrap()
    }

    #[test]
    fn build_argument_wins_over_scope() {
        let mut scope = Scope::new();
        scope.set(BINARY_DIRECTORY_VAR, "/from/scope");

        let options = resolve_options(&parse(&["BUILD", "out"]), &scope).unwrap();
        assert_eq!(options.build_dir, PathBuf::from("out"));

        let options = resolve_options(&parse(&[]), &scope).unwrap();
        assert_eq!(options.build_dir, PathBuf::from("/from/scope"));
    }

    #[test]
    fn empty_build_directory_is_rejected() {
        let mut scope = Scope::new();
        scope.set(BINARY_DIRECTORY_VAR, "  ");
        let err = resolve_options(&parse(&["QUIET"]), &scope).unwrap_err();
        assert!(matches!(err, HarnessError::Initialization(_)));

        let err = resolve_options(&parse(&["BUILD", ""]), &Scope::new()).unwrap_err();
        assert!(matches!(err, HarnessError::Initialization(_)));
    }

    #[test]
    fn source_falls_back_to_scope() {
        let mut scope = Scope::new();
        scope.set(SOURCE_DIRECTORY_VAR, "/src");
        let options = resolve_options(&parse(&["BUILD", "out", "APPEND"]), &scope).unwrap();
        assert_eq!(options.source_dir, Some(PathBuf::from("/src")));
        assert!(options.append);
        assert!(!options.quiet);
    }

    #[test]
    fn submit_index_must_be_numeric() {
        let options =
            resolve_options(&parse(&["BUILD", "out", "SUBMIT_INDEX", "3"]), &Scope::new()).unwrap();
        assert_eq!(options.submit_index, Some(3));

        let err = resolve_options(&parse(&["BUILD", "out", "SUBMIT_INDEX", "three"]), &Scope::new())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "initialization error: SUBMIT_INDEX expects a non-negative integer, got \"three\""
        );
    }
}
