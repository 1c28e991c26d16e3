//! Table-driven argument processing.
//!
//! The ArgsProcessor pairs an argument table with the state machine and fills
//! in table defaults once the scan has succeeded.

use tracing::debug;

use super::parsed::ParsedArguments;
use super::parser::ArgumentParser;
use super::table::ArgumentTable;
use crate::error::ParseError;

/// Processor for a command's argument tokens
pub struct ArgsProcessor {
    /// Keywords the command understands
    table: ArgumentTable,
}

impl ArgsProcessor {
    /// Create a new processor with the given table
    pub fn new(table: ArgumentTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &ArgumentTable {
        &self.table
    }

    /// Process argument tokens into structured arguments.
    ///
    /// A failed scan yields no partial result.
    pub fn process_args(&self, args: &[String]) -> Result<ParsedArguments, ParseError> {
        let mut parsed = ArgumentParser::new(&self.table).parse(args)?;
        self.apply_defaults(&mut parsed);
        debug!(
            bindings = parsed.bindings().len(),
            flags = parsed.flags().len(),
            "arguments processed"
        );
        Ok(parsed)
    }

    /// Record defaults for keywords that were not given
    fn apply_defaults(&self, parsed: &mut ParsedArguments) {
        for spec in self.table.iter() {
            if parsed.has(&spec.keyword) {
                continue;
            }
            if let Some(default) = &spec.default {
                parsed.set_default(&spec.keyword, default);
            }
        }
    }
}
