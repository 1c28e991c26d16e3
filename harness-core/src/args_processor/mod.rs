//! Command argument processing functionality.
//!
//! This module turns a handler command's flat token list into structured
//! arguments. Keywords come from an [`ArgumentTable`]; a single linear pass
//! classifies each token as a keyword, a value for the open keyword, or an
//! error.

mod classifier;
mod parsed;
mod parser;
mod processor;
mod table;

pub use classifier::{classify, looks_like_keyword, Class, Mode};
pub use parsed::{Binding, ParsedArguments};
pub use parser::{parse_arguments, ArgumentParser, ParseCursor};
pub use processor::ArgsProcessor;
pub use table::{keywords, ArgumentSpec, ArgumentTable, Arity};
