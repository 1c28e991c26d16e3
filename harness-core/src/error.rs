//! Error types for the harness command core.

use thiserror::Error;

/// Errors raised while scanning a command's argument tokens.
///
/// Positions are zero-based indices into the token stream.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A keyword-shaped token that the command's argument table does not know
    #[error("unknown keyword \"{token}\" at argument {position}")]
    UnknownKeyword { token: String, position: usize },

    /// A value token with no open keyword to receive it
    #[error("unexpected argument \"{token}\" at argument {position}{}", after_keyword(.last_keyword))]
    UnexpectedValue {
        token: String,
        position: usize,
        last_keyword: Option<String>,
    },

    /// A required single-value keyword that received no value
    #[error("keyword {keyword} at argument {position} requires a value")]
    MissingValue { keyword: String, position: usize },
}

fn after_keyword(last_keyword: &Option<String>) -> String {
    match last_keyword {
        Some(keyword) => format!(" (after {})", keyword),
        None => String::new(),
    }
}

/// Main error type for the harness command core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HarnessError {
    /// The argument tokens could not be parsed
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The command rejected its arguments while building a handler
    #[error("initialization error: {0}")]
    Initialization(String),

    /// The handler ran and reported an error
    #[error("execution error: {0}")]
    Execution(String),

    /// No command is registered under the requested name
    #[error("unknown command: {0}")]
    UnknownCommand(String),
}

/// Result type alias for harness operations
pub type Result<T> = std::result::Result<T, HarnessError>;

impl From<std::io::Error> for HarnessError {
    fn from(err: std::io::Error) -> Self {
        HarnessError::Execution(format!("IO error: {}", err))
    }
}
