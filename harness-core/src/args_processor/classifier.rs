//! Token classification against an argument table.

use super::table::{ArgumentSpec, ArgumentTable, Arity};

/// What the parser is doing when the next token arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// No keyword is open
    Idle,
    /// Collecting values for the keyword at `position`
    Expecting {
        keyword: String,
        arity: Arity,
        position: usize,
    },
    /// The parse has failed
    Error,
}

/// Outcome of classifying one token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Class<'t> {
    Keyword(&'t ArgumentSpec),
    Value,
    Error,
}

/// Classify a token without mutating anything.
///
/// Table keywords always win, even while a keyword is collecting values, so a
/// value equal to a keyword can never be passed through.
pub fn classify<'t>(token: &str, table: &'t ArgumentTable, mode: &Mode) -> Class<'t> {
    if let Some(spec) = table.find(token) {
        return Class::Keyword(spec);
    }

    match mode {
        Mode::Expecting { .. } => Class::Value,
        Mode::Idle | Mode::Error => Class::Error,
    }
}

/// Whether a token reads as a keyword (`[A-Z][A-Z0-9_]*`).
pub fn looks_like_keyword(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => {
            chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
        }
        _ => false,
    }
}
