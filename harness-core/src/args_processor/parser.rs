//! Argument state machine.
//!
//! Drives the classifier across a token stream exactly once, left to right,
//! building a [`ParsedArguments`]. There is no backtracking and no token is
//! classified twice.

use tracing::debug;

use super::classifier::{classify, looks_like_keyword, Class, Mode};
use super::parsed::ParsedArguments;
use super::table::{ArgumentTable, Arity};
use crate::error::ParseError;

/// Transient scan state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCursor {
    /// Index of the token being classified
    pub index: usize,

    /// Current parser mode
    pub mode: Mode,

    /// Index of the last keyword token seen
    pub last_keyword: Option<usize>,

    /// Number of tokens fully processed. Never exceeds the token count.
    pub last: usize,
}

impl ParseCursor {
    fn new() -> Self {
        Self {
            index: 0,
            mode: Mode::Idle,
            last_keyword: None,
            last: 0,
        }
    }
}

/// Single-pass parser over a command's argument tokens.
pub struct ArgumentParser<'a> {
    table: &'a ArgumentTable,
    cursor: ParseCursor,
    pending: Vec<String>,
    parsed: ParsedArguments,
}

impl<'a> ArgumentParser<'a> {
    pub fn new(table: &'a ArgumentTable) -> Self {
        Self {
            table,
            cursor: ParseCursor::new(),
            pending: Vec::new(),
            parsed: ParsedArguments::new(),
        }
    }

    /// State left behind by the most recent [`parse`](Self::parse).
    pub fn cursor(&self) -> &ParseCursor {
        &self.cursor
    }

    /// Parse a token stream. Each call starts from a fresh state.
    pub fn parse(&mut self, tokens: &[String]) -> Result<ParsedArguments, ParseError> {
        self.cursor = ParseCursor::new();
        self.pending.clear();
        self.parsed = ParsedArguments::new();

        for (position, token) in tokens.iter().enumerate() {
            self.cursor.index = position;
            self.step(position, token, tokens)?;
            self.cursor.last = position + 1;
        }

        self.close_pending()?;
        Ok(std::mem::take(&mut self.parsed))
    }

    fn step(&mut self, position: usize, token: &str, tokens: &[String]) -> Result<(), ParseError> {
        match classify(token, self.table, &self.cursor.mode) {
            Class::Keyword(spec) => {
                debug!(keyword = %spec.keyword, position, "argument keyword");
                self.close_pending()?;
                self.cursor.last_keyword = Some(position);
                self.cursor.mode = match spec.arity {
                    Arity::None => {
                        self.parsed.set_flag(&spec.keyword);
                        Mode::Idle
                    }
                    arity => Mode::Expecting {
                        keyword: spec.keyword.clone(),
                        arity,
                        position,
                    },
                };
            }
            Class::Value => match &self.cursor.mode {
                Mode::Expecting {
                    keyword,
                    arity: Arity::One,
                    ..
                } => {
                    debug!(keyword = %keyword, position, "argument value");
                    self.parsed.bind(keyword, vec![token.to_string()]);
                    self.cursor.mode = Mode::Idle;
                }
                _ => self.pending.push(token.to_string()),
            },
            Class::Error => {
                self.cursor.mode = Mode::Error;
                return Err(if looks_like_keyword(token) {
                    ParseError::UnknownKeyword {
                        token: token.to_string(),
                        position,
                    }
                } else {
                    ParseError::UnexpectedValue {
                        token: token.to_string(),
                        position,
                        last_keyword: self.cursor.last_keyword.map(|i| tokens[i].clone()),
                    }
                });
            }
        }
        Ok(())
    }

    /// Close the open keyword, if any, committing what it collected.
    fn close_pending(&mut self) -> Result<(), ParseError> {
        let mode = std::mem::replace(&mut self.cursor.mode, Mode::Idle);
        let Mode::Expecting {
            keyword,
            arity,
            position,
        } = mode
        else {
            return Ok(());
        };

        match arity {
            Arity::Many => {
                let values = std::mem::take(&mut self.pending);
                self.parsed.extend(&keyword, values);
            }
            // A single-value keyword still open here never received its value
            Arity::One => {
                let optional = self.table.find(&keyword).is_some_and(|s| s.optional);
                if !optional {
                    self.cursor.mode = Mode::Error;
                    return Err(ParseError::MissingValue { keyword, position });
                }
                self.parsed.bind(&keyword, Vec::new());
            }
            Arity::None => {}
        }
        Ok(())
    }
}

/// Parse tokens against a table with a fresh parser.
pub fn parse_arguments(
    table: &ArgumentTable,
    tokens: &[String],
) -> Result<ParsedArguments, ParseError> {
    ArgumentParser::new(table).parse(tokens)
}
