//! Structured result of one argument-parsing pass.

use std::collections::BTreeMap;

use super::table::keywords;

/// One keyword and the values collected for it, in encounter order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub keyword: String,
    pub values: Vec<String>,
}

/// Keyword bindings and flags produced by the argument state machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArguments {
    /// Explicit bindings, ordered by first appearance
    bindings: Vec<Binding>,

    /// Flag keywords that appeared, ordered by first appearance
    flags: Vec<String>,

    /// Defaults for keywords that never appeared
    defaults: BTreeMap<String, String>,
}

impl ParsedArguments {
    /// Create an empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a single-value keyword. A repeated keyword keeps its position and
    /// takes the newer values.
    pub fn bind(&mut self, keyword: &str, values: Vec<String>) {
        match self.bindings.iter_mut().find(|b| b.keyword == keyword) {
            Some(binding) => binding.values = values,
            None => self.bindings.push(Binding {
                keyword: keyword.to_string(),
                values,
            }),
        }
    }

    /// Append values to a multi-value keyword, creating the binding if needed.
    pub fn extend(&mut self, keyword: &str, values: Vec<String>) {
        match self.bindings.iter_mut().find(|b| b.keyword == keyword) {
            Some(binding) => binding.values.extend(values),
            None => self.bindings.push(Binding {
                keyword: keyword.to_string(),
                values,
            }),
        }
    }

    pub fn set_flag(&mut self, keyword: &str) {
        if !self.flag(keyword) {
            self.flags.push(keyword.to_string());
        }
    }

    pub(crate) fn set_default(&mut self, keyword: &str, value: &str) {
        self.defaults.insert(keyword.to_string(), value.to_string());
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn flags(&self) -> &[String] {
        &self.flags
    }

    /// Whether the keyword was bound explicitly
    pub fn has(&self, keyword: &str) -> bool {
        self.bindings.iter().any(|b| b.keyword == keyword)
    }

    /// Values bound to a keyword, if it appeared.
    pub fn values(&self, keyword: &str) -> Option<&[String]> {
        self.bindings
            .iter()
            .find(|b| b.keyword == keyword)
            .map(|b| b.values.as_slice())
    }

    /// First value of a keyword, falling back to the table default.
    ///
    /// An empty binding yields `None` unless the keyword has a default.
    pub fn value(&self, keyword: &str) -> Option<&str> {
        self.values(keyword)
            .and_then(|values| values.first())
            .map(String::as_str)
            .or_else(|| self.defaults.get(keyword).map(String::as_str))
    }

    pub fn flag(&self, keyword: &str) -> bool {
        self.flags.iter().any(|f| f == keyword)
    }

    /// Script variable requested through `RETURN_VALUE`.
    pub fn return_variable(&self) -> Option<&str> {
        self.value(keywords::RETURN_VALUE).filter(|name| !name.is_empty())
    }

    /// Script variable requested through `CAPTURE_ERROR`.
    pub fn capture_variable(&self) -> Option<&str> {
        self.value(keywords::CAPTURE_ERROR).filter(|name| !name.is_empty())
    }

    pub fn append(&self) -> bool {
        self.flag(keywords::APPEND)
    }

    pub fn quiet(&self) -> bool {
        self.flag(keywords::QUIET)
    }
}
