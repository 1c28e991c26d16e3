//! Argument tables: the keywords a handler command understands.

/// Keywords shared by every handler command.
pub mod keywords {
    pub const RETURN_VALUE: &str = "RETURN_VALUE";
    pub const CAPTURE_ERROR: &str = "CAPTURE_ERROR";
    pub const BUILD: &str = "BUILD";
    pub const SOURCE: &str = "SOURCE";
    pub const SUBMIT_INDEX: &str = "SUBMIT_INDEX";
    pub const APPEND: &str = "APPEND";
    pub const QUIET: &str = "QUIET";
}

/// How many value tokens a keyword consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// A flag, no values
    None,
    /// Exactly one value
    One,
    /// Values until the next keyword
    Many,
}

/// A single keyword known to a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentSpec {
    /// Keyword text, matched case-sensitively
    pub keyword: String,

    /// Number of values the keyword consumes
    pub arity: Arity,

    /// Whether a single-value keyword may close without a value
    pub optional: bool,

    /// Value reported when the keyword never appears
    pub default: Option<String>,
}

impl ArgumentSpec {
    fn new(keyword: &str, arity: Arity) -> Self {
        Self {
            keyword: keyword.to_string(),
            arity,
            optional: false,
            default: None,
        }
    }

    /// A keyword without values.
    pub fn flag(keyword: &str) -> Self {
        Self::new(keyword, Arity::None)
    }

    /// A keyword taking exactly one value.
    pub fn single(keyword: &str) -> Self {
        Self::new(keyword, Arity::One)
    }

    /// A keyword taking every value up to the next keyword.
    pub fn multi(keyword: &str) -> Self {
        Self::new(keyword, Arity::Many)
    }

    /// Accept an empty binding when no value follows.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn with_default(mut self, value: &str) -> Self {
        self.default = Some(value.to_string());
        self
    }
}

/// Ordered set of keywords for one command.
///
/// Keywords are unique. Adding a keyword that is already present replaces the
/// earlier spec in place, so its lookup priority is unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentTable {
    specs: Vec<ArgumentSpec>,
}

impl ArgumentTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self { specs: Vec::new() }
    }

    /// The keywords every handler command accepts.
    pub fn base() -> Self {
        Self::new()
            .with(ArgumentSpec::single(keywords::RETURN_VALUE))
            .with(ArgumentSpec::single(keywords::CAPTURE_ERROR))
            .with(ArgumentSpec::single(keywords::BUILD))
            .with(ArgumentSpec::single(keywords::SOURCE))
            .with(ArgumentSpec::single(keywords::SUBMIT_INDEX))
            .with(ArgumentSpec::flag(keywords::APPEND))
            .with(ArgumentSpec::flag(keywords::QUIET))
    }

    /// Add a spec, replacing any spec with the same keyword.
    pub fn with(mut self, spec: ArgumentSpec) -> Self {
        self.insert(spec);
        self
    }

    pub fn insert(&mut self, spec: ArgumentSpec) {
        match self.specs.iter_mut().find(|s| s.keyword == spec.keyword) {
            Some(existing) => *existing = spec,
            None => self.specs.push(spec),
        }
    }

    /// Find the spec for a token. First match wins.
    pub fn find(&self, token: &str) -> Option<&ArgumentSpec> {
        self.specs.iter().find(|s| s.keyword == token)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.find(token).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArgumentSpec> {
        self.specs.iter()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
