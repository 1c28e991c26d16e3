//! Property tests for the argument state machine
//!
//! Streams are generated over the shared base table plus one multi-value
//! keyword, the same shape every handler command parses.
use std::cell::Cell;
use std::rc::Rc;

use harness_core::args_processor::looks_like_keyword;
use harness_core::{
    parse_arguments, ArgumentParser, ArgumentSpec, ArgumentTable, Arity,
    CommandCore, Handler, HandlerCommand, HandlerOptions, HarnessError, ParseError,
    ParsedArguments, Scope,
};
use proptest::collection::vec;
use proptest::prelude::*;

const PARTS: &str = "PARTS";

const KEYWORDS: &[&str] = &[
    "RETURN_VALUE",
    "CAPTURE_ERROR",
    "BUILD",
    "SOURCE",
    "SUBMIT_INDEX",
    "APPEND",
    "QUIET",
    PARTS,
];

fn table() -> ArgumentTable {
    ArgumentTable::base().with(ArgumentSpec::multi(PARTS))
}

/// Counts factory calls; never builds a handler
struct CountingCommand {
    initialized: Rc<Cell<usize>>,
}

impl HandlerCommand for CountingCommand {
    fn name(&self) -> &str {
        "counting"
    }

    fn extend_arguments(&self, table: ArgumentTable) -> ArgumentTable {
        table.with(ArgumentSpec::multi(PARTS))
    }

    fn initialize_handler(
        &self,
        _args: &ParsedArguments,
        _options: &HandlerOptions,
        _scope: &Scope,
    ) -> harness_core::Result<Box<dyn Handler>> {
        self.initialized.set(self.initialized.get() + 1);
        Err(HarnessError::Initialization("not built".to_string()))
    }
}

/// A value token. Lowercase first, so it can never name a keyword.
fn value() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_./-]{0,8}"
}

fn keyword() -> impl Strategy<Value = String> {
    proptest::sample::select(KEYWORDS.to_vec()).prop_map(String::from)
}

/// Any token: a keyword, a plain value, or arbitrary text.
fn token() -> impl Strategy<Value = String> {
    prop_oneof![keyword(), value(), "\\PC{0,6}"]
}

/// A keyword followed by exactly the values its arity asks for.
fn segment(keyword: &'static str) -> BoxedStrategy<(String, Vec<String>)> {
    let arity = table().find(keyword).map(|spec| spec.arity).unwrap();
    match arity {
        Arity::None => Just((keyword.to_string(), Vec::new())).boxed(),
        Arity::One => value()
            .prop_map(move |v| (keyword.to_string(), vec![v]))
            .boxed(),
        Arity::Many => vec(value(), 0..4)
            .prop_map(move |values| (keyword.to_string(), values))
            .boxed(),
    }
}

/// Each keyword at most once, in any order, with correctly sized values.
fn well_formed() -> impl Strategy<Value = Vec<(String, Vec<String>)>> {
    proptest::sample::subsequence(KEYWORDS.to_vec(), 0..=KEYWORDS.len())
        .prop_shuffle()
        .prop_flat_map(|keywords| keywords.into_iter().map(segment).collect::<Vec<_>>())
}

fn flatten(segments: &[(String, Vec<String>)]) -> Vec<String> {
    segments
        .iter()
        .flat_map(|(keyword, values)| std::iter::once(keyword.clone()).chain(values.iter().cloned()))
        .collect()
}

fn arity_of(keyword: &str) -> Arity {
    table().find(keyword).map(|spec| spec.arity).unwrap()
}

proptest! {
    #[test]
    fn well_formed_streams_bind_exactly_their_values(segments in well_formed()) {
        let parsed = parse_arguments(&table(), &flatten(&segments)).unwrap();

        let expected_bindings: Vec<(String, Vec<String>)> = segments
            .iter()
            .filter(|(keyword, _)| arity_of(keyword) != Arity::None)
            .cloned()
            .collect();
        let bindings: Vec<(String, Vec<String>)> = parsed
            .bindings()
            .iter()
            .map(|b| (b.keyword.clone(), b.values.clone()))
            .collect();
        prop_assert_eq!(bindings, expected_bindings);

        let expected_flags: Vec<String> = segments
            .iter()
            .filter(|(keyword, _)| arity_of(keyword) == Arity::None)
            .map(|(keyword, _)| keyword.clone())
            .collect();
        prop_assert_eq!(parsed.flags(), &expected_flags[..]);
    }

    #[test]
    fn leading_value_is_rejected_before_the_factory(
        first in value(),
        rest in well_formed(),
    ) {
        let mut tokens = vec![first.clone()];
        tokens.extend(flatten(&rest));

        let err = parse_arguments(&table(), &tokens).unwrap_err();
        prop_assert_eq!(
            err,
            ParseError::UnexpectedValue { token: first, position: 0, last_keyword: None }
        );

        let command = CountingCommand { initialized: Rc::new(Cell::new(0)) };
        let mut scope = Scope::new();
        prop_assert!(!CommandCore::new(&command).run(&tokens, &mut scope));
        prop_assert_eq!(command.initialized.get(), 0);
        prop_assert_eq!(scope.status().errors().len(), 1);
    }

    #[test]
    fn any_unknown_first_token_is_rejected(
        first in "\\PC{1,12}".prop_filter("not a table keyword", |t| !table().contains(t)),
        rest in vec(token(), 0..8),
    ) {
        let mut tokens = vec![first.clone()];
        tokens.extend(rest);

        match parse_arguments(&table(), &tokens).unwrap_err() {
            ParseError::UnknownKeyword { position, .. } => {
                prop_assert!(looks_like_keyword(&first));
                prop_assert_eq!(position, 0);
            }
            ParseError::UnexpectedValue { position, last_keyword, .. } => {
                prop_assert!(!looks_like_keyword(&first));
                prop_assert_eq!(position, 0);
                prop_assert_eq!(last_keyword, None);
            }
            other => prop_assert!(false, "unexpected error {:?}", other),
        }
    }

    #[test]
    fn parsing_is_idempotent(tokens in vec(token(), 0..16)) {
        let table = table();
        let first = parse_arguments(&table, &tokens);
        let second = parse_arguments(&table, &tokens);
        prop_assert_eq!(&first, &second);

        let mut parser = ArgumentParser::new(&table);
        prop_assert_eq!(&parser.parse(&tokens), &first);
        prop_assert_eq!(&parser.parse(&tokens), &first);
    }

    #[test]
    fn keyword_inside_open_list_is_taken_as_keyword(
        before in vec(value(), 0..4),
        (keyword, after) in proptest::sample::select(KEYWORDS.to_vec()).prop_flat_map(segment),
    ) {
        let mut tokens = vec![PARTS.to_string()];
        tokens.extend(before.iter().cloned());
        tokens.push(keyword.clone());
        tokens.extend(after.iter().cloned());

        let parsed = parse_arguments(&table(), &tokens).unwrap();
        let parts = parsed.values(PARTS).unwrap();
        prop_assert!(!parts.contains(&keyword));

        if keyword == PARTS {
            let expected: Vec<String> = before.iter().chain(after.iter()).cloned().collect();
            prop_assert_eq!(parts, &expected[..]);
        } else {
            prop_assert_eq!(parts, &before[..]);
            match arity_of(&keyword) {
                Arity::None => prop_assert!(parsed.flag(&keyword)),
                _ => prop_assert_eq!(parsed.values(&keyword), Some(&after[..])),
            }
        }
    }

    #[test]
    fn cursor_never_passes_the_end(tokens in vec(token(), 0..16)) {
        let table = table();
        let mut parser = ArgumentParser::new(&table);
        let result = parser.parse(&tokens);

        prop_assert!(parser.cursor().last <= tokens.len());
        if result.is_ok() {
            prop_assert_eq!(parser.cursor().last, tokens.len());
        }
    }
}
