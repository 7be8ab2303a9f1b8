//! Reads automata from a line oriented description:
//!
//! ```text
//! lambda = 0
//! initnode = S
//! S S0 0
//! S0 A a
//! A
//! ```
//!
//! `lambda = X` sets the epsilon label and `initnode = X` the initial state (keywords are
//! case-insensitive). A line with a single token declares a final state, a line with three
//! tokens `S T L` an edge from `S` to `T` labeled `L`. Blank lines are skipped, anything
//! else is rejected.

use std::{io::BufRead, str::FromStr};

use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    automaton::{Automaton, DEFAULT_EPSILON, DEFAULT_INITIAL},
    Error,
};

/// Abstracts the types of errors that can occur when parsing an automaton, each carrying
/// the 1-based number of the offending line.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[allow(missing_docs)]
pub enum ParseError {
    #[error("line {line}: unknown directive `{directive}`")]
    UnknownDirective { line: usize, directive: String },
    #[error("line {line}: directive `{directive}` is missing a value")]
    MissingValue { line: usize, directive: String },
    #[error("line {line}: expected 1 or 3 tokens but found {found}")]
    TokenCount { line: usize, found: usize },
}

/// Defaults that apply until the input overrides them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Label of epsilon edges.
    pub epsilon: String,
    /// Identifier of the initial state.
    pub initial: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON.to_string(),
            initial: DEFAULT_INITIAL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    Epsilon(&'a str),
    Initial(&'a str),
    Final(&'a str),
    Edge(&'a str, &'a str, &'a str),
}

fn parse_line(line: &str, number: usize) -> Result<Line<'_>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Line::Blank);
    }

    if line.contains('=') {
        let mut symbols = line
            .split(|c: char| c == '=' || c.is_whitespace())
            .filter(|s| !s.is_empty());
        let directive = symbols.next().unwrap_or_default();
        let value = symbols.next();
        return match (directive.to_lowercase().as_str(), value) {
            ("lambda", Some(value)) => Ok(Line::Epsilon(value)),
            ("initnode", Some(value)) => Ok(Line::Initial(value)),
            ("lambda" | "initnode", None) => Err(ParseError::MissingValue {
                line: number,
                directive: directive.to_string(),
            }),
            _ => Err(ParseError::UnknownDirective {
                line: number,
                directive: line.to_string(),
            }),
        };
    }

    let symbols: Vec<&str> = line.split_whitespace().collect();
    match symbols.as_slice() {
        [state] => Ok(Line::Final(*state)),
        [source, target, label] => Ok(Line::Edge(*source, *target, *label)),
        _ => Err(ParseError::TokenCount {
            line: number,
            found: symbols.len(),
        }),
    }
}

impl Automaton {
    /// Parses an automaton with the default [`Options`].
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Self::parse_with(input, &Options::default())
    }

    /// Parses an automaton, starting out from the given `options`.
    pub fn parse_with(input: &str, options: &Options) -> Result<Self, ParseError> {
        let mut aut = Automaton::new(options.initial.as_str(), options.epsilon.as_str());
        for (i, line) in input.lines().enumerate() {
            aut.apply(parse_line(line, i + 1)?);
        }
        debug!(
            "parsed automaton with {} states over {} symbols",
            aut.size(),
            aut.alphabet().len()
        );
        Ok(aut)
    }

    /// Reads and parses an automaton line by line.
    pub fn from_reader<R: BufRead>(read: R, options: &Options) -> Result<Self, Error> {
        let mut aut = Automaton::new(options.initial.as_str(), options.epsilon.as_str());
        for (i, line) in read.lines().enumerate() {
            let line = line?;
            aut.apply(parse_line(&line, i + 1)?);
        }
        debug!("read automaton with {} states", aut.size());
        Ok(aut)
    }

    fn apply(&mut self, line: Line<'_>) {
        trace!("applying {line:?}");
        match line {
            Line::Blank => {}
            Line::Epsilon(label) => self.set_epsilon(label),
            Line::Initial(id) => self.set_initial(id),
            Line::Final(id) => self.add_final(id),
            Line::Edge(source, target, label) => self.add_edge(source, target, label),
        }
    }
}

impl FromStr for Automaton {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    #[test_log::test]
    fn parse_directives_and_edges() {
        let aut: Automaton = "LAMBDA = e\ninitnode=Q\n\nQ Q0 e\nQ0 A a\nA\n"
            .parse()
            .unwrap();
        assert_eq!(aut.epsilon(), "e");
        assert_eq!(aut.initial(), &StateName::new("Q"));
        assert_eq!(aut.alphabet().iter().collect::<Vec<_>>(), vec!["a"]);
        assert_eq!(aut.size(), 3);
        assert!(aut.state(&StateName::new("A")).unwrap().is_final());
        assert!(!aut.state(&StateName::new("Q0")).unwrap().is_final());
        assert!(aut.accepts(["a"]));
    }

    #[test_log::test]
    fn late_epsilon_directive() {
        let aut = Automaton::parse("S A x\nS B a\nlambda = x").unwrap();
        assert!(aut.is_epsilon("x"));
        assert_eq!(aut.alphabet().len(), 1);
    }

    #[test_log::test]
    fn options_provide_defaults() {
        let options = Options {
            epsilon: "eps".into(),
            initial: "start".into(),
        };
        let aut = Automaton::parse_with("start end eps\nend", &options).unwrap();
        assert!(aut.alphabet().is_empty());
        assert!(aut.accepts(Vec::<&str>::new()));
    }

    #[test_log::test]
    fn reader_and_errors() {
        let aut = Automaton::from_reader("S A a\nA\n".as_bytes(), &Options::default()).unwrap();
        assert_eq!(aut.size(), 2);

        assert_eq!(
            Automaton::parse("S A a\nfoo = bar").unwrap_err(),
            ParseError::UnknownDirective {
                line: 2,
                directive: "foo = bar".into()
            }
        );
        assert_eq!(
            Automaton::parse("lambda =").unwrap_err(),
            ParseError::MissingValue {
                line: 1,
                directive: "lambda".into()
            }
        );
        assert_eq!(
            Automaton::parse("S A").unwrap_err(),
            ParseError::TokenCount { line: 1, found: 2 }
        );
        assert!(matches!(
            Automaton::from_reader("S A a b".as_bytes(), &Options::default()),
            Err(Error::Parse(ParseError::TokenCount { found: 4, .. }))
        ));
    }
}
