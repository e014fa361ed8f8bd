/*
    This module decides whether a string is generated by a simple grammar
*/

use std::fmt::Display;

use tracing::{debug, trace};

use crate::error_handling::*;
use crate::grammar::*;
use crate::validator::SimpleGrammar;

#[derive(Debug, PartialEq)]
pub enum MatchErrorType {
    // A rule refers to a nonterminal the grammar never defines
    UndefinedNonterminal(String),
}

impl ErrorType for MatchErrorType {}

impl Display for MatchErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchErrorType::UndefinedNonterminal(nonterminal) => write!(f, "No definition for nonterminal `{}`", nonterminal),
        }
    }
}

pub type MatchError = Error<MatchErrorType>;
pub type MatchResult<T> = Result<T, MatchError>;

// One nonterminal being matched: which alternative is being tried, how far
// into it we are, and where in the input it started and currently stands
struct Frame<'a> {
    nonterminal: &'a str,
    definition: &'a Definition,
    start: usize,
    alternative: usize,
    symbol: usize,
    cursor: usize,
}

impl Frame<'_> {
    fn next_alternative(&mut self) {
        self.alternative += 1;
        self.symbol = 0;
        self.cursor = self.start;
    }
}

// Recursive descent over one input, run on an explicit stack of frames so the
// depth of a derivation is bounded by memory rather than the call stack.
// Positions are character offsets, and a successful match returns the
// position just past what it consumed.
struct Matcher<'a> {
    grammar: &'a Grammar,
    input: Vec<char>,
}

impl<'a> Matcher<'a> {
    fn new(grammar: &'a Grammar, input: &str) -> Self {
        Matcher {
            grammar,
            input: input.chars().collect(),
        }
    }

    // A fresh frame for `nonterminal` at `pos`, or None when `pos` is past
    // the end of the input
    fn enter(&self, nonterminal: &str, pos: usize, location: &Location) -> MatchResult<Option<Frame<'a>>> {
        if pos > self.input.len() {
            return Ok(None);
        }

        let grammar = self.grammar;
        let (nonterminal, definition) = grammar.rules
            .get_key_value(nonterminal)
            .ok_or_else(|| MatchError {
                location: location.clone(),
                error: MatchErrorType::UndefinedNonterminal(nonterminal.to_owned())
            })?;

        Ok(Some(Frame {
            nonterminal,
            definition,
            start: pos,
            alternative: 0,
            symbol: 0,
            cursor: pos,
        }))
    }

    fn match_nonterminal(&self, nonterminal: &str, pos: usize, location: &Location) -> MatchResult<Option<usize>> {
        let mut stack = match self.enter(nonterminal, pos, location)? {
            Some(frame) => vec![frame],
            None => return Ok(None),
        };
        // Outcome of the frame popped last, handed to the frame below it
        let mut finished: Option<Option<usize>> = None;

        while let Some(frame) = stack.last_mut() {
            match finished.take() {
                Some(Some(end)) => {
                    frame.cursor = end;
                    frame.symbol += 1;
                }
                Some(None) => frame.next_alternative(),
                None => {}
            }

            // Alternatives are tried in order. In a simple grammar at most one
            // of them gets past its first terminal.
            let definition = frame.definition;
            let Some(production) = definition.rewrite.get(frame.alternative) else {
                stack.pop();
                finished = Some(None);
                continue;
            };
            if frame.symbol == 0 {
                trace!(nonterminal = frame.nonterminal, alternative = frame.alternative, pos = frame.start, "trying alternative");
            }

            match production.get(frame.symbol) {
                None => {
                    let end = frame.cursor;
                    stack.pop();
                    finished = Some(Some(end));
                }
                Some(Symbol::Terminal(terminal)) => {
                    if self.input.get(frame.cursor) == Some(terminal) {
                        frame.cursor += 1;
                        frame.symbol += 1;
                    } else {
                        frame.next_alternative();
                    }
                }
                Some(Symbol::Nonterminal(nonterminal)) => {
                    match self.enter(nonterminal, frame.cursor, &definition.location)? {
                        Some(next) => stack.push(next),
                        None => frame.next_alternative(),
                    }
                }
            }
        }

        Ok(finished.flatten())
    }
}

/// Matches a derivation of `start` against the beginning of `input` and
/// returns how many characters it consumed, or `None` when no derivation fits.
pub fn match_prefix(grammar: &SimpleGrammar, start: &str, input: &str) -> MatchResult<Option<usize>> {
    let grammar = grammar.grammar();
    let matcher = Matcher::new(grammar, input);
    matcher.match_nonterminal(start, 0, &grammar.location(start))
}

/// Whether `input` is exactly a sentence derived from `start`. Rejection is
/// `Ok(false)`; an error means the grammar itself is broken.
pub fn accepts(grammar: &SimpleGrammar, start: &str, input: &str) -> MatchResult<bool> {
    let length = input.chars().count();
    let consumed = match_prefix(grammar, start, input)?;
    let accepted = consumed == Some(length);

    debug!(start, length, ?consumed, accepted, "matched input");
    Ok(accepted)
}

impl SimpleGrammar {
    /// Checks `input` against the grammar's own start symbol.
    pub fn accepts(&self, input: &str) -> MatchResult<bool> {
        accepts(self, self.start_symbol(), input)
    }
}
