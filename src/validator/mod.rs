/*
    This module decides whether a grammar is a simple grammar (s-grammar)
*/

use std::collections::HashMap;
use std::fmt::Display;

use tracing::debug;

use crate::error_handling::*;
use crate::grammar::*;

#[derive(Debug, PartialEq, Clone)]
pub enum SimpleErrorType {
    // An alternative with no symbols at all
    EmptyProduction {
        nonterminal: String,
        alternative: usize,
    },
    // An alternative whose first symbol is a nonterminal
    StartsWithNonterminal {
        nonterminal: String,
        alternative: usize,
        first: String,
    },
    // In the single letter notation, an alternative starting with a terminal
    // that is not a lowercase letter
    NonLetterFirst {
        nonterminal: String,
        alternative: usize,
        first: char,
    },
    // Two alternatives of one nonterminal start with the same terminal
    SharedFirstTerminal {
        nonterminal: String,
        terminal: char,
        first_alternative: usize,
        alternative: usize,
    },
}

impl ErrorType for SimpleErrorType {}

impl Display for SimpleErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Alternatives are numbered from 1 for people
        match self {
            SimpleErrorType::EmptyProduction { nonterminal, alternative } =>
                write!(f, "Alternative {} of `{}` is empty", alternative + 1, nonterminal),
            SimpleErrorType::StartsWithNonterminal { nonterminal, alternative, first } =>
                write!(f, "Alternative {} of `{}` starts with nonterminal `{}` instead of a terminal", alternative + 1, nonterminal, first),
            SimpleErrorType::NonLetterFirst { nonterminal, alternative, first } =>
                write!(f, "Alternative {} of `{}` starts with `{}` instead of a lowercase letter", alternative + 1, nonterminal, first),
            SimpleErrorType::SharedFirstTerminal { nonterminal, terminal, first_alternative, alternative } =>
                write!(f, "Alternatives {} and {} of `{}` both start with `{}`", first_alternative + 1, alternative + 1, nonterminal, terminal),
        }
    }
}

pub type SimpleError = Error<SimpleErrorType>;
pub type SimpleErrors = Errors<SimpleErrorType>;

fn rewrite_violations(nonterminal: &str, rewrite: &Rewrite, notation: Notation) -> Vec<SimpleErrorType> {
    // First terminal -> index of the alternative that claimed it
    let mut starting_terminals = HashMap::<char, usize>::with_capacity(rewrite.len());
    let mut violations = Vec::new();

    for (alternative, production) in rewrite.iter().enumerate() {
        match production.first() {
            None => violations.push(SimpleErrorType::EmptyProduction {
                nonterminal: nonterminal.to_owned(),
                alternative,
            }),
            Some(Symbol::Nonterminal(first)) => violations.push(SimpleErrorType::StartsWithNonterminal {
                nonterminal: nonterminal.to_owned(),
                alternative,
                first: first.clone(),
            }),
            Some(Symbol::Terminal(terminal)) if notation == Notation::Letters && !terminal.is_ascii_lowercase() => {
                violations.push(SimpleErrorType::NonLetterFirst {
                    nonterminal: nonterminal.to_owned(),
                    alternative,
                    first: *terminal,
                });
            }
            Some(Symbol::Terminal(terminal)) => {
                if let Some(&first_alternative) = starting_terminals.get(terminal) {
                    violations.push(SimpleErrorType::SharedFirstTerminal {
                        nonterminal: nonterminal.to_owned(),
                        terminal: *terminal,
                        first_alternative,
                        alternative,
                    });
                } else {
                    starting_terminals.insert(*terminal, alternative);
                }
            }
        }
    }

    violations
}

/// Every reason `grammar` is not simple, ordered by nonterminal and then by
/// alternative. A nonterminal without any alternatives has nothing to violate
/// and passes.
pub fn violations(grammar: &Grammar) -> SimpleErrors {
    grammar.rules.iter()
        .flat_map(|(nonterminal, definition)| {
            rewrite_violations(nonterminal, &definition.rewrite, grammar.notation)
                .into_iter()
                .map(move |error| SimpleError::new(definition.location.clone(), error))
        })
        .collect()
}

pub fn is_simple(grammar: &Grammar) -> bool {
    grammar.rules.iter().all(|(nonterminal, definition)| {
        let simple = rewrite_violations(nonterminal, &definition.rewrite, grammar.notation).is_empty();
        if !simple {
            debug!(nonterminal = nonterminal.as_str(), "rule is not simple");
        }
        simple
    })
}

pub fn validate(grammar: &Grammar) -> bool {
    is_simple(grammar)
}

/// A grammar that has passed validation. Matching is only offered on this
/// type, so an unchecked grammar can never reach the matcher.
#[derive(Debug, PartialEq, Clone)]
pub struct SimpleGrammar(Grammar);

impl SimpleGrammar {
    pub fn grammar(&self) -> &Grammar {
        &self.0
    }

    pub fn start_symbol(&self) -> &str {
        &self.0.start_symbol
    }

    pub fn into_inner(self) -> Grammar {
        self.0
    }
}

impl TryFrom<Grammar> for SimpleGrammar {
    type Error = SimpleErrors;

    fn try_from(grammar: Grammar) -> Result<Self, Self::Error> {
        let errors = violations(&grammar);
        if errors.is_empty() {
            Ok(SimpleGrammar(grammar))
        } else {
            Err(errors)
        }
    }
}

impl Display for SimpleGrammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}
