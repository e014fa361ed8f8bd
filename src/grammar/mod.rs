/*
    This module is for storing and manipulating grammars
*/

use std::collections::BTreeMap;
use std::fmt::Display;

use itertools::Itertools;

use crate::error_handling::Location;

// The base unit in a grammar rule
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Symbol {
    Terminal(char),
    Nonterminal(String),
}

impl Symbol {
    // Single letter convention: uppercase letters are nonterminals, anything
    // else is a terminal
    pub fn from_letter(letter: char) -> Self {
        if letter.is_ascii_uppercase() {
            Symbol::Nonterminal(letter.to_string())
        } else {
            Symbol::Terminal(letter)
        }
    }
}

// The symbols in a single alternative
pub type Production = Vec<Symbol>;

// The alternatives of a rewrite rule
pub type Rewrite = Vec<Production>;

#[derive(Debug, PartialEq, Clone)]
pub struct Definition {
    pub rewrite: Rewrite,
    pub location: Location,
}

// How terminals were told apart from nonterminals when the grammar was
// written down
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum Notation {
    // Every symbol carries its own tag, as in grammar files
    #[default]
    Tagged,
    // Case decides: only lowercase ASCII letters may start an alternative
    Letters,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Grammar {
    pub start_symbol: String,
    pub rules: BTreeMap<String, Definition>,
    pub notation: Notation,
}

impl Grammar {
    pub fn new(start_symbol: impl Into<String>) -> Self {
        Grammar {
            start_symbol: start_symbol.into(),
            rules: BTreeMap::new(),
            notation: Notation::Tagged,
        }
    }

    /// Adds (or replaces) the definition of `nonterminal`.
    pub fn with_rule(mut self, nonterminal: impl Into<String>, rewrite: Rewrite) -> Self {
        self.rules.insert(nonterminal.into(), Definition {
            rewrite,
            location: Location::default(),
        });
        self
    }

    /// Builds a grammar written in the single letter convention, e.g.
    /// `[("S", &["aA", "b"]), ("A", &["c"])]`. The start symbol is `S`.
    pub fn from_letters(rules: &[(&str, &[&str])]) -> Self {
        let grammar = Grammar {
            notation: Notation::Letters,
            ..Grammar::new("S")
        };
        rules.iter().fold(grammar, |grammar, (nonterminal, alternatives)| {
            let rewrite = alternatives.iter()
                .map(|alternative| alternative.chars().map(Symbol::from_letter).collect())
                .collect();
            grammar.with_rule(*nonterminal, rewrite)
        })
    }

    pub fn rewrite(&self, nonterminal: &str) -> Option<&Rewrite> {
        self.rules.get(nonterminal).map(|definition| &definition.rewrite)
    }

    pub fn location(&self, nonterminal: &str) -> Location {
        self.rules
            .get(nonterminal)
            .map(|definition| definition.location.clone())
            .unwrap_or_default()
    }
}

fn fmt_production(production: &Production, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    if production.is_empty() {
        return write!(f, "\"\"");
    }

    // Runs of terminals are written as one quoted string
    let chunks = production.iter().chunk_by(|symbol| matches!(symbol, Symbol::Terminal(_)));
    let parts = chunks.into_iter().map(|(is_terminal, symbols)| {
        if is_terminal {
            // Quotes and backslashes are escaped so the lexer reads them back
            let text: String = symbols
                .filter_map(|symbol| match symbol {
                    Symbol::Terminal(c) => Some(*c),
                    _ => None,
                })
                .flat_map(|c| match c {
                    '\"' | '\\' => vec!['\\', c],
                    _ => vec![c],
                })
                .collect();
            format!("\"{}\"", text)
        } else {
            symbols
                .filter_map(|symbol| match symbol {
                    Symbol::Nonterminal(name) => Some(name.as_str()),
                    _ => None,
                })
                .join(" ")
        }
    });

    write!(f, "{}", parts.collect_vec().join(" "))
}

struct DisplayProduction<'a>(&'a Production);

impl Display for DisplayProduction<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt_production(self.0, f)
    }
}

impl Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The start rule goes first so the output reads back with the same
        // start symbol
        let ordered = self.rules.iter()
            .sorted_by_key(|(nonterminal, _)| **nonterminal != self.start_symbol);

        for (nonterminal, definition) in ordered {
            let rewrite = definition.rewrite.iter().map(DisplayProduction).join(" | ");
            if rewrite.is_empty() {
                writeln!(f, "{} =", nonterminal)?;
            } else {
                writeln!(f, "{} = {}", nonterminal, rewrite)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_follow_case() {
        assert_eq!(Symbol::from_letter('a'), Symbol::Terminal('a'));
        assert_eq!(Symbol::from_letter('A'), Symbol::Nonterminal("A".to_string()));
        assert_eq!(Symbol::from_letter('+'), Symbol::Terminal('+'));
        assert_eq!(Symbol::from_letter('1'), Symbol::Terminal('1'));
    }

    #[test]
    fn grammar_from_letters() {
        let grammar = Grammar::from_letters(&[("S", &["aA", "b"]), ("A", &["c"])]);

        assert_eq!(grammar.start_symbol, "S");
        assert_eq!(grammar.notation, Notation::Letters);
        assert_eq!(Grammar::new("S").notation, Notation::Tagged);
        assert_eq!(grammar.rewrite("S"), Some(&vec![
            vec![Symbol::Terminal('a'), Symbol::Nonterminal("A".to_string())],
            vec![Symbol::Terminal('b')],
        ]));
        assert_eq!(grammar.rewrite("A"), Some(&vec![vec![Symbol::Terminal('c')]]));
        assert_eq!(grammar.rewrite("B"), None);
        assert_eq!(grammar.location("A"), Location::default());
    }

    #[test]
    fn display_grammar() {
        let grammar = Grammar::from_letters(&[
            ("A", &["cdB", ""]),
            ("B", &[]),
            ("S", &["aA", "bAB"]),
        ]);

        assert_eq!(grammar.to_string(), concat!(
            "S = \"a\" A | \"b\" A B\n",
            "A = \"cd\" B | \"\"\n",
            "B =\n",
        ));
    }

    #[test]
    fn display_escaped_terminals() {
        let grammar = Grammar::from_letters(&[("S", &["a\"B", "b\\"])]);

        assert_eq!(grammar.to_string(), "S = \"a\\\"\" B | \"b\\\\\"\n");
    }
}
