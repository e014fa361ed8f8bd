/*
    This module generates sentences
*/

use rand::prelude::*;
use std::{collections::HashMap, fmt::Display};

use crate::grammar::*;
use crate::error_handling::*;

// Past this depth only the shortest ways out of a nonterminal are chosen
pub const MAX_DEPTH: usize = 24;

#[derive(Debug, PartialEq)]
pub enum GenerateErrorType {
    // An undefined nonterminal was used
    UndefinedNonterminal(String),
    // The nonterminal never derives a finite sentence
    Unproductive(String),
}

impl ErrorType for GenerateErrorType {}

impl Display for GenerateErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateErrorType::UndefinedNonterminal(nonterminal) => write!(f, "No definition for nonterminal `{}`", nonterminal),
            GenerateErrorType::Unproductive(nonterminal) => write!(f, "Nonterminal `{}` never derives a finite sentence", nonterminal),
        }
    }
}

pub type GenerateError = Error<GenerateErrorType>;
pub type GenResult = Result<String, GenerateError>;

// Height of the production's shortest derivation tree, if it has one
fn production_height(production: &Production, heights: &HashMap<&str, usize>) -> Option<usize> {
    production.iter()
        .map(|symbol| match symbol {
            Symbol::Terminal(_) => Some(0),
            Symbol::Nonterminal(nonterminal) => heights.get(nonterminal.as_str()).copied(),
        })
        .try_fold(0, |tallest, height| height.map(|h| tallest.max(h)))
        .map(|tallest| tallest + 1)
}

// Minimum derivation height of every productive nonterminal, found by
// iterating until nothing improves
fn min_heights(grammar: &Grammar) -> HashMap<&str, usize> {
    let mut heights = HashMap::new();

    loop {
        let mut changed = false;
        for (nonterminal, definition) in &grammar.rules {
            let best = definition.rewrite.iter()
                .filter_map(|production| production_height(production, &heights))
                .min();

            if let Some(best) = best {
                if heights.get(nonterminal.as_str()).map_or(true, |&current| best < current) {
                    heights.insert(nonterminal.as_str(), best);
                    changed = true;
                }
            }
        }

        if !changed {
            return heights;
        }
    }
}

struct Generator<'a, R: Rng + ?Sized> {
    grammar: &'a Grammar,
    heights: HashMap<&'a str, usize>,
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> Generator<'a, R> {
    fn generate_nonterminal(&mut self, nonterminal: &str, depth: usize, location: &Location, result: &mut String) -> Result<(), GenerateError> {
        let grammar = self.grammar;
        let definition = grammar.rules
            .get(nonterminal)
            .ok_or_else(|| GenerateError {
                location: location.clone(),
                error: GenerateErrorType::UndefinedNonterminal(nonterminal.to_owned())
            })?;

        let Some(&height) = self.heights.get(nonterminal) else {
            return Err(GenerateError {
                location: definition.location.clone(),
                error: GenerateErrorType::Unproductive(nonterminal.to_owned())
            });
        };

        // Alternatives that can never finish are never picked
        let candidates: Vec<&Production> = definition.rewrite.iter()
            .filter(|production| match production_height(production, &self.heights) {
                Some(h) => depth < MAX_DEPTH || h == height,
                None => false,
            })
            .collect();

        let Some(production) = candidates.choose(&mut *self.rng) else {
            return Err(GenerateError {
                location: definition.location.clone(),
                error: GenerateErrorType::Unproductive(nonterminal.to_owned())
            });
        };

        for symbol in production.iter() {
            match symbol {
                Symbol::Terminal(c) => result.push(*c),
                Symbol::Nonterminal(t) => self.generate_nonterminal(t, depth + 1, &definition.location, result)?,
            }
        }

        Ok(())
    }
}

// Generates a sentence in the given grammar starting with the given symbol
pub fn generate_with_override<R: Rng + ?Sized>(grammar: &Grammar, start: &str, rng: &mut R) -> GenResult {
    let mut generator = Generator {
        grammar,
        heights: min_heights(grammar),
        rng,
    };

    let mut result = String::new();
    generator.generate_nonterminal(start, 0, &grammar.location(start), &mut result)?;
    Ok(result)
}

pub fn generate<R: Rng + ?Sized>(grammar: &Grammar, rng: &mut R) -> GenResult {
    generate_with_override(grammar, &grammar.start_symbol, rng)
}
