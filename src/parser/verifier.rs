use std::collections::BTreeMap;

use crate::grammar::{Definition, Production, Rewrite, Symbol::Nonterminal};
use super::CompileErrorType::UndefinedNonterminal;
use super::{CompileError, CompileErrors, FileResult, Location};

pub type Ruleset = BTreeMap<String, Definition>;

fn get_production_undefined_symbols(production: &Production, location: &Location, rules: &Ruleset) -> CompileErrors {
    // Filter out everything but nonterminals and unwrap the text from the
    // nonterminals. Then filter out all the undefined nonterminals.
    production.iter()
        .filter_map(|symbol| match symbol {
            Nonterminal(symbol) => Some(symbol),
            _ => None
        })
        .filter(|symbol| !rules.contains_key(*symbol))
        .map(|symbol_text| CompileError {
            location: location.to_owned(),
            error: UndefinedNonterminal(symbol_text.to_owned())
        })
        .collect()
}

fn get_rewrite_undefined_symbols(rewrite: &Rewrite, location: &Location, rules: &Ruleset) -> CompileErrors {
    rewrite.iter()
        .flat_map(|production| get_production_undefined_symbols(production, location, rules))
        .collect()
}

fn get_undefined_symbols(rules: &Ruleset) -> CompileErrors {
    rules.values()
        .flat_map(|definition| get_rewrite_undefined_symbols(&definition.rewrite, &definition.location, rules))
        .collect()
}

pub fn verify_rules(rules: &Ruleset) -> FileResult<()> {
    let errors = get_undefined_symbols(rules);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
