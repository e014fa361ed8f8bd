/*
    This module parses grammar files
*/

mod lexer;
mod verifier;

use std::collections::btree_map::Entry;
use std::fmt::Display;
use std::fs::File;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::grammar::*;
use crate::error_handling::*;
use itertools::{Either, Itertools};
use lexer::*;
use tracing::debug;
use verifier::{verify_rules, Ruleset};

#[derive(Debug)]
pub enum CompileErrorType {
    // A line which should contain a rule does not
    MissingEquals,
    // A rule has multiple equals signs
    UnexpectedEquals,
    // The user starts a rule line with something other than a nonterminal
    MissingNonterminal,
    // There is an unclosed quote
    UnmatchedQuote,
    // An undefined token was used
    UndefinedNonterminal(String),
    // Somehow a full rewrite was parsed as a base alternative
    // This is a problem with sgram, not the grammar
    UnsplitRewrite,
    // The same nonterminal is defined on more than one line
    DuplicateNonterminal(String),
    // The file has no rules at all
    EmptyGrammar,
    // A blank line got too deep into the parser
    // This is a problem with sgram, not the grammar
    UnexpectedBlankLine,
    // There was an issue with reading a file
    FileError(std::io::Error),
}

impl ErrorType for CompileErrorType {}

impl PartialEq for CompileErrorType {
    fn eq(&self, other: &Self) -> bool {
        use CompileErrorType::*;

        match (self, other) {
            (FileError(a), FileError(b)) => a.kind() == b.kind(),
            (UndefinedNonterminal(a), UndefinedNonterminal(b)) => a == b,
            (DuplicateNonterminal(a), DuplicateNonterminal(b)) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl Display for CompileErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileErrorType::MissingEquals => write!(f, "Expected `=` after nonterminal"),
            CompileErrorType::UnexpectedEquals => write!(f, "Unexpected `=` encountered"),
            CompileErrorType::MissingNonterminal => write!(f, "Tried to define something other than a nonterminal"),
            CompileErrorType::UnmatchedQuote => write!(f, "Unmatched quotes"),
            CompileErrorType::UndefinedNonterminal(nonterminal) => write!(f, "Could not find definition for `{}`", nonterminal),
            CompileErrorType::UnsplitRewrite => write!(f, "Rewrite was not fully split (this is a problem with sgram, not the grammar)"),
            CompileErrorType::DuplicateNonterminal(nonterminal) => write!(f, "`{}` is already defined", nonterminal),
            CompileErrorType::EmptyGrammar => write!(f, "The grammar has no rules"),
            CompileErrorType::UnexpectedBlankLine => write!(f, "Blank line encountered in rule parser (this is a problem with sgram, not the grammar)"),
            CompileErrorType::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

pub type CompileError = Error<CompileErrorType>;
pub type CompileErrors = Errors<CompileErrorType>;

fn io_error(error: std::io::Error, file: PathBuf) -> CompileError {
    CompileError {
        location: Location::whole_file(file),
        error: CompileErrorType::FileError(error)
    }
}

pub type Result<T> = std::result::Result<T, CompileErrorType>;
pub type LineResult<T> = std::result::Result<T, CompileError>;
pub type FileResult<T> = std::result::Result<T, CompileErrors>;

#[derive(PartialEq, Debug)]
struct Rule {
    symbol: String,
    rewrite: Rewrite,
    location: Location
}

fn parse_production(tokens: &[Token]) -> Result<Production> {
    // A quoted string is a run of terminals, one per character
    let mut production = Production::new();
    for token in tokens {
        match token {
            Token::Equals => return Err(CompileErrorType::UnexpectedEquals),
            Token::Or => return Err(CompileErrorType::UnsplitRewrite),
            Token::Nonterminal(s) => production.push(Symbol::Nonterminal(s.clone())),
            Token::Terminal(s) => production.extend(s.chars().map(Symbol::Terminal)),
        }
    }
    Ok(production)
}

fn parse_rewrite(tokens: &[Token]) -> Result<Rewrite> {
    // Nothing after the `=` means no alternatives at all, while `""` is one
    // empty alternative
    if tokens.is_empty() {
        return Ok(Rewrite::new());
    }
    tokens.split(|t| *t == Token::Or).map(parse_production).collect()
}

fn parse_line(tokens: &[Token], location: Location) -> Result<Rule> {
    // Try to get the token the rule is for. The match returns a result which
    // is then unwrapped with the ? operator
    let symbol = match tokens.first() {
        Some(Token::Nonterminal(s)) => Ok(s.clone()),
        Some(_) => Err(CompileErrorType::MissingNonterminal),
        None => Err(CompileErrorType::UnexpectedBlankLine)
    }?;

    if tokens.get(1) != Some(&Token::Equals) {
        return Err(CompileErrorType::MissingEquals)
    }

    let rewrite = parse_rewrite(&tokens[2..])?;

    Ok(Rule {
        symbol,
        rewrite,
        location
    })
}

fn parse_lex_line(line: &str, location: Location) -> LineResult<Rule> {
    lexer::lex_line(line)
        .and_then(|lexed_line| parse_line(&lexed_line, location.clone()))
        .map_err(|error| CompileError { location, error })
}

fn is_rule_line(line: &str) -> bool {
    let line = line.trim_start();
    !line.is_empty() && !line.starts_with(';')
}

// Returns an iterator over the lines of a file, with the io errors wrapped
// in CompileError and enumerated
fn file_line_nums<'a>(file: File, path: &'a Path) -> impl Iterator<Item = (usize, LineResult<String>)> + 'a {
    std::io::BufReader::new(file)
        .lines()
        .map(move |line| line.map_err(|e| io_error(e, path.to_path_buf())))
        .enumerate()
        .filter(|(_, line)| line.as_ref().map_or(true, |line| is_rule_line(line)))
        .map(|(num, line)| (num + 1, line))
}

fn text_line_nums(text: &str) -> impl Iterator<Item = (usize, LineResult<String>)> + '_ {
    text.lines()
        .enumerate()
        .filter(|(_, line)| is_rule_line(line))
        .map(|(num, line)| (num + 1, LineResult::Ok(line.to_string())))
}

// Generates a ruleset from a list of rules, rejecting nonterminals that are
// defined twice or used without being defined
fn ruleset_from_rules(rules: Vec<Rule>) -> FileResult<Ruleset> {
    let mut ruleset = Ruleset::new();
    let mut errors = CompileErrors::new();

    for rule in rules {
        match ruleset.entry(rule.symbol) {
            Entry::Occupied(entry) => errors.push(CompileError {
                location: rule.location,
                error: CompileErrorType::DuplicateNonterminal(entry.key().clone())
            }),
            Entry::Vacant(entry) => {
                entry.insert(Definition {
                    rewrite: rule.rewrite,
                    location: rule.location
                });
            }
        }
    }

    if let Err(undefined) = verify_rules(&ruleset) {
        errors.extend(undefined);
    }

    if errors.is_empty() {
        Ok(ruleset)
    } else {
        errors.sort_by_key(|error| error.location.line);
        Err(errors)
    }
}

fn grammar_from_rules(rule_list: Vec<Rule>, path: &Path) -> FileResult<Grammar> {
    let start_symbol = match rule_list.first() {
        Some(rule) => rule.symbol.clone(),
        None => return Err(vec![CompileError {
            location: Location::whole_file(path),
            error: CompileErrorType::EmptyGrammar
        }])
    };

    let rules = ruleset_from_rules(rule_list)?;

    Ok(Grammar {
        start_symbol,
        rules,
        notation: Notation::Tagged
    })
}

fn parse_lines(lines: impl Iterator<Item = (usize, LineResult<String>)>, path: &Path) -> FileResult<Grammar> {
    let parsed_lines = lines.map(|(num, line_res)| {
        line_res.and_then(|line| parse_lex_line(&line, Location::at(path, num)))
    });

    let (rules, errors): (Vec<_>, Vec<_>) = parsed_lines.partition_map(|line| match line {
        Ok(rule) => Either::Left(rule),
        Err(error) => Either::Right(error),
    });
    if !errors.is_empty() {
        return Err(errors);
    }

    let grammar = grammar_from_rules(rules, path)?;
    debug!(file = %path.display(), rules = grammar.rules.len(), start = grammar.start_symbol.as_str(), "loaded grammar");
    Ok(grammar)
}

pub fn parse_file(path: &Path) -> FileResult<Grammar> {
    let file = File::open(path).map_err(|e| vec![io_error(e, path.to_path_buf())])?;
    parse_lines(file_line_nums(file, path), path)
}

/// Parses grammar text that did not come from a file on disk. `path` is only
/// used to locate errors.
pub fn parse_str(text: &str, path: &Path) -> FileResult<Grammar> {
    parse_lines(text_line_nums(text), path)
}
