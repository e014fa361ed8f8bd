mod cli;

use std::io::BufRead;
use std::process::ExitCode;

use clap::Parser;
use itertools::Itertools;
use rand::prelude::*;
use sgram::validator::SimpleGrammar;
use sgram::{generator, matcher, parser};
use tracing::{info, warn};

// Exit statuses besides success
const FAILURE: u8 = 1;
const BROKEN_GRAMMAR: u8 = 2;
const GENERATION_FAILED: u8 = 3;

fn print_errors(errors: impl IntoIterator<Item = impl std::fmt::Display>) {
    for error in errors {
        eprintln!("{}", error);
    }
}

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut grammar = match parser::parse_file(&cli.file) {
        Ok(grammar) => grammar,
        Err(errors) => {
            print_errors(errors);
            return ExitCode::from(FAILURE);
        }
    };
    if let Some(start) = cli.start {
        info!(start = start.as_str(), "overriding start symbol");
        grammar.start_symbol = start;
    }

    println!("Grammar:\n{}", grammar);
    let grammar = match SimpleGrammar::try_from(grammar) {
        Ok(grammar) => {
            println!("The grammar is simple.");
            grammar
        }
        Err(errors) => {
            println!("The grammar isn't simple.");
            print_errors(errors);
            return ExitCode::from(FAILURE);
        }
    };

    if let Some(amount) = cli.generate {
        let mut rng = match cli.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        for _ in 0..amount {
            match generator::generate(grammar.grammar(), &mut rng) {
                Ok(sentence) => println!("{}", sentence),
                Err(error) => {
                    print_errors([error]);
                    return ExitCode::from(GENERATION_FAILED);
                }
            }
        }

        if cli.inputs.is_empty() {
            return ExitCode::SUCCESS;
        }
    }

    let inputs: Box<dyn Iterator<Item = std::io::Result<String>>> = if cli.inputs.is_empty() {
        info!("reading inputs from standard input");
        Box::new(std::io::stdin().lock().lines())
    } else {
        Box::new(cli.inputs.into_iter().map(Ok::<_, std::io::Error>))
    };

    for input in inputs {
        let input = match input {
            Ok(input) => input,
            Err(error) => {
                eprintln!("Could not read input: {}", error);
                return ExitCode::from(FAILURE);
            }
        };

        let shown = input.chars().map(|c| format!("'{}'", c)).join(", ");
        match matcher::accepts(&grammar, grammar.start_symbol(), &input) {
            Ok(true) => println!("[{}] Accepted", shown),
            Ok(false) => println!("[{}] Rejected", shown),
            Err(error) => {
                warn!(input = input.as_str(), "grammar is broken");
                print_errors([error]);
                return ExitCode::from(BROKEN_GRAMMAR);
            }
        }
    }

    ExitCode::SUCCESS
}
