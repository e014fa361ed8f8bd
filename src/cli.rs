use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// File containing the grammar
    pub file: PathBuf,

    /// Strings to check (default: one per line from standard input)
    pub inputs: Vec<String>,

    /// Start symbol (default: first in the file)
    #[arg(short, long, value_name = "SYMBOL")]
    pub start: Option<String>,

    /// Print this many random sentences of the grammar
    #[arg(short = 'n', long, value_name = "AMOUNT")]
    pub generate: Option<u32>,

    /// Seed for --generate
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Log level written to standard error
    #[arg(short, long, value_name = "LEVEL", default_value = "warn")]
    pub log_level: Level,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_arguments() {
        let cli = Cli::try_parse_from(["sgram", "g.bnf", "ac", "b", "-s", "A", "-n", "3", "--seed", "9"]).unwrap();

        assert_eq!(cli.file, PathBuf::from("g.bnf"));
        assert_eq!(cli.inputs, vec!["ac".to_string(), "b".to_string()]);
        assert_eq!(cli.start.as_deref(), Some("A"));
        assert_eq!(cli.generate, Some(3));
        assert_eq!(cli.seed, Some(9));
        assert_eq!(cli.log_level, Level::WARN);
    }

    #[test]
    fn parse_defaults() {
        let cli = Cli::try_parse_from(["sgram", "g.bnf", "-l", "debug"]).unwrap();

        assert!(cli.inputs.is_empty());
        assert_eq!(cli.start, None);
        assert_eq!(cli.generate, None);
        assert_eq!(cli.log_level, Level::DEBUG);
    }

    #[test]
    fn require_grammar_file() {
        assert!(Cli::try_parse_from(["sgram"]).is_err());
    }
}
