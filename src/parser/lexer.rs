use itertools::{Itertools, PeekingNext};

use super::{CompileErrorType, Result};

#[derive(PartialEq, Debug)]
pub enum Token {
    Equals,
    Or,
    Nonterminal(String),
    Terminal(String)
}

fn ends_nonterminal(c: char) -> bool {
    c.is_whitespace() || c == '=' || c == '|' || c == '\"'
}

pub fn lex_terminal(line: &mut impl Iterator<Item = char>) -> Result<Token> {
    line.next(); // Consume open quote
    let mut token_text = String::new();

    // A backslash takes the character after it literally, so `\"` and `\\`
    // can appear inside a terminal
    while let Some(c) = line.next() {
        match c {
            '\"' => return Ok(Token::Terminal(token_text)),
            '\\' => match line.next() {
                Some(escaped) => token_text.push(escaped),
                None => break,
            },
            _ => token_text.push(c),
        }
    }

    Err(CompileErrorType::UnmatchedQuote)
}

pub fn lex_nonterminal(line: &mut impl PeekingNext<Item = char>) -> Result<Token> {
    Ok(Token::Nonterminal(line.peeking_take_while(|&c| !ends_nonterminal(c)).collect()))
}

pub fn lex_line(line: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();

    let mut line_chars = line.chars().peekable();

    while let Some(c) = line_chars.peek() {
        if *c == '=' {
            line_chars.next();
            tokens.push(Token::Equals);
        } else if *c == '|' {
            line_chars.next();
            tokens.push(Token::Or);
        } else if *c == '\"' {
            tokens.push(lex_terminal(&mut line_chars)?);
        } else if !c.is_whitespace() {
            tokens.push(lex_nonterminal(&mut line_chars)?);
        } else {
            line_chars.next();
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use std::iter::zip;

    use super::*;

    #[test]
    fn lex_normal_terminal() {
        let lines = vec![
            "\"a\" B c",
            "\"(\"",
            "\"ab\"\"c\"\"\""
        ];
        // (result from the function, rest of the iterator)
        let answers = vec![
            (Token::Terminal("a".to_string()), " B c"),
            (Token::Terminal("(".to_string()), ""),
            (Token::Terminal("ab".to_string()), "\"c\"\"\"")
        ];

        for (line, (answer_token, answer_rest)) in zip(lines, answers) {
            let mut chars = line.chars().peekable();
            assert_eq!(lex_terminal(&mut chars).unwrap(), answer_token);
            assert_eq!(chars.collect::<String>(), answer_rest);
        }
    }

    #[test]
    fn lex_mismatched_terminal() {
        let lines = vec![
            "\"welcome",
            "\"a B c",
            "\"a\\\"",
            "\"a\\"
        ];

        for line in lines {
            let mut chars = line.chars().peekable();
            assert_eq!(lex_terminal(&mut chars).unwrap_err(), CompileErrorType::UnmatchedQuote);
        }
    }

    #[test]
    fn lex_escaped_terminal() {
        let lines = vec![
            "\"\\\"\" A",
            "\"a\\\\b\"",
            "\"\\x\""
        ];
        let answers = vec![
            (Token::Terminal("\"".to_string()), " A"),
            (Token::Terminal("a\\b".to_string()), ""),
            (Token::Terminal("x".to_string()), "")
        ];

        for (line, (answer_token, answer_rest)) in zip(lines, answers) {
            let mut chars = line.chars().peekable();
            assert_eq!(lex_terminal(&mut chars).unwrap(), answer_token);
            assert_eq!(chars.collect::<String>(), answer_rest);
        }
    }

    #[test]
    fn lex_normal_nonterminal() {
        let lines = vec![
            "items rest",
            "S",
            "A|B",
            "expr=\"a\""
        ];
        // (result from the function, rest of the iterator)
        let answers = vec![
            (Token::Nonterminal("items".to_string()), " rest"),
            (Token::Nonterminal("S".to_string()), ""),
            (Token::Nonterminal("A".to_string()), "|B"),
            (Token::Nonterminal("expr".to_string()), "=\"a\"")
        ];

        for (line, (answer_token, answer_rest)) in zip(lines, answers) {
            let mut chars = line.chars().peekable();
            assert_eq!(lex_nonterminal(&mut chars).unwrap(), answer_token);
            assert_eq!(chars.collect::<String>(), answer_rest);
        }
    }

    #[test]
    fn lex_normal_line() {
        let lines = vec![
            "S = \"a\" A | \"b\"",
            "items=\")\"|\"a\" items",
            "A ="
        ];
        let answers = vec![
            vec![
                Token::Nonterminal("S".to_string()),
                Token::Equals,
                Token::Terminal("a".to_string()),
                Token::Nonterminal("A".to_string()),
                Token::Or,
                Token::Terminal("b".to_string())
            ],
            vec![
                Token::Nonterminal("items".to_string()),
                Token::Equals,
                Token::Terminal(")".to_string()),
                Token::Or,
                Token::Terminal("a".to_string()),
                Token::Nonterminal("items".to_string())
            ],
            vec![
                Token::Nonterminal("A".to_string()),
                Token::Equals
            ]
        ];

        for (line, answer) in zip(lines, answers) {
            assert_eq!(lex_line(line).unwrap(), answer)
        }
    }

    #[test]
    fn lex_unmatched_line() {
        assert_eq!(lex_line("S = \"a A").unwrap_err(), CompileErrorType::UnmatchedQuote);
    }
}
