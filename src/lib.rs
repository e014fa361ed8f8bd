//! Checks that a grammar is a simple grammar (every alternative starts with a
//! terminal, and no two alternatives of a nonterminal start with the same one)
//! and decides whether strings belong to its language.
//!
//! ```text
//! S = "a" A | "b"
//! A = "c"
//! ```
//!
//! accepts `ac` and `b` and nothing else.

pub mod error_handling;
pub mod generator;
pub mod grammar;
pub mod matcher;
pub mod parser;
pub mod validator;

pub use grammar::{Grammar, Symbol};
pub use matcher::accepts;
pub use validator::{validate, SimpleGrammar};
