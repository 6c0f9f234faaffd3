//! Delimiter scanning for `${...}` text substitution tokens.
mod token_parser;

pub use token_parser::{TokenParser, CLOSE_TOKEN, ESCAPE, OPEN_TOKEN};
