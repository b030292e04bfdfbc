mod ast;
mod error;
mod grammar;
mod locations;
mod tokenizer;

pub use ast::*;
pub use error::{SyntaxError, SyntaxErrorKind};
pub use grammar::{parse, parse_tokens};
pub use locations::{Locatable, Location, Span};
pub use tokenizer::{tokenize_string, ParserState, Token, Tokenizer};

#[cfg(test)]
mod test;
