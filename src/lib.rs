mod parser;
pub use parser::{
    parse, parse_tokens, tokenize_string, Expression, Literal, Locatable, Location, ParserState,
    Span, SyntaxError, SyntaxErrorKind, Token, Tokenizer,
};

mod interpreter;
pub use interpreter::{
    apply, evaluate, evaluate_program, Arity, Builtin, BuiltinFn, Callable, Closure, Environment,
    RuntimeError, RuntimeResult, Value,
};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error("Error: {0}")]
    Runtime(#[from] RuntimeError),
}

/// Parses `source` and evaluates every top-level form in order, returning
/// the value of the last one.
pub fn run(source: &str, environment: Option<&Environment>) -> Result<Value, Error> {
    let program = parse(source)?;
    Ok(evaluate_program(&program, environment)?)
}
