use super::ast::{Expression, Literal};
use super::error::{SyntaxError, SyntaxErrorKind};
use super::locations::{Locatable, Span};
use super::tokenizer::{tokenize_string, Token, TokenType};
use const_format::concatcp;
use once_cell::sync::Lazy;
use regex::Regex;

macro_rules! alternative {
    ($t:expr) => {{
        $t
    }};
    ($t:expr, $($ts:expr),+) => {{
        concatcp!($t, "|", alternative!($($ts),+))
    }}
}

macro_rules! group {
    ($($ts:expr),+) => {{
        concatcp!(r"(?:", alternative!($($ts),+), ")")
    }}
}

macro_rules! maybe {
    ($($ts:expr),+) => {
        concatcp!(group!($($ts),+), r"?")
    }
}

const S_SIGN: &str = r"[+-]?";
const S_DIGITPART: &str = r"[0-9](?:_?[0-9])*";
const S_EXPONENT: &str = concatcp!(r"[eE][+-]?", S_DIGITPART);
const S_WHOLEPOINT: &str = concatcp!(S_DIGITPART, r"\.", maybe!(S_DIGITPART));
const S_FRACTIONPOINT: &str = concatcp!(r"\.", S_DIGITPART);
const S_POINTFLOAT: &str = group!(S_WHOLEPOINT, S_FRACTIONPOINT);
const S_FINITEFLOAT: &str = concatcp!(group!(S_POINTFLOAT, S_DIGITPART), maybe!(S_EXPONENT));
const S_SPECIALFLOAT: &str = r"(?i:infinity|inf|nan)";
const S_WHOLE_INTEGER: &str = concatcp!("^", S_SIGN, S_DIGITPART, "$");
const S_WHOLE_FLOAT: &str = concatcp!("^", S_SIGN, group!(S_FINITEFLOAT, S_SPECIALFLOAT), "$");

static INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(S_WHOLE_INTEGER).expect("Error compiling regex."));
static FLOAT: Lazy<Regex> = Lazy::new(|| Regex::new(S_WHOLE_FLOAT).expect("Error compiling regex."));

const QUOTE: char = '"';

/// Parses source text into the program list: one `Expression::List` holding
/// every top-level form in source order.
pub fn parse(source: &str) -> Result<Expression, SyntaxError> {
    let tokens = tokenize_string(source);
    tracing::debug!(tokens = tokens.len(), "tokenized source");
    parse_tokens(tokens)
}

struct Frame {
    open: Span,
    elements: Vec<Expression>,
}

/// Consumes tokens front to back. Open lists live on an explicit stack, so
/// deeply nested input does not grow the native call stack.
pub fn parse_tokens(tokens: impl IntoIterator<Item = Token>) -> Result<Expression, SyntaxError> {
    let mut stack: Vec<Frame> = vec![];
    let mut program = vec![];
    let mut last = Span::default();

    for token in tokens {
        last = token.span();
        match token.typ {
            TokenType::LPAR => stack.push(Frame {
                open: token.span,
                elements: vec![],
            }),
            TokenType::RPAR => {
                let frame = stack.pop().ok_or_else(|| {
                    SyntaxError::new(token.span, SyntaxErrorKind::UnexpectedClose)
                })?;
                let list = Expression::List(frame.elements);
                match stack.last_mut() {
                    Some(parent) => parent.elements.push(list),
                    None => program.push(list),
                }
            }
            TokenType::ATOM => {
                let expr = categorize(&token)?;
                match stack.last_mut() {
                    Some(parent) => parent.elements.push(expr),
                    None => program.push(expr),
                }
            }
        }
    }

    if let Some(frame) = stack.pop() {
        return Err(SyntaxError::new(
            frame.open.till(&last),
            SyntaxErrorKind::UnclosedList,
        ));
    }
    if program.is_empty() {
        let end = Span {
            start: last.end,
            end: last.end,
        };
        return Err(SyntaxError::new(end, SyntaxErrorKind::EmptyProgram));
    }
    Ok(Expression::List(program))
}

/// Integer first, then float, then a quoted string; anything else names an
/// identifier.
fn categorize(token: &Token) -> Result<Expression, SyntaxError> {
    let lexeme = token.lexeme.as_str();

    if INTEGER.is_match(lexeme) {
        return lexeme
            .replace('_', "")
            .parse::<i64>()
            .map(Expression::int)
            .map_err(|_| {
                SyntaxError::new(
                    token.span,
                    SyntaxErrorKind::IntegerOutOfRange(lexeme.to_string()),
                )
            });
    }

    if FLOAT.is_match(lexeme) {
        if let Some(r) = parse_float(lexeme) {
            return Ok(Expression::float(r));
        }
    }

    if lexeme.starts_with(QUOTE) || lexeme.ends_with(QUOTE) {
        if lexeme.len() >= 2 && lexeme.starts_with(QUOTE) && lexeme.ends_with(QUOTE) {
            let inner = &lexeme[1..lexeme.len() - 1];
            return Ok(Expression::Literal(Literal::Str(inner.to_string())));
        }
        return Err(SyntaxError::new(
            token.span,
            SyntaxErrorKind::UnterminatedString(lexeme.to_string()),
        ));
    }

    Ok(Expression::identifier(lexeme))
}

fn parse_float(lexeme: &str) -> Option<f64> {
    let (negative, unsigned) = match lexeme.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, lexeme.strip_prefix('+').unwrap_or(lexeme)),
    };
    let magnitude = match unsigned.to_ascii_lowercase().as_str() {
        "inf" | "infinity" => f64::INFINITY,
        "nan" => f64::NAN,
        digits => digits.replace('_', "").parse::<f64>().ok()?,
    };
    Some(if negative { -magnitude } else { magnitude })
}
