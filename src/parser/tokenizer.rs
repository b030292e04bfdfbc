use super::error::{SyntaxError, SyntaxErrorKind};
use super::locations::Span;
use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub(crate) typ: TokenType,
    pub(crate) lexeme: String,
    pub(crate) span: Span,
}

impl Token {
    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}('{}')", self.typ, self.lexeme)
    }
}

#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum TokenType {
    LPAR,
    RPAR,
    ATOM,
}

// Equivalent to padding every parenthesis with spaces and splitting the
// result on whitespace.
const S_TOKEN: &str = r"[()]|[^\s()]+";

static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(S_TOKEN).expect("Error compiling regex."));

pub struct Tokenizer {
    tokens: Vec<Token>,
    lineno: usize,
    paren_lvl: isize,
    stray_close: Option<Span>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            tokens: vec![],
            lineno: 0,
            paren_lvl: 0,
            stray_close: None,
        }
    }

    /// Feeds more lines into the tokenizer. The result tells a line-oriented
    /// caller whether the input seen so far is a complete program.
    pub fn tokenize(&mut self, input: impl Iterator<Item = String>) -> ParserState {
        for line in input {
            self.tokenize_line(line.as_str());
        }
        if let Some(span) = self.stray_close {
            return ParserState::Error(SyntaxError::new(span, SyntaxErrorKind::UnexpectedClose));
        }
        if self.paren_lvl > 0 {
            return ParserState::ContinuationNeeded;
        }
        ParserState::Ok
    }

    pub fn finalize(self) -> Vec<Token> {
        self.tokens
    }

    fn tokenize_line(&mut self, line: &str) {
        let lineno = self.lineno;
        self.lineno += 1;

        for m in TOKEN.find_iter(line) {
            let typ = match m.as_str() {
                "(" => TokenType::LPAR,
                ")" => TokenType::RPAR,
                _ => TokenType::ATOM,
            };
            let span = Span::new(lineno, m.start(), lineno, m.end());
            match typ {
                TokenType::LPAR => self.paren_lvl += 1,
                TokenType::RPAR => {
                    self.paren_lvl -= 1;
                    if self.paren_lvl < 0 && self.stray_close.is_none() {
                        self.stray_close = Some(span);
                    }
                }
                TokenType::ATOM => {}
            }
            self.tokens.push(Token {
                typ,
                lexeme: m.as_str().to_string(),
                span,
            });
        }
    }
}

pub fn tokenize_string(input: &str) -> Vec<Token> {
    let mut tokenizer = Tokenizer::new();
    tokenizer.tokenize(input.lines().map(str::to_string));
    tokenizer.finalize()
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParserState {
    Ok,
    ContinuationNeeded,
    Error(SyntaxError),
}
