use super::locations::Span;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Error: {kind} in {span}")]
pub struct SyntaxError {
    pub(crate) span: Span,
    pub(crate) kind: SyntaxErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxErrorKind {
    #[error("empty program")]
    EmptyProgram,
    #[error("unbalanced parentheses: this '(' is never closed")]
    UnclosedList,
    #[error("unbalanced parentheses: unexpected ')'")]
    UnexpectedClose,
    #[error("integer literal '{0}' does not fit in 64 bits")]
    IntegerOutOfRange(String),
    #[error("unterminated string literal {0}")]
    UnterminatedString(String),
}

impl SyntaxError {
    pub fn new(span: Span, kind: SyntaxErrorKind) -> Self {
        Self { span, kind }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn kind(&self) -> &SyntaxErrorKind {
        &self.kind
    }
}
