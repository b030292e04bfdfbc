use super::tokenizer::Token;

#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Location {
    pub(crate) line: usize,
    pub(crate) column: usize,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line + 1, self.column + 1)
    }
}

pub trait Locatable {
    fn span(&self) -> Span;
}

#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Span {
    pub(crate) start: Location,
    pub(crate) end: Location,
}

impl Span {
    pub(super) fn new(
        start_line: usize,
        start_col: usize,
        end_line: usize,
        end_col: usize,
    ) -> Self {
        Self {
            start: Location {
                line: start_line,
                column: start_col,
            },
            end: Location {
                line: end_line,
                column: end_col,
            },
        }
    }

    pub fn start(&self) -> Location {
        self.start
    }

    pub fn end(&self) -> Location {
        self.end
    }

    pub(super) fn till<R: Locatable>(&self, other: &R) -> Self {
        Self {
            start: self.start,
            end: other.span().end,
        }
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else if self.start.line == self.end.line {
            write!(
                f,
                "line {}, columns {}-{}",
                self.start.line + 1,
                self.start.column + 1,
                self.end.column
            )
        } else {
            write!(f, "{} till {}", self.start, self.end)
        }
    }
}

impl Locatable for Token {
    fn span(&self) -> Span {
        self.span
    }
}

impl Locatable for Span {
    fn span(&self) -> Span {
        *self
    }
}
