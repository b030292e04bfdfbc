use std::fmt;

/// A node of the parsed program. Trees are immutable once the parser has
/// built them.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(Literal),
    Identifier(String),
    List(Vec<Expression>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Str(String),
}

impl Expression {
    pub fn int(i: i64) -> Self {
        Self::Literal(Literal::Int(i))
    }

    pub fn float(r: f64) -> Self {
        Self::Literal(Literal::Float(r))
    }

    pub fn string<A: AsRef<str>>(s: A) -> Self {
        Self::Literal(Literal::Str(s.as_ref().to_owned()))
    }

    pub fn identifier<A: AsRef<str>>(name: A) -> Self {
        Self::Identifier(name.as_ref().to_owned())
    }

    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Self::Identifier(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Expression]> {
        match self {
            Self::List(elements) => Some(elements),
            _ => None,
        }
    }
}

// Nested lists are torn down through a worklist, so dropping a deep tree
// does not recurse once per level.
impl Drop for Expression {
    fn drop(&mut self) {
        let Self::List(elements) = self else {
            return;
        };
        let mut pending = std::mem::take(elements);
        while let Some(mut expr) = pending.pop() {
            if let Self::List(children) = &mut expr {
                pending.append(children);
            }
        }
    }
}

/// Floats always carry a `.`, an exponent or a special name, so that the
/// rendered text is categorized as a float again.
pub(crate) fn fmt_float(r: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if r.is_nan() {
        write!(f, "nan")
    } else if r.is_infinite() {
        write!(f, "{}inf", if r < 0.0 { "-" } else { "" })
    } else {
        write!(f, "{r:?}")
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(r) => fmt_float(*r, f),
            Self::Str(s) => write!(f, "\"{s}\""),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(literal) => write!(f, "{literal}"),
            Self::Identifier(name) => write!(f, "{name}"),
            Self::List(elements) => {
                write!(f, "(")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{element}")?;
                }
                write!(f, ")")
            }
        }
    }
}
