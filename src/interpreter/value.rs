use std::fmt;
use std::rc::Rc;

use derivative::Derivative;

use super::environment::Environment;
use super::error::RuntimeResult;
use crate::parser::{fmt_float, Expression, Literal};

/// The result of evaluating an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Callable(Callable),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Callable {
    Closure(Closure),
    Builtin(Builtin),
}

/// A function value produced by `lambda`. It keeps the environment it was
/// defined in alive for as long as the closure itself is reachable.
#[derive(Derivative, Clone)]
#[derivative(Debug, PartialEq)]
pub struct Closure {
    pub(crate) params: Rc<[String]>,
    pub(crate) body: Rc<Expression>,
    #[derivative(Debug = "ignore")]
    pub(crate) env: Environment,
}

pub type BuiltinFn = fn(&[Value]) -> RuntimeResult<Value>;

#[derive(Derivative, Clone, Copy)]
#[derivative(Debug, PartialEq)]
pub struct Builtin {
    pub(crate) name: &'static str,
    pub(crate) arity: Arity,
    #[derivative(Debug = "ignore", PartialEq = "ignore")]
    pub(crate) func: BuiltinFn,
}

/// Accepted argument counts, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    pub(crate) min: usize,
    pub(crate) max: usize,
}

impl Arity {
    pub const fn exactly(n: usize) -> Self {
        Self { min: n, max: n }
    }

    pub const fn between(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn accepts(&self, n: usize) -> bool {
        (self.min..=self.max).contains(&n)
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{} to {}", self.min, self.max)
        }
    }
}

impl Value {
    pub fn string<A: AsRef<str>>(s: A) -> Self {
        Self::Str(s.as_ref().to_owned())
    }

    pub fn list<I: IntoIterator<Item = Value>>(values: I) -> Self {
        Self::List(values.into_iter().collect())
    }

    /// Empty strings, empty sequences and numeric zero are false; everything
    /// else, callables and NaN included, is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Int(i) => *i != 0,
            Self::Float(r) => *r != 0.0,
            Self::Str(s) => !s.is_empty(),
            Self::List(values) => !values.is_empty(),
            Self::Callable(_) => true,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::List(_) => "list",
            Self::Callable(_) => "function",
        }
    }
}

impl Callable {
    pub fn name(&self) -> &str {
        match self {
            Self::Closure(_) => "lambda",
            Self::Builtin(builtin) => builtin.name,
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i.into())
    }
}

impl From<f64> for Value {
    fn from(r: f64) -> Self {
        Self::Float(r)
    }
}

impl From<&Literal> for Value {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::Int(i) => Self::Int(*i),
            Literal::Float(r) => Self::Float(*r),
            Literal::Str(s) => Self::Str(s.clone()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::string(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Self::List(values)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(r) => fmt_float(*r, f),
            Self::Str(s) => write!(f, "\"{s}\""),
            Self::List(values) => {
                write!(f, "(")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, ")")
            }
            Self::Callable(callable) => write!(f, "{callable}"),
        }
    }
}

impl fmt::Display for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closure(closure) => write!(f, "<lambda ({})>", closure.params.join(" ")),
            Self::Builtin(builtin) => write!(f, "<builtin {}>", builtin.name),
        }
    }
}
