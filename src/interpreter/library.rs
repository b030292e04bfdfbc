use std::io::{self, BufRead, Write};

use super::error::{RuntimeError, RuntimeResult};
use super::value::{Arity, Builtin, Callable, Value};

static LIBRARY: [Builtin; 6] = [
    Builtin {
        name: "head",
        arity: Arity::exactly(1),
        func: head,
    },
    Builtin {
        name: "tail",
        arity: Arity::exactly(1),
        func: tail,
    },
    Builtin {
        name: "print",
        arity: Arity::exactly(1),
        func: print,
    },
    Builtin {
        name: "read",
        arity: Arity::between(0, 1),
        func: read,
    },
    Builtin {
        name: "+",
        arity: Arity::exactly(2),
        func: add,
    },
    Builtin {
        name: "-",
        arity: Arity::exactly(2),
        func: subtract,
    },
];

pub(super) fn bindings() -> impl Iterator<Item = (String, Value)> {
    LIBRARY
        .iter()
        .map(|builtin| (builtin.name.to_string(), Value::Callable(Callable::Builtin(*builtin))))
}

fn type_mismatch(context: &str, expected: &'static str, found: &Value) -> RuntimeError {
    RuntimeError::TypeMismatch {
        context: context.to_string(),
        expected,
        found: found.type_name().to_string(),
    }
}

fn head(args: &[Value]) -> RuntimeResult<Value> {
    match &args[0] {
        Value::List(values) => values
            .first()
            .cloned()
            .ok_or(RuntimeError::EmptySequence("head")),
        Value::Str(s) => s
            .chars()
            .next()
            .map(|c| Value::Str(c.to_string()))
            .ok_or(RuntimeError::EmptySequence("head")),
        other => Err(type_mismatch("head", "list or string", other)),
    }
}

fn tail(args: &[Value]) -> RuntimeResult<Value> {
    match &args[0] {
        Value::List(values) if values.is_empty() => Err(RuntimeError::EmptySequence("tail")),
        Value::List(values) => Ok(Value::List(values[1..].to_vec())),
        Value::Str(s) if s.is_empty() => Err(RuntimeError::EmptySequence("tail")),
        Value::Str(s) => Ok(Value::Str(s.chars().skip(1).collect())),
        other => Err(type_mismatch("tail", "list or string", other)),
    }
}

/// Strings are written without their quotes.
fn display_raw(value: &Value) -> String {
    match value {
        Value::Str(s) => s.clone(),
        other => other.to_string(),
    }
}

fn print(args: &[Value]) -> RuntimeResult<Value> {
    println!("{}", display_raw(&args[0]));
    Ok(args[0].clone())
}

fn read(args: &[Value]) -> RuntimeResult<Value> {
    let io_error = |e: io::Error| RuntimeError::Io {
        callee: "read",
        reason: e.to_string(),
    };
    if let Some(prompt) = args.first() {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{}", display_raw(prompt)).map_err(io_error)?;
        stdout.flush().map_err(io_error)?;
    }

    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line).map_err(io_error)?;
    if read == 0 {
        return Err(RuntimeError::Io {
            callee: "read",
            reason: "end of input".to_string(),
        });
    }
    let trimmed = line.trim_end_matches(['\n', '\r']);
    Ok(Value::string(trimmed))
}

fn add(args: &[Value]) -> RuntimeResult<Value> {
    arithmetic("+", &args[0], &args[1], i64::checked_add, |a, b| a + b)
}

fn subtract(args: &[Value]) -> RuntimeResult<Value> {
    arithmetic("-", &args[0], &args[1], i64::checked_sub, |a, b| a - b)
}

/// Integers stay integers; a float on either side promotes the result.
fn arithmetic(
    name: &'static str,
    lhs: &Value,
    rhs: &Value,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> RuntimeResult<Value> {
    match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => int_op(*a, *b)
            .map(Value::Int)
            .ok_or(RuntimeError::Overflow(name)),
        _ => Ok(Value::Float(float_op(
            as_float(name, lhs)?,
            as_float(name, rhs)?,
        ))),
    }
}

fn as_float(name: &str, value: &Value) -> RuntimeResult<f64> {
    match value {
        Value::Int(i) => Ok(*i as f64),
        Value::Float(r) => Ok(*r),
        other => Err(type_mismatch(name, "number", other)),
    }
}
