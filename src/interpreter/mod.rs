mod environment;
mod error;
mod library;
mod value;

use std::rc::Rc;

use crate::parser::Expression;

pub use environment::Environment;
pub use error::{RuntimeError, RuntimeResult};
pub use value::{Arity, Builtin, BuiltinFn, Callable, Closure, Value};

const IF: &str = "if";
const LET: &str = "let";
const LAMBDA: &str = "lambda";

/// Evaluates `expression`. Without an environment a fresh one holding only
/// the base library is used.
pub fn evaluate(expression: &Expression, environment: Option<&Environment>) -> RuntimeResult<Value> {
    match environment {
        Some(env) => eval(expression, env),
        None => eval(expression, &Environment::library()),
    }
}

/// Evaluates each top-level form of a parsed program in order and returns
/// the value of the last one.
pub fn evaluate_program(
    program: &Expression,
    environment: Option<&Environment>,
) -> RuntimeResult<Value> {
    let library;
    let env = match environment {
        Some(env) => env,
        None => {
            library = Environment::library();
            &library
        }
    };
    match program {
        Expression::List(forms) => {
            let mut last = Value::List(vec![]);
            for form in forms {
                last = eval(form, env)?;
            }
            Ok(last)
        }
        other => eval(other, env),
    }
}

fn eval(expression: &Expression, env: &Environment) -> RuntimeResult<Value> {
    match expression {
        Expression::List(elements) => eval_list(elements, env),
        Expression::Identifier(name) => env.lookup(name),
        Expression::Literal(literal) => Ok(literal.into()),
    }
}

fn eval_list(elements: &[Expression], env: &Environment) -> RuntimeResult<Value> {
    if let Some(form) = elements.first().and_then(Expression::as_identifier) {
        let operands = &elements[1..];
        match form {
            IF => return eval_if(operands, env),
            LET => return eval_let(operands, env),
            LAMBDA => return eval_lambda(operands, env),
            _ => {}
        }
    }

    let values = elements
        .iter()
        .map(|element| eval(element, env))
        .collect::<RuntimeResult<Vec<_>>>()?;
    if let Some(Value::Callable(callable)) = values.first() {
        return apply(callable, &values[1..]);
    }
    // A list whose head is not callable evaluates to its elements' values.
    Ok(Value::List(values))
}

fn eval_if(operands: &[Expression], env: &Environment) -> RuntimeResult<Value> {
    let [condition, consequent, alternative] = operands else {
        return Err(RuntimeError::malformed(
            IF,
            format!(
                "expected a condition and two branches, got {} operand(s)",
                operands.len()
            ),
        ));
    };
    if eval(condition, env)?.is_truthy() {
        eval(consequent, env)
    } else {
        eval(alternative, env)
    }
}

/// Every value is computed in the outer environment, so bindings can see
/// neither each other nor themselves.
fn eval_let(operands: &[Expression], env: &Environment) -> RuntimeResult<Value> {
    let [bindings, body] = operands else {
        return Err(RuntimeError::malformed(
            LET,
            format!("expected bindings and a body, got {} operand(s)", operands.len()),
        ));
    };
    let bindings = bindings
        .as_list()
        .ok_or_else(|| RuntimeError::malformed(LET, format!("bindings '{bindings}' are not a list")))?;

    let mut scope = Vec::with_capacity(bindings.len());
    for binding in bindings {
        let Some([name, value]) = binding.as_list() else {
            return Err(RuntimeError::malformed(
                LET,
                format!("binding '{binding}' is not a (name value) pair"),
            ));
        };
        let name = name
            .as_identifier()
            .ok_or_else(|| RuntimeError::malformed(LET, format!("cannot bind to '{name}'")))?;
        scope.push((name.to_string(), eval(value, env)?));
    }
    eval(body, &env.extend(scope))
}

fn eval_lambda(operands: &[Expression], env: &Environment) -> RuntimeResult<Value> {
    let [params, body] = operands else {
        return Err(RuntimeError::malformed(
            LAMBDA,
            format!("expected parameters and a body, got {} operand(s)", operands.len()),
        ));
    };
    let params = params
        .as_list()
        .ok_or_else(|| {
            RuntimeError::malformed(LAMBDA, format!("parameters '{params}' are not a list"))
        })?
        .iter()
        .map(|param| {
            param.as_identifier().map(str::to_string).ok_or_else(|| {
                RuntimeError::malformed(LAMBDA, format!("parameter '{param}' is not an identifier"))
            })
        })
        .collect::<RuntimeResult<Rc<[String]>>>()?;

    Ok(Value::Callable(Callable::Closure(Closure {
        params,
        body: Rc::new(body.clone()),
        env: env.clone(),
    })))
}

/// Applies a function to already evaluated arguments. A closure body runs in
/// a new scope whose parent is the closure's defining environment.
pub fn apply(callable: &Callable, args: &[Value]) -> RuntimeResult<Value> {
    tracing::debug!(
        callee = %callable,
        args = ?args.iter().map(ToString::to_string).collect::<Vec<_>>(),
        "call"
    );

    let result = match callable {
        Callable::Builtin(builtin) => {
            if !builtin.arity.accepts(args.len()) {
                return Err(arity_mismatch(callable, builtin.arity, args.len()));
            }
            (builtin.func)(args)?
        }
        Callable::Closure(closure) => {
            if closure.params.len() != args.len() {
                let arity = Arity::exactly(closure.params.len());
                return Err(arity_mismatch(callable, arity, args.len()));
            }
            let bindings = closure.params.iter().cloned().zip(args.iter().cloned());
            eval(&closure.body, &closure.env.extend(bindings))?
        }
    };

    tracing::debug!(callee = %callable, result = %result, "return");
    Ok(result)
}

fn arity_mismatch(callable: &Callable, expected: Arity, found: usize) -> RuntimeError {
    RuntimeError::ArityMismatch {
        callee: callable.name().to_string(),
        expected: expected.to_string(),
        found,
    }
}
