use crate::{
    environment::prelude::Value,
    utils::prelude::SrcSpan
};

use super::{
    as_f64,
    error::{runtime_error, RuntimeError, RuntimeErrorType},
    Interpreter
};

pub const BUILTINS: &[&str] = &[
    "len", "type", "str", "int", "float", "abs",
    "max", "min", "append", "pop", "input"
];

pub fn is_builtin(name: &str) -> bool {
    BUILTINS.contains(&name)
}

pub(super) fn call_builtin(
    interpreter: &mut Interpreter<'_>,
    name: &str,
    args: Vec<Value>,
    location: SrcSpan
) -> Result<Value, RuntimeError> {
    match name {
        "len" => len(args, location),
        "type" => type_name(args, location),
        "str" => to_str(args, location),
        "int" => to_int(args, location),
        "float" => to_float(args, location),
        "abs" => abs(args, location),
        "max" => extremum("max", args, location, true),
        "min" => extremum("min", args, location, false),
        "append" => append(args, location),
        "pop" => pop(args, location),
        "input" => input(interpreter, args, location),
        _ => runtime_error(
            RuntimeErrorType::UndefinedVariable { name: name.to_string() },
            location
        )
    }
}

fn expect_arity(
    name: &str,
    expected: usize,
    args: &[Value],
    location: SrcSpan
) -> Result<(), RuntimeError> {
    if args.len() != expected {
        return runtime_error(
            RuntimeErrorType::ArityMismatch {
                name: name.to_string(),
                expected: expected.to_string(),
                got: args.len()
            },
            location
        );
    }

    Ok(())
}

fn invalid_argument<T>(
    function: &str,
    expected: &str,
    got: &Value,
    location: SrcSpan
) -> Result<T, RuntimeError> {
    runtime_error(
        RuntimeErrorType::InvalidArgument {
            function: function.to_string(),
            expected: expected.to_string(),
            got: got._type()
        },
        location
    )
}

fn len(args: Vec<Value>, location: SrcSpan) -> Result<Value, RuntimeError> {
    expect_arity("len", 1, &args, location)?;

    match &args[0] {
        Value::String { value } => Ok(Value::Integer {
            value: value.chars().count() as i64
        }),
        Value::List { elements } => Ok(Value::Integer {
            value: elements.borrow().len() as i64
        }),
        value => invalid_argument("len", "a `string` or a `list`", value, location)
    }
}

fn type_name(args: Vec<Value>, location: SrcSpan) -> Result<Value, RuntimeError> {
    expect_arity("type", 1, &args, location)?;

    Ok(Value::String { value: args[0]._type().name().to_string() })
}

fn to_str(args: Vec<Value>, location: SrcSpan) -> Result<Value, RuntimeError> {
    expect_arity("str", 1, &args, location)?;

    Ok(Value::String { value: args[0].to_string() })
}

fn to_int(args: Vec<Value>, location: SrcSpan) -> Result<Value, RuntimeError> {
    expect_arity("int", 1, &args, location)?;

    match &args[0] {
        Value::Integer { value } => Ok(Value::Integer { value: *value }),
        // Truncation toward zero
        Value::Float { value } => Ok(Value::Integer { value: value.trunc() as i64 }),
        Value::String { value } => {
            if let Ok(value) = value.trim().parse::<i64>() {
                return Ok(Value::Integer { value });
            }

            match value.trim().parse::<f64>() {
                Ok(value) => Ok(Value::Integer { value: value.trunc() as i64 }),
                Err(_) => invalid_argument(
                    "int", "a number or a numeric `string`", &args[0], location
                )
            }
        },
        value => invalid_argument("int", "a number or a numeric `string`", value, location)
    }
}

fn to_float(args: Vec<Value>, location: SrcSpan) -> Result<Value, RuntimeError> {
    expect_arity("float", 1, &args, location)?;

    match &args[0] {
        Value::Integer { value } => Ok(Value::Float { value: *value as f64 }),
        Value::Float { value } => Ok(Value::Float { value: *value }),
        Value::String { value } => match value.trim().parse::<f64>() {
            Ok(value) => Ok(Value::Float { value }),
            Err(_) => invalid_argument(
                "float", "a number or a numeric `string`", &args[0], location
            )
        },
        value => invalid_argument("float", "a number or a numeric `string`", value, location)
    }
}

fn abs(args: Vec<Value>, location: SrcSpan) -> Result<Value, RuntimeError> {
    expect_arity("abs", 1, &args, location)?;

    match &args[0] {
        Value::Integer { value } => Ok(Value::Integer { value: value.wrapping_abs() }),
        Value::Float { value } => Ok(Value::Float { value: value.abs() }),
        value => invalid_argument("abs", "a number", value, location)
    }
}

/// Shared body of `max` and `min`. Accepts either several numeric
/// arguments or a single list of numbers.
fn extremum(
    name: &str,
    args: Vec<Value>,
    location: SrcSpan,
    pick_max: bool
) -> Result<Value, RuntimeError> {
    let values = match args.as_slice() {
        [Value::List { elements }] => elements.borrow().clone(),
        _ => args
    };

    if values.is_empty() {
        return runtime_error(
            RuntimeErrorType::ArityMismatch {
                name: name.to_string(),
                expected: "at least 1".to_string(),
                got: 0
            },
            location
        );
    }

    let mut best = values[0].clone();
    let mut best_key = match as_f64(&best) {
        Some(key) => key,
        None => return invalid_argument(name, "numbers", &best, location)
    };

    for value in &values[1..] {
        let key = match as_f64(value) {
            Some(key) => key,
            None => return invalid_argument(name, "numbers", value, location)
        };

        if (pick_max && key > best_key) || (!pick_max && key < best_key) {
            best = value.clone();
            best_key = key;
        }
    }

    Ok(best)
}

fn append(args: Vec<Value>, location: SrcSpan) -> Result<Value, RuntimeError> {
    expect_arity("append", 2, &args, location)?;

    let mut args = args;
    let value = args.pop().unwrap_or(Value::Nil);
    let list = args.pop().unwrap_or(Value::Nil);

    match &list {
        Value::List { elements } => {
            elements.borrow_mut().push(value);

            // The same list comes back, every alias sees the new element
            Ok(list.clone())
        },
        value => invalid_argument("append", "a `list`", value, location)
    }
}

fn pop(args: Vec<Value>, location: SrcSpan) -> Result<Value, RuntimeError> {
    expect_arity("pop", 1, &args, location)?;

    match &args[0] {
        Value::List { elements } => {
            let popped = elements.borrow_mut().pop();

            match popped {
                Some(value) => Ok(value),
                None => runtime_error(RuntimeErrorType::PopFromEmptyList, location)
            }
        },
        value => invalid_argument("pop", "a `list`", value, location)
    }
}

fn input(
    interpreter: &mut Interpreter<'_>,
    args: Vec<Value>,
    location: SrcSpan
) -> Result<Value, RuntimeError> {
    match args.as_slice() {
        [] => {},
        [Value::String { value }] => {
            let _ = write!(interpreter.output, "{value}");
            let _ = interpreter.output.flush();
        },
        [value] => return invalid_argument("input", "a `string` prompt", value, location),
        _ => return runtime_error(
            RuntimeErrorType::ArityMismatch {
                name: "input".to_string(),
                expected: "at most 1".to_string(),
                got: args.len()
            },
            location
        )
    }

    let mut line = String::new();

    // End of input reads as an empty string
    let _ = interpreter.input.read_line(&mut line);

    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }

    Ok(Value::String { value: line })
}
