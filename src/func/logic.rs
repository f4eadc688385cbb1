//! Boolean predicates

use crate::error::EvalError;
use crate::value::Value;

/// Inclusive range test: `lo <= v && v <= hi`.
pub fn between(args: &[Value]) -> Result<Value, EvalError> {
    let v = args[0].as_number("between")?;
    let lo = args[1].as_number("between")?;
    let hi = args[2].as_number("between")?;
    Ok(Value::Boolean(lo <= v && v <= hi))
}

/// True when the argument is zero.
pub fn double2bool(args: &[Value]) -> Result<Value, EvalError> {
    let x = args[0].as_number("double2bool")?;
    Ok(Value::Boolean(x == 0.0))
}

/// Membership test: the first value against every following value. Two
/// numbers compare numerically, anything else compares by string form.
pub fn in_(args: &[Value]) -> Result<Value, EvalError> {
    let needle = &args[0];
    let found = args[1..].iter().any(|candidate| matches(needle, candidate));
    Ok(Value::Boolean(found))
}

fn matches(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Unknown, _) | (_, Value::Unknown) => false,
        (Value::Number(a), Value::Number(b)) => a == b,
        _ => a.string_form() == b.string_form(),
    }
}

/// False for the empty string, "f", "0.0" and "0" (exact, case-sensitive);
/// true for every other input.
pub fn parse_boolean(args: &[Value]) -> Result<Value, EvalError> {
    let string = args[0].as_str("parseBoolean")?;
    let value = !matches!(string, "" | "f" | "0.0" | "0");
    Ok(Value::Boolean(value))
}
