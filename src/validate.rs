//! Structural validation of call trees against the catalog.
//!
//! Validation never evaluates anything and has no side effects; it is safe
//! to run repeatedly and concurrently over an immutable tree.

use crate::error::ValidationError;
use crate::expr::{Expression, FunctionCall};
use crate::func;

/// Check `expr` against the function catalog without evaluating it.
///
/// Arguments are visited depth-first, left to right: each argument's static
/// type is checked and its subtree recursed into before the next argument is
/// looked at. The first error in that order is returned, so error locations
/// are deterministic. Literals and property references are always valid.
pub fn validate(expr: &Expression) -> Result<(), ValidationError> {
    match expr {
        Expression::Literal(_) | Expression::Property(_) => Ok(()),
        Expression::Call(call) => validate_call(call),
    }
}

fn validate_call(call: &FunctionCall) -> Result<(), ValidationError> {
    let function =
        func::lookup(&call.name).ok_or_else(|| ValidationError::UnknownFunction {
            name: call.name.clone(),
        })?;
    let signature = function.signature();

    let arity = signature.arity();
    if !arity.is_valid_len(call.args.len()) {
        return Err(ValidationError::ArityMismatch {
            function: call.name.clone(),
            expected: arity,
            actual: call.args.len(),
        });
    }

    for (position, arg) in call.args.iter().enumerate() {
        if let Some(expected) = signature.arg_type(position) {
            // `Unknown` (property lookups, unknown nested names) always
            // passes here; the type check moves to runtime.
            let actual = arg.static_type();
            if !actual.satisfies(expected) {
                return Err(ValidationError::TypeMismatch {
                    function: call.name.clone(),
                    position,
                    expected,
                    actual,
                });
            }
        }
        validate(arg)?;
    }
    Ok(())
}
