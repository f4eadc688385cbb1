//! Evaluation of call trees against a property context.

use std::collections::HashMap;

use serde_json::Value as Json;

use crate::error::{EvalError, ParseError};
use crate::expr::{Expression, FunctionCall};
use crate::func;
use crate::value::Value;

/// Read-only feature properties for one evaluation.
///
/// Supplied by the caller per evaluation; the core never holds on to one.
#[derive(Debug, Clone, Default)]
pub struct Context {
    properties: HashMap<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.properties.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Build a context from a JSON object of feature attributes. Scalar
    /// attributes keep their type; `null` and nested values are opaque.
    pub fn from_json(value: &Json) -> Result<Self, ParseError> {
        match value {
            Json::Object(map) => Ok(Context {
                properties: map
                    .iter()
                    .map(|(key, value)| (key.clone(), Value::from_json(value)))
                    .collect(),
            }),
            _ => Err(ParseError::InvalidContext {
                value: value.clone(),
                reason: "context must be a JSON object".into(),
            }),
        }
    }
}

impl From<HashMap<String, Value>> for Context {
    fn from(properties: HashMap<String, Value>) -> Self {
        Context { properties }
    }
}

/// Evaluate an expression against `ctx`.
///
/// Arguments are evaluated depth-first, left to right; the first failure
/// wins. The tree is expected to have passed [`validate`](crate::validate):
/// arity is not re-checked here, though runtime type errors from
/// dynamically-typed property values are still reported.
///
/// Re-evaluation is pure given a context; only `random()` breaks referential
/// transparency.
pub fn evaluate(expr: &Expression, ctx: &Context) -> Result<Value, EvalError> {
    match expr {
        Expression::Literal(value) => Ok(value.clone()),
        // A bare property reference is strict about missing names, unlike
        // the property() function below.
        Expression::Property(name) => {
            ctx.get(name)
                .cloned()
                .ok_or_else(|| EvalError::MissingProperty { name: name.clone() })
        }
        Expression::Call(call) => evaluate_call(call, ctx),
    }
}

fn evaluate_call(call: &FunctionCall, ctx: &Context) -> Result<Value, EvalError> {
    let function = func::lookup(&call.name).ok_or_else(|| EvalError::UnknownFunction {
        name: call.name.clone(),
    })?;
    let args = call
        .args
        .iter()
        .map(|arg| evaluate(arg, ctx))
        .collect::<Result<Vec<Value>, EvalError>>()?;
    function.execute(&args, ctx)
}

/// The `property` function: a context lookup that yields the opaque value on
/// a miss. Optional attributes are an expected case; callers decide whether
/// a miss is fatal at a higher layer.
pub(crate) fn property(args: &[Value], ctx: &Context) -> Result<Value, EvalError> {
    let name = args[0].as_str("property")?;
    Ok(ctx.get(name).cloned().unwrap_or(Value::Unknown))
}

#[cfg(test)]
mod test_eval {
    use super::*;
    use serde_json::json;

    fn call(name: &str, args: Vec<Expression>) -> Expression {
        Expression::call(name, args)
    }

    #[test]
    fn test_literals_evaluate_to_themselves() {
        let ctx = Context::new();
        assert_eq!(
            evaluate(&Expression::literal(5.0), &ctx).unwrap(),
            Value::Number(5.0)
        );
        assert_eq!(
            evaluate(&Expression::literal("x"), &ctx).unwrap(),
            Value::String("x".into())
        );
    }

    #[test]
    fn test_property_reference_hits_and_misses() {
        let ctx = Context::new().with("x", 5);
        assert_eq!(
            evaluate(&Expression::property("x"), &ctx).unwrap(),
            Value::Number(5.0)
        );
        assert_eq!(
            evaluate(&Expression::property("y"), &ctx).unwrap_err(),
            EvalError::MissingProperty { name: "y".into() }
        );
    }

    #[test]
    fn test_property_function_is_lenient_about_misses() {
        let expr = call("property", vec![Expression::literal("y")]);
        assert_eq!(evaluate(&expr, &Context::new()).unwrap(), Value::Unknown);

        let ctx = Context::new().with("y", "there");
        assert_eq!(
            evaluate(&expr, &ctx).unwrap(),
            Value::String("there".into())
        );
    }

    #[test]
    fn test_nested_calls_evaluate_depth_first() {
        // strToUpperCase(strTrim(property('name')))
        let expr = call(
            "strToUpperCase",
            vec![call("strTrim", vec![Expression::property("name")])],
        );
        let ctx = Context::new().with("name", "  berlin ");
        assert_eq!(
            evaluate(&expr, &ctx).unwrap(),
            Value::String("BERLIN".into())
        );
    }

    #[test]
    fn test_argument_failures_propagate() {
        let expr = call(
            "pow",
            vec![
                call("sqrt", vec![Expression::literal(-1.0)]),
                Expression::literal(2.0),
            ],
        );
        assert_eq!(
            evaluate(&expr, &Context::new()).unwrap_err(),
            EvalError::DomainError {
                function: "sqrt",
                value: -1.0
            }
        );
    }

    #[test]
    fn test_runtime_type_error_from_property_value() {
        // validates fine (property is Unknown), fails at runtime
        let expr = call("abs", vec![Expression::property("name")]);
        let ctx = Context::new().with("name", "not a number");
        crate::validate::validate(&expr).unwrap();
        match evaluate(&expr, &ctx).unwrap_err() {
            EvalError::InvalidArgument { function, .. } => assert_eq!(function, "abs"),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_unknown_function_does_not_panic() {
        let expr = call("nope", vec![]);
        assert_eq!(
            evaluate(&expr, &Context::new()).unwrap_err(),
            EvalError::UnknownFunction { name: "nope".into() }
        );
    }

    #[test]
    fn test_context_from_json() {
        let ctx = Context::from_json(&json!({
            "pop": 1200,
            "name": "Springfield",
            "capital": false,
            "geometry": {"type": "Point"},
            "missing": null,
        }))
        .unwrap();
        assert_eq!(ctx.get("pop"), Some(&Value::Number(1200.0)));
        assert_eq!(ctx.get("name"), Some(&Value::String("Springfield".into())));
        assert_eq!(ctx.get("capital"), Some(&Value::Boolean(false)));
        assert_eq!(ctx.get("geometry"), Some(&Value::Unknown));
        assert_eq!(ctx.get("missing"), Some(&Value::Unknown));
        assert_eq!(ctx.get("nope"), None);

        Context::from_json(&json!([1, 2])).unwrap_err();
    }
}
