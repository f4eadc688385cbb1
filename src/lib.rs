//! A function-call expression language for cartographic styling rules.
//!
//! Style rules compute numbers, strings and booleans from feature properties
//! and constants: `strToUpperCase(property('name'))`,
//! `between(property('pop'), 0, 1000)`. This crate holds the closed catalog
//! of supported functions, a validator that checks call trees against the
//! catalog before use, and an evaluator that runs them against a property
//! context.
//!
//! Expressions are built directly or parsed from the JSON node form used by
//! styling documents:
//!
//! ```rust
//! use carto_expr::{evaluate, validate, Context, Expression, Value};
//! use serde_json::json;
//!
//! let expr: Expression = serde_json::from_value(json!({
//!     "name": "strToUpperCase",
//!     "args": [{"name": "property", "args": ["name"]}],
//! }))
//! .unwrap();
//!
//! let ctx = Context::new().with("name", "Berlin");
//!
//! validate(&expr).unwrap();
//! assert_eq!(evaluate(&expr, &ctx).unwrap(), Value::String("BERLIN".into()));
//! ```
//!
//! Validation is structural and reports malformed documents without running
//! anything:
//!
//! ```rust
//! use carto_expr::{validate, Expression, ValidationError};
//!
//! let call = Expression::call("between", vec![Expression::literal(5.0)]);
//! match validate(&call).unwrap_err() {
//!     ValidationError::ArityMismatch { function, actual, .. } => {
//!         assert_eq!(function, "between");
//!         assert_eq!(actual, 1);
//!     }
//!     other => panic!("unexpected error {:?}", other),
//! }
//! ```
//!
//! The catalog is a compile-time constant; validation and evaluation are
//! pure functions over their inputs, so any number of evaluations may run
//! concurrently over shared trees without locking.

pub mod error;
pub mod eval;
pub mod expr;
pub mod func;
pub mod validate;
pub mod value;

pub use error::{EvalError, ParseError, ValidationError};
pub use eval::{evaluate, Context};
pub use expr::{Expression, FunctionCall};
pub use func::{lookup, Args, Arity, Function, Signature, FUNCTION_MAP};
pub use validate::validate;
pub use value::{Value, ValueType};
