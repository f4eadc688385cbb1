//! Error handling
//!
use thiserror::Error;

use crate::func::Arity;
use crate::value::{Value, ValueType};

/// Structural errors reported by the validator.
///
/// These always indicate a malformed style document and are recoverable by
/// the caller; they carry the offending call's name and position.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("unknown function '{name}'")]
    UnknownFunction { name: String },

    #[error("wrong argument count for '{function}' - expected {expected}, got {actual}")]
    ArityMismatch {
        function: String,
        expected: Arity,
        actual: usize,
    },

    #[error("type mismatch for argument {position} of '{function}' - expected {expected}, got {actual}")]
    TypeMismatch {
        function: String,
        position: usize,
        expected: ValueType,
        actual: ValueType,
    },
}

/// Semantic errors reported by the evaluator.
///
/// Failures are per-call: a caller evaluating one expression per feature can
/// drop a single feature's result without aborting the batch.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("unknown function '{name}'")]
    UnknownFunction { name: String },

    #[error("invalid argument for '{function}' - expected {expected}, got {value:?}")]
    InvalidArgument {
        function: &'static str,
        expected: ValueType,
        value: Value,
    },

    #[error("argument out of domain for '{function}': {value}")]
    DomainError { function: &'static str, value: f64 },

    #[error("division by zero in '{function}'")]
    DivisionByZero { function: &'static str },

    #[error("index out of range in '{function}': {reason}")]
    IndexOutOfRange {
        function: &'static str,
        reason: String,
    },

    #[error("bad format in '{function}': {reason}")]
    FormatError {
        function: &'static str,
        reason: String,
    },

    #[error("missing property '{name}'")]
    MissingProperty { name: String },
}

/// Errors converting the JSON node form into typed expressions or contexts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("invalid expression node {value}: {reason}")]
    InvalidExpression {
        value: serde_json::Value,
        reason: String,
    },

    #[error("invalid evaluation context {value}: {reason}")]
    InvalidContext {
        value: serde_json::Value,
        reason: String,
    },
}
