//! Runtime values and the static type language.

use std::fmt;

use serde_json::Value as Json;

use crate::error::EvalError;

/// A concrete value produced by evaluation.
///
/// `Unknown` is the opaque value: the result of a `property()` lookup that
/// missed, and the conversion target for feature attributes that are not
/// scalars.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    String(String),
    Boolean(bool),
    Unknown,
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Number(_) => ValueType::Number,
            Value::String(_) => ValueType::String,
            Value::Boolean(_) => ValueType::Boolean,
            Value::Unknown => ValueType::Unknown,
        }
    }

    pub(crate) fn as_number(&self, function: &'static str) -> Result<f64, EvalError> {
        match self {
            Value::Number(num) => Ok(*num),
            _ => Err(EvalError::InvalidArgument {
                function,
                expected: ValueType::Number,
                value: self.clone(),
            }),
        }
    }

    pub(crate) fn as_str(&self, function: &'static str) -> Result<&str, EvalError> {
        match self {
            Value::String(string) => Ok(string),
            _ => Err(EvalError::InvalidArgument {
                function,
                expected: ValueType::String,
                value: self.clone(),
            }),
        }
    }

    pub(crate) fn as_boolean(&self, function: &'static str) -> Result<bool, EvalError> {
        match self {
            Value::Boolean(boolean) => Ok(*boolean),
            _ => Err(EvalError::InvalidArgument {
                function,
                expected: ValueType::Boolean,
                value: self.clone(),
            }),
        }
    }

    /// The string form used for `in` membership comparison. Numbers use the
    /// standard float display, so integral doubles render without a
    /// fractional part and match their common string spelling.
    pub(crate) fn string_form(&self) -> String {
        match self {
            Value::Number(num) => num.to_string(),
            Value::String(string) => string.clone(),
            Value::Boolean(boolean) => boolean.to_string(),
            Value::Unknown => String::new(),
        }
    }

    /// Convert a JSON scalar. `null`, arrays and objects are opaque.
    pub fn from_json(value: &Json) -> Value {
        match value {
            Json::Number(num) => num.as_f64().map(Value::Number).unwrap_or(Value::Unknown),
            Json::String(string) => Value::String(string.clone()),
            Json::Bool(boolean) => Value::Boolean(*boolean),
            _ => Value::Unknown,
        }
    }

    /// The JSON scalar form. `Unknown` and non-finite numbers become `null`.
    pub fn to_json(&self) -> Json {
        match self {
            Value::Number(num) => serde_json::Number::from_f64(*num)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Value::String(string) => Json::String(string.clone()),
            Value::Boolean(boolean) => Json::Bool(*boolean),
            Value::Unknown => Json::Null,
        }
    }
}

impl From<f64> for Value {
    fn from(num: f64) -> Self {
        Value::Number(num)
    }
}

impl From<i32> for Value {
    fn from(num: i32) -> Self {
        Value::Number(f64::from(num))
    }
}

impl From<&str> for Value {
    fn from(string: &str) -> Self {
        Value::String(string.into())
    }
}

impl From<String> for Value {
    fn from(string: String) -> Self {
        Value::String(string)
    }
}

impl From<bool> for Value {
    fn from(boolean: bool) -> Self {
        Value::Boolean(boolean)
    }
}

/// The type determinable from an expression's shape without evaluating it.
///
/// `Unknown` denotes a type deferred to runtime: property lookups carry it
/// because feature attributes are dynamically typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Number,
    String,
    Boolean,
    Unknown,
}

impl ValueType {
    /// Whether a value of static type `self` may appear where `expected` is
    /// required. `Unknown` always passes; the check moves to runtime.
    pub fn satisfies(self, expected: ValueType) -> bool {
        self == ValueType::Unknown || self == expected
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Number => "number",
            ValueType::String => "string",
            ValueType::Boolean => "boolean",
            ValueType::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}
