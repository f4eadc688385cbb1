//! Expression trees
//!
//! A styling expression is a constant, a feature-property reference, or a
//! function call over nested expressions. Trees arrive from an upstream
//! style-document builder either constructed directly or in the JSON node
//! form the styling format uses: a call is `{"name": ..., "args": [...]}`,
//! a literal is a raw JSON scalar.

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use serde_json::{json, Map, Value as Json};

use crate::error::ParseError;
use crate::func;
use crate::value::{Value, ValueType};

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(Value),
    Property(String),
    Call(FunctionCall),
}

/// An invocation of a named catalog function.
///
/// Constructed upstream, validated once, then evaluated any number of times;
/// never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    pub args: Vec<Expression>,
}

impl FunctionCall {
    pub fn new(name: impl Into<String>, args: Vec<Expression>) -> Self {
        FunctionCall {
            name: name.into(),
            args,
        }
    }
}

impl Expression {
    pub fn literal(value: impl Into<Value>) -> Self {
        Expression::Literal(value.into())
    }

    pub fn property(name: impl Into<String>) -> Self {
        Expression::Property(name.into())
    }

    pub fn call(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::Call(FunctionCall::new(name, args))
    }

    /// The type determinable without evaluating: a literal's value type, the
    /// declared return type of a known call, `Unknown` otherwise.
    ///
    /// A call naming a function that is not in the catalog is `Unknown` here;
    /// the validator reports it as such when it recurses into the node.
    pub fn static_type(&self) -> ValueType {
        match self {
            Expression::Literal(value) => value.value_type(),
            Expression::Property(_) => ValueType::Unknown,
            Expression::Call(call) => func::lookup(&call.name)
                .map(|function| function.signature().returns())
                .unwrap_or(ValueType::Unknown),
        }
    }

    /// Parse the JSON node form. Scalars become literals (`null` becomes the
    /// opaque literal); an object with a `name` key and an optional `args`
    /// array becomes a call. Anything else is malformed.
    pub fn from_json(value: &Json) -> Result<Self, ParseError> {
        match value {
            Json::Number(num) => num
                .as_f64()
                .map(|num| Expression::Literal(Value::Number(num)))
                .ok_or_else(|| ParseError::InvalidExpression {
                    value: value.clone(),
                    reason: "number is not representable as a double".into(),
                }),
            Json::String(string) => Ok(Expression::Literal(Value::String(string.clone()))),
            Json::Bool(boolean) => Ok(Expression::Literal(Value::Boolean(*boolean))),
            Json::Null => Ok(Expression::Literal(Value::Unknown)),
            Json::Object(obj) => {
                let name = match obj.get("name") {
                    Some(Json::String(name)) => name,
                    Some(_) => {
                        return Err(ParseError::InvalidExpression {
                            value: value.clone(),
                            reason: "'name' must be a string".into(),
                        })
                    }
                    None => {
                        return Err(ParseError::InvalidExpression {
                            value: value.clone(),
                            reason: "call node requires a 'name' key".into(),
                        })
                    }
                };
                let args = match obj.get("args") {
                    None => Vec::new(),
                    Some(Json::Array(args)) => args
                        .iter()
                        .map(Expression::from_json)
                        .collect::<Result<Vec<Expression>, ParseError>>()?,
                    Some(_) => {
                        return Err(ParseError::InvalidExpression {
                            value: value.clone(),
                            reason: "'args' must be an array".into(),
                        })
                    }
                };
                Ok(Expression::Call(FunctionCall::new(name.clone(), args)))
            }
            Json::Array(_) => Err(ParseError::InvalidExpression {
                value: value.clone(),
                reason: "arrays are not expressions".into(),
            }),
        }
    }

    /// The JSON node form of this expression.
    ///
    /// A property reference has no dedicated JSON shape in the styling
    /// format, so it serializes as the equivalent `property()` call. Note
    /// the two differ on a missing name: the bare reference is strict, the
    /// call yields the opaque value.
    pub fn to_json(&self) -> Json {
        match self {
            Expression::Literal(value) => value.to_json(),
            Expression::Property(name) => json!({ "name": "property", "args": [name] }),
            Expression::Call(call) => {
                let mut obj = Map::with_capacity(2);
                obj.insert("name".into(), Json::String(call.name.clone()));
                if !call.args.is_empty() {
                    obj.insert(
                        "args".into(),
                        Json::Array(call.args.iter().map(Expression::to_json).collect()),
                    );
                }
                Json::Object(obj)
            }
        }
    }
}

impl Serialize for Expression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Expression {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Json::deserialize(deserializer)?;
        Expression::from_json(&value).map_err(de::Error::custom)
    }
}

impl From<Expression> for Json {
    fn from(expr: Expression) -> Json {
        expr.to_json()
    }
}
