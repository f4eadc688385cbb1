//! The function catalog
//!
//! This module contains the global function map, which defines every function
//! the styling expression language supports. The map is a compile-time
//! constant: there is no registration API, and lookups from any number of
//! threads need no synchronization.
//!
//! `property` is the one entry that reads the evaluation context; the
//! evaluator hands it the context, every other function sees only its
//! evaluated argument values.

use phf::phf_map;
use std::fmt;

use crate::error::EvalError;
use crate::eval::{self, Context};
use crate::value::{Value, ValueType};

mod format;
mod logic;
mod numeric;
mod string;

pub const FUNCTION_MAP: phf::Map<&'static str, Function> = phf_map! {
    "abs" => Function {
        symbol: "abs",
        signature: Signature {
            args: Args::Fixed(&[ValueType::Number]),
            returns: ValueType::Number,
        },
        run: Run::Pure(|args| numeric::unary("abs", args, f64::abs)),
    },
    "acos" => Function {
        symbol: "acos",
        signature: Signature {
            args: Args::Fixed(&[ValueType::Number]),
            returns: ValueType::Number,
        },
        run: Run::Pure(numeric::acos),
    },
    "asin" => Function {
        symbol: "asin",
        signature: Signature {
            args: Args::Fixed(&[ValueType::Number]),
            returns: ValueType::Number,
        },
        run: Run::Pure(numeric::asin),
    },
    "atan" => Function {
        symbol: "atan",
        signature: Signature {
            args: Args::Fixed(&[ValueType::Number]),
            returns: ValueType::Number,
        },
        run: Run::Pure(|args| numeric::unary("atan", args, f64::atan)),
    },
    "atan2" => Function {
        symbol: "atan2",
        signature: Signature {
            args: Args::Fixed(&[ValueType::Number, ValueType::Number]),
            returns: ValueType::Number,
        },
        run: Run::Pure(numeric::atan2),
    },
    "between" => Function {
        symbol: "between",
        signature: Signature {
            args: Args::Fixed(&[ValueType::Number, ValueType::Number, ValueType::Number]),
            returns: ValueType::Boolean,
        },
        run: Run::Pure(logic::between),
    },
    "ceil" => Function {
        symbol: "ceil",
        signature: Signature {
            args: Args::Fixed(&[ValueType::Number]),
            returns: ValueType::Number,
        },
        run: Run::Pure(|args| numeric::unary("ceil", args, f64::ceil)),
    },
    "cos" => Function {
        symbol: "cos",
        signature: Signature {
            args: Args::Fixed(&[ValueType::Number]),
            returns: ValueType::Number,
        },
        run: Run::Pure(|args| numeric::unary("cos", args, f64::cos)),
    },
    "double2bool" => Function {
        symbol: "double2bool",
        signature: Signature {
            args: Args::Fixed(&[ValueType::Number]),
            returns: ValueType::Boolean,
        },
        run: Run::Pure(logic::double2bool),
    },
    "exp" => Function {
        symbol: "exp",
        signature: Signature {
            args: Args::Fixed(&[ValueType::Number]),
            returns: ValueType::Number,
        },
        run: Run::Pure(|args| numeric::unary("exp", args, f64::exp)),
    },
    "floor" => Function {
        symbol: "floor",
        signature: Signature {
            args: Args::Fixed(&[ValueType::Number]),
            returns: ValueType::Number,
        },
        run: Run::Pure(|args| numeric::unary("floor", args, f64::floor)),
    },
    "in" => Function {
        symbol: "in",
        signature: Signature {
            args: Args::Variadic(ValueType::String, 1),
            returns: ValueType::Boolean,
        },
        run: Run::Pure(logic::in_),
    },
    "log" => Function {
        symbol: "log",
        signature: Signature {
            args: Args::Fixed(&[ValueType::Number]),
            returns: ValueType::Number,
        },
        run: Run::Pure(numeric::log),
    },
    "max" => Function {
        symbol: "max",
        signature: Signature {
            args: Args::Variadic(ValueType::Number, 1),
            returns: ValueType::Number,
        },
        run: Run::Pure(numeric::max),
    },
    "min" => Function {
        symbol: "min",
        signature: Signature {
            args: Args::Variadic(ValueType::Number, 1),
            returns: ValueType::Number,
        },
        run: Run::Pure(numeric::min),
    },
    "modulo" => Function {
        symbol: "modulo",
        signature: Signature {
            args: Args::Fixed(&[ValueType::Number, ValueType::Number]),
            returns: ValueType::Number,
        },
        run: Run::Pure(numeric::modulo),
    },
    "numberFormat" => Function {
        symbol: "numberFormat",
        signature: Signature {
            args: Args::Fixed(&[ValueType::String, ValueType::Number, ValueType::String]),
            returns: ValueType::String,
        },
        run: Run::Pure(format::number_format),
    },
    "parseBoolean" => Function {
        symbol: "parseBoolean",
        signature: Signature {
            args: Args::Fixed(&[ValueType::String]),
            returns: ValueType::Boolean,
        },
        run: Run::Pure(logic::parse_boolean),
    },
    // The uniform zero-arity case: no args field in the source styling
    // format, an empty fixed list here.
    "pi" => Function {
        symbol: "pi",
        signature: Signature {
            args: Args::Fixed(&[]),
            returns: ValueType::Number,
        },
        run: Run::Pure(numeric::pi),
    },
    "pow" => Function {
        symbol: "pow",
        signature: Signature {
            args: Args::Fixed(&[ValueType::Number, ValueType::Number]),
            returns: ValueType::Number,
        },
        run: Run::Pure(numeric::pow),
    },
    // The catalog's only entry with an unknown return type: feature
    // attributes are dynamically typed.
    "property" => Function {
        symbol: "property",
        signature: Signature {
            args: Args::Fixed(&[ValueType::String]),
            returns: ValueType::Unknown,
        },
        run: Run::Context(eval::property),
    },
    // Non-deterministic, and therefore excluded from the referential
    // transparency the rest of the catalog provides.
    "random" => Function {
        symbol: "random",
        signature: Signature {
            args: Args::Fixed(&[]),
            returns: ValueType::Number,
        },
        run: Run::Pure(numeric::random),
    },
    "rint" => Function {
        symbol: "rint",
        signature: Signature {
            args: Args::Fixed(&[ValueType::Number]),
            returns: ValueType::Number,
        },
        run: Run::Pure(numeric::rint),
    },
    "round" => Function {
        symbol: "round",
        signature: Signature {
            args: Args::Fixed(&[ValueType::Number]),
            returns: ValueType::Number,
        },
        run: Run::Pure(numeric::round),
    },
    "sin" => Function {
        symbol: "sin",
        signature: Signature {
            args: Args::Fixed(&[ValueType::Number]),
            returns: ValueType::Number,
        },
        run: Run::Pure(|args| numeric::unary("sin", args, f64::sin)),
    },
    "sqrt" => Function {
        symbol: "sqrt",
        signature: Signature {
            args: Args::Fixed(&[ValueType::Number]),
            returns: ValueType::Number,
        },
        run: Run::Pure(numeric::sqrt),
    },
    "strAbbreviate" => Function {
        symbol: "strAbbreviate",
        signature: Signature {
            args: Args::Fixed(&[
                ValueType::String,
                ValueType::Number,
                ValueType::Number,
                ValueType::String,
            ]),
            returns: ValueType::String,
        },
        run: Run::Pure(string::str_abbreviate),
    },
    "strCapitalize" => Function {
        symbol: "strCapitalize",
        signature: Signature {
            args: Args::Fixed(&[ValueType::String]),
            returns: ValueType::String,
        },
        run: Run::Pure(string::str_capitalize),
    },
    "strConcat" => Function {
        symbol: "strConcat",
        signature: Signature {
            args: Args::Variadic(ValueType::String, 1),
            returns: ValueType::String,
        },
        run: Run::Pure(string::str_concat),
    },
    "strDefaultIfBlank" => Function {
        symbol: "strDefaultIfBlank",
        signature: Signature {
            args: Args::Fixed(&[ValueType::String, ValueType::String]),
            returns: ValueType::String,
        },
        run: Run::Pure(string::str_default_if_blank),
    },
    "strEndsWith" => Function {
        symbol: "strEndsWith",
        signature: Signature {
            args: Args::Fixed(&[ValueType::String, ValueType::String]),
            returns: ValueType::Boolean,
        },
        run: Run::Pure(|args| {
            let string = args[0].as_str("strEndsWith")?;
            let suffix = args[1].as_str("strEndsWith")?;
            Ok(Value::Boolean(string.ends_with(suffix)))
        }),
    },
    "strEqualsIgnoreCase" => Function {
        symbol: "strEqualsIgnoreCase",
        signature: Signature {
            args: Args::Fixed(&[ValueType::String, ValueType::String]),
            returns: ValueType::Boolean,
        },
        run: Run::Pure(string::str_equals_ignore_case),
    },
    "strIndexOf" => Function {
        symbol: "strIndexOf",
        signature: Signature {
            args: Args::Fixed(&[ValueType::String, ValueType::String]),
            returns: ValueType::Number,
        },
        run: Run::Pure(string::str_index_of),
    },
    "strLastIndexOf" => Function {
        symbol: "strLastIndexOf",
        signature: Signature {
            args: Args::Fixed(&[ValueType::String, ValueType::String]),
            returns: ValueType::Number,
        },
        run: Run::Pure(string::str_last_index_of),
    },
    "strLength" => Function {
        symbol: "strLength",
        signature: Signature {
            args: Args::Fixed(&[ValueType::String]),
            returns: ValueType::Number,
        },
        run: Run::Pure(|args| {
            let string = args[0].as_str("strLength")?;
            Ok(Value::Number(string.chars().count() as f64))
        }),
    },
    "strMatches" => Function {
        symbol: "strMatches",
        signature: Signature {
            args: Args::Fixed(&[ValueType::String, ValueType::String]),
            returns: ValueType::Boolean,
        },
        run: Run::Pure(string::str_matches),
    },
    "strReplace" => Function {
        symbol: "strReplace",
        signature: Signature {
            args: Args::Fixed(&[
                ValueType::String,
                ValueType::String,
                ValueType::String,
                ValueType::Boolean,
            ]),
            returns: ValueType::String,
        },
        run: Run::Pure(string::str_replace),
    },
    "strStartsWith" => Function {
        symbol: "strStartsWith",
        signature: Signature {
            args: Args::Fixed(&[ValueType::String, ValueType::String]),
            returns: ValueType::Boolean,
        },
        run: Run::Pure(|args| {
            let string = args[0].as_str("strStartsWith")?;
            let prefix = args[1].as_str("strStartsWith")?;
            Ok(Value::Boolean(string.starts_with(prefix)))
        }),
    },
    "strStripAccents" => Function {
        symbol: "strStripAccents",
        signature: Signature {
            args: Args::Fixed(&[ValueType::String]),
            returns: ValueType::String,
        },
        run: Run::Pure(string::str_strip_accents),
    },
    "strSubstring" => Function {
        symbol: "strSubstring",
        signature: Signature {
            args: Args::Fixed(&[ValueType::String, ValueType::Number, ValueType::Number]),
            returns: ValueType::String,
        },
        run: Run::Pure(string::str_substring),
    },
    "strSubstringStart" => Function {
        symbol: "strSubstringStart",
        signature: Signature {
            args: Args::Fixed(&[ValueType::String, ValueType::Number]),
            returns: ValueType::String,
        },
        run: Run::Pure(string::str_substring_start),
    },
    "strToLowerCase" => Function {
        symbol: "strToLowerCase",
        signature: Signature {
            args: Args::Fixed(&[ValueType::String]),
            returns: ValueType::String,
        },
        run: Run::Pure(|args| {
            let string = args[0].as_str("strToLowerCase")?;
            Ok(Value::String(string.to_lowercase()))
        }),
    },
    "strToUpperCase" => Function {
        symbol: "strToUpperCase",
        signature: Signature {
            args: Args::Fixed(&[ValueType::String]),
            returns: ValueType::String,
        },
        run: Run::Pure(|args| {
            let string = args[0].as_str("strToUpperCase")?;
            Ok(Value::String(string.to_uppercase()))
        }),
    },
    "strTrim" => Function {
        symbol: "strTrim",
        signature: Signature {
            args: Args::Fixed(&[ValueType::String]),
            returns: ValueType::String,
        },
        run: Run::Pure(|args| {
            let string = args[0].as_str("strTrim")?;
            Ok(Value::String(string.trim().into()))
        }),
    },
    "tan" => Function {
        symbol: "tan",
        signature: Signature {
            args: Args::Fixed(&[ValueType::Number]),
            returns: ValueType::Number,
        },
        run: Run::Pure(|args| numeric::unary("tan", args, f64::tan)),
    },
    "toDegrees" => Function {
        symbol: "toDegrees",
        signature: Signature {
            args: Args::Fixed(&[ValueType::Number]),
            returns: ValueType::Number,
        },
        run: Run::Pure(|args| numeric::unary("toDegrees", args, f64::to_degrees)),
    },
    "toRadians" => Function {
        symbol: "toRadians",
        signature: Signature {
            args: Args::Fixed(&[ValueType::Number]),
            returns: ValueType::Number,
        },
        run: Run::Pure(|args| numeric::unary("toRadians", args, f64::to_radians)),
    },
};

/// Look up a function by name.
pub fn lookup(name: &str) -> Option<&'static Function> {
    FUNCTION_MAP.get(name)
}

/// The allowed argument count for a function.
#[derive(Debug, Clone, PartialEq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn is_valid_len(&self, len: usize) -> bool {
        match self {
            Self::Exactly(num) => len == *num,
            Self::AtLeast(num) => len >= *num,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exactly(num) => write!(f, "exactly {}", num),
            Self::AtLeast(num) => write!(f, "at least {}", num),
        }
    }
}

/// The argument shape a signature allows.
#[derive(Debug, Clone, PartialEq)]
pub enum Args {
    /// An exact list of positional types; zero-argument functions use an
    /// empty list.
    Fixed(&'static [ValueType]),
    /// A uniform element type with a minimum count and no upper bound.
    Variadic(ValueType, usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    args: Args,
    returns: ValueType,
}

impl Signature {
    pub fn arity(&self) -> Arity {
        match &self.args {
            Args::Fixed(types) => Arity::Exactly(types.len()),
            Args::Variadic(_, min) => Arity::AtLeast(*min),
        }
    }

    /// The expected type at `position`, if the signature constrains it.
    pub fn arg_type(&self, position: usize) -> Option<ValueType> {
        match &self.args {
            Args::Fixed(types) => types.get(position).copied(),
            Args::Variadic(element, _) => Some(*element),
        }
    }

    pub fn args(&self) -> &Args {
        &self.args
    }

    pub fn returns(&self) -> ValueType {
        self.returns
    }
}

type PureFn = fn(&[Value]) -> Result<Value, EvalError>;
type ContextFn = fn(&[Value], &Context) -> Result<Value, EvalError>;

/// How an entry executes once its arguments are evaluated.
enum Run {
    Pure(PureFn),
    Context(ContextFn),
}

pub struct Function {
    symbol: &'static str,
    signature: Signature,
    run: Run,
}

impl Function {
    pub fn symbol(&self) -> &'static str {
        self.symbol
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Apply the function to already-evaluated argument values.
    ///
    /// Arity is the validator's responsibility and is not re-checked here.
    pub fn execute(&self, args: &[Value], ctx: &Context) -> Result<Value, EvalError> {
        debug_assert!(self.signature.arity().is_valid_len(args.len()));
        match self.run {
            Run::Pure(function) => function(args),
            Run::Context(function) => function(args, ctx),
        }
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("symbol", &self.symbol)
            .field("signature", &self.signature)
            .field("run", &"<function>")
            .finish()
    }
}
