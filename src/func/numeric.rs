//! Numeric functions
//!
//! Standard real arithmetic over IEEE-754 doubles, kept total: an input
//! outside a function's mathematical domain fails with a typed error instead
//! of producing NaN.

use crate::error::EvalError;
use crate::value::Value;

/// Apply a unary function defined on the whole real line.
pub fn unary(function: &'static str, args: &[Value], f: fn(f64) -> f64) -> Result<Value, EvalError> {
    let x = args[0].as_number(function)?;
    number(function, x, f(x))
}

/// Apply a unary function that is only defined where `domain` holds.
fn guarded_unary(
    function: &'static str,
    args: &[Value],
    domain: fn(f64) -> bool,
    f: fn(f64) -> f64,
) -> Result<Value, EvalError> {
    let x = args[0].as_number(function)?;
    if !domain(x) {
        return Err(EvalError::DomainError { function, value: x });
    }
    number(function, x, f(x))
}

/// Wrap a result, converting NaN into a domain error on the input.
fn number(function: &'static str, input: f64, result: f64) -> Result<Value, EvalError> {
    if result.is_nan() {
        Err(EvalError::DomainError {
            function,
            value: input,
        })
    } else {
        Ok(Value::Number(result))
    }
}

pub fn acos(args: &[Value]) -> Result<Value, EvalError> {
    guarded_unary("acos", args, |x| (-1.0..=1.0).contains(&x), f64::acos)
}

pub fn asin(args: &[Value]) -> Result<Value, EvalError> {
    guarded_unary("asin", args, |x| (-1.0..=1.0).contains(&x), f64::asin)
}

pub fn sqrt(args: &[Value]) -> Result<Value, EvalError> {
    guarded_unary("sqrt", args, |x| x >= 0.0, f64::sqrt)
}

/// Natural logarithm; defined for strictly positive inputs.
pub fn log(args: &[Value]) -> Result<Value, EvalError> {
    guarded_unary("log", args, |x| x > 0.0, f64::ln)
}

pub fn atan2(args: &[Value]) -> Result<Value, EvalError> {
    let y = args[0].as_number("atan2")?;
    let x = args[1].as_number("atan2")?;
    number("atan2", y, y.atan2(x))
}

pub fn pow(args: &[Value]) -> Result<Value, EvalError> {
    let base = args[0].as_number("pow")?;
    let exponent = args[1].as_number("pow")?;
    // e.g. a negative base with a fractional exponent has no real result
    number("pow", base, base.powf(exponent))
}

/// Truncating-division remainder, carrying the sign of the dividend.
pub fn modulo(args: &[Value]) -> Result<Value, EvalError> {
    let a = args[0].as_number("modulo")?;
    let b = args[1].as_number("modulo")?;
    if b == 0.0 {
        return Err(EvalError::DivisionByZero { function: "modulo" });
    }
    number("modulo", a, a % b)
}

/// Nearest integer value, ties rounding away from zero.
pub fn round(args: &[Value]) -> Result<Value, EvalError> {
    let x = args[0].as_number("round")?;
    number("round", x, x.round())
}

/// Nearest integer value, ties rounding to the nearest even integer.
///
/// Deliberately distinct from [`round`]: the two differ exactly on ties,
/// e.g. 2.5 rounds to 3 but rints to 2.
pub fn rint(args: &[Value]) -> Result<Value, EvalError> {
    let x = args[0].as_number("rint")?;
    number("rint", x, x.round_ties_even())
}

pub fn max(args: &[Value]) -> Result<Value, EvalError> {
    fold("max", args, f64::max)
}

pub fn min(args: &[Value]) -> Result<Value, EvalError> {
    fold("min", args, f64::min)
}

fn fold(function: &'static str, args: &[Value], f: fn(f64, f64) -> f64) -> Result<Value, EvalError> {
    let mut acc = args[0].as_number(function)?;
    for arg in &args[1..] {
        acc = f(acc, arg.as_number(function)?);
    }
    Ok(Value::Number(acc))
}

pub fn pi(_args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Number(std::f64::consts::PI))
}

/// Uniform in `[0, 1)`.
pub fn random(_args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Number(rand::random::<f64>()))
}

#[cfg(test)]
mod test_numeric {
    use super::*;

    fn num(n: f64) -> Value {
        Value::Number(n)
    }

    #[test]
    fn test_round_ties_away_from_zero() {
        vec![(2.5, 3.0), (-2.5, -3.0), (3.5, 4.0), (2.4, 2.0), (-2.4, -2.0)]
            .into_iter()
            .for_each(|(x, exp)| {
                println!("round({})", x);
                assert_eq!(round(&[num(x)]).unwrap(), num(exp));
            })
    }

    #[test]
    fn test_rint_ties_to_even() {
        vec![(2.5, 2.0), (3.5, 4.0), (-2.5, -2.0), (2.4, 2.0), (2.6, 3.0)]
            .into_iter()
            .for_each(|(x, exp)| {
                println!("rint({})", x);
                assert_eq!(rint(&[num(x)]).unwrap(), num(exp));
            })
    }

    #[test]
    fn test_modulo_by_zero_fails() {
        vec![0.0, 1.0, -7.5, f64::INFINITY].into_iter().for_each(|x| {
            assert_eq!(
                modulo(&[num(x), num(0.0)]).unwrap_err(),
                EvalError::DivisionByZero { function: "modulo" }
            );
        })
    }

    #[test]
    fn test_modulo_takes_the_sign_of_the_dividend() {
        vec![(7.0, 3.0, 1.0), (-7.0, 3.0, -1.0), (7.5, 2.0, 1.5)]
            .into_iter()
            .for_each(|(a, b, exp)| assert_eq!(modulo(&[num(a), num(b)]).unwrap(), num(exp)))
    }

    #[test]
    fn test_domain_errors_instead_of_nan() {
        sqrt(&[num(-1.0)]).unwrap_err();
        log(&[num(0.0)]).unwrap_err();
        log(&[num(-1.0)]).unwrap_err();
        acos(&[num(1.5)]).unwrap_err();
        asin(&[num(-1.5)]).unwrap_err();
        pow(&[num(-2.0), num(0.5)]).unwrap_err();
    }

    #[test]
    fn test_in_domain_results() {
        assert_eq!(sqrt(&[num(9.0)]).unwrap(), num(3.0));
        assert_eq!(log(&[num(1.0)]).unwrap(), num(0.0));
        assert_eq!(pow(&[num(2.0), num(10.0)]).unwrap(), num(1024.0));
        assert_eq!(atan2(&[num(0.0), num(1.0)]).unwrap(), num(0.0));
    }

    #[test]
    fn test_max_min_fold_variadic_args() {
        let args = vec![num(3.0), num(-1.0), num(7.5), num(2.0)];
        assert_eq!(max(&args).unwrap(), num(7.5));
        assert_eq!(min(&args).unwrap(), num(-1.0));
        assert_eq!(max(&args[..1]).unwrap(), num(3.0));
    }

    #[test]
    fn test_random_is_in_unit_interval() {
        for _ in 0..100 {
            match random(&[]).unwrap() {
                Value::Number(x) => assert!((0.0..1.0).contains(&x)),
                other => panic!("random returned {:?}", other),
            }
        }
    }

    #[test]
    fn test_wrong_typed_argument_is_reported() {
        unary("abs", &[Value::String("5".into())], f64::abs).unwrap_err();
        max(&[num(1.0), Value::Unknown]).unwrap_err();
    }
}
