//! Whole-catalog validation sweep: every entry must accept a call with its
//! documented arity and argument types, and reject one argument short, one
//! argument extra, and a wrong-typed argument at each position.

use carto_expr::{validate, Args, Expression, ValidationError, ValueType, FUNCTION_MAP};

fn literal_of(ty: ValueType) -> Expression {
    match ty {
        ValueType::Number => Expression::literal(1.0),
        ValueType::String => Expression::literal("a"),
        ValueType::Boolean => Expression::literal(true),
        ValueType::Unknown => Expression::property("attr"),
    }
}

/// A literal whose static type is known and differs from `ty`.
fn wrong_literal_of(ty: ValueType) -> Expression {
    match ty {
        ValueType::Number => Expression::literal("a"),
        _ => Expression::literal(1.0),
    }
}

fn good_args(args: &Args) -> Vec<Expression> {
    match args {
        Args::Fixed(types) => types.iter().map(|ty| literal_of(*ty)).collect(),
        Args::Variadic(ty, min) => (0..*min).map(|_| literal_of(*ty)).collect(),
    }
}

#[test]
fn test_every_function_accepts_its_documented_shape() {
    FUNCTION_MAP.into_iter().for_each(|(name, function)| {
        println!("validate({})", name);
        let expr = Expression::call(*name, good_args(function.signature().args()));
        validate(&expr).unwrap();
    })
}

#[test]
fn test_one_argument_short_is_an_arity_mismatch() {
    FUNCTION_MAP.into_iter().for_each(|(name, function)| {
        let mut args = good_args(function.signature().args());
        if args.pop().is_none() {
            // zero-arity entries have nothing to drop
            return;
        }
        println!("validate({}) one short", name);
        match validate(&Expression::call(*name, args)).unwrap_err() {
            ValidationError::ArityMismatch { function, .. } => assert_eq!(function, *name),
            other => panic!("unexpected error {:?}", other),
        }
    })
}

#[test]
fn test_one_argument_extra_is_an_arity_mismatch_for_fixed_entries() {
    FUNCTION_MAP.into_iter().for_each(|(name, function)| {
        let types = match function.signature().args() {
            Args::Fixed(types) => types,
            // variadic entries are unbounded above
            Args::Variadic(..) => return,
        };
        let mut args = good_args(function.signature().args());
        args.push(literal_of(types.last().copied().unwrap_or(ValueType::Number)));
        println!("validate({}) one extra", name);
        match validate(&Expression::call(*name, args)).unwrap_err() {
            ValidationError::ArityMismatch { function, .. } => assert_eq!(function, *name),
            other => panic!("unexpected error {:?}", other),
        }
    })
}

#[test]
fn test_a_wrong_typed_argument_is_rejected_at_its_position() {
    FUNCTION_MAP.into_iter().for_each(|(name, function)| {
        let good = good_args(function.signature().args());
        for position in 0..good.len() {
            let expected = match function.signature().arg_type(position) {
                Some(expected) => expected,
                None => continue,
            };
            let mut args = good.clone();
            args[position] = wrong_literal_of(expected);
            println!("validate({}) wrong type at {}", name, position);
            match validate(&Expression::call(*name, args)).unwrap_err() {
                ValidationError::TypeMismatch {
                    function,
                    position: reported,
                    ..
                } => {
                    assert_eq!(function, *name);
                    assert_eq!(reported, position);
                }
                other => panic!("unexpected error {:?}", other),
            }
        }
    })
}
