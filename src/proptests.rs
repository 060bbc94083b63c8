//! Property-based tests over randomly generated expressions.

use crate::{BinaryOperation, Expression};
use proptest::prelude::*;

/// Small expressions which are differentiable everywhere. Exponents are
/// literal positive integers so nothing evaluates to `NaN`, and magnitudes
/// stay low enough for a finite difference to be accurate.
fn smooth_expression() -> impl Strategy<Value = Expression> {
    let leaf = prop_oneof![
        Just(Expression::x()),
        (-2i32..=2).prop_map(|n| Expression::constant(f64::from(n))),
    ];

    leaf.prop_recursive(3, 16, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(l, r)| l + r),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| l - r),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| l * r),
            (inner.clone(), 1i32..=2).prop_map(|(base, n)| {
                base.pow(Expression::constant(f64::from(n)))
            }),
            inner.clone().prop_map(Expression::sin),
            inner.prop_map(Expression::cos),
        ]
    })
}

/// Anything at all, including powers with non-constant exponents.
fn any_expression() -> impl Strategy<Value = Expression> {
    let leaf = prop_oneof![
        Just(Expression::x()),
        (-10.0..10.0f64).prop_map(Expression::constant),
    ];

    leaf.prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            (
                prop_oneof![
                    Just(BinaryOperation::Plus),
                    Just(BinaryOperation::Minus),
                    Just(BinaryOperation::Times),
                    Just(BinaryOperation::Divide),
                    Just(BinaryOperation::Power),
                ],
                inner.clone(),
                inner.clone(),
            )
                .prop_map(|(op, l, r)| Expression::binary(op, l, r)),
            inner.clone().prop_map(Expression::sin),
            inner.prop_map(Expression::cos),
        ]
    })
}

fn has_non_constant_exponent(expr: &Expression) -> bool {
    match expr {
        Expression::Constant(_) | Expression::Variable => false,
        Expression::Binary {
            right,
            op: BinaryOperation::Power,
            ..
        } if right.as_constant().is_none() => true,
        Expression::Binary { left, right, .. } => {
            has_non_constant_exponent(left) || has_non_constant_exponent(right)
        },
        Expression::FunctionCall { operand, .. } => {
            has_non_constant_exponent(operand)
        },
    }
}

/// Check every node's rendering against the shape of the node itself.
fn assert_fully_parenthesized(
    expr: &Expression,
) -> Result<(), TestCaseError> {
    let text = expr.render();

    match expr {
        Expression::Constant(_) | Expression::Variable => {
            prop_assert!(!text.contains('('), "{}", text);
        },
        Expression::Binary { left, right, op } => {
            prop_assert!(text.starts_with('('), "{}", text);
            prop_assert!(text.ends_with(')'), "{}", text);

            let inner = &text[1..text.len() - 1];
            let left_text = left.render();
            let right_text = right.render();
            prop_assert!(inner.starts_with(&left_text), "{}", text);
            prop_assert!(inner.ends_with(&right_text), "{}", text);

            prop_assert!(
                inner.len() > left_text.len() + right_text.len(),
                "{}",
                text
            );

            let middle =
                &inner[left_text.len()..inner.len() - right_text.len()];
            prop_assert_eq!(middle, format!(" {} ", op));

            assert_fully_parenthesized(left)?;
            assert_fully_parenthesized(right)?;
        },
        Expression::FunctionCall { function, operand } => {
            let should_be = format!("{}({})", function, operand.render());
            prop_assert_eq!(&text, &should_be);

            assert_fully_parenthesized(operand)?;
        },
    }

    Ok(())
}

proptest! {
    #[test]
    fn derivative_matches_central_difference(
        f in smooth_expression(),
        x in -1.0..1.0f64,
    ) {
        const H: f64 = 1e-5;

        let derivative = f.derivative().unwrap();
        let exact = derivative.evaluate(x);
        let numeric = (f.evaluate(x + H) - f.evaluate(x - H)) / (2.0 * H);

        prop_assert!(
            approx::relative_eq!(
                exact,
                numeric,
                epsilon = 1e-4,
                max_relative = 1e-4
            ),
            "d/dx {} at x = {}: {} != {}",
            f,
            x,
            exact,
            numeric
        );
    }

    #[test]
    fn only_non_constant_exponents_fail(f in any_expression()) {
        prop_assert_eq!(
            f.derivative().is_err(),
            has_non_constant_exponent(&f)
        );
    }

    #[test]
    fn rendering_is_balanced(f in any_expression()) {
        let derivative = f.derivative().map(|d| d.render());

        for text in &[f.render(), derivative.unwrap_or_default()] {
            let opening = text.matches('(').count();
            let closing = text.matches(')').count();
            prop_assert_eq!(opening, closing);
        }
    }

    #[test]
    fn every_node_is_parenthesized(f in any_expression()) {
        assert_fully_parenthesized(&f)?;

        if let Ok(derivative) = f.derivative() {
            assert_fully_parenthesized(&derivative)?;
        }
    }

    #[test]
    fn operations_are_repeatable(f in any_expression(), x in -10.0..10.0f64) {
        let first = f.evaluate(x);
        let second = f.evaluate(x);
        prop_assert!(first == second || (first.is_nan() && second.is_nan()));

        let first = f.derivative().map(|d| d.render());
        let second = f.derivative().map(|d| d.render());
        prop_assert_eq!(first.ok(), second.ok());
        prop_assert_eq!(f.render(), f.clone().render());
    }
}
