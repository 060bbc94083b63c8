//! [`Expression`] operations.

use crate::expr::{BinaryOperation, Builtin, Expression};
use std::sync::Arc;
use thiserror::Error;

/// Reasons structural differentiation may fail.
#[derive(Debug, Clone, Error)]
pub enum DifferentiationError {
    /// The power rule only applies when the exponent is a literal constant.
    #[error(
        "unable to differentiate \"({base} ^ {exponent})\", the exponent \
         \"{exponent}\" is not a constant"
    )]
    NonConstantExponent {
        base: Arc<Expression>,
        exponent: Arc<Expression>,
    },
}

/// Evaluate an [`Expression`] at some value of `x`.
///
/// Floating point edge cases (division by zero, a negative base raised to a
/// fractional power, etc.) propagate as `inf` or `NaN`.
pub fn evaluate(expr: &Expression, x: f64) -> f64 {
    match expr {
        Expression::Constant(value) => *value,
        Expression::Variable => x,
        Expression::Binary { left, right, op } => {
            op.apply(evaluate(left, x), evaluate(right, x))
        },
        Expression::FunctionCall { function, operand } => {
            function.apply(evaluate(operand, x))
        },
    }
}

/// Calculate an [`Expression`]'s derivative with respect to `x`.
///
/// The result is built structurally and is not simplified in any way. Any
/// sub-expression the calculus leaves untouched is shared with `expr`.
pub fn derivative(
    expr: &Expression,
) -> Result<Expression, DifferentiationError> {
    tracing::debug!(expr = %expr, "Differentiating");

    differentiate(expr).map_err(|e| {
        tracing::debug!(expr = %expr, error = %e, "Differentiation failed");
        e
    })
}

/// Differentiate an [`Expression`] `n` times.
pub fn nth_derivative(
    expr: &Expression,
    n: usize,
) -> Result<Expression, DifferentiationError> {
    tracing::debug!(expr = %expr, n, "Taking the nth derivative");

    let mut current = expr.clone();

    for order in 1..=n {
        current = differentiate(&current).map_err(|e| {
            tracing::debug!(order, error = %e, "Differentiation failed");
            e
        })?;
    }

    Ok(current)
}

fn differentiate(
    expr: &Expression,
) -> Result<Expression, DifferentiationError> {
    let got = match expr {
        Expression::Constant(_) => Expression::Constant(0.0),
        Expression::Variable => Expression::Constant(1.0),
        Expression::Binary {
            left,
            right,
            op: BinaryOperation::Plus,
        } => differentiate(left)? + differentiate(right)?,
        Expression::Binary {
            left,
            right,
            op: BinaryOperation::Minus,
        } => differentiate(left)? - differentiate(right)?,
        Expression::Binary {
            left,
            right,
            op: BinaryOperation::Times,
        } => {
            // The product rule
            let d_left = differentiate(left)?;
            let d_right = differentiate(right)?;

            times(d_left, right) + times(left, d_right)
        },
        Expression::Binary {
            left,
            right,
            op: BinaryOperation::Divide,
        } => {
            // The quotient rule
            let d_left = differentiate(left)?;
            let d_right = differentiate(right)?;
            let numerator = times(d_left, right) - times(left, d_right);
            let denominator = Expression::binary(
                BinaryOperation::Power,
                Arc::clone(right),
                Expression::Constant(2.0),
            );

            numerator / denominator
        },
        Expression::Binary {
            left,
            right,
            op: BinaryOperation::Power,
        } => {
            // The power rule, followed by the chain rule:
            //   (b^n)' = n * b^(n-1) * b'
            let n = right.as_constant().ok_or_else(|| {
                DifferentiationError::NonConstantExponent {
                    base: Arc::clone(left),
                    exponent: Arc::clone(right),
                }
            })?;
            let d_base = differentiate(left)?;
            let lowered = Expression::binary(
                BinaryOperation::Power,
                Arc::clone(left),
                Expression::Constant(n - 1.0),
            );

            Expression::Constant(n) * lowered * d_base
        },
        Expression::FunctionCall { function, operand } => {
            // implement the chain rule: (f o g)' = (f' o g) * g'
            let f_dash_of_g = match function {
                Builtin::Sine => {
                    Expression::function(Builtin::Cosine, Arc::clone(operand))
                },
                Builtin::Cosine => {
                    Expression::Constant(-1.0)
                        * Expression::function(
                            Builtin::Sine,
                            Arc::clone(operand),
                        )
                },
            };
            let g_dash = differentiate(operand)?;

            f_dash_of_g * g_dash
        },
    };

    Ok(got)
}

/// Multiply two operands, where either may be a handle shared with another
/// expression.
fn times<L, R>(left: L, right: R) -> Expression
where
    L: IntoShared,
    R: IntoShared,
{
    Expression::binary(
        BinaryOperation::Times,
        left.into_shared(),
        right.into_shared(),
    )
}

trait IntoShared {
    fn into_shared(self) -> Arc<Expression>;
}

impl IntoShared for Expression {
    fn into_shared(self) -> Arc<Expression> { Arc::new(self) }
}

impl IntoShared for &Arc<Expression> {
    fn into_shared(self) -> Arc<Expression> { Arc::clone(self) }
}

impl Expression {
    /// Evaluate this expression at some value of `x`.
    pub fn evaluate(&self, x: f64) -> f64 { evaluate(self, x) }

    /// See [`derivative()`].
    pub fn derivative(&self) -> Result<Expression, DifferentiationError> {
        derivative(self)
    }

    /// See [`nth_derivative()`].
    pub fn nth_derivative(
        &self,
        n: usize,
    ) -> Result<Expression, DifferentiationError> {
        nth_derivative(self, n)
    }
}
