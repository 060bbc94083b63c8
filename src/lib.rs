//! Structural symbolic differentiation over a single free variable, `x`.
//!
//! An [`Expression`] is an immutable tree (strictly, a DAG) which can be
//! evaluated at a point, differentiated into a new [`Expression`], and
//! rendered as fully parenthesized text.
//!
//! ```rust
//! use symdiff::Expression;
//!
//! let x = Expression::x;
//! let f = x().pow(Expression::constant(3.0)) + x().sin();
//!
//! let derivative = f.derivative().unwrap();
//! assert_eq!(derivative.render(), "(((3 * (x ^ 2)) * 1) + (cos(x) * 1))");
//! assert_eq!(derivative.evaluate(0.0), 1.0);
//! ```

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

mod expr;
pub mod ops;
#[cfg(test)]
mod proptests;

pub use expr::{BinaryOperation, Builtin, Expression};
pub use ops::DifferentiationError;
