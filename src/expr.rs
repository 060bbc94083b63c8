use std::{
    fmt::{self, Display, Formatter},
    ops::{Add, Div, Mul, Neg, Sub},
    sync::Arc,
};

/// An immutable expression over the single free variable, `x`.
///
/// Children are held behind reference-counted handles, so cloning an
/// [`Expression`] (or building a derivative from one) shares sub-expressions
/// instead of copying them.
#[derive(Debug, Clone)]
pub enum Expression {
    Constant(f64),
    /// The free variable, `x`.
    Variable,
    /// An expression involving two operands.
    Binary {
        left: Arc<Expression>,
        right: Arc<Expression>,
        op: BinaryOperation,
    },
    /// Invoke a builtin function.
    FunctionCall {
        function: Builtin,
        operand: Arc<Expression>,
    },
}

impl Expression {
    pub fn constant(value: f64) -> Self { Expression::Constant(value) }

    pub fn x() -> Self { Expression::Variable }

    pub fn binary<L, R>(op: BinaryOperation, left: L, right: R) -> Self
    where
        L: Into<Arc<Expression>>,
        R: Into<Arc<Expression>>,
    {
        Expression::Binary {
            left: left.into(),
            right: right.into(),
            op,
        }
    }

    pub fn function<A>(function: Builtin, operand: A) -> Self
    where
        A: Into<Arc<Expression>>,
    {
        Expression::FunctionCall {
            function,
            operand: operand.into(),
        }
    }

    /// Raise this expression to some power.
    pub fn pow(self, exponent: Expression) -> Self {
        Expression::binary(BinaryOperation::Power, self, exponent)
    }

    pub fn sin(self) -> Self { Expression::function(Builtin::Sine, self) }

    pub fn cos(self) -> Self { Expression::function(Builtin::Cosine, self) }

    /// Get the literal value of this expression, if it is a
    /// [`Expression::Constant`].
    ///
    /// Nothing else qualifies, not even something which folds down to a
    /// constant like `sin(0)` or `2 + 1`.
    pub fn as_constant(&self) -> Option<f64> {
        match self {
            Expression::Constant(value) => Some(*value),
            _ => None,
        }
    }

    /// The fully parenthesized textual form of this expression.
    pub fn render(&self) -> String { self.to_string() }
}

/// An operation that can be applied to two arguments.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum BinaryOperation {
    Plus,
    Minus,
    Times,
    Divide,
    Power,
}

impl BinaryOperation {
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            BinaryOperation::Plus => left + right,
            BinaryOperation::Minus => left - right,
            BinaryOperation::Times => left * right,
            BinaryOperation::Divide => left / right,
            BinaryOperation::Power => left.powf(right),
        }
    }
}

impl Display for BinaryOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BinaryOperation::Plus => write!(f, "+"),
            BinaryOperation::Minus => write!(f, "-"),
            BinaryOperation::Times => write!(f, "*"),
            BinaryOperation::Divide => write!(f, "/"),
            BinaryOperation::Power => write!(f, "^"),
        }
    }
}

/// Various builtin functions.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Builtin {
    Sine,
    Cosine,
}

impl Builtin {
    /// Evaluate the function, with `argument` in radians.
    pub fn apply(self, argument: f64) -> f64 {
        match self {
            Builtin::Sine => argument.sin(),
            Builtin::Cosine => argument.cos(),
        }
    }
}

impl Display for Builtin {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Builtin::Sine => write!(f, "sin"),
            Builtin::Cosine => write!(f, "cos"),
        }
    }
}

impl From<f64> for Expression {
    fn from(value: f64) -> Self { Expression::Constant(value) }
}

// define some operator overloads to make constructing an expression easier.

impl Add for Expression {
    type Output = Expression;

    fn add(self, rhs: Expression) -> Expression {
        Expression::binary(BinaryOperation::Plus, self, rhs)
    }
}

impl Sub for Expression {
    type Output = Expression;

    fn sub(self, rhs: Expression) -> Expression {
        Expression::binary(BinaryOperation::Minus, self, rhs)
    }
}

impl Mul for Expression {
    type Output = Expression;

    fn mul(self, rhs: Expression) -> Expression {
        Expression::binary(BinaryOperation::Times, self, rhs)
    }
}

impl Div for Expression {
    type Output = Expression;

    fn div(self, rhs: Expression) -> Expression {
        Expression::binary(BinaryOperation::Divide, self, rhs)
    }
}

/// There is no dedicated negation node, so `-e` is `-1 * e`.
impl Neg for Expression {
    type Output = Expression;

    fn neg(self) -> Self::Output { Expression::Constant(-1.0) * self }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Constant(value) => write!(f, "{}", value),
            Expression::Variable => write!(f, "x"),
            Expression::Binary { left, right, op } => {
                write!(f, "({} {} {})", left, op, right)
            },
            Expression::FunctionCall { function, operand } => {
                write!(f, "{}({})", function, operand)
            },
        }
    }
}
