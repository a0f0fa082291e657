use std::fmt;

use crate::{
    ast::Number,
    error::RuntimeError,
    interpreter::evaluator::EvalResult,
    util::num::{format_real, i64_to_f64_checked},
};

/// Represents a runtime value in the interpreter.
///
/// Only scalars exist at runtime: the result of every expression and the
/// content of every variable is one of these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// A 64-bit signed integer.
    Integer(i64),
    /// A double precision floating-point number.
    Real(f64),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<Number> for Value {
    fn from(number: Number) -> Self {
        match number {
            Number::Integer(n) => Self::Integer(n),
            Number::Real(r) => Self::Real(r),
        }
    }
}

impl Value {
    /// Converts the value to an `f64`.
    ///
    /// Integers are promoted only if they are exactly representable.
    ///
    /// # Errors
    /// `IntegerTooLarge` for integers beyond 2^53 in magnitude.
    ///
    /// # Example
    /// ```
    /// use scopewalk::interpreter::value::Value;
    ///
    /// assert_eq!(Value::Integer(10).as_real(1).unwrap(), 10.0);
    /// assert_eq!(Value::Real(2.5).as_real(1).unwrap(), 2.5);
    /// assert!(Value::Integer(i64::MAX).as_real(1).is_err());
    /// ```
    pub fn as_real(self, line: usize) -> EvalResult<f64> {
        match self {
            Self::Real(r) => Ok(r),
            Self::Integer(n) => i64_to_f64_checked(n, RuntimeError::IntegerTooLarge { line }),
        }
    }

    /// Whether the value is a real.
    #[must_use]
    pub const fn is_real(self) -> bool {
        matches!(self, Self::Real(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => f.write_str(&format_real(*r)),
        }
    }
}
