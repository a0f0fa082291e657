use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::Value,
    },
};

impl Interpreter {
    /// Evaluates a binary arithmetic operation.
    ///
    /// Two integers stay integers for `+`, `-`, `*` and `//`; if either side
    /// is real both are promoted and the result is real. `/` always produces
    /// a real. `//` floors the quotient, so `-7 // 2` is `-4`.
    ///
    /// # Errors
    /// - `DivisionByZero` for either division by zero.
    /// - `Overflow` when integer arithmetic leaves the `i64` range.
    /// - `IntegerTooLarge` when promoting an integer that `f64` cannot hold
    ///   exactly.
    ///
    /// # Example
    /// ```
    /// use scopewalk::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::Interpreter, value::Value},
    /// };
    ///
    /// let six = Value::Integer(6);
    /// let two = Value::Integer(2);
    ///
    /// let v = Interpreter::eval_binary(BinaryOperator::FloatDiv, six, two, 1).unwrap();
    /// assert_eq!(v, Value::Real(3.0));
    ///
    /// let v = Interpreter::eval_binary(BinaryOperator::IntegerDiv, Value::Integer(-7), two, 1);
    /// assert_eq!(v.unwrap(), Value::Integer(-4));
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: Value,
                       right: Value,
                       line: usize)
                       -> EvalResult<Value> {
        match (left, right) {
            (Value::Integer(a), Value::Integer(b)) => Self::eval_integer_op(op, a, b, line),
            _ => Self::eval_real_op(op, left.as_real(line)?, right.as_real(line)?, line),
        }
    }

    fn eval_integer_op(op: BinaryOperator, a: i64, b: i64, line: usize) -> EvalResult<Value> {
        let result = match op {
            BinaryOperator::Add => a.checked_add(b),
            BinaryOperator::Sub => a.checked_sub(b),
            BinaryOperator::Mul => a.checked_mul(b),
            BinaryOperator::IntegerDiv => {
                if b == 0 {
                    return Err(RuntimeError::DivisionByZero { line });
                }
                floor_div(a, b)
            },
            BinaryOperator::FloatDiv => {
                return Self::eval_real_op(op,
                                          Value::Integer(a).as_real(line)?,
                                          Value::Integer(b).as_real(line)?,
                                          line);
            },
        };
        result.map(Value::Integer)
              .ok_or(RuntimeError::Overflow { line })
    }

    fn eval_real_op(op: BinaryOperator, a: f64, b: f64, line: usize) -> EvalResult<Value> {
        Ok(Value::Real(match op {
                           BinaryOperator::Add => a + b,
                           BinaryOperator::Sub => a - b,
                           BinaryOperator::Mul => a * b,
                           BinaryOperator::FloatDiv | BinaryOperator::IntegerDiv if b == 0.0 => {
                               return Err(RuntimeError::DivisionByZero { line });
                           },
                           BinaryOperator::FloatDiv => a / b,
                           BinaryOperator::IntegerDiv => (a / b).floor(),
                       }))
    }
}

/// Integer division rounding toward negative infinity. `None` on overflow.
fn floor_div(a: i64, b: i64) -> Option<i64> {
    let quotient = a.checked_div(b)?;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        Some(quotient - 1)
    } else {
        Some(quotient)
    }
}
