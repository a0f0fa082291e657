use crate::{
    ast::UnaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::Value,
    },
};

impl Interpreter {
    /// Evaluates a prefix operator on a value.
    ///
    /// `+` returns the operand unchanged; `-` negates it, keeping its type.
    ///
    /// # Errors
    /// `Overflow` when negating `i64::MIN`.
    ///
    /// # Example
    /// ```
    /// use scopewalk::{
    ///     ast::UnaryOperator,
    ///     interpreter::{evaluator::Interpreter, value::Value},
    /// };
    ///
    /// let v = Interpreter::eval_unary(UnaryOperator::Minus, Value::Integer(5), 1).unwrap();
    /// assert_eq!(v, Value::Integer(-5));
    ///
    /// let v = Interpreter::eval_unary(UnaryOperator::Plus, Value::Real(1.5), 1).unwrap();
    /// assert_eq!(v, Value::Real(1.5));
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: Value, line: usize) -> EvalResult<Value> {
        match (op, value) {
            (UnaryOperator::Plus, value) => Ok(value),
            (UnaryOperator::Minus, Value::Integer(n)) => {
                n.checked_neg()
                 .map(Value::Integer)
                 .ok_or(RuntimeError::Overflow { line })
            },
            (UnaryOperator::Minus, Value::Real(r)) => Ok(Value::Real(-r)),
        }
    }
}
