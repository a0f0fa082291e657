use log::debug;

use crate::{
    ast::{Block, Compound, Expr, Program, Statement},
    error::RuntimeError,
    interpreter::{evaluator::store::RuntimeStore, value::Value},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Tree-walking interpreter.
///
/// Executes a program that already passed semantic analysis by direct
/// recursion over its tree. The only state is the [`RuntimeStore`], which is
/// returned when the program finishes.
#[derive(Debug, Default)]
pub struct Interpreter {
    store: RuntimeStore,
}

impl Interpreter {
    /// Creates an interpreter with an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `program` and returns the final store.
    ///
    /// # Errors
    /// Any [`RuntimeError`] raised while executing the main body.
    ///
    /// # Example
    /// ```
    /// use scopewalk::interpreter::{evaluator::Interpreter, parser::parse, value::Value};
    ///
    /// let program = parse("PROGRAM p; VAR x : REAL; BEGIN x := 10 / 4 END.").unwrap();
    /// let store = Interpreter::new().run(&program).unwrap();
    /// assert_eq!(store.get("x"), Some(Value::Real(2.5)));
    /// ```
    pub fn run(mut self, program: &Program) -> EvalResult<RuntimeStore> {
        self.exec_block(&program.block)?;
        Ok(self.store)
    }

    /// Executes the statements of a block.
    ///
    /// Declarations have no runtime effect, and procedure bodies are never
    /// entered because the language has no call statement.
    fn exec_block(&mut self, block: &Block) -> EvalResult<()> {
        self.exec_compound(&block.compound)
    }

    fn exec_compound(&mut self, compound: &Compound) -> EvalResult<()> {
        compound.statements
                .iter()
                .try_for_each(|statement| self.exec_statement(statement))
    }

    /// Executes a single statement.
    ///
    /// # Errors
    /// Propagates failures of the expressions it evaluates.
    pub fn exec_statement(&mut self, statement: &Statement) -> EvalResult<()> {
        match statement {
            Statement::Compound(compound) => self.exec_compound(compound),
            Statement::Assign { target, value, .. } => {
                let value = self.eval(value)?;
                debug!("Assign: {} = {value}", target.name);
                self.store.assign(&target.name, value);
                Ok(())
            },
            Statement::NoOp => Ok(()),
        }
    }

    /// Evaluates an expression against the current store.
    ///
    /// # Errors
    /// - `UndefinedVariable` when reading a variable never assigned.
    /// - Arithmetic failures from [`Interpreter::eval_unary`] and
    ///   [`Interpreter::eval_binary`].
    pub fn eval(&self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Number { value, .. } => Ok(Value::from(*value)),
            Expr::Variable(var) => {
                self.store
                    .get(&var.name)
                    .ok_or_else(|| RuntimeError::UndefinedVariable { name: var.name.clone(),
                                                                     line: var.line, })
            },
            Expr::UnaryOp { op, operand, line } => Self::eval_unary(*op, self.eval(operand)?, *line),
            Expr::BinaryOp { left,
                             op,
                             right,
                             line, } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Self::eval_binary(*op, left, right, *line)
            },
        }
    }

    /// The store as it stands.
    #[must_use]
    pub const fn store(&self) -> &RuntimeStore {
        &self.store
    }
}

/// Runs `program` with a fresh [`Interpreter`].
///
/// # Errors
/// See [`Interpreter::run`].
pub fn interpret(program: &Program) -> EvalResult<RuntimeStore> {
    Interpreter::new().run(program)
}
