use std::fmt;

use crate::util::num::format_real;

/// A numeric constant as written in the source.
///
/// Integers stay integers and reals stay reals; no promotion happens until
/// evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// A 64-bit signed integer constant.
    Integer(i64),
    /// A 64-bit floating-point constant.
    Real(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Real(value) => f.write_str(&format_real(*value)),
        }
    }
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// `+`
    Plus,
    /// `-`
    Minus,
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
                        Self::Plus => "+",
                        Self::Minus => "-",
                    })
    }
}

/// Infix arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`, always producing a real.
    FloatDiv,
    /// `//`, the floored quotient.
    IntegerDiv,
}

impl BinaryOperator {
    /// Binding strength; higher binds tighter.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::FloatDiv | Self::IntegerDiv => 2,
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
                        Self::Add => "+",
                        Self::Sub => "-",
                        Self::Mul => "*",
                        Self::FloatDiv => "/",
                        Self::IntegerDiv => "//",
                    })
    }
}

/// The root of a parsed program: `PROGRAM name; block .`
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Program name, lower-cased.
    pub name:  String,
    /// The program body.
    pub block: Block,
    /// Line of the `PROGRAM` keyword.
    pub line:  usize,
}

/// Declarations followed by the statements that use them.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Variable declarations first, then procedure declarations, in source
    /// order.
    pub declarations: Vec<Declaration>,
    /// The `BEGIN ... END` body.
    pub compound:     Compound,
}

/// Anything a block can declare.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    /// `name : TYPE`
    Variable(VarDecl),
    /// `PROCEDURE name(params); block;`
    Procedure(ProcedureDecl),
}

/// A single declared variable. `VAR a, b : INTEGER;` yields two of these.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    /// The declared name.
    pub var:      Var,
    /// The declared type.
    pub type_ref: TypeRef,
}

/// A procedure declaration with its formal parameters and body.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureDecl {
    /// Procedure name, lower-cased.
    pub name:   String,
    /// Formal parameters in declaration order.
    pub params: Vec<Param>,
    /// The procedure body.
    pub block:  Block,
    /// Line of the `PROCEDURE` keyword.
    pub line:   usize,
}

/// One formal parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// Parameter name.
    pub var:      Var,
    /// Parameter type.
    pub type_ref: TypeRef,
}

/// A use or declaration of an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Var {
    /// Identifier, lower-cased.
    pub name: String,
    /// Line number in the source code.
    pub line: usize,
}

/// A reference to a type by name (`INTEGER` or `REAL`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    /// Type name, upper-cased.
    pub name: String,
    /// Line number in the source code.
    pub line: usize,
}

/// `BEGIN statement (; statement)* END`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Compound {
    /// Statements in execution order.
    pub statements: Vec<Statement>,
}

/// A statement inside a compound statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A nested `BEGIN ... END`.
    Compound(Compound),
    /// `target := value`
    Assign {
        /// The assigned variable.
        target: Var,
        /// The assigned expression.
        value:  Expr,
        /// Line of the assignment operator.
        line:   usize,
    },
    /// The empty statement, e.g. before `END` after a trailing `;`.
    NoOp,
}

/// An abstract syntax tree (AST) node representing an arithmetic
/// expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric constant.
    Number {
        /// The constant value.
        value: Number,
        /// Line number in the source code.
        line:  usize,
    },
    /// Reference to a variable by name.
    Variable(Var),
    /// A prefix `+` or `-`.
    UnaryOp {
        /// The unary operator to apply.
        op:      UnaryOperator,
        /// The operand expression.
        operand: Box<Self>,
        /// Line number in the source code.
        line:    usize,
    },
    /// A binary arithmetic operation.
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line number of the operator.
        line:  usize,
    },
}

impl Expr {
    /// Gets the line number from `self`.
    ///
    /// ## Example
    /// ```
    /// use scopewalk::ast::{Expr, Var};
    ///
    /// let expr = Expr::Variable(Var { name: "x".to_string(),
    ///                                 line: 5, });
    ///
    /// assert_eq!(expr.line_number(), 5);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Number { line, .. } | Self::UnaryOp { line, .. } | Self::BinaryOp { line, .. } => {
                *line
            },
            Self::Variable(var) => var.line,
        }
    }
}
