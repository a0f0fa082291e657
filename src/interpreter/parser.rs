/// Parser state, token consumption and the program rule.
///
/// Holds the lexer, the current lookahead token and the nesting counter, and
/// exposes the entry point that parses a whole program.
pub mod core;

/// Blocks and declarations.
///
/// Parses `VAR` groups, procedure headers with their formal parameters, and
/// type specifications.
pub mod block;

/// Statements.
///
/// Parses compound statements, statement lists, assignments and the empty
/// statement.
pub mod statement;

/// Additive and multiplicative operator chains.
pub mod binary;

/// Factors: prefix operators, constants, parenthesised expressions and
/// variable references.
pub mod unary;

pub use self::core::{DEFAULT_MAX_DEPTH, ParseResult, Parser};
use crate::ast::Program;

/// Parses a complete program with the default nesting limit.
///
/// # Errors
/// Returns the first lexical or syntax error encountered.
///
/// # Example
/// ```
/// use scopewalk::interpreter::parser::parse;
///
/// let program = parse("PROGRAM demo; BEGIN END.").unwrap();
/// assert_eq!(program.name, "demo");
/// assert!(parse("PROGRAM demo; BEGIN END").is_err());
/// ```
pub fn parse(source: &str) -> ParseResult<Program> {
    Parser::new(source)?.parse()
}
