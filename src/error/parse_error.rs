use thiserror::Error;

use crate::error::LexError;

/// Represents all errors that can occur during lexing or parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The token stream could not be produced.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// The current token does not fit the grammar rule being applied.
    #[error("Error on line {line}: Syntax error: expected {expected}, found {found}.")]
    UnexpectedToken {
        /// What the grammar required at this point.
        expected: String,
        /// The token actually present.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// The syntax tree would grow deeper than the parser is allowed to
    /// recurse. Nested blocks, parentheses and prefix operators each add a
    /// level, and so does every link of an operator chain such as `1 + 2 + 3`.
    #[error("Error on line {line}: Syntax tree too deep (limit {limit} levels).")]
    NestingTooDeep {
        /// The configured nesting limit.
        limit: usize,
        /// The source line where the limit was crossed.
        line:  usize,
    },
}
