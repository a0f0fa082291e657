use thiserror::Error;

/// Represents all errors that can occur while tokenizing source text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A character that starts no token of the language.
    #[error("Error on line {line}, column {column}: Invalid character '{character}'.")]
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// The source line where the error occurred.
        line:      usize,
        /// The column (1-based, in characters) of the offending character.
        column:    usize,
    },
    /// A `{` comment that reaches the end of input without its `}`.
    #[error("Error on line {line}, column {column}: Unterminated comment.")]
    UnterminatedComment {
        /// The line of the opening brace.
        line:   usize,
        /// The column of the opening brace.
        column: usize,
    },
    /// An integer constant that does not fit a signed 64-bit integer, or a
    /// real constant too large to be finite.
    #[error("Error on line {line}: Numeric literal {literal} is too large.")]
    LiteralTooLarge {
        /// The literal as written in the source.
        literal: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}
