/// Lexical errors.
///
/// Raised while turning source text into tokens: characters outside the
/// language, comments that never close and integer constants that do not fit
/// the integer type.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur while building the syntax tree,
/// including grammar violations and input nested too deeply to process.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation, such as
/// reads of unassigned variables, division by zero or integer overflow.
pub mod runtime_error;
/// Scope resolution errors.
///
/// Raised by the passes that walk the tree with a scope chain: identifiers
/// declared twice in one scope and identifiers that resolve nowhere.
pub mod semantic_error;

pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
pub use semantic_error::SemanticError;
use thiserror::Error as ThisError;

/// Any failure produced while processing one program.
///
/// Each phase has its own error type; this enum lets a driver hold whichever
/// phase failed while still matching on the exact kind.
#[derive(Debug, ThisError)]
pub enum Error {
    /// The source could not be tokenized or parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// An identifier was declared twice in one scope or never declared.
    #[error(transparent)]
    Semantic(#[from] SemanticError),
    /// Evaluation failed.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl From<LexError> for Error {
    fn from(error: LexError) -> Self {
        Self::Parse(ParseError::Lex(error))
    }
}
