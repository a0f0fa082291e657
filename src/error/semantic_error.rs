use thiserror::Error;

/// Represents failures found while resolving identifiers against scopes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    /// A name declared twice within the same scope.
    #[error("Error on line {line}: Duplicate identifier '{name}' found.")]
    DuplicateIdentifier {
        /// The redeclared name.
        name: String,
        /// The line of the second declaration.
        line: usize,
    },
    /// A type or variable name that no enclosing scope declares.
    #[error("Error on line {line}: Identifier not found: '{name}'.")]
    UnresolvedIdentifier {
        /// The unresolved name.
        name: String,
        /// The line of the reference.
        line: usize,
    },
}

impl SemanticError {
    /// The identifier the error is about.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::DuplicateIdentifier { name, .. } | Self::UnresolvedIdentifier { name, .. } => name,
        }
    }
}
