/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads raw source text and produces tokens on demand: reserved
/// words, identifiers, numeric constants, operators and punctuation. It is
/// the first stage of every pipeline.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// A recursive-descent parser with one function per grammar rule. It stops
/// at the first error and never returns a partial tree.
pub mod parser;
/// Scoped symbol tables.
///
/// Defines the symbols a program can declare and the chain of nested scopes
/// they live in.
pub mod symbols;
/// Semantic analysis.
///
/// Validates a parsed program: every identifier must be declared in a
/// visible scope, and no scope may declare a name twice.
pub mod analyzer;
/// The evaluator module executes a validated tree.
///
/// Walks the tree directly, computing expression values and writing
/// assignments into a flat variable store.
pub mod evaluator;
/// The value module defines the runtime scalars.
pub mod value;
/// Source-to-source regeneration.
///
/// Prints a program back as source with every identifier annotated by the
/// nesting level of the scope that declares it.
pub mod regenerator;
