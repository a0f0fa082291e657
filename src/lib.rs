//! # scopewalk
//!
//! scopewalk is a front end and tree-walking evaluator for a small subset of
//! Pascal. Source text is tokenized, parsed into a syntax tree, checked
//! against nested lexical scopes, and then either executed or printed back
//! with every identifier annotated by the scope level that declares it.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    ast::Program,
    error::Error,
    interpreter::{
        analyzer, evaluator,
        parser::{DEFAULT_MAX_DEPTH, Parser},
        regenerator,
        value::Value,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the program, declaration, statement and expression
/// types produced by the parser. Every later pass reads the tree without
/// changing it.
pub mod ast;
/// Provides unified error types for every phase.
///
/// Lexing, parsing, scope resolution and evaluation each have their own
/// error enum; [`error::Error`] wraps whichever one a pipeline hit.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// Ties together lexing, parsing, scope resolution, evaluation and source
/// regeneration.
pub mod interpreter;
/// General utilities for safe numeric conversion.
pub mod util;

/// Tunables shared by every pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// How deeply the source may nest before parsing gives up.
    pub max_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH }
    }
}

/// Parses and validates `source`, returning the checked tree.
///
/// # Errors
/// Returns the first lexical, syntax or semantic error.
///
/// # Examples
/// ```
/// use scopewalk::{check, error::Error};
///
/// assert!(check("PROGRAM p; VAR x : INTEGER; BEGIN x := 1 END.").is_ok());
/// assert!(matches!(check("PROGRAM p; BEGIN y := 1 END."), Err(Error::Semantic(_))));
/// ```
pub fn check(source: &str) -> Result<Program, Error> {
    check_with(source, Options::default())
}

/// [`check`] with explicit [`Options`].
pub fn check_with(source: &str, options: Options) -> Result<Program, Error> {
    let program = Parser::with_max_depth(source, options.max_depth)?.parse()?;
    analyzer::analyze(&program)?;
    Ok(program)
}

/// Parses, validates and runs `source`.
///
/// Returns every variable written by the program as `(name, value)` pairs
/// ordered by name.
///
/// # Errors
/// Returns the first error of any phase.
///
/// # Examples
/// ```
/// use scopewalk::{interpreter::value::Value, run};
///
/// let store = run("PROGRAM t; VAR a, b : INTEGER; BEGIN a := 2; b := a + 3 * 2 END.").unwrap();
/// assert_eq!(store,
///            vec![("a".to_string(), Value::Integer(2)), ("b".to_string(), Value::Integer(8))]);
/// ```
pub fn run(source: &str) -> Result<Vec<(String, Value)>, Error> {
    run_with(source, Options::default())
}

/// [`run`] with explicit [`Options`].
pub fn run_with(source: &str, options: Options) -> Result<Vec<(String, Value)>, Error> {
    let program = check_with(source, options)?;
    Ok(evaluator::interpret(&program)?.into_pairs())
}

/// Parses `source` and prints it back with scope-level annotations.
///
/// No separate semantic analysis runs first; the regenerator resolves scopes
/// itself and fails the same way analysis would.
///
/// # Errors
/// Returns the first lexical, syntax or semantic error.
pub fn regenerate_source(source: &str) -> Result<String, Error> {
    regenerate_source_with(source, Options::default())
}

/// [`regenerate_source`] with explicit [`Options`].
pub fn regenerate_source_with(source: &str, options: Options) -> Result<String, Error> {
    let program = Parser::with_max_depth(source, options.max_depth)?.parse()?;
    Ok(regenerator::regenerate(&program)?)
}
