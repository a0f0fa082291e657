/// Symbol kinds: builtin types, variables and procedures.
pub mod symbol;

/// Nested scopes.
///
/// Scopes live in an arena owned by whichever pass walks the tree. Each
/// scope links to its enclosing scope by id, never by ownership, and a scope
/// is discarded as soon as the walk leaves the program or procedure body
/// that opened it.
pub mod scope;

pub use scope::{Resolved, Scope, ScopeArena, ScopeId};
pub use symbol::{BuiltinType, ProcedureSymbol, Symbol, VariableSymbol};
