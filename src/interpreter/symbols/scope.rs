use std::collections::HashMap;

use log::{debug, trace};

use crate::{
    ast::{ProcedureDecl, TypeRef, Var},
    error::SemanticError,
    interpreter::{
        analyzer::SemanticResult,
        symbols::symbol::{BuiltinType, ProcedureSymbol, Symbol, VariableSymbol},
    },
};

/// Index of a scope inside its [`ScopeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

/// One lexical namespace.
#[derive(Debug)]
pub struct Scope {
    /// Name of the program or procedure that opened the scope.
    pub name:      String,
    /// 0 for builtins, 1 for the program, one more per nested procedure.
    pub level:     usize,
    /// The scope this one is nested in; `None` only for the builtins.
    pub enclosing: Option<ScopeId>,
    symbols:       HashMap<String, Symbol>,
}

impl Scope {
    /// The symbol registered under `name` in this scope alone.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    /// Number of symbols registered directly in this scope.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether nothing is registered directly in this scope.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// A symbol found by walking the scope chain, with the level of the scope
/// that declares it.
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'a> {
    /// The symbol.
    pub symbol: &'a Symbol,
    /// Nesting level of the declaring scope.
    pub level:  usize,
}

/// Owns every live scope of one tree walk.
///
/// Scopes are strictly nested, so the arena behaves as a stack: a new scope
/// always encloses the most recent one pushed, and popping truncates it away.
///
/// # Example
/// ```
/// use scopewalk::interpreter::symbols::{BuiltinType, ScopeArena, Symbol, VariableSymbol};
///
/// let (mut scopes, builtins) = ScopeArena::with_builtins();
/// let global = scopes.push("global", builtins);
/// scopes.define(global,
///               Symbol::Variable(VariableSymbol { name:          "x".into(),
///                                                 declared_type: BuiltinType::Integer, }));
///
/// let inner = scopes.push("inner", global);
/// assert!(scopes.lookup(inner, "x", false).is_some());
/// assert!(scopes.lookup(inner, "x", true).is_none());
/// assert_eq!(scopes.resolve(inner, "INTEGER").unwrap().level, 0);
/// ```
#[derive(Debug, Default)]
pub struct ScopeArena {
    scopes: Vec<Scope>,
}

impl ScopeArena {
    /// Creates an arena holding the level-0 builtins scope with `INTEGER`
    /// and `REAL` registered, and returns its id.
    #[must_use]
    pub fn with_builtins() -> (Self, ScopeId) {
        let mut arena = Self::default();
        let builtins = arena.open("builtins".to_string(), 0, None);
        for builtin in BuiltinType::ALL {
            arena.define(builtins, Symbol::Builtin(builtin));
        }
        (arena, builtins)
    }

    /// Opens a scope nested inside `enclosing`.
    ///
    /// `enclosing` must be the innermost live scope.
    pub fn push(&mut self, name: impl Into<String>, enclosing: ScopeId) -> ScopeId {
        let level = self.scope(enclosing).level + 1;
        self.open(name.into(), level, Some(enclosing))
    }

    /// Closes `id` and everything nested in it, returning its enclosing
    /// scope.
    pub fn pop(&mut self, id: ScopeId) -> Option<ScopeId> {
        let enclosing = self.scope(id).enclosing;
        debug!("Leaving scope '{}' (level {})", self.scope(id).name, self.scope(id).level);
        self.scopes.truncate(id.0);
        enclosing
    }

    /// The scope behind `id`.
    ///
    /// # Panics
    /// If `id` was popped; ids never outlive the walk that created them.
    #[must_use]
    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }

    /// Inserts `symbol` into `scope`, replacing any symbol of the same name
    /// there. No duplicate check happens at this layer.
    pub fn define(&mut self, scope: ScopeId, symbol: Symbol) {
        let scope = &mut self.scopes[scope.0];
        trace!("Define: {symbol} in '{}'", scope.name);
        scope.symbols.insert(symbol.name().to_string(), symbol);
    }

    /// Looks `name` up in `scope`, then, unless `current_scope_only`, in each
    /// enclosing scope in turn.
    #[must_use]
    pub fn lookup(&self, scope: ScopeId, name: &str, current_scope_only: bool) -> Option<&Symbol> {
        if current_scope_only {
            trace!("Lookup: {name} in '{}' only", self.scope(scope).name);
            return self.scope(scope).get(name);
        }
        self.resolve(scope, name).map(|resolved| resolved.symbol)
    }

    /// Like [`ScopeArena::lookup`] across the full chain, also reporting the
    /// level of the scope that declares the symbol.
    #[must_use]
    pub fn resolve(&self, scope: ScopeId, name: &str) -> Option<Resolved<'_>> {
        let current = self.scope(scope);
        trace!("Lookup: {name} in '{}'", current.name);
        match current.get(name) {
            Some(symbol) => Some(Resolved { symbol,
                                            level: current.level }),
            None => current.enclosing.and_then(|enclosing| self.resolve(enclosing, name)),
        }
    }

    /// Registers `symbol` in `scope` unless the name is already taken there.
    ///
    /// # Errors
    /// `DuplicateIdentifier` if `scope` itself already holds the name.
    pub fn declare(&mut self, scope: ScopeId, symbol: Symbol, line: usize) -> SemanticResult<()> {
        if self.lookup(scope, symbol.name(), true).is_some() {
            return Err(SemanticError::DuplicateIdentifier { name: symbol.name().to_string(),
                                                            line });
        }
        self.define(scope, symbol);
        Ok(())
    }

    /// Resolves a type reference to a builtin type.
    ///
    /// # Errors
    /// `UnresolvedIdentifier` if the name is unknown or names something that
    /// is not a type.
    pub fn resolve_type(&self, scope: ScopeId, type_ref: &TypeRef) -> SemanticResult<BuiltinType> {
        match self.lookup(scope, &type_ref.name, false) {
            Some(Symbol::Builtin(builtin)) => Ok(*builtin),
            _ => Err(SemanticError::UnresolvedIdentifier { name: type_ref.name.clone(),
                                                           line: type_ref.line, }),
        }
    }

    /// Resolves a variable reference across the full scope chain.
    ///
    /// # Errors
    /// `UnresolvedIdentifier` if no enclosing scope declares the name.
    pub fn resolve_var(&self, scope: ScopeId, var: &Var) -> SemanticResult<Resolved<'_>> {
        self.resolve(scope, &var.name)
            .ok_or_else(|| SemanticError::UnresolvedIdentifier { name: var.name.clone(),
                                                                 line: var.line, })
    }

    /// Declares a procedure in `scope` and opens the scope of its body.
    ///
    /// The procedure's name is registered before its own scope exists, so
    /// the body can refer to it. Each formal parameter becomes a variable of
    /// the new scope and is recorded, in order, on the procedure symbol.
    /// Returns the new scope and the parameter symbols.
    ///
    /// # Errors
    /// - `DuplicateIdentifier` if `scope` already declares the procedure's
    ///   name, or two parameters share a name.
    /// - `UnresolvedIdentifier` for an unknown parameter type.
    pub fn open_procedure(&mut self,
                          scope: ScopeId,
                          decl: &ProcedureDecl)
                          -> SemanticResult<(ScopeId, Vec<VariableSymbol>)> {
        self.declare(scope,
                     Symbol::Procedure(ProcedureSymbol { name:   decl.name.clone(),
                                                         params: Vec::new(), }),
                     decl.line)?;

        let inner = self.push(decl.name.clone(), scope);
        let mut params = Vec::with_capacity(decl.params.len());
        for param in &decl.params {
            let declared_type = self.resolve_type(inner, &param.type_ref)?;
            let symbol = VariableSymbol { name: param.var.name.clone(),
                                          declared_type };
            self.declare(inner, Symbol::Variable(symbol.clone()), param.var.line)?;
            params.push(symbol);
        }

        self.define(scope,
                    Symbol::Procedure(ProcedureSymbol { name:   decl.name.clone(),
                                                        params: params.clone(), }));
        Ok((inner, params))
    }

    fn open(&mut self, name: String, level: usize, enclosing: Option<ScopeId>) -> ScopeId {
        debug!("Entering scope '{name}' (level {level})");
        self.scopes.push(Scope { name,
                                 level,
                                 enclosing,
                                 symbols: HashMap::new() });
        ScopeId(self.scopes.len() - 1)
    }
}
