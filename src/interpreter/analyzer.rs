use crate::{
    ast::{Block, Compound, Declaration, Expr, Program, Statement, VarDecl},
    error::SemanticError,
    interpreter::symbols::{ScopeArena, ScopeId, Symbol, VariableSymbol},
};

/// Result type used by the passes that resolve identifiers.
pub type SemanticResult<T> = Result<T, SemanticError>;

/// Validates identifier use without executing anything.
///
/// Walks the tree once, opening a scope for the program and for every
/// procedure body. The scope currently in effect is passed down the walk
/// explicitly; the analyzer holds no other state and is consumed by
/// [`SemanticAnalyzer::analyze`].
pub struct SemanticAnalyzer {
    scopes:   ScopeArena,
    builtins: ScopeId,
}

#[allow(clippy::new_without_default)]
impl SemanticAnalyzer {
    /// Creates an analyzer with only the builtin types in scope.
    #[must_use]
    pub fn new() -> Self {
        let (scopes, builtins) = ScopeArena::with_builtins();
        Self { scopes, builtins }
    }

    /// Checks every declaration and identifier reference in `program`.
    ///
    /// # Errors
    /// - `DuplicateIdentifier` when a scope declares a name twice.
    /// - `UnresolvedIdentifier` when a type or variable is not visible.
    ///
    /// # Example
    /// ```
    /// use scopewalk::interpreter::{analyzer::SemanticAnalyzer, parser::parse};
    ///
    /// let ok = parse("PROGRAM p; VAR x : INTEGER; BEGIN x := 1 END.").unwrap();
    /// assert!(SemanticAnalyzer::new().analyze(&ok).is_ok());
    ///
    /// let bad = parse("PROGRAM p; BEGIN y := 1 END.").unwrap();
    /// assert!(SemanticAnalyzer::new().analyze(&bad).is_err());
    /// ```
    pub fn analyze(mut self, program: &Program) -> SemanticResult<()> {
        let global = self.scopes.push("global", self.builtins);
        self.visit_block(&program.block, global)?;
        self.scopes.pop(global);
        Ok(())
    }

    fn visit_block(&mut self, block: &Block, scope: ScopeId) -> SemanticResult<()> {
        for declaration in &block.declarations {
            match declaration {
                Declaration::Variable(decl) => self.visit_var_decl(decl, scope)?,
                Declaration::Procedure(decl) => {
                    let (inner, _) = self.scopes.open_procedure(scope, decl)?;
                    self.visit_block(&decl.block, inner)?;
                    self.scopes.pop(inner);
                },
            }
        }
        self.visit_compound(&block.compound, scope)
    }

    fn visit_var_decl(&mut self, decl: &VarDecl, scope: ScopeId) -> SemanticResult<()> {
        let declared_type = self.scopes.resolve_type(scope, &decl.type_ref)?;
        self.scopes.declare(scope,
                            Symbol::Variable(VariableSymbol { name: decl.var.name.clone(),
                                                              declared_type }),
                            decl.var.line)
    }

    fn visit_compound(&self, compound: &Compound, scope: ScopeId) -> SemanticResult<()> {
        compound.statements
                .iter()
                .try_for_each(|statement| self.visit_statement(statement, scope))
    }

    fn visit_statement(&self, statement: &Statement, scope: ScopeId) -> SemanticResult<()> {
        match statement {
            Statement::Compound(compound) => self.visit_compound(compound, scope),
            Statement::Assign { target, value, .. } => {
                self.scopes.resolve_var(scope, target)?;
                self.visit_expr(value, scope)
            },
            Statement::NoOp => Ok(()),
        }
    }

    fn visit_expr(&self, expr: &Expr, scope: ScopeId) -> SemanticResult<()> {
        match expr {
            Expr::Number { .. } => Ok(()),
            Expr::Variable(var) => self.scopes.resolve_var(scope, var).map(|_| ()),
            Expr::UnaryOp { operand, .. } => self.visit_expr(operand, scope),
            Expr::BinaryOp { left, right, .. } => {
                self.visit_expr(left, scope)?;
                self.visit_expr(right, scope)
            },
        }
    }
}

/// Runs a fresh [`SemanticAnalyzer`] over `program`.
///
/// # Errors
/// See [`SemanticAnalyzer::analyze`].
pub fn analyze(program: &Program) -> SemanticResult<()> {
    SemanticAnalyzer::new().analyze(program)
}
