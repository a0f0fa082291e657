use crate::{
    ast::{Block, Compound, Declaration, Expr, Program, ProcedureDecl, Statement, Var, VarDecl},
    interpreter::{
        analyzer::SemanticResult,
        symbols::{ScopeArena, ScopeId, Symbol, VariableSymbol},
    },
};

/// One level of indentation in regenerated source.
pub const INDENT: &str = "   ";

/// Rewrites a program with every identifier tagged by its scope level.
///
/// Declared and referenced names get the nesting level of the scope that
/// declares them appended (`x1`, `a2`), and type names get the builtins
/// level (`INTEGER0`). Variable references are rendered as
/// `<name level:TYPE0>`.
///
/// The regenerator resolves scopes itself instead of trusting a previous
/// analysis, so it reports the same duplicate and unresolved identifiers as
/// the [`SemanticAnalyzer`](crate::interpreter::analyzer::SemanticAnalyzer).
pub struct SourceRegenerator {
    scopes:   ScopeArena,
    builtins: ScopeId,
}

#[allow(clippy::new_without_default)]
impl SourceRegenerator {
    /// Creates a regenerator with only the builtin types in scope.
    #[must_use]
    pub fn new() -> Self {
        let (scopes, builtins) = ScopeArena::with_builtins();
        Self { scopes, builtins }
    }

    /// Renders `program`.
    ///
    /// # Errors
    /// `DuplicateIdentifier` or `UnresolvedIdentifier`, exactly as semantic
    /// analysis would report them.
    ///
    /// # Example
    /// ```
    /// use scopewalk::interpreter::{parser::parse, regenerator::SourceRegenerator};
    ///
    /// let program = parse("PROGRAM p; VAR x : INTEGER; BEGIN x := 1 END.").unwrap();
    /// let text = SourceRegenerator::new().regenerate(&program).unwrap();
    /// assert_eq!(text,
    ///            "program p0;\n   var x1 : INTEGER0;\n\nbegin\n   <x1:INTEGER0> := 1;\nend. {END OF p}");
    /// ```
    pub fn regenerate(mut self, program: &Program) -> SemanticResult<String> {
        let global = self.scopes.push("global", self.builtins);
        let block = self.render_block(&program.block, global)?;
        self.scopes.pop(global);

        Ok(format!("program {name}0;\n{block}. {{END OF {name}}}", name = program.name))
    }

    fn render_block(&mut self, block: &Block, scope: ScopeId) -> SemanticResult<String> {
        let mut lines = Vec::with_capacity(block.declarations.len() + 3);
        for declaration in &block.declarations {
            lines.push(match declaration {
                           Declaration::Variable(decl) => self.render_var_decl(decl, scope)?,
                           Declaration::Procedure(decl) => self.render_procedure(decl, scope)?,
                       });
        }

        lines.push(String::new());
        lines.push("begin".to_string());
        lines.extend(self.render_compound(&block.compound, scope)?
                         .into_iter()
                         .map(|line| format!("{INDENT}{line}")));
        lines.push("end".to_string());

        Ok(lines.join("\n"))
    }

    fn render_var_decl(&mut self, decl: &VarDecl, scope: ScopeId) -> SemanticResult<String> {
        let declared_type = self.scopes.resolve_type(scope, &decl.type_ref)?;
        self.scopes.declare(scope,
                            Symbol::Variable(VariableSymbol { name: decl.var.name.clone(),
                                                              declared_type }),
                            decl.var.line)?;

        let level = self.scopes.scope(scope).level;
        Ok(format!("{INDENT}var {}{level} : {declared_type}0;", decl.var.name))
    }

    fn render_procedure(&mut self, decl: &ProcedureDecl, scope: ScopeId) -> SemanticResult<String> {
        let level = self.scopes.scope(scope).level;
        let (inner, params) = self.scopes.open_procedure(scope, decl)?;

        let mut text = format!("procedure {}{level}", decl.name);
        if !params.is_empty() {
            let inner_level = self.scopes.scope(inner).level;
            let params = params.iter()
                               .map(|param| render_param(param, inner_level))
                               .collect::<Vec<_>>()
                               .join("; ");
            text.push('(');
            text.push_str(&params);
            text.push(')');
        }
        text.push_str(";\n");
        text.push_str(&self.render_block(&decl.block, inner)?);
        text.push_str(&format!("; {{END OF {}}}", decl.name));
        self.scopes.pop(inner);

        Ok(indent(&text))
    }

    /// Renders the statements of a compound statement, one entry per line,
    /// without indentation.
    fn render_compound(&self, compound: &Compound, scope: ScopeId) -> SemanticResult<Vec<String>> {
        let mut lines = Vec::new();
        for statement in &compound.statements {
            match statement {
                Statement::Compound(inner) => {
                    lines.push("begin".to_string());
                    lines.extend(self.render_compound(inner, scope)?
                                     .into_iter()
                                     .map(|line| format!("{INDENT}{line}")));
                    lines.push("end;".to_string());
                },
                Statement::Assign { target, value, .. } => {
                    let target = self.render_var(target, scope)?;
                    let value = self.render_expr(value, scope)?;
                    lines.push(format!("{target} := {value};"));
                },
                Statement::NoOp => {},
            }
        }
        Ok(lines)
    }

    fn render_expr(&self, expr: &Expr, scope: ScopeId) -> SemanticResult<String> {
        Ok(match expr {
            Expr::Number { value, .. } => value.to_string(),
            Expr::Variable(var) => self.render_var(var, scope)?,
            Expr::UnaryOp { op, operand, .. } => {
                let operand_text = self.render_expr(operand, scope)?;
                if matches!(**operand, Expr::BinaryOp { .. }) {
                    format!("{op}({operand_text})")
                } else {
                    format!("{op}{operand_text}")
                }
            },
            Expr::BinaryOp { left, op, right, .. } => {
                let mut left_text = self.render_expr(left, scope)?;
                let mut right_text = self.render_expr(right, scope)?;
                if let Expr::BinaryOp { op: inner, .. } = **left
                   && inner.precedence() < op.precedence()
                {
                    left_text = format!("({left_text})");
                }
                if let Expr::BinaryOp { op: inner, .. } = **right
                   && inner.precedence() <= op.precedence()
                {
                    right_text = format!("({right_text})");
                }
                format!("{left_text} {op} {right_text}")
            },
        })
    }

    /// Renders a reference as `<name level:TYPE0>`.
    fn render_var(&self, var: &Var, scope: ScopeId) -> SemanticResult<String> {
        let resolved = self.scopes.resolve_var(scope, var)?;
        let type_name = match resolved.symbol {
            Symbol::Variable(variable) => format!("{}0", variable.declared_type),
            Symbol::Procedure(_) => "PROCEDURE".to_string(),
            Symbol::Builtin(builtin) => format!("{builtin}0"),
        };
        Ok(format!("<{}{}:{type_name}>", var.name, resolved.level))
    }
}

fn render_param(param: &VariableSymbol, level: usize) -> String {
    format!("{}{level} : {}0", param.name, param.declared_type)
}

/// Indents every non-empty line of `text` by one level.
fn indent(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{INDENT}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Runs a fresh [`SourceRegenerator`] over `program`.
///
/// # Errors
/// See [`SourceRegenerator::regenerate`].
pub fn regenerate(program: &Program) -> SemanticResult<String> {
    SourceRegenerator::new().regenerate(program)
}
