use std::fmt;

/// The types the language knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinType {
    /// `INTEGER`
    Integer,
    /// `REAL`
    Real,
}

impl BuiltinType {
    /// Every builtin, in the order they are registered.
    pub const ALL: [Self; 2] = [Self::Integer, Self::Real];

    /// The upper-case name the type is registered under.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::Real => "REAL",
        }
    }
}

impl fmt::Display for BuiltinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A declared variable or formal parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableSymbol {
    /// Variable name.
    pub name:          String,
    /// Its declared type.
    pub declared_type: BuiltinType,
}

/// A declared procedure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcedureSymbol {
    /// Procedure name.
    pub name:   String,
    /// Formal parameters in declaration order.
    pub params: Vec<VariableSymbol>,
}

/// A named entity registered in a scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol {
    /// A builtin type; has no declared type of its own.
    Builtin(BuiltinType),
    /// A variable or parameter.
    Variable(VariableSymbol),
    /// A procedure.
    Procedure(ProcedureSymbol),
}

impl Symbol {
    /// The name the symbol is registered under.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Builtin(builtin) => builtin.name(),
            Self::Variable(variable) => &variable.name,
            Self::Procedure(procedure) => &procedure.name,
        }
    }

    /// The declared type, present only for variables.
    #[must_use]
    pub const fn declared_type(&self) -> Option<BuiltinType> {
        match self {
            Self::Variable(variable) => Some(variable.declared_type),
            Self::Builtin(_) | Self::Procedure(_) => None,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin(builtin) => write!(f, "{builtin}"),
            Self::Variable(variable) => write!(f, "<{}:{}>", variable.name, variable.declared_type),
            Self::Procedure(procedure) => {
                write!(f, "<{}(", procedure.name)?;
                for (i, param) in procedure.params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}:{}", param.name, param.declared_type)?;
                }
                f.write_str(")>")
            },
        }
    }
}
