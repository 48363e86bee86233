//! Rule bodies referenced by `when` and `then`

use crate::property::Nested;
use crate::statement::{Statement, StatementType};
use serde::Serialize;
use std::fmt;
use std::iter;

/// A (possibly nested) pattern of statements
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Pattern {
    Statement(Statement),
    Conjunction(Vec<Pattern>),
    Disjunction(Vec<Pattern>),
    Negation(Box<Pattern>),
}

impl Pattern {
    /// Every statement in this pattern, left to right
    pub fn statements(&self) -> Nested<'_, Statement> {
        match self {
            Self::Statement(s) => Box::new(iter::once(s)),
            Self::Conjunction(patterns) | Self::Disjunction(patterns) => {
                Box::new(patterns.iter().flat_map(Pattern::statements))
            }
            Self::Negation(inner) => inner.statements(),
        }
    }

    /// Text of this pattern as a block: `{ ...; }`
    fn block(&self) -> String {
        match self {
            Self::Conjunction(_) => self.to_string(),
            _ => format!("{{ {} }}", self),
        }
    }
}

/// Conjunctions render as a bare block; every other pattern renders as a
/// `;`-terminated clause, with disjunction branches and negated patterns
/// wrapped in blocks.
impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Statement(s) => write!(f, "{}", s),
            Self::Conjunction(patterns) => {
                f.write_str("{")?;
                for p in patterns {
                    match p {
                        Self::Conjunction(_) => write!(f, " {};", p)?,
                        _ => write!(f, " {}", p)?,
                    }
                }
                f.write_str(" }")
            }
            Self::Disjunction(patterns) => {
                let branches: Vec<String> = patterns.iter().map(Pattern::block).collect();
                write!(f, "{};", branches.join(" or "))
            }
            Self::Negation(inner) => write!(f, "not {};", inner.block()),
        }
    }
}

impl From<Statement> for Pattern {
    fn from(statement: Statement) -> Self {
        Self::Statement(statement)
    }
}

impl From<StatementType> for Pattern {
    fn from(statement: StatementType) -> Self {
        Self::Statement(statement.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::{TypeProperty, VarProperty};
    use crate::variable::Variable;

    fn isa(var: &str, label: &str) -> Statement {
        Statement::new(Variable::named(var)).with_property(VarProperty::from(TypeProperty::new(label)))
    }

    #[test]
    fn test_statements_flatten_nesting() {
        let pattern = Pattern::Conjunction(vec![
            isa("x", "person").into(),
            Pattern::Disjunction(vec![isa("y", "company").into(), isa("y", "charity").into()]),
            Pattern::Negation(Box::new(isa("z", "robot").into())),
        ]);

        let vars: Vec<_> = pattern.statements().map(|s| s.var().name().to_string()).collect();
        assert_eq!(vars, vec!["x", "y", "y", "z"]);
    }

    #[test]
    fn test_display() {
        let pattern = Pattern::Conjunction(vec![
            isa("x", "person").into(),
            Pattern::Negation(Box::new(isa("x", "robot").into())),
        ]);
        assert_eq!(pattern.to_string(), "{ $x type person; not { $x type robot; }; }");
    }

    #[test]
    fn test_display_disjunction_branches_are_blocks() {
        let pattern = Pattern::Disjunction(vec![
            isa("y", "company").into(),
            Pattern::Conjunction(vec![isa("y", "charity").into(), isa("z", "person").into()]),
        ]);
        assert_eq!(
            pattern.to_string(),
            "{ $y type company; } or { $y type charity; $z type person; };"
        );
    }

    #[test]
    fn test_display_nested_blocks() {
        let pattern = Pattern::Conjunction(vec![
            Pattern::Negation(Box::new(Pattern::Conjunction(vec![isa("x", "robot").into()]))),
            Pattern::Conjunction(vec![isa("x", "person").into()]),
        ]);
        assert_eq!(
            pattern.to_string(),
            "{ not { $x type robot; }; { $x type person; }; }"
        );
    }
}
