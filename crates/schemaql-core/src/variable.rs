//! Variables bound by statements

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// How a variable came to exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    /// Named by the query author (`$x`)
    UserDefined,
    /// Generated for a statement the author did not name
    Anonymous,
}

/// A statement variable
///
/// Anonymous variables carry a generated ULID name, so no two of them are
/// ever equal unless one is a clone of the other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variable {
    name: String,
    kind: VariableKind,
}

impl Variable {
    /// Create a user-defined variable; a leading `$` is dropped
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        let name = match name.strip_prefix('$') {
            Some(stripped) => stripped.to_string(),
            None => name,
        };
        Self {
            name,
            kind: VariableKind::UserDefined,
        }
    }

    /// Create a fresh anonymous variable
    pub fn anonymous() -> Self {
        Self {
            name: Ulid::new().to_string(),
            kind: VariableKind::Anonymous,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> VariableKind {
        self.kind
    }

    pub fn is_user_defined(&self) -> bool {
        self.kind == VariableKind::UserDefined
    }
}

impl Default for Variable {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            VariableKind::UserDefined => write!(f, "${}", self.name),
            VariableKind::Anonymous => f.write_str("$_"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_variable() {
        let x = Variable::named("x");
        assert_eq!(x.name(), "x");
        assert!(x.is_user_defined());
        assert_eq!(x.to_string(), "$x");
        assert_eq!(Variable::named("$x"), x);
    }

    #[test]
    fn test_anonymous_variables_are_distinct() {
        let a = Variable::anonymous();
        let b = Variable::anonymous();
        assert!(!a.is_user_defined());
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
        assert_eq!(a.to_string(), "$_");
    }
}
