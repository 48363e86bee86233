//! SchemaQL Core - Statement model for schema definitions and rules
//!
//! This crate provides the immutable syntax tree for type-level statements:
//! a variable decorated with properties such as `sub`, `has`, `key`,
//! `plays`, `relates`, `datatype`, `regex`, `when` and `then`. Statements
//! are built fluently through [`StatementTypeBuilder`] and never change once
//! returned.
//!
//! ```
//! use schemaql_core::{type_, var, StatementTypeBuilder, TypeToken};
//!
//! let person = var("p").type_("person").sub(TypeToken::Entity).key("id").has("name");
//! assert_eq!(person.properties().len(), 4);
//! assert_eq!(type_("person").printable_name(), "person");
//! ```

pub mod argument;
pub mod builder;
pub mod error;
pub mod pattern;
pub mod property;
pub mod statement;
pub mod token;
pub mod variable;

pub use argument::{Argument, Value};
pub use builder::StatementTypeBuilder;
pub use error::{Error, Result};
pub use pattern::Pattern;
pub use property::{
    DataTypeProperty, HasAttributeTypeProperty, PlaysProperty, RegexProperty, RelatesProperty,
    SubProperty, ThenProperty, TypeProperty, VarProperty, WhenProperty,
};
pub use statement::{Properties, Statement, StatementType};
pub use token::{DataType, Param, TypeToken};
pub use variable::{Variable, VariableKind};

/// A user-named variable (`$name`)
pub fn var(name: impl Into<String>) -> Variable {
    Variable::named(name)
}

/// A fresh anonymous variable
pub fn var_anonymous() -> Variable {
    Variable::anonymous()
}

/// An anonymous type statement matching `label`
pub fn type_(label: impl Into<TypeProperty>) -> StatementType {
    StatementType::labelled(label)
}

/// Conjunction of patterns
pub fn and(patterns: impl IntoIterator<Item = Pattern>) -> Pattern {
    Pattern::Conjunction(patterns.into_iter().collect())
}

/// Disjunction of patterns
pub fn or(patterns: impl IntoIterator<Item = Pattern>) -> Pattern {
    Pattern::Disjunction(patterns.into_iter().collect())
}

/// Negation of a pattern
pub fn not(pattern: impl Into<Pattern>) -> Pattern {
    Pattern::Negation(Box::new(pattern.into()))
}
