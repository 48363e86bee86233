//! Properties that constrain a statement's variable
//!
//! Every property kind is a variant of [`VarProperty`]; consumers dispatch
//! on it exhaustively. Nested statements are exposed through [`VarProperty::types`]
//! and [`VarProperty::statements`] for printers and compilers that need to
//! flatten the tree.

use crate::argument::{Argument, Value};
use crate::error::{Error, Result};
use crate::pattern::Pattern;
use crate::statement::{Statement, StatementType};
use crate::token::{self, DataType, Param, TypeToken};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter;

/// Lazy view over statements nested in a property
pub type Nested<'a, T> = Box<dyn Iterator<Item = &'a T> + 'a>;

/// `type <label>`: the variable is the type with this label
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeProperty {
    label: String,
}

impl TypeProperty {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl From<&str> for TypeProperty {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for TypeProperty {
    fn from(label: String) -> Self {
        Self::new(label)
    }
}

impl From<TypeToken> for TypeProperty {
    fn from(token: TypeToken) -> Self {
        Self::new(token.as_str())
    }
}

/// `sub` / `sub!`: the variable is a subtype of another type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SubProperty {
    super_type: StatementType,
    explicit: bool,
}

impl SubProperty {
    /// Transitive form: any ancestor matches
    pub fn new(super_type: StatementType) -> Self {
        Self {
            super_type,
            explicit: false,
        }
    }

    /// Direct-parent-only form (`sub!`)
    pub fn explicit(super_type: StatementType) -> Self {
        Self {
            super_type,
            explicit: true,
        }
    }

    pub fn super_type(&self) -> &StatementType {
        &self.super_type
    }

    /// True when matching must stop at the direct parent
    pub fn is_explicit(&self) -> bool {
        self.explicit
    }
}

/// `has` / `key`: the type owns an attribute type
///
/// The property stands for an implicit structure between the owner and the
/// attribute type: one implicit relation type and two implicit roles whose
/// labels are derived from the attribute type's label. A compiler always
/// materializes that structure for `key`, and for `has` when inserting. A
/// `has` used in a match is looser and accepts any relation type connecting
/// the two types. None of that happens here; only the flag is carried.
///
/// Identity covers the attribute type and the key flag. The default value
/// is auxiliary and excluded from equality and hashing.
#[derive(Debug, Clone, Serialize)]
pub struct HasAttributeTypeProperty {
    attribute_type: StatementType,
    is_key: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_value: Option<Value>,
}

impl HasAttributeTypeProperty {
    /// A plain `has` with no arguments
    pub fn new(attribute_type: StatementType) -> Self {
        Self {
            attribute_type,
            is_key: false,
            default_value: None,
        }
    }

    /// A `key` with no arguments
    pub fn key(attribute_type: StatementType) -> Self {
        Self {
            attribute_type,
            is_key: true,
            default_value: None,
        }
    }

    /// Build from an argument list
    ///
    /// Fails with [`Error::DuplicateArgumentKind`] if two arguments share a
    /// parameter kind. The default value is taken from the `default`
    /// argument, and stays unset when none is given.
    pub fn with_arguments(
        attribute_type: StatementType,
        is_key: bool,
        args: impl IntoIterator<Item = Argument>,
    ) -> Result<Self> {
        let (_, default_value) = args.into_iter().try_fold(
            (BTreeSet::new(), None),
            |(mut seen, default_value), arg| {
                if !seen.insert(arg.param) {
                    tracing::debug!(
                        "Rejecting {} {}: argument `{}` given twice",
                        if is_key { token::Property::Key } else { token::Property::Has },
                        attribute_type.printable_name(),
                        arg.param
                    );
                    return Err(Error::DuplicateArgumentKind(arg.param));
                }
                let default_value = match arg.param {
                    Param::Default => Some(arg.value),
                    _ => default_value,
                };
                Ok((seen, default_value))
            },
        )?;

        Ok(Self {
            attribute_type,
            is_key,
            default_value,
        })
    }

    pub fn attribute_type(&self) -> &StatementType {
        &self.attribute_type
    }

    pub fn is_key(&self) -> bool {
        self.is_key
    }

    /// `None` means no default was supplied
    pub fn default_value(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }
}

impl PartialEq for HasAttributeTypeProperty {
    fn eq(&self, other: &Self) -> bool {
        self.attribute_type == other.attribute_type && self.is_key == other.is_key
    }
}

impl Eq for HasAttributeTypeProperty {}

impl Hash for HasAttributeTypeProperty {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.attribute_type.hash(state);
        self.is_key.hash(state);
    }
}

/// `plays`: instances of the type may play a role
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PlaysProperty {
    role: StatementType,
    required: bool,
}

impl PlaysProperty {
    pub fn new(role: StatementType, required: bool) -> Self {
        Self { role, required }
    }

    pub fn role(&self) -> &StatementType {
        &self.role
    }

    pub fn is_required(&self) -> bool {
        self.required
    }
}

/// `relates`: a relation type declares a role, optionally `as` a super-role
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RelatesProperty {
    role: StatementType,
    #[serde(skip_serializing_if = "Option::is_none")]
    super_role: Option<StatementType>,
}

impl RelatesProperty {
    pub fn new(role: StatementType, super_role: Option<StatementType>) -> Self {
        Self { role, super_role }
    }

    pub fn role(&self) -> &StatementType {
        &self.role
    }

    /// `None` declares a fresh role
    pub fn super_role(&self) -> Option<&StatementType> {
        self.super_role.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DataTypeProperty {
    data_type: DataType,
}

impl DataTypeProperty {
    pub fn new(data_type: DataType) -> Self {
        Self { data_type }
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }
}

/// `regex`: values of the attribute type must match this pattern
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RegexProperty {
    regex: String,
}

impl RegexProperty {
    pub fn new(regex: impl Into<String>) -> Self {
        Self {
            regex: regex.into(),
        }
    }

    pub fn regex(&self) -> &str {
        &self.regex
    }
}

/// `when`: premise of a rule
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct WhenProperty {
    pattern: Pattern,
}

impl WhenProperty {
    pub fn new(pattern: Pattern) -> Self {
        Self { pattern }
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }
}

/// `then`: conclusion of a rule
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ThenProperty {
    pattern: Pattern,
}

impl ThenProperty {
    pub fn new(pattern: Pattern) -> Self {
        Self { pattern }
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }
}

/// A single constraint on a statement's variable
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "property", rename_all = "snake_case")]
pub enum VarProperty {
    Type(TypeProperty),
    Abstract,
    Sub(SubProperty),
    HasAttributeType(HasAttributeTypeProperty),
    Plays(PlaysProperty),
    Relates(RelatesProperty),
    DataType(DataTypeProperty),
    Regex(RegexProperty),
    When(WhenProperty),
    Then(ThenProperty),
}

impl VarProperty {
    /// Keyword this property is rendered with
    pub fn keyword(&self) -> token::Property {
        match self {
            Self::Type(_) => token::Property::Type,
            Self::Abstract => token::Property::Abstract,
            Self::Sub(p) if p.explicit => token::Property::SubX,
            Self::Sub(_) => token::Property::Sub,
            Self::HasAttributeType(p) if p.is_key => token::Property::Key,
            Self::HasAttributeType(_) => token::Property::Has,
            Self::Plays(_) => token::Property::Plays,
            Self::Relates(_) => token::Property::Relates,
            Self::DataType(_) => token::Property::DataType,
            Self::Regex(_) => token::Property::Regex,
            Self::When(_) => token::Property::When,
            Self::Then(_) => token::Property::Then,
        }
    }

    /// Printable form of the property's argument; empty for `abstract`
    pub fn property(&self) -> String {
        match self {
            Self::Type(p) => p.label.clone(),
            Self::Abstract => String::new(),
            Self::Sub(p) => p.super_type.printable_name(),
            Self::HasAttributeType(p) => p.attribute_type.printable_name(),
            Self::Plays(p) => p.role.printable_name(),
            Self::Relates(p) => match &p.super_role {
                Some(super_role) => format!(
                    "{} {} {}",
                    p.role.printable_name(),
                    token::Property::As,
                    super_role.printable_name()
                ),
                None => p.role.printable_name(),
            },
            Self::DataType(p) => p.data_type.to_string(),
            Self::Regex(p) => format!("\"{}\"", p.regex.replace('/', "\\/")),
            Self::When(p) => p.pattern.to_string(),
            Self::Then(p) => p.pattern.to_string(),
        }
    }

    /// Whether a statement may hold at most one property of this kind
    pub fn is_unique(&self) -> bool {
        match self {
            Self::Type(_)
            | Self::Abstract
            | Self::Sub(_)
            | Self::DataType(_)
            | Self::Regex(_)
            | Self::When(_)
            | Self::Then(_) => true,
            Self::HasAttributeType(_) | Self::Plays(_) | Self::Relates(_) => false,
        }
    }

    /// Type statements this property refers to directly
    pub fn types(&self) -> Nested<'_, StatementType> {
        match self {
            Self::Sub(p) => Box::new(iter::once(&p.super_type)),
            Self::HasAttributeType(p) => Box::new(iter::once(&p.attribute_type)),
            Self::Plays(p) => Box::new(iter::once(&p.role)),
            Self::Relates(p) => Box::new(iter::once(&p.role).chain(p.super_role.as_ref())),
            Self::Type(_)
            | Self::Abstract
            | Self::DataType(_)
            | Self::Regex(_)
            | Self::When(_)
            | Self::Then(_) => Box::new(iter::empty()),
        }
    }

    /// Every statement this property refers to directly, including the
    /// statements inside rule patterns
    pub fn statements(&self) -> Nested<'_, Statement> {
        match self {
            Self::When(p) => p.pattern.statements(),
            Self::Then(p) => p.pattern.statements(),
            _ => Box::new(self.types().map(StatementType::as_statement)),
        }
    }
}

impl fmt::Display for VarProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let property = self.property();
        if property.is_empty() {
            write!(f, "{}", self.keyword())
        } else {
            write!(f, "{} {}", self.keyword(), property)
        }
    }
}

impl From<TypeProperty> for VarProperty {
    fn from(p: TypeProperty) -> Self {
        Self::Type(p)
    }
}

impl From<SubProperty> for VarProperty {
    fn from(p: SubProperty) -> Self {
        Self::Sub(p)
    }
}

impl From<HasAttributeTypeProperty> for VarProperty {
    fn from(p: HasAttributeTypeProperty) -> Self {
        Self::HasAttributeType(p)
    }
}

impl From<PlaysProperty> for VarProperty {
    fn from(p: PlaysProperty) -> Self {
        Self::Plays(p)
    }
}

impl From<RelatesProperty> for VarProperty {
    fn from(p: RelatesProperty) -> Self {
        Self::Relates(p)
    }
}

impl From<DataTypeProperty> for VarProperty {
    fn from(p: DataTypeProperty) -> Self {
        Self::DataType(p)
    }
}

impl From<RegexProperty> for VarProperty {
    fn from(p: RegexProperty) -> Self {
        Self::Regex(p)
    }
}

impl From<WhenProperty> for VarProperty {
    fn from(p: WhenProperty) -> Self {
        Self::When(p)
    }
}

impl From<ThenProperty> for VarProperty {
    fn from(p: ThenProperty) -> Self {
        Self::Then(p)
    }
}
