//! Reserved vocabulary: property keywords, built-in types, parameters and datatypes

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Keyword identifying a property kind in the textual syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Property {
    Type,
    Abstract,
    Sub,
    #[serde(rename = "sub!")]
    SubX,
    Has,
    Key,
    Plays,
    Relates,
    As,
    #[serde(rename = "datatype")]
    DataType,
    Regex,
    When,
    Then,
}

impl Property {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Abstract => "abstract",
            Self::Sub => "sub",
            Self::SubX => "sub!",
            Self::Has => "has",
            Self::Key => "key",
            Self::Plays => "plays",
            Self::Relates => "relates",
            Self::As => "as",
            Self::DataType => "datatype",
            Self::Regex => "regex",
            Self::When => "when",
            Self::Then => "then",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Built-in schema types every user-defined type descends from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeToken {
    Thing,
    Entity,
    Attribute,
    Relation,
    Role,
    Rule,
}

impl TypeToken {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Thing => "thing",
            Self::Entity => "entity",
            Self::Attribute => "attribute",
            Self::Relation => "relation",
            Self::Role => "role",
            Self::Rule => "rule",
        }
    }
}

impl fmt::Display for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of an optional argument attached to a property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Param {
    /// Value assumed for an owned attribute when an insert omits it
    Default,
    /// Free-form documentation string
    Description,
}

impl Param {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Description => "description",
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primitive datatypes an attribute type may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Long,
    Double,
    String,
    Boolean,
    Date,
}

impl DataType {
    /// All supported datatypes, in declaration order
    pub const ALL: [DataType; 5] = [
        DataType::Long,
        DataType::Double,
        DataType::String,
        DataType::Boolean,
        DataType::Date,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Long => "long",
            Self::Double => "double",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Date => "date",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = Error;

    /// Case-insensitive; anything outside the closed set is rejected
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|dt| dt.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownDataType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_keywords() {
        assert_eq!(Property::Sub.to_string(), "sub");
        assert_eq!(Property::SubX.to_string(), "sub!");
        assert_eq!(Property::DataType.to_string(), "datatype");
        assert_eq!(Property::Key.to_string(), "key");
    }

    #[test]
    fn test_datatype_from_str() {
        assert_eq!("long".parse::<DataType>().unwrap(), DataType::Long);
        assert_eq!("STRING".parse::<DataType>().unwrap(), DataType::String);
        assert_eq!("Date".parse::<DataType>().unwrap(), DataType::Date);
    }

    #[test]
    fn test_datatype_from_str_rejects_unknown() {
        assert_eq!(
            "int".parse::<DataType>(),
            Err(Error::UnknownDataType("int".to_string()))
        );
        assert!("".parse::<DataType>().is_err());
        assert!(" long".parse::<DataType>().is_err());
    }

    #[test]
    fn test_serde_names_match_keywords() {
        assert_eq!(serde_json::to_string(&Property::SubX).unwrap(), "\"sub!\"");
        assert_eq!(serde_json::to_string(&Property::DataType).unwrap(), "\"datatype\"");
        assert_eq!(serde_json::to_string(&TypeToken::Relation).unwrap(), "\"relation\"");
        let dt: DataType = serde_json::from_str("\"boolean\"").unwrap();
        assert_eq!(dt, DataType::Boolean);
    }
}
