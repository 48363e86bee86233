//! Typed optional arguments and literal values

use crate::token::Param;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A literal value carried by an argument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Value {
    Long(i64),
    Double(f64),
    String(String),
    Boolean(bool),
    Date(NaiveDateTime),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Long(v) => write!(f, "{}", v),
            // Debug keeps the fractional part, so 1.0 never reads as a long
            Self::Double(v) => write!(f, "{:?}", v),
            Self::String(v) => write!(f, "\"{}\"", v.replace('\\', "\\\\").replace('"', "\\\"")),
            Self::Boolean(v) => write!(f, "{}", v),
            Self::Date(v) => write!(f, "{}", v.format("%Y-%m-%dT%H:%M:%S%.3f")),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Long(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Long(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Self::Date(v)
    }
}

/// A parameter kind paired with its value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    /// Parameter kind
    pub param: Param,

    /// Supplied value
    pub value: Value,
}

impl Argument {
    pub fn new(param: Param, value: impl Into<Value>) -> Self {
        Self {
            param,
            value: value.into(),
        }
    }

    /// Create a `default` argument
    pub fn default_value(value: impl Into<Value>) -> Self {
        Self::new(Param::Default, value)
    }

    /// Create a `description` argument
    pub fn description(text: impl Into<String>) -> Self {
        Self::new(Param::Description, text.into())
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.param, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_argument_creation() {
        let arg = Argument::default_value(10);
        assert_eq!(arg.param, Param::Default);
        assert_eq!(arg.value, Value::Long(10));

        let arg = Argument::description("primary name");
        assert_eq!(arg.param, Param::Description);
        assert_eq!(arg.value, Value::String("primary name".to_string()));
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::from(42).to_string(), "42");
        assert_eq!(Value::from("say \"hi\"").to_string(), "\"say \\\"hi\\\"\"");
        assert_eq!(Value::from(false).to_string(), "false");

        let date = NaiveDate::from_ymd_opt(2019, 3, 1)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        assert_eq!(Value::from(date).to_string(), "2019-03-01T12:30:00.000");
    }

    #[test]
    fn test_double_display_keeps_fraction() {
        assert_eq!(Value::Double(1.0).to_string(), "1.0");
        assert_eq!(Value::Double(2.5).to_string(), "2.5");
        assert_ne!(Value::Double(1.0).to_string(), Value::Long(1).to_string());
        assert_eq!(Argument::default_value(2.0).to_string(), "default: 2.0");
    }

    #[test]
    fn test_argument_display() {
        assert_eq!(Argument::default_value("n/a").to_string(), "default: \"n/a\"");
    }
}
