//! Error types for SchemaQL Core

use crate::token::Param;
use thiserror::Error;

/// Result type alias using SchemaQL's Error
pub type Result<T> = std::result::Result<T, Error>;

/// SchemaQL error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An attribute-ownership property received two arguments of the same kind
    #[error("has/key property only accepts unique arguments, got `{0}` more than once")]
    DuplicateArgumentKind(Param),

    /// External input named a datatype outside the supported set
    #[error("Unknown datatype: {0}")]
    UnknownDataType(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::DuplicateArgumentKind(Param::Default);
        assert_eq!(
            err.to_string(),
            "has/key property only accepts unique arguments, got `default` more than once"
        );

        let err = Error::UnknownDataType("int".to_string());
        assert_eq!(err.to_string(), "Unknown datatype: int");
    }
}
