//! Filter error types

use thiserror::Error;

use super::types::ValueType;

/// Client-input error raised while compiling query parameters
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid value '{value}' for parameter '{parameter}': expected {expected}")]
    InvalidParameter {
        parameter: String,
        value: String,
        expected: &'static str,
    },
}

impl FilterError {
    pub fn invalid_parameter(
        parameter: impl Into<String>,
        value: impl Into<String>,
        expected: ValueType,
    ) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.into(),
            expected: expected.expectation(),
        }
    }

    /// Name of the offending query parameter
    pub fn parameter(&self) -> &str {
        match self {
            Self::InvalidParameter { parameter, .. } => parameter,
        }
    }
}
