//! Error types for the console core.
//!
//! Each stage of the line pipeline has its own error type:
//!
//! - [`RegistrationError`] - invalid command declarations, fatal at startup
//! - [`BindError`] - invalid parameter values, aborts a single invocation
//! - [`ConsoleError`] - configuration problems and re-raised handler failures
//!
//! Matching and autocompletion have no error type: a missing match is a
//! valid outcome and completion degrades to an empty suggestion list.

use thiserror::Error;

use crate::models::HandlerError;

/// A command declaration was rejected while building the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// Identifier is empty or contains whitespace.
    #[error("invalid command identifier {identifier:?}: must be a non-empty word")]
    InvalidIdentifier { identifier: String },

    /// Identifier collides with the help pseudo-command.
    #[error("command identifier '{identifier}' is reserved")]
    ReservedIdentifier { identifier: String },

    /// Another command already uses this identifier.
    #[error("command '{identifier}' is already registered")]
    DuplicateIdentifier { identifier: String },

    /// Parameter name is empty or contains whitespace.
    #[error("{command}: invalid parameter name {parameter:?}: must be a non-empty word")]
    InvalidParameterName { command: String, parameter: String },

    /// Two parameters of one command share a name.
    #[error("{command}: parameter '{parameter}' is declared twice")]
    DuplicateParameterName { command: String, parameter: String },

    /// A positional parameter follows a named one.
    #[error("{command}: required parameter '{parameter}' cannot follow optional parameters")]
    InvalidParameterOrdering { command: String, parameter: String },

    /// Default value has the wrong kind or violates the parameter's constraints.
    #[error("{command}: invalid default for parameter '{parameter}': {reason}")]
    InvalidDefault {
        command: String,
        parameter: String,
        reason: String,
    },

    /// Enumeration declared without any choice.
    #[error("{command}: enumeration parameter '{parameter}' has no choices")]
    EmptyChoices { command: String, parameter: String },
}

/// A parameter value on the line could not be bound.
///
/// Every variant names the offending parameter, see [`BindError::parameter`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("parameter '{parameter}' is required")]
    MissingRequiredParameter { parameter: String },

    #[error("parameter '{parameter}' expects a value after its flag")]
    MissingValue { parameter: String },

    #[error("parameter '{parameter}': '{value}' is not a valid {expected}")]
    BadFormat {
        parameter: String,
        value: String,
        expected: String,
    },

    #[error("parameter '{parameter}': {value} is out of range (min: {min}, max: {max})")]
    OutOfRange {
        parameter: String,
        value: String,
        min: String,
        max: String,
    },

    #[error("parameter '{parameter}': the text is too short (min: {min}, length: {length})")]
    TooShort {
        parameter: String,
        length: usize,
        min: usize,
    },

    #[error("parameter '{parameter}': the text is too long (max: {max}, length: {length})")]
    TooLong {
        parameter: String,
        length: usize,
        max: usize,
    },

    #[error("parameter '{parameter}': forbidden character '{character}'")]
    ForbiddenCharacter { parameter: String, character: char },

    #[error("parameter '{parameter}': expected {min} to {max} elements, got {size}")]
    ArraySizeViolation {
        parameter: String,
        size: usize,
        min: usize,
        max: usize,
    },

    #[error("parameter '{parameter}': '{value}' is not one of: {choices}")]
    InvalidChoice {
        parameter: String,
        value: String,
        choices: String,
    },

    #[error("parameter '{parameter}': no such file or directory: {path}")]
    NotFound { parameter: String, path: String },
}

impl BindError {
    /// Name of the parameter that failed to bind.
    pub fn parameter(&self) -> &str {
        match self {
            Self::MissingRequiredParameter { parameter }
            | Self::MissingValue { parameter }
            | Self::BadFormat { parameter, .. }
            | Self::OutOfRange { parameter, .. }
            | Self::TooShort { parameter, .. }
            | Self::TooLong { parameter, .. }
            | Self::ForbiddenCharacter { parameter, .. }
            | Self::ArraySizeViolation { parameter, .. }
            | Self::InvalidChoice { parameter, .. }
            | Self::NotFound { parameter, .. } => parameter,
        }
    }
}

/// Failure surfaced to the host by the console session.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Handler failure re-raised because error catching is disabled.
    #[error("{command}: {source}")]
    Handler {
        command: String,
        #[source]
        source: HandlerError,
    },
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_error_parameter() {
        let err = BindError::OutOfRange {
            parameter: "number".to_string(),
            value: "150".to_string(),
            min: "1".to_string(),
            max: "100".to_string(),
        };
        assert_eq!(err.parameter(), "number");
        assert_eq!(
            err.to_string(),
            "parameter 'number': 150 is out of range (min: 1, max: 100)"
        );
    }

    #[test]
    fn test_registration_error_display() {
        let err = RegistrationError::InvalidParameterOrdering {
            command: "geo".to_string(),
            parameter: "ip".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "geo: required parameter 'ip' cannot follow optional parameters"
        );
    }

    #[test]
    fn test_handler_error_keeps_source() {
        use std::error::Error;

        let err = ConsoleError::Handler {
            command: "calc".to_string(),
            source: "division by zero".into(),
        };
        assert_eq!(err.to_string(), "calc: division by zero");
        assert!(err.source().is_some());
    }
}
