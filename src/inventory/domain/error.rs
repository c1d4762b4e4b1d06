//! Error types for inventory argument validation and status parsing.

use thiserror::Error;

/// Errors returned while validating caller-supplied inventory arguments.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InventoryDomainError {
    /// A required identifier parameter was missing or blank.
    #[error("{parameter} is required and cannot be empty")]
    EmptyIdentifier {
        /// Name of the offending tool parameter.
        parameter: &'static str,
    },

    /// An identifier parameter contains characters that are not valid in a
    /// platform identifier.
    #[error("Invalid {parameter} '{value}': use only letters, digits, '_' and '-'")]
    InvalidIdentifier {
        /// Name of the offending tool parameter.
        parameter: &'static str,
        /// The rejected value as supplied by the caller.
        value: String,
    },

    /// A status filter value is not one of the accepted tokens.
    #[error("Invalid status '{value}'. Must be one of: {accepted}")]
    InvalidStatusFilter {
        /// The rejected value as supplied by the caller.
        value: String,
        /// Comma-separated list of accepted tokens.
        accepted: String,
    },
}

/// Error returned while parsing a connector health state token.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown connector health state: {0}")]
pub struct ParseHealthStateError(pub String);

/// Error returned while parsing an agent connectivity state token.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown agent connectivity state: {0}")]
pub struct ParseConnectivityStateError(pub String);
