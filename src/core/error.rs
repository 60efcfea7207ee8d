//! Typed error handling for bs-validation
//!
//! # Error Categories
//!
//! - [`ValidationError`]: dispatch failures (unknown key, malformed bound, bad pattern)
//! - [`ConfigError`]: configuration parsing and startup checks
//! - [`MessageError`]: message template rendering
//!
//! A predicate reporting `false` is never an error: it is written to the
//! validity sink. These types only describe calls that could not produce a
//! result at all.

use crate::core::validation::ValidatorKey;
use thiserror::Error;

/// The main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    /// Dispatch errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Message rendering errors
    #[error(transparent)]
    Message(#[from] MessageError),
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Validation(e) => e.error_code(),
            Error::Config(_) => "CONFIG_ERROR",
            Error::Message(_) => "MESSAGE_ERROR",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors raised while dispatching a validator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The name does not match any registered validator
    #[error("Unknown validator: '{name}'")]
    UnknownValidator { name: String },

    /// The validator only carries a message; the host enforces it
    #[error("Validator '{key}' has no predicate and cannot be dispatched")]
    NotDispatchable { key: ValidatorKey },

    /// A bound or reference the predicate needs is absent from the field attributes
    #[error("Validator '{key}' requires the '{attribute}' attribute")]
    MissingAttribute {
        key: ValidatorKey,
        attribute: &'static str,
    },

    /// A bound attribute is present but not numeric
    #[error("Invalid bound '{value}' for validator '{key}': expected a {expected}")]
    InvalidBound {
        key: ValidatorKey,
        value: String,
        expected: &'static str,
    },

    /// The field is not wired into the form
    #[error("Unknown field: '{name}'")]
    UnknownField { name: String },

    /// The pattern attribute is not a valid regular expression
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl ValidationError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::UnknownValidator { .. } => "UNKNOWN_VALIDATOR",
            ValidationError::NotDispatchable { .. } => "NOT_DISPATCHABLE",
            ValidationError::MissingAttribute { .. } => "MISSING_ATTRIBUTE",
            ValidationError::InvalidBound { .. } => "INVALID_BOUND",
            ValidationError::UnknownField { .. } => "UNKNOWN_FIELD",
            ValidationError::InvalidPattern { .. } => "INVALID_PATTERN",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration loading and startup checks
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("Failed to parse config{}: {message}", file_suffix(.file))]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// A message override names a validator that does not exist
    #[error("Unknown validator '{name}' in {context}")]
    UnknownValidator { name: String, context: String },

    /// A message override is blank
    #[error("Message for validator '{key}' must not be empty")]
    EmptyMessage { key: ValidatorKey },

    /// Structural checks on the configuration failed
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

fn file_suffix(file: &Option<String>) -> String {
    match file {
        Some(file) => format!(" file '{}'", file),
        None => String::new(),
    }
}

// =============================================================================
// Message Errors
// =============================================================================

/// Errors raised while rendering a message template
#[derive(Debug, Error)]
pub enum MessageError {
    /// Template could not be rendered
    #[error("Failed to render message for '{key}': {source}")]
    Render {
        key: ValidatorKey,
        #[source]
        source: tera::Error,
    },
}
