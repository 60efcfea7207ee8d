//! Closed set of validator identities
//!
//! Markup and configuration name validators by string; those names are parsed
//! into a [`ValidatorKey`] once, at the boundary, and every lookup after that is
//! by enum.

use crate::core::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identity of a built-in validator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ValidatorKey {
    #[serde(rename = "required")]
    Required,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "url")]
    Url,
    #[serde(rename = "number")]
    Number,
    #[serde(rename = "digits")]
    Digits,
    #[serde(rename = "min")]
    Min,
    #[serde(rename = "max")]
    Max,
    #[serde(rename = "length")]
    Length,
    #[serde(rename = "minlength")]
    MinLength,
    #[serde(rename = "maxlength")]
    MaxLength,
    #[serde(rename = "editable")]
    Editable,
    #[serde(rename = "pattern")]
    Pattern,
    #[serde(rename = "equalTo")]
    EqualTo,
}

impl ValidatorKey {
    /// Every key, in message-table order
    pub const ALL: [ValidatorKey; 13] = [
        ValidatorKey::Required,
        ValidatorKey::Email,
        ValidatorKey::Url,
        ValidatorKey::Number,
        ValidatorKey::Digits,
        ValidatorKey::Min,
        ValidatorKey::Max,
        ValidatorKey::Length,
        ValidatorKey::MinLength,
        ValidatorKey::MaxLength,
        ValidatorKey::Editable,
        ValidatorKey::Pattern,
        ValidatorKey::EqualTo,
    ];

    /// The name used in markup and configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidatorKey::Required => "required",
            ValidatorKey::Email => "email",
            ValidatorKey::Url => "url",
            ValidatorKey::Number => "number",
            ValidatorKey::Digits => "digits",
            ValidatorKey::Min => "min",
            ValidatorKey::Max => "max",
            ValidatorKey::Length => "length",
            ValidatorKey::MinLength => "minlength",
            ValidatorKey::MaxLength => "maxlength",
            ValidatorKey::Editable => "editable",
            ValidatorKey::Pattern => "pattern",
            ValidatorKey::EqualTo => "equalTo",
        }
    }

    /// Attribute carrying this validator's bound or reference, if it needs one
    ///
    /// The attribute is named after the validator itself (`min="10"`,
    /// `equalTo="form.password"`).
    pub fn bound_attribute(&self) -> Option<&'static str> {
        match self {
            ValidatorKey::Min
            | ValidatorKey::Max
            | ValidatorKey::Length
            | ValidatorKey::MinLength
            | ValidatorKey::MaxLength
            | ValidatorKey::Pattern
            | ValidatorKey::EqualTo => Some(self.as_str()),
            _ => None,
        }
    }

    /// Whether the "empty value is valid" rule applies before the predicate runs
    pub fn skips_empty(&self) -> bool {
        !matches!(self, ValidatorKey::Required)
    }
}

impl fmt::Display for ValidatorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidatorKey {
    type Err = ValidationError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        ValidatorKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == name)
            .ok_or_else(|| ValidationError::UnknownValidator {
                name: name.to_string(),
            })
    }
}
