//! Default error messages
//!
//! Templates may reference `{{validValue}}`, which is replaced with the bound
//! the field declares for that validator (`min="10"` renders "... equal to 10.").

use super::key::ValidatorKey;
use crate::core::error::MessageError;
use crate::core::field::Attributes;
use indexmap::IndexMap;
use tera::{Context, Tera};

/// Placeholder variable available to every template
pub const VALID_VALUE: &str = "validValue";

fn default_template(key: ValidatorKey) -> &'static str {
    match key {
        ValidatorKey::Required => "This field is required.",
        ValidatorKey::Email => "Please enter a valid email address.",
        ValidatorKey::Url => "Please enter a valid URL.",
        ValidatorKey::Number => "Please enter a valid number.",
        ValidatorKey::Digits => "Please enter only digits.",
        ValidatorKey::Min => "Please enter a value greater than or equal to {{validValue}}.",
        ValidatorKey::Max => "Please enter a value less than or equal to {{validValue}}.",
        ValidatorKey::Length => "Please enter all {{validValue}} characters.",
        ValidatorKey::MinLength => "Please enter at least {{validValue}} characters.",
        ValidatorKey::MaxLength => "Please enter no more than {{validValue}} characters.",
        ValidatorKey::Editable => "Please select a value from dropdown.",
        ValidatorKey::Pattern => "Please fix the pattern.",
        ValidatorKey::EqualTo => "Please enter the same value again.",
    }
}

/// Message template per validator key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCatalog {
    templates: IndexMap<ValidatorKey, String>,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self {
            templates: ValidatorKey::ALL
                .iter()
                .map(|key| (*key, default_template(*key).to_string()))
                .collect(),
        }
    }
}

impl MessageCatalog {
    /// Defaults with some templates replaced
    pub fn with_overrides(overrides: impl IntoIterator<Item = (ValidatorKey, String)>) -> Self {
        let mut catalog = Self::default();
        for (key, template) in overrides {
            catalog.templates.insert(key, template);
        }
        catalog
    }

    /// Raw template for `key`
    pub fn get(&self, key: ValidatorKey) -> Option<&str> {
        self.templates.get(&key).map(String::as_str)
    }

    /// Raw template for a markup name; `None` for unknown names
    pub fn get_by_name(&self, name: &str) -> Option<&str> {
        name.parse::<ValidatorKey>()
            .ok()
            .and_then(|key| self.get(key))
    }

    /// Render the template for `key` with the field's bound substituted
    pub fn render(&self, key: ValidatorKey, attributes: &Attributes) -> Result<String, MessageError> {
        let template = self.get(key).unwrap_or_default();
        if !template.contains("{{") && !template.contains("{%") {
            return Ok(template.to_string());
        }

        let mut context = Context::new();
        if let Some(bound) = key.bound_attribute().and_then(|name| attributes.get(name)) {
            context.insert(VALID_VALUE, bound);
        }

        Tera::one_off(template, &context, false)
            .map_err(|source| MessageError::Render { key, source })
    }
}
