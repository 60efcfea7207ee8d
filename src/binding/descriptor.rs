//! Declarative description of form fields

use crate::core::field::Attributes;
use crate::core::validation::ValidatorKey;
use serde::{Deserialize, Serialize};

/// Kind of form element a field is rendered as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Input,
    Select,
    Textarea,
    Other,
}

impl ElementKind {
    /// Classify an element by tag name (case-insensitive)
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "input" => ElementKind::Input,
            "select" => ElementKind::Select,
            "textarea" => ElementKind::Textarea,
            _ => ElementKind::Other,
        }
    }
}

/// A field as declared in markup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name, unique within a form
    pub name: String,

    pub element: ElementKind,

    /// Model binding path (e.g. "user.email")
    #[serde(default)]
    pub model: Option<String>,

    #[serde(default)]
    pub attributes: Attributes,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, element: ElementKind) -> Self {
        Self {
            name: name.into(),
            element,
            model: None,
            attributes: Attributes::new(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name, value);
        self
    }

    /// Path the field's value is stored under in the form model
    pub fn model_path(&self) -> &str {
        self.model.as_deref().unwrap_or(&self.name)
    }

    /// Validators this field declares, in attribute order
    ///
    /// An attribute named after a validator enables it (`min="3"`,
    /// `digits`), and `type="email" | "url" | "number"` enables the matching
    /// format check. Message-only validators are never returned.
    pub fn validator_keys(&self) -> Vec<ValidatorKey> {
        let mut keys = Vec::new();

        for (name, value) in self.attributes.iter() {
            let key = match name {
                "type" => type_validator(value),
                _ => name.parse::<ValidatorKey>().ok(),
            };

            if let Some(key) = key.filter(|k| *k != ValidatorKey::Editable && !keys.contains(k)) {
                keys.push(key);
            }
        }

        keys
    }
}

fn type_validator(input_type: &str) -> Option<ValidatorKey> {
    match input_type {
        "email" => Some(ValidatorKey::Email),
        "url" => Some(ValidatorKey::Url),
        "number" => Some(ValidatorKey::Number),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_from_tag() {
        assert_eq!(ElementKind::from_tag("INPUT"), ElementKind::Input);
        assert_eq!(ElementKind::from_tag("textarea"), ElementKind::Textarea);
        assert_eq!(ElementKind::from_tag("div"), ElementKind::Other);
    }

    #[test]
    fn test_validator_keys_follow_attribute_order() {
        let field = FieldDescriptor::new("age", ElementKind::Input)
            .with_attribute("max", "120")
            .with_attribute("class", "form-control")
            .with_attribute("digits", "")
            .with_attribute("min", "18");

        assert_eq!(
            field.validator_keys(),
            vec![ValidatorKey::Max, ValidatorKey::Digits, ValidatorKey::Min]
        );
    }

    #[test]
    fn test_type_attribute_enables_format_check() {
        let field = FieldDescriptor::new("contact", ElementKind::Input)
            .with_attribute("type", "email")
            .with_attribute("required", "");

        assert_eq!(
            field.validator_keys(),
            vec![ValidatorKey::Email, ValidatorKey::Required]
        );

        let text = FieldDescriptor::new("name", ElementKind::Input).with_attribute("type", "text");
        assert!(text.validator_keys().is_empty());
    }

    #[test]
    fn test_duplicate_and_message_only_keys_skipped() {
        let field = FieldDescriptor::new("qty", ElementKind::Input)
            .with_attribute("type", "number")
            .with_attribute("number", "")
            .with_attribute("editable", "false");

        assert_eq!(field.validator_keys(), vec![ValidatorKey::Number]);
    }

    #[test]
    fn test_model_path_defaults_to_name() {
        let field = FieldDescriptor::new("email", ElementKind::Input);
        assert_eq!(field.model_path(), "email");

        let bound = field.with_model("user.email");
        assert_eq!(bound.model_path(), "user.email");
    }

    #[test]
    fn test_descriptor_from_json() {
        let field: FieldDescriptor = serde_json::from_str(
            r#"{"name": "zip", "element": "input", "model": "address.zip",
                "attributes": {"length": "5", "digits": ""}}"#,
        )
        .unwrap();

        assert_eq!(field.element, ElementKind::Input);
        assert_eq!(
            field.validator_keys(),
            vec![ValidatorKey::Length, ValidatorKey::Digits]
        );
    }
}
