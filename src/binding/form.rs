//! Forms: discovered fields wired to a shared registry
//!
//! The form model is a JSON object holding every field value under its model
//! path. It doubles as the scope `equalTo` references are resolved against.

use super::control::FieldControl;
use super::descriptor::FieldDescriptor;
use crate::config::ValidationConfig;
use crate::core::error::{MessageError, ValidationError};
use crate::core::pending::PendingResources;
use crate::core::validation::ValidatorRegistry;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Select the descriptors that receive automatic validation
///
/// A field qualifies when its element kind is configured for wiring and, if
/// the configuration requires it, it carries a model binding.
pub fn discover<'a>(
    descriptors: &'a [FieldDescriptor],
    config: &ValidationConfig,
) -> Vec<&'a FieldDescriptor> {
    descriptors
        .iter()
        .filter(|d| config.wires(d.element))
        .filter(|d| !config.require_model || d.model.is_some())
        .collect()
}

/// A set of wired field controls and their shared model
#[derive(Debug)]
pub struct Form {
    registry: Arc<ValidatorRegistry>,
    config: ValidationConfig,
    controls: IndexMap<String, FieldControl>,
    model: Value,
}

impl Form {
    /// Empty form using `registry` for every field
    pub fn new(registry: Arc<ValidatorRegistry>, config: ValidationConfig) -> Self {
        Self {
            registry,
            config,
            controls: IndexMap::new(),
            model: Value::Object(Map::new()),
        }
    }

    /// Build a form from descriptors, wiring every discovered field
    pub fn wire(
        registry: Arc<ValidatorRegistry>,
        config: ValidationConfig,
        descriptors: &[FieldDescriptor],
    ) -> Result<Self, ValidationError> {
        let mut form = Self::new(registry, config);
        form.add_fields(descriptors)?;
        Ok(form)
    }

    /// Wire additional fields; returns how many were added
    ///
    /// Fields that are not discovered, or whose name is already wired, are
    /// skipped.
    pub fn add_fields(&mut self, descriptors: &[FieldDescriptor]) -> Result<usize, ValidationError> {
        let mut added = 0;

        for descriptor in discover(descriptors, &self.config) {
            if self.controls.contains_key(&descriptor.name) {
                tracing::debug!(field = %descriptor.name, "Field already wired, skipping");
                continue;
            }

            let mut control = FieldControl::new(descriptor);
            for key in descriptor.validator_keys() {
                control.add_validator(Arc::clone(&self.registry), key)?;
            }

            tracing::debug!(
                field = %descriptor.name,
                validators = control.validators().count(),
                "Field wired"
            );
            self.controls.insert(descriptor.name.clone(), control);
            added += 1;
        }

        Ok(added)
    }

    /// Wire the fields of an included template if its load is still pending
    ///
    /// Each pending URL is consumed once; later calls for the same URL return
    /// `Ok(false)` without wiring anything.
    pub fn wire_included(
        &mut self,
        url: &str,
        pending: &mut PendingResources,
        descriptors: &[FieldDescriptor],
    ) -> Result<bool, ValidationError> {
        if !pending.consume_if_pending(url) {
            return Ok(false);
        }
        let added = self.add_fields(descriptors)?;
        tracing::debug!(url, added, "Included template wired");
        Ok(true)
    }

    /// Set a field's value, store it in the model and run its validators
    pub fn set_value(&mut self, field: &str, value: &str) -> Result<(), ValidationError> {
        let path = self
            .controls
            .get(field)
            .map(|control| control.model_path().to_string())
            .ok_or_else(|| ValidationError::UnknownField {
                name: field.to_string(),
            })?;

        set_path(&mut self.model, &path, Value::String(value.to_string()));

        match self.controls.get_mut(field) {
            Some(control) => control.set_value(value, &self.model),
            None => Ok(()),
        }
    }

    pub fn control(&self, field: &str) -> Option<&FieldControl> {
        self.controls.get(field)
    }

    /// Controls in wiring order
    pub fn controls(&self) -> impl Iterator<Item = &FieldControl> {
        self.controls.values()
    }

    pub fn model(&self) -> &Value {
        &self.model
    }

    pub fn registry(&self) -> &ValidatorRegistry {
        &self.registry
    }

    pub fn is_valid(&self) -> bool {
        self.controls.values().all(FieldControl::is_valid)
    }

    /// Rendered messages for every invalid field, keyed by field name
    pub fn errors(&self) -> Result<IndexMap<String, Vec<String>>, MessageError> {
        let mut errors = IndexMap::new();
        for control in self.controls.values().filter(|c| !c.is_valid()) {
            errors.insert(control.name().to_string(), control.errors(&self.registry)?);
        }
        Ok(errors)
    }

    /// Set every value in `values` (field name → value) in order
    pub fn fill<'v>(
        &mut self,
        values: impl IntoIterator<Item = (&'v str, &'v str)>,
    ) -> Result<(), ValidationError> {
        for (field, value) in values {
            self.set_value(field, value)?;
        }
        Ok(())
    }
}

/// Write `value` at a dotted path, creating objects along the way
fn set_path(root: &mut Value, path: &str, value: Value) {
    let mut current = root;
    let mut segments = path.split('.').peekable();

    while let Some(segment) = segments.next() {
        if !current.is_object() {
            *current = Value::Object(Map::new());
        }
        let Value::Object(map) = current else {
            return;
        };

        if segments.peek().is_none() {
            map.insert(segment.to_string(), value);
            return;
        }
        current = map
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::ElementKind;
    use crate::core::validation::ValidatorKey;
    use serde_json::json;

    fn signup_fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("email", ElementKind::Input)
                .with_model("user.email")
                .with_attribute("type", "email")
                .with_attribute("required", ""),
            FieldDescriptor::new("password", ElementKind::Input)
                .with_model("user.password")
                .with_attribute("minlength", "8"),
            FieldDescriptor::new("confirm", ElementKind::Input)
                .with_model("confirm")
                .with_attribute("equalTo", "user.password"),
            FieldDescriptor::new("submit", ElementKind::Other).with_model("submit"),
            FieldDescriptor::new("notes", ElementKind::Textarea),
        ]
    }

    fn form() -> Form {
        Form::wire(
            Arc::new(ValidatorRegistry::default()),
            ValidationConfig::default_config(),
            &signup_fields(),
        )
        .unwrap()
    }

    #[test]
    fn test_discover_filters_kind_and_model() {
        let fields = signup_fields();
        let config = ValidationConfig::default_config();
        let names: Vec<&str> = discover(&fields, &config)
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, vec!["email", "password", "confirm"]);

        let mut relaxed = ValidationConfig::default_config();
        relaxed.require_model = false;
        assert_eq!(discover(&fields, &relaxed).len(), 4);
    }

    #[test]
    fn test_wire_installs_declared_validators() {
        let form = form();
        let email = form.control("email").unwrap();
        assert_eq!(
            email.validators().collect::<Vec<_>>(),
            vec![ValidatorKey::Email, ValidatorKey::Required]
        );
        assert!(form.control("submit").is_none());
    }

    #[test]
    fn test_set_value_updates_model_and_validity() {
        let mut form = form();
        form.set_value("email", "not-an-email").unwrap();

        assert_eq!(form.model(), &json!({"user": {"email": "not-an-email"}}));
        assert!(!form.is_valid());

        form.set_value("email", "a@b.co").unwrap();
        assert!(form.is_valid());
    }

    #[test]
    fn test_equal_to_follows_model() {
        let mut form = form();
        form.fill([("password", "correct horse"), ("confirm", "correct horse")])
            .unwrap();
        assert!(form.is_valid());

        form.set_value("confirm", "battery staple").unwrap();
        assert!(!form.control("confirm").unwrap().is_valid());
    }

    #[test]
    fn test_errors_are_rendered_per_field() {
        let mut form = form();
        form.fill([("email", ""), ("password", "short")]).unwrap();

        let errors = form.errors().unwrap();
        assert_eq!(
            errors.get("email"),
            Some(&vec!["This field is required.".to_string()])
        );
        assert_eq!(
            errors.get("password"),
            Some(&vec!["Please enter at least 8 characters.".to_string()])
        );
        assert!(!errors.contains_key("confirm"));
    }

    #[test]
    fn test_unknown_field() {
        let mut form = form();
        let err = form.set_value("nickname", "x").unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownField {
                name: "nickname".to_string()
            }
        );
    }

    #[test]
    fn test_misconfigured_field_fails_wiring() {
        let fields = vec![FieldDescriptor::new("age", ElementKind::Input)
            .with_model("age")
            .with_attribute("min", "adult")];

        let err = Form::wire(
            Arc::new(ValidatorRegistry::default()),
            ValidationConfig::default_config(),
            &fields,
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidBound { .. }));
    }

    #[test]
    fn test_wire_included_consumes_pending_once() {
        let mut form = form();
        let mut pending = PendingResources::new();
        pending.mark_pending("/partials/address.html");

        let address = vec![FieldDescriptor::new("zip", ElementKind::Input)
            .with_model("address.zip")
            .with_attribute("digits", "")];

        assert!(form
            .wire_included("/partials/address.html", &mut pending, &address)
            .unwrap());
        assert!(form.control("zip").is_some());

        assert!(!form
            .wire_included("/partials/address.html", &mut pending, &address)
            .unwrap());
        assert_eq!(form.controls().count(), 4);
    }

    #[test]
    fn test_add_fields_skips_already_wired() {
        let mut form = form();
        assert_eq!(form.add_fields(&signup_fields()).unwrap(), 0);
    }

    #[test]
    fn test_set_path_replaces_scalars() {
        let mut model = json!({"a": "scalar"});
        set_path(&mut model, "a.b", json!("x"));
        assert_eq!(model, json!({"a": {"b": "x"}}));
    }
}
