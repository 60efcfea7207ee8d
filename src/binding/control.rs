//! Field controls with installed validators

use super::descriptor::FieldDescriptor;
use crate::core::error::{MessageError, ValidationError};
use crate::core::field::{Attributes, FieldContext};
use crate::core::validation::validators::check_bound;
use crate::core::validation::{FieldState, ValidatorKey, ValidatorRegistry};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Runs one validator on every value change
///
/// Receives the new value, the enclosing scope and the field's validity state.
pub type Interceptor =
    Box<dyn Fn(&str, &Value, &mut FieldState) -> Result<(), ValidationError> + Send + Sync>;

/// Live state of one form field
pub struct FieldControl {
    name: String,
    model_path: String,
    attributes: Arc<Attributes>,
    value: String,
    state: FieldState,
    interceptors: Vec<(ValidatorKey, Interceptor)>,
}

impl fmt::Debug for FieldControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldControl")
            .field("name", &self.name)
            .field("model_path", &self.model_path)
            .field("value", &self.value)
            .field("state", &self.state)
            .field("validators", &self.validators().collect::<Vec<_>>())
            .finish()
    }
}

impl FieldControl {
    /// Control with no validators installed
    pub fn new(descriptor: &FieldDescriptor) -> Self {
        Self {
            name: descriptor.name.clone(),
            model_path: descriptor.model_path().to_string(),
            attributes: Arc::new(descriptor.attributes.clone()),
            value: String::new(),
            state: FieldState::new(),
            interceptors: Vec::new(),
        }
    }

    /// Install a value interceptor that evaluates `key` on every change
    ///
    /// The field's attributes are checked for a usable bound first, so a
    /// misconfigured field fails here rather than on its first value.
    pub fn add_validator(
        &mut self,
        registry: Arc<ValidatorRegistry>,
        key: ValidatorKey,
    ) -> Result<(), ValidationError> {
        if !registry.keys().any(|k| k == key) {
            return Err(ValidationError::NotDispatchable { key });
        }
        check_bound(key, &self.attributes)?;

        let attributes = Arc::clone(&self.attributes);
        let interceptor: Interceptor = Box::new(
            move |value: &str, scope: &Value, state: &mut FieldState| {
                let ctx = FieldContext::with_scope(&attributes, scope);
                registry.evaluate(key, value, &ctx, state)
            },
        );

        tracing::trace!(field = %self.name, validator = %key, "Validator installed");
        self.interceptors.push((key, interceptor));
        Ok(())
    }

    /// Store a new value and run every interceptor in installation order
    ///
    /// Stops at the first interceptor that fails; the value is kept.
    pub fn set_value(&mut self, value: impl Into<String>, scope: &Value) -> Result<(), ValidationError> {
        self.value = value.into();
        for (_, interceptor) in &self.interceptors {
            interceptor(&self.value, scope, &mut self.state)?;
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model_path(&self) -> &str {
        &self.model_path
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn state(&self) -> &FieldState {
        &self.state
    }

    pub fn is_valid(&self) -> bool {
        self.state.is_valid()
    }

    /// Installed validators, in order
    pub fn validators(&self) -> impl Iterator<Item = ValidatorKey> + '_ {
        self.interceptors.iter().map(|(key, _)| *key)
    }

    /// Rendered messages for every failing validator
    pub fn errors(&self, registry: &ValidatorRegistry) -> Result<Vec<String>, MessageError> {
        self.state
            .failing()
            .map(|key| registry.render_message(key, &self.attributes))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::ElementKind;
    use serde_json::json;

    fn registry() -> Arc<ValidatorRegistry> {
        Arc::new(ValidatorRegistry::default())
    }

    #[test]
    fn test_interceptors_run_on_every_change() {
        let field = FieldDescriptor::new("zip", ElementKind::Input)
            .with_attribute("length", "5")
            .with_attribute("digits", "");
        let mut control = FieldControl::new(&field);
        control.add_validator(registry(), ValidatorKey::Length).unwrap();
        control.add_validator(registry(), ValidatorKey::Digits).unwrap();

        control.set_value("1234a", &Value::Null).unwrap();
        assert_eq!(control.state().validity(ValidatorKey::Length), Some(true));
        assert_eq!(control.state().validity(ValidatorKey::Digits), Some(false));
        assert!(!control.is_valid());

        control.set_value("12345", &Value::Null).unwrap();
        assert!(control.is_valid());
        assert_eq!(control.value(), "12345");
    }

    #[test]
    fn test_validators_keep_installation_order() {
        let field = FieldDescriptor::new("n", ElementKind::Input)
            .with_attribute("max", "9")
            .with_attribute("min", "1");
        let mut control = FieldControl::new(&field);
        control.add_validator(registry(), ValidatorKey::Max).unwrap();
        control.add_validator(registry(), ValidatorKey::Min).unwrap();

        let keys: Vec<_> = control.validators().collect();
        assert_eq!(keys, vec![ValidatorKey::Max, ValidatorKey::Min]);
    }

    #[test]
    fn test_add_validator_checks_bound() {
        let field = FieldDescriptor::new("n", ElementKind::Input).with_attribute("min", "low");
        let mut control = FieldControl::new(&field);

        let err = control.add_validator(registry(), ValidatorKey::Min).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidBound { .. }));
        assert_eq!(control.validators().count(), 0);
    }

    #[test]
    fn test_add_validator_rejects_message_only_key() {
        let field = FieldDescriptor::new("pick", ElementKind::Select);
        let mut control = FieldControl::new(&field);

        let err = control
            .add_validator(registry(), ValidatorKey::Editable)
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::NotDispatchable {
                key: ValidatorKey::Editable
            }
        );
    }

    #[test]
    fn test_equal_to_reads_scope() {
        let field = FieldDescriptor::new("confirm", ElementKind::Input)
            .with_attribute("equalTo", "account.password");
        let mut control = FieldControl::new(&field);
        control.add_validator(registry(), ValidatorKey::EqualTo).unwrap();

        let scope = json!({"account": {"password": "hunter2"}});
        control.set_value("hunter2", &scope).unwrap();
        assert!(control.is_valid());

        control.set_value("hunter3", &scope).unwrap();
        assert!(!control.is_valid());
    }

    #[test]
    fn test_errors_render_messages() {
        let registry = registry();
        let field = FieldDescriptor::new("bio", ElementKind::Textarea)
            .with_attribute("maxlength", "5");
        let mut control = FieldControl::new(&field);
        control
            .add_validator(Arc::clone(&registry), ValidatorKey::MaxLength)
            .unwrap();

        control.set_value("too long", &Value::Null).unwrap();
        assert_eq!(
            control.errors(&registry).unwrap(),
            vec!["Please enter no more than 5 characters.".to_string()]
        );
    }
}
