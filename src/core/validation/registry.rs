//! Validator registry and dispatcher
//!
//! The registry is built once at startup and is immutable afterwards. Field
//! controls share it behind an `Arc`.

use super::key::ValidatorKey;
use super::messages::MessageCatalog;
use super::sink::ValiditySink;
use super::validators::{Predicate, predicate_for};
use crate::config::ValidationConfig;
use crate::core::error::{ConfigError, MessageError, ValidationError};
use crate::core::field::{Attributes, FieldContext};
use indexmap::IndexMap;
use std::fmt;

/// Maps every validator key to its predicate and default message
#[derive(Clone)]
pub struct ValidatorRegistry {
    predicates: IndexMap<ValidatorKey, Predicate>,
    messages: MessageCatalog,
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("validators", &self.keys().collect::<Vec<_>>())
            .field("messages", &self.messages)
            .finish()
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::new(MessageCatalog::default())
    }
}

impl ValidatorRegistry {
    /// Create a registry with every built-in predicate and the given messages
    pub fn new(messages: MessageCatalog) -> Self {
        let predicates = ValidatorKey::ALL
            .iter()
            .filter_map(|key| predicate_for(*key).map(|p| (*key, p)))
            .collect();

        Self {
            predicates,
            messages,
        }
    }

    /// Create a registry from a checked configuration
    pub fn from_config(config: &ValidationConfig) -> Result<Self, ConfigError> {
        let overrides = config.message_overrides()?;
        tracing::debug!(overrides = overrides.len(), "Building validator registry");
        Ok(Self::new(MessageCatalog::with_overrides(overrides)))
    }

    /// Default message template for a markup name; `None` for unknown names
    pub fn get_default_message(&self, name: &str) -> Option<&str> {
        self.messages.get_by_name(name)
    }

    /// Message template for `key`
    pub fn message(&self, key: ValidatorKey) -> Option<&str> {
        self.messages.get(key)
    }

    pub fn messages(&self) -> &MessageCatalog {
        &self.messages
    }

    /// Render the message for `key` with the field's bound substituted
    pub fn render_message(
        &self,
        key: ValidatorKey,
        attributes: &Attributes,
    ) -> Result<String, MessageError> {
        self.messages.render(key, attributes)
    }

    /// Whether `name` resolves to a validator with a predicate
    pub fn is_registered(&self, name: &str) -> bool {
        name.parse::<ValidatorKey>()
            .is_ok_and(|key| self.predicates.contains_key(&key))
    }

    /// Keys that can be dispatched, in registration order
    pub fn keys(&self) -> impl Iterator<Item = ValidatorKey> + '_ {
        self.predicates.keys().copied()
    }

    /// Evaluate `key` against `value` and report the outcome to `sink`
    ///
    /// Empty values (per the sink) are valid for every key but `required`.
    /// On success exactly one validity is written; on error nothing is.
    pub fn evaluate<S>(
        &self,
        key: ValidatorKey,
        value: &str,
        ctx: &FieldContext<'_>,
        sink: &mut S,
    ) -> Result<(), ValidationError>
    where
        S: ValiditySink + ?Sized,
    {
        let predicate = self
            .predicates
            .get(&key)
            .ok_or(ValidationError::NotDispatchable { key })?;

        let valid = if sink.is_empty(value) {
            key.skips_empty()
        } else {
            predicate(value, ctx)?
        };

        tracing::trace!(validator = %key, valid, "Validator evaluated");
        sink.set_validity(key, valid);
        Ok(())
    }

    /// Evaluate a validator named in markup
    ///
    /// Unknown names fail before the sink is touched.
    pub fn evaluate_named<S>(
        &self,
        name: &str,
        value: &str,
        ctx: &FieldContext<'_>,
        sink: &mut S,
    ) -> Result<(), ValidationError>
    where
        S: ValiditySink + ?Sized,
    {
        let key = name.parse::<ValidatorKey>().inspect_err(|_| {
            tracing::warn!(validator = name, "Dispatch on unknown validator");
        })?;
        self.evaluate(key, value, ctx, sink)
    }
}
