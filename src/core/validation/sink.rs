//! Validity sinks
//!
//! The dispatcher never keeps validation results itself; it writes each
//! outcome to a sink owned by the field control.

use super::key::ValidatorKey;
use indexmap::IndexMap;

/// Receives per-key validity for one field
pub trait ValiditySink {
    /// Emptiness convention for this field's values
    ///
    /// Empty values are valid for every validator except `required`.
    fn is_empty(&self, value: &str) -> bool {
        value.is_empty()
    }

    /// Record the outcome of one validator
    fn set_validity(&mut self, key: ValidatorKey, valid: bool);
}

/// Validity bookkeeping for a single field
///
/// Keys appear in the order they were first reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    validity: IndexMap<ValidatorKey, bool>,
}

impl FieldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last reported outcome for `key`, if any
    pub fn validity(&self, key: ValidatorKey) -> Option<bool> {
        self.validity.get(&key).copied()
    }

    /// True when no reported validator failed
    pub fn is_valid(&self) -> bool {
        self.validity.values().all(|valid| *valid)
    }

    /// Keys whose last outcome was a failure
    pub fn failing(&self) -> impl Iterator<Item = ValidatorKey> + '_ {
        self.validity
            .iter()
            .filter(|(_, valid)| !**valid)
            .map(|(key, _)| *key)
    }

    /// Forget every reported outcome
    pub fn reset(&mut self) {
        self.validity.clear();
    }
}

impl ValiditySink for FieldState {
    fn set_validity(&mut self, key: ValidatorKey, valid: bool) {
        self.validity.insert(key, valid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_state_starts_valid() {
        let state = FieldState::new();
        assert!(state.is_valid());
        assert_eq!(state.validity(ValidatorKey::Min), None);
    }

    #[test]
    fn test_field_state_tracks_latest_outcome() {
        let mut state = FieldState::new();
        state.set_validity(ValidatorKey::Min, false);
        assert!(!state.is_valid());

        state.set_validity(ValidatorKey::Min, true);
        assert!(state.is_valid());
        assert_eq!(state.validity(ValidatorKey::Min), Some(true));
    }

    #[test]
    fn test_failing_keys_in_report_order() {
        let mut state = FieldState::new();
        state.set_validity(ValidatorKey::MaxLength, false);
        state.set_validity(ValidatorKey::Digits, true);
        state.set_validity(ValidatorKey::Min, false);

        let failing: Vec<_> = state.failing().collect();
        assert_eq!(failing, vec![ValidatorKey::MaxLength, ValidatorKey::Min]);

        state.reset();
        assert_eq!(state.failing().count(), 0);
    }

    #[test]
    fn test_default_emptiness_convention() {
        let state = FieldState::new();
        assert!(state.is_empty(""));
        assert!(!state.is_empty(" "));
        assert!(!state.is_empty("0"));
    }
}
