//! Field attributes and evaluation context

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

static NULL_SCOPE: Value = Value::Null;

/// Declarative attributes of a field, in markup order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(IndexMap<String, String>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace an attribute, returning the previous value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Attributes {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// Everything a predicate can see besides the raw value
///
/// Borrows the field's attributes and the enclosing scope (usually the form
/// model) so that a single set of attributes can be evaluated against a scope
/// that changes on every keystroke.
#[derive(Debug, Clone, Copy)]
pub struct FieldContext<'a> {
    attributes: &'a Attributes,
    scope: &'a Value,
}

impl<'a> FieldContext<'a> {
    /// Context with an empty (null) scope
    pub fn new(attributes: &'a Attributes) -> Self {
        Self {
            attributes,
            scope: &NULL_SCOPE,
        }
    }

    /// Context resolving references against `scope`
    pub fn with_scope(attributes: &'a Attributes, scope: &'a Value) -> Self {
        Self { attributes, scope }
    }

    pub fn attributes(&self) -> &'a Attributes {
        self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.attributes.get(name)
    }

    pub fn scope(&self) -> &'a Value {
        self.scope
    }

    /// Evaluate a reference expression against the scope
    ///
    /// Expressions are dotted paths (`form.password`, `users.0.name`); numeric
    /// segments index into arrays. Returns `None` when any segment is missing.
    pub fn resolve(&self, expression: &str) -> Option<&'a Value> {
        let expression = expression.trim();
        if expression.is_empty() {
            return None;
        }

        expression
            .split('.')
            .try_fold(self.scope, |current, segment| match current {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            })
    }
}

/// Parse the longest leading decimal number, ignoring leading whitespace
///
/// `"10px"` parses as `10.0`, `"  -2.5e3x"` as `-2500.0`; a string without a
/// leading digit yields `None`.
pub(crate) fn parse_leading_float(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        let infinite = if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        return Some(infinite);
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if frac_end > frac_start || mantissa_digits > 0 {
            end = frac_end;
        }
    }

    if mantissa_digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }

    s[..end].trim_end_matches('.').parse::<f64>().ok()
}

/// Parse the longest leading base-10 integer, ignoring leading whitespace
///
/// Values outside the `i64` range saturate.
pub(crate) fn parse_leading_int(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }

    let saturated = if bytes[0] == b'-' { i64::MIN } else { i64::MAX };
    Some(s[..end].parse::<i64>().unwrap_or(saturated))
}
