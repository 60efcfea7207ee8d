//! Built-in validator predicates
//!
//! Every predicate receives a non-empty value (emptiness is settled by the
//! dispatcher) and returns whether the value passes. An `Err` means the field
//! is misconfigured, not that the value is invalid.

use super::key::ValidatorKey;
use crate::core::error::ValidationError;
use crate::core::field::{Attributes, FieldContext, parse_leading_float, parse_leading_int};
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};
use validator::{ValidateEmail, ValidateUrl};

/// Signature shared by all predicates
pub type Predicate = fn(&str, &FieldContext<'_>) -> Result<bool, ValidationError>;

/// Predicate backing `key`, or `None` for message-only keys
pub fn predicate_for(key: ValidatorKey) -> Option<Predicate> {
    let predicate: Predicate = match key {
        ValidatorKey::Required => present,
        ValidatorKey::Email => email,
        ValidatorKey::Url => url,
        ValidatorKey::Number => number,
        ValidatorKey::Digits => digits,
        ValidatorKey::Min => min,
        ValidatorKey::Max => max,
        ValidatorKey::Length => length,
        ValidatorKey::MinLength => min_length,
        ValidatorKey::MaxLength => max_length,
        ValidatorKey::Pattern => pattern,
        ValidatorKey::EqualTo => equal_to,
        ValidatorKey::Editable => return None,
    };
    Some(predicate)
}

/// Validator: value is present
///
/// Only reached for non-empty values, so presence already holds.
pub fn present(_: &str, _: &FieldContext<'_>) -> Result<bool, ValidationError> {
    Ok(true)
}

/// Validator: syntactically valid e-mail address
pub fn email(value: &str, _: &FieldContext<'_>) -> Result<bool, ValidationError> {
    Ok(value.validate_email())
}

/// Validator: syntactically valid URL
pub fn url(value: &str, _: &FieldContext<'_>) -> Result<bool, ValidationError> {
    Ok(value.validate_url())
}

/// Validator: whole value is one or more decimal digits
pub fn digits(value: &str, _: &FieldContext<'_>) -> Result<bool, ValidationError> {
    static DIGITS_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = DIGITS_REGEX.get_or_init(|| Regex::new(r"^[0-9]+$").expect("digits regex"));
    Ok(regex.is_match(value))
}

/// Validator: optionally negative number, thousands separators and fraction allowed
pub fn number(value: &str, _: &FieldContext<'_>) -> Result<bool, ValidationError> {
    static NUMBER_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = NUMBER_REGEX.get_or_init(|| {
        Regex::new(r"^-?(?:[0-9]+|[0-9]{1,3}(?:,[0-9]{3})+)?(?:\.[0-9]+)?$").expect("number regex")
    });
    Ok(regex.is_match(value))
}

/// Validator: numeric value is at least the `min` bound
pub fn min(value: &str, ctx: &FieldContext<'_>) -> Result<bool, ValidationError> {
    let bound = float_bound(ValidatorKey::Min, ctx.attributes())?;
    Ok(parse_leading_float(value).is_some_and(|v| v >= bound))
}

/// Validator: numeric value is at most the `max` bound
pub fn max(value: &str, ctx: &FieldContext<'_>) -> Result<bool, ValidationError> {
    let bound = float_bound(ValidatorKey::Max, ctx.attributes())?;
    Ok(parse_leading_float(value).is_some_and(|v| v <= bound))
}

/// Validator: value has exactly `length` characters
pub fn length(value: &str, ctx: &FieldContext<'_>) -> Result<bool, ValidationError> {
    let bound = int_bound(ValidatorKey::Length, ctx.attributes())?;
    Ok(text_length(value) == bound)
}

/// Validator: value has at least `minlength` characters
pub fn min_length(value: &str, ctx: &FieldContext<'_>) -> Result<bool, ValidationError> {
    let bound = int_bound(ValidatorKey::MinLength, ctx.attributes())?;
    Ok(text_length(value) >= bound)
}

/// Validator: value has at most `maxlength` characters
pub fn max_length(value: &str, ctx: &FieldContext<'_>) -> Result<bool, ValidationError> {
    let bound = int_bound(ValidatorKey::MaxLength, ctx.attributes())?;
    Ok(text_length(value) <= bound)
}

/// Validator: value matches the `pattern` attribute
pub fn pattern(value: &str, ctx: &FieldContext<'_>) -> Result<bool, ValidationError> {
    let source = required_attribute(ValidatorKey::Pattern, ctx.attributes())?;
    Ok(cached_pattern(source)?.is_match(value))
}

/// Validator: value equals the string the `equalTo` expression resolves to
///
/// An unresolved reference or a non-string target never matches.
pub fn equal_to(value: &str, ctx: &FieldContext<'_>) -> Result<bool, ValidationError> {
    let expression = required_attribute(ValidatorKey::EqualTo, ctx.attributes())?;
    Ok(matches!(ctx.resolve(expression), Some(Value::String(other)) if other == value))
}

/// Check that `attributes` carry a usable bound for `key`
///
/// Runs the same parsing the predicate would, so misconfigured fields are
/// reported when they are wired instead of on the first keystroke.
pub fn check_bound(key: ValidatorKey, attributes: &Attributes) -> Result<(), ValidationError> {
    match key {
        ValidatorKey::Min | ValidatorKey::Max => float_bound(key, attributes).map(|_| ()),
        ValidatorKey::Length | ValidatorKey::MinLength | ValidatorKey::MaxLength => {
            int_bound(key, attributes).map(|_| ())
        }
        ValidatorKey::Pattern => {
            cached_pattern(required_attribute(key, attributes)?).map(|_| ())
        }
        ValidatorKey::EqualTo => required_attribute(key, attributes).map(|_| ()),
        _ => Ok(()),
    }
}

/// Length in UTF-16 code units, the unit browsers use for `maxlength`
fn text_length(value: &str) -> i64 {
    value.encode_utf16().count() as i64
}

fn required_attribute(
    key: ValidatorKey,
    attributes: &Attributes,
) -> Result<&str, ValidationError> {
    let attribute = key.bound_attribute().unwrap_or(key.as_str());
    attributes
        .get(attribute)
        .ok_or(ValidationError::MissingAttribute { key, attribute })
}

fn float_bound(key: ValidatorKey, attributes: &Attributes) -> Result<f64, ValidationError> {
    let raw = required_attribute(key, attributes)?;
    parse_leading_float(raw).ok_or_else(|| ValidationError::InvalidBound {
        key,
        value: raw.to_string(),
        expected: "number",
    })
}

fn int_bound(key: ValidatorKey, attributes: &Attributes) -> Result<i64, ValidationError> {
    let raw = required_attribute(key, attributes)?;
    parse_leading_int(raw).ok_or_else(|| ValidationError::InvalidBound {
        key,
        value: raw.to_string(),
        expected: "integer",
    })
}

/// Compiled pattern attributes keyed by their source text
///
/// Wiring (`check_bound`) fills the cache, so dispatch reuses the regex built
/// when the field was set up.
fn pattern_cache() -> &'static RwLock<HashMap<String, Regex>> {
    static PATTERNS: OnceLock<RwLock<HashMap<String, Regex>>> = OnceLock::new();
    PATTERNS.get_or_init(|| RwLock::new(HashMap::new()))
}

fn cached_pattern(source: &str) -> Result<Regex, ValidationError> {
    if let Some(regex) = pattern_cache()
        .read()
        .ok()
        .and_then(|patterns| patterns.get(source).cloned())
    {
        return Ok(regex);
    }

    let regex = compile_pattern(source)?;
    if let Ok(mut patterns) = pattern_cache().write() {
        patterns.insert(source.to_string(), regex.clone());
    }
    Ok(regex)
}

/// Compile a pattern attribute
///
/// `/body/flags` is taken as an unanchored regex literal, anything else must
/// match the whole value. Literal flags `i`, `m` and `s` become inline flags;
/// `g` and `y` do not affect a single match and `u` is always on, so those
/// are dropped. Any other flag is an error.
fn compile_pattern(source: &str) -> Result<Regex, ValidationError> {
    let invalid = |message: String| ValidationError::InvalidPattern {
        pattern: source.to_string(),
        message,
    };

    let expression = match literal_parts(source) {
        Some((body, flags)) => {
            let mut inline = String::new();
            for flag in flags.chars() {
                match flag {
                    'i' | 'm' | 's' if !inline.contains(flag) => inline.push(flag),
                    'i' | 'm' | 's' | 'g' | 'y' | 'u' => {}
                    other => return Err(invalid(format!("unsupported flag '{}'", other))),
                }
            }
            if inline.is_empty() {
                body.to_string()
            } else {
                format!("(?{}){}", inline, body)
            }
        }
        None => format!("^(?:{})$", source),
    };

    Regex::new(&expression).map_err(|e| invalid(e.to_string()))
}

/// Split `/body/flags` into its parts; flags are lowercase letters
fn literal_parts(source: &str) -> Option<(&str, &str)> {
    let rest = source.strip_prefix('/')?;
    let close = rest.rfind('/')?;
    let (body, flags) = (&rest[..close], &rest[close + 1..]);
    flags
        .chars()
        .all(|c| c.is_ascii_lowercase())
        .then_some((body, flags))
}
