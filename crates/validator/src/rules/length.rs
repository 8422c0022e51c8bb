//! String length rules
//!
//! Length is measured in Unicode scalar values (chars). `null` passes so the
//! rules compose with [`required`](super::required); any other non-string
//! input is a configuration error.

use serde_json::Value;

use crate::foundation::{Error, RuleFn, RuleResult, Violation, type_name};

fn char_count(rule: &'static str, value: &Value) -> Result<Option<usize>, Error> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.chars().count())),
        other => Err(Error::unexpected_input(rule, "a string", type_name(other))),
    }
}

// ============================================================================
// MIN LENGTH
// ============================================================================

/// Fails on strings shorter than `min` characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MinLength {
    /// Smallest accepted length.
    pub min: usize,
}

impl MinLength {
    /// Name reported in violations.
    pub const RULE_NAME: &'static str = "minLength";
}

impl RuleFn for MinLength {
    fn check(&self, value: &Value, _root: &Value) -> RuleResult {
        let Some(length) = char_count(Self::RULE_NAME, value)? else {
            return Ok(None);
        };
        Ok((length < self.min).then(|| {
            Violation::new(
                Self::RULE_NAME,
                value.clone(),
                format!("Must be at least {} characters long.", self.min),
            )
        }))
    }
}

/// Creates a [`MinLength`] rule.
#[must_use]
pub const fn min_length(min: usize) -> MinLength {
    MinLength { min }
}

// ============================================================================
// MAX LENGTH
// ============================================================================

/// Fails on strings longer than `max` characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaxLength {
    /// Largest accepted length.
    pub max: usize,
}

impl MaxLength {
    /// Name reported in violations.
    pub const RULE_NAME: &'static str = "maxLength";
}

impl RuleFn for MaxLength {
    fn check(&self, value: &Value, _root: &Value) -> RuleResult {
        let Some(length) = char_count(Self::RULE_NAME, value)? else {
            return Ok(None);
        };
        Ok((length > self.max).then(|| {
            Violation::new(
                Self::RULE_NAME,
                value.clone(),
                format!("Must be at most {} characters long.", self.max),
            )
        }))
    }
}

/// Creates a [`MaxLength`] rule.
#[must_use]
pub const fn max_length(max: usize) -> MaxLength {
    MaxLength { max }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn counts_chars_not_bytes() {
        let root = json!({});
        assert!(max_length(3).check(&json!("héé"), &root).unwrap().is_none());
        assert!(min_length(4).check(&json!("héé"), &root).unwrap().is_some());
    }

    #[test]
    fn null_passes() {
        let root = json!({});
        assert!(min_length(1).check(&Value::Null, &root).unwrap().is_none());
        assert!(max_length(0).check(&Value::Null, &root).unwrap().is_none());
    }

    #[test]
    fn non_strings_are_rejected() {
        let error = min_length(1).check(&json!(12), &json!({})).unwrap_err();
        assert_eq!(
            error.to_string(),
            "minLength: expected a string but received number"
        );
    }

    #[test]
    fn messages() {
        let violation = max_length(2).check(&json!("abc"), &json!({})).unwrap().unwrap();
        assert_eq!(violation.error_message, "Must be at most 2 characters long.");
    }
}
