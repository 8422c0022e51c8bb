//! Array and membership rules

use serde_json::Value;

use crate::foundation::{Error, RuleFn, RuleResult, Violation, display_value, type_name};

fn array_len(rule: &'static str, value: &Value) -> Result<Option<usize>, Error> {
    match value {
        Value::Null => Ok(None),
        Value::Array(items) => Ok(Some(items.len())),
        other => Err(Error::unexpected_input(rule, "an array", type_name(other))),
    }
}

// ============================================================================
// ARRAY LENGTH
// ============================================================================

/// Fails on arrays with fewer than `min` items.
///
/// `null` passes; any other non-array input is a configuration error:
///
/// ```
/// use ruletree_validator::foundation::RuleFn;
/// use ruletree_validator::rules::array_min_len;
/// use serde_json::json;
///
/// let error = array_min_len(1).check(&json!("abc"), &json!({})).unwrap_err();
/// assert_eq!(error.to_string(), "arrayMinLen: expected an array but received string");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArrayMinLen {
    /// Smallest accepted number of items.
    pub min: usize,
}

impl ArrayMinLen {
    /// Name reported in violations.
    pub const RULE_NAME: &'static str = "arrayMinLen";
}

impl RuleFn for ArrayMinLen {
    fn check(&self, value: &Value, _root: &Value) -> RuleResult {
        let Some(len) = array_len(Self::RULE_NAME, value)? else {
            return Ok(None);
        };
        Ok((len < self.min).then(|| {
            Violation::new(
                Self::RULE_NAME,
                value.clone(),
                format!("Expected at least {} item(s), got {len}.", self.min),
            )
        }))
    }
}

/// Creates an [`ArrayMinLen`] rule.
#[must_use]
pub const fn array_min_len(min: usize) -> ArrayMinLen {
    ArrayMinLen { min }
}

/// Fails on arrays with more than `max` items. Input handling matches
/// [`ArrayMinLen`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArrayMaxLen {
    /// Largest accepted number of items.
    pub max: usize,
}

impl ArrayMaxLen {
    /// Name reported in violations.
    pub const RULE_NAME: &'static str = "arrayMaxLen";
}

impl RuleFn for ArrayMaxLen {
    fn check(&self, value: &Value, _root: &Value) -> RuleResult {
        let Some(len) = array_len(Self::RULE_NAME, value)? else {
            return Ok(None);
        };
        Ok((len > self.max).then(|| {
            Violation::new(
                Self::RULE_NAME,
                value.clone(),
                format!("Expected at most {} item(s), got {len}.", self.max),
            )
        }))
    }
}

/// Creates an [`ArrayMaxLen`] rule.
#[must_use]
pub const fn array_max_len(max: usize) -> ArrayMaxLen {
    ArrayMaxLen { max }
}

// ============================================================================
// ONE OF
// ============================================================================

fn list(values: &[Value]) -> String {
    values
        .iter()
        .map(display_value)
        .collect::<Vec<_>>()
        .join(", ")
}

crate::rule! {
    /// Fails on values that are not one of the allowed values. `null` passes.
    #[derive(PartialEq)]
    pub OneOf { allowed: Vec<Value> } as "oneOf";
    check(self, value) { value.is_null() || self.allowed.contains(value) }
    message(self, value) { format!(":value is not one of: {}.", list(&self.allowed)) }
    new(allowed: impl IntoIterator<Item = Value>) { Self { allowed: allowed.into_iter().collect() } }
    fn one_of(allowed: impl IntoIterator<Item = Value>);
}
