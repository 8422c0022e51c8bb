//! Primitive field validation.

use serde::Serialize;
use serde_json::Value;

use crate::foundation::{Result, Violation, property};
use crate::rule::Rules;

/// Result of running a rule list against one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldOutcome {
    /// True when no rule failed.
    pub is_valid: bool,
    /// Every violation, in rule order, with `:value` already substituted.
    pub errors: Vec<Violation>,
}

impl FieldOutcome {
    pub(crate) fn from_violations(errors: Vec<Violation>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// Runs every rule of `rules` against `object[key]`.
///
/// Rules run in declared order and all of them run; a failing rule does not
/// stop the ones after it. Empty slots are skipped.
///
/// # Errors
///
/// Fails when a list entry is a truthy literal instead of a rule function,
/// or when a rule function reports a configuration error.
///
/// # Examples
///
/// ```
/// use ruletree_validator::engine::validate_primitive_field;
/// use ruletree_validator::rule::Rules;
/// use ruletree_validator::rules::{min_length, required};
/// use serde_json::json;
///
/// let object = json!({ "name": "" });
/// let rules = Rules::new().rule(required()).rule(min_length(2));
/// let outcome = validate_primitive_field("name", &object, &object, &rules).unwrap();
/// assert!(!outcome.is_valid);
/// assert_eq!(outcome.errors.len(), 2);
/// ```
pub fn validate_primitive_field(
    key: &str,
    object: &Value,
    root: &Value,
    rules: &Rules,
) -> Result<FieldOutcome> {
    check_value(property(object, key), root, rules).map(FieldOutcome::from_violations)
}

pub(crate) fn check_value(value: &Value, root: &Value, rules: &Rules) -> Result<Vec<Violation>> {
    let mut violations = Vec::new();
    for entry in rules {
        let Some(check) = entry.as_check()? else {
            continue;
        };
        if let Some(violation) = check.check(value, root)? {
            violations.push(violation.interpolated());
        }
    }
    Ok(violations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{Error, RuleResult};
    use crate::rule::RuleEntry;
    use serde_json::json;

    fn fails(name: &'static str) -> impl Fn(&Value, &Value) -> RuleResult + Send + Sync {
        move |value: &Value, _root: &Value| {
            Ok(Some(Violation::new(name, value.clone(), "bad :value")))
        }
    }

    #[test]
    fn accumulates_every_violation_in_order() {
        let object = json!({"code": "x"});
        let rules = Rules::new().rule(fails("a")).empty().rule(fails("b"));
        let outcome = validate_primitive_field("code", &object, &object, &rules).unwrap();

        let names: Vec<_> = outcome.errors.iter().map(|v| v.rule_name.as_ref()).collect();
        assert_eq!(names, ["a", "b"]);
        assert!(!outcome.is_valid);
        assert_eq!(outcome.errors[0].error_message, "bad x");
    }

    #[test]
    fn missing_fields_are_checked_as_null() {
        let object = json!({});
        let rules = Rules::new().rule(fails("a"));
        let outcome = validate_primitive_field("missing", &object, &object, &rules).unwrap();
        assert_eq!(outcome.errors[0].attempted_value, Value::Null);
        assert_eq!(outcome.errors[0].error_message, "bad null");
    }

    #[test]
    fn literal_entries_are_not_functions() {
        let object = json!({"code": 1});
        let rules = Rules::new()
            .entry(RuleEntry::Literal(json!(null)))
            .entry(RuleEntry::Literal(json!(42)));
        let error = validate_primitive_field("code", &object, &object, &rules).unwrap_err();
        assert!(matches!(error, Error::NotAFunction { .. }));
        assert_eq!(error.to_string(), "42 is not a function");
    }

    #[test]
    fn empty_lists_pass() {
        let object = json!({"code": 1});
        let outcome = validate_primitive_field("code", &object, &object, &Rules::new()).unwrap();
        assert!(outcome.is_valid);
        assert!(outcome.errors.is_empty());
    }
}
