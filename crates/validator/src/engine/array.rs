//! Array field validation.

use serde_json::Value;

use crate::engine::field::check_value;
use crate::engine::object::validate_object;
use crate::engine::resolve::{ElementTarget, array_target, resolve_array, resolve_element};
use crate::foundation::{Result, SyncCheck, property};
use crate::report::{ArrayErrors, ElementError, ElementErrors};
use crate::rule::{ArrayShape, Rule};

/// Validates the array at `object[key]`.
///
/// `rule` may be an [`ArrayRule`](crate::rule::ArrayRule), an array-shaped
/// object rule, or a dynamic rule that builds one from `(value, root)`.
/// Whole-array rules always run; element rules run only when the value is an
/// array, once per element in index order. Passing elements leave no trace.
///
/// The returned [`ArrayErrors`] is empty when everything passed.
///
/// # Errors
///
/// Fails with [`Error::ExpectedArrayRule`](crate::Error::ExpectedArrayRule)
/// when `rule` is a rule list or a plain object rule, with
/// [`Error::UnresolvedDynamicRule`](crate::Error::UnresolvedDynamicRule) when a
/// dynamic rule builds something other than an array rule, and with the
/// element resolution errors described on [`Rule`].
pub fn validate_array_field(
    key: &str,
    object: &Value,
    root: &Value,
    rule: &Rule,
) -> Result<ArrayErrors> {
    let value = property(object, key);
    let target = array_target(rule)?;
    let mut slot = None;
    let shape = resolve_array(target, value, root, &mut slot)?;
    validate_array_value(value, root, shape)
}

pub(crate) fn validate_array_value(
    value: &Value,
    root: &Value,
    shape: ArrayShape<'_, SyncCheck>,
) -> Result<ArrayErrors> {
    let mut errors = ArrayErrors::default();

    if let Some(rules) = shape.array_rules {
        errors.set_array_errors(check_value(value, root, rules)?);
    }

    let (Some(element_rule), Value::Array(elements)) = (shape.element_rule, value) else {
        return Ok(errors);
    };

    for (index, element) in elements.iter().enumerate() {
        let mut slot = None;
        let failures = match resolve_element(element_rule, element, root, &mut slot)? {
            ElementTarget::Fields(rules) => {
                ElementErrors::from_violations(check_value(element, root, rules)?)
            }
            ElementTarget::Object(object_rule) => {
                validate_object(element, root, object_rule)?.map(ElementErrors::Object)
            }
        };
        if let Some(failures) = failures {
            errors.push_element(ElementError::new(index, failures, element.clone()));
        }
    }

    Ok(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{Error, RuleResult, Violation};
    use crate::rule::{ArrayRule, ObjectRule, Rules};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn non_empty(value: &Value, _root: &Value) -> RuleResult {
        let empty = match value {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            Value::Array(items) => items.is_empty(),
            _ => false,
        };
        Ok(empty.then(|| Violation::new("nonEmpty", value.clone(), "Must not be empty.")))
    }

    #[test]
    fn whole_array_rules_see_the_array() {
        let object = json!({"tags": []});
        let rule: Rule = ArrayRule::new().array_rules(Rules::new().rule(non_empty)).into();
        let errors = validate_array_field("tags", &object, &object, &rule).unwrap();
        let whole = errors.array_errors.unwrap();
        assert_eq!(whole.len(), 1);
        assert_eq!(whole[0].attempted_value, json!([]));
        assert_eq!(errors.array_element_errors, None);
    }

    #[test]
    fn only_failing_elements_are_reported() {
        let object = json!({"tags": ["a", "", null, "d"]});
        let rule: Rule = ArrayRule::new().element_rule(Rules::new().rule(non_empty)).into();
        let errors = validate_array_field("tags", &object, &object, &rule).unwrap();
        let indexes: Vec<_> = errors
            .array_element_errors
            .unwrap()
            .iter()
            .map(|element| element.index)
            .collect();
        assert_eq!(indexes, [1, 2]);
    }

    #[test]
    fn non_array_values_skip_element_rules() {
        let object = json!({"tags": "oops"});
        let rule: Rule = ArrayRule::new().element_rule(Rules::new().rule(non_empty)).into();
        let errors = validate_array_field("tags", &object, &object, &rule).unwrap();
        assert!(errors.is_empty());
    }

    #[test]
    fn dynamic_element_rules_resolve_per_element() {
        let object = json!({"items": [{"kind": "a", "code": ""}, {"kind": "b", "code": ""}]});
        let rule = Rule::Array(ArrayRule::new().dynamic_element_rule(|element, _root| {
            let rule: ObjectRule = if element["kind"] == "a" {
                ObjectRule::new().field("code", Rules::new().rule(non_empty))
            } else {
                ObjectRule::new()
            };
            Rule::Object(rule)
        }));
        let errors = validate_array_field("items", &object, &object, &rule).unwrap();
        let elements = errors.array_element_errors.unwrap();
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].index, 0);
    }

    #[test]
    fn rule_lists_are_not_array_rules() {
        let object = json!({"tags": []});
        let rule: Rule = Rules::new().into();
        assert!(matches!(
            validate_array_field("tags", &object, &object, &rule),
            Err(Error::ExpectedArrayRule { found: "a rule list" })
        ));
    }
}
