//! Asynchronous engine.
//!
//! Behaves exactly like the synchronous engine: same classification, same
//! resolution, same error tree. Every rule function and every nested call is
//! awaited before the next one starts, so element indexes and key order match
//! the synchronous result.

use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::Value;

use crate::engine::field::FieldOutcome;
use crate::engine::resolve::{ElementTarget, array_target, resolve_array, resolve_element};
use crate::foundation::{AsyncCheck, Result, Violation, property};
use crate::report::{ArrayErrors, ElementError, ElementErrors, ErrorTree, FieldErrors, FieldValidation};
use crate::rule::{ArrayShape, AsyncObjectRule, AsyncRule, AsyncRules, Shape, classify};

// ============================================================================
// OBJECT
// ============================================================================

/// Asynchronous counterpart of [`validate_object`](crate::engine::validate_object).
///
/// # Errors
///
/// Resolves to the same configuration errors as the synchronous engine.
///
/// # Examples
///
/// ```
/// use ruletree_validator::engine::validate_object_async;
/// use ruletree_validator::foundation::RuleFnExt;
/// use ruletree_validator::rule::{AsyncObjectRule, AsyncRules};
/// use ruletree_validator::rules::required;
/// use serde_json::json;
///
/// let rule = AsyncObjectRule::new().field("name", AsyncRules::new().rule(required().into_async()));
/// let object = json!({ "name": "" });
/// let errors = futures::executor::block_on(validate_object_async(&object, &object, &rule));
/// assert!(errors.unwrap().is_some());
/// ```
pub fn validate_object_async<'a>(
    object: &'a Value,
    root: &'a Value,
    rule: &'a AsyncObjectRule,
) -> BoxFuture<'a, Result<Option<ErrorTree>>> {
    async move {
        let mut tree = ErrorTree::new();

        for (key, node) in rule {
            let shape = classify(node)?;
            tracing::trace!(key = key.as_str(), shape = shape.name(), "validating field");

            match shape {
                Shape::Absent => {}
                Shape::Primitive(rules) => {
                    let violations = check_value(property(object, key), root, rules).await?;
                    tree.insert_violations(key, violations);
                }
                Shape::Object(nested) => {
                    let nested = validate_object_async(property(object, key), root, nested).await?;
                    tree.insert_object(key, nested);
                }
                Shape::Array(array) => {
                    let errors = validate_array_value(property(object, key), root, array).await?;
                    tree.insert_array(key, errors);
                }
                Shape::Dynamic(_) => {
                    let errors = validate_array_field_async(key, object, root, node).await?;
                    tree.insert_array(key, errors);
                }
            }
        }

        Ok(tree.into_option())
    }
    .boxed()
}

// ============================================================================
// FIELDS
// ============================================================================

/// Asynchronous counterpart of
/// [`validate_primitive_field`](crate::engine::validate_primitive_field).
pub fn validate_primitive_field_async<'a>(
    key: &'a str,
    object: &'a Value,
    root: &'a Value,
    rules: &'a AsyncRules,
) -> BoxFuture<'a, Result<FieldOutcome>> {
    async move {
        check_value(property(object, key), root, rules)
            .await
            .map(FieldOutcome::from_violations)
    }
    .boxed()
}

/// Asynchronous counterpart of
/// [`validate_array_field`](crate::engine::validate_array_field).
pub fn validate_array_field_async<'a>(
    key: &'a str,
    object: &'a Value,
    root: &'a Value,
    rule: &'a AsyncRule,
) -> BoxFuture<'a, Result<ArrayErrors>> {
    async move {
        let value = property(object, key);
        let target = array_target(rule)?;
        let mut slot = None;
        let shape = resolve_array(target, value, root, &mut slot)?;
        validate_array_value(value, root, shape).await
    }
    .boxed()
}

/// Asynchronous counterpart of [`validate_field`](crate::engine::validate_field).
pub fn validate_field_async<'a>(
    object: &'a Value,
    field_name: &'a str,
    rule: &'a AsyncRule,
) -> BoxFuture<'a, Result<FieldValidation>> {
    async move {
        let value = property(object, field_name);
        let errors = match classify(rule)? {
            Shape::Absent => return Ok(FieldValidation::valid(field_name)),
            Shape::Primitive(rules) => FieldErrors::Violations(check_value(value, object, rules).await?),
            Shape::Array(array) => {
                FieldErrors::Array(validate_array_value(value, object, array).await?)
            }
            Shape::Dynamic(_) => FieldErrors::Array(
                validate_array_field_async(field_name, object, object, rule).await?,
            ),
            Shape::Object(nested) => match validate_object_async(value, object, nested).await? {
                Some(tree) => FieldErrors::Object(tree),
                None => return Ok(FieldValidation::valid(field_name)),
            },
        };
        Ok(FieldValidation::from_errors(field_name, errors))
    }
    .boxed()
}

// ============================================================================
// HELPERS
// ============================================================================

async fn check_value(value: &Value, root: &Value, rules: &AsyncRules) -> Result<Vec<Violation>> {
    let mut violations = Vec::new();
    for entry in rules {
        let Some(check) = entry.as_check()? else {
            continue;
        };
        if let Some(violation) = check.check(value, root).await? {
            violations.push(violation.interpolated());
        }
    }
    Ok(violations)
}

async fn validate_array_value(
    value: &Value,
    root: &Value,
    shape: ArrayShape<'_, AsyncCheck>,
) -> Result<ArrayErrors> {
    let mut errors = ArrayErrors::default();

    if let Some(rules) = shape.array_rules {
        errors.set_array_errors(check_value(value, root, rules).await?);
    }

    let (Some(element_rule), Value::Array(elements)) = (shape.element_rule, value) else {
        return Ok(errors);
    };

    for (index, element) in elements.iter().enumerate() {
        let mut slot = None;
        let failures = match resolve_element(element_rule, element, root, &mut slot)? {
            ElementTarget::Fields(rules) => {
                ElementErrors::from_violations(check_value(element, root, rules).await?)
            }
            ElementTarget::Object(object_rule) => validate_object_async(element, root, object_rule)
                .await?
                .map(ElementErrors::Object),
        };
        if let Some(failures) = failures {
            errors.push_element(ElementError::new(index, failures, element.clone()));
        }
    }

    Ok(errors)
}
