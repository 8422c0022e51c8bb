//! The object traversal engine.

use serde_json::Value;

use crate::engine::array::{validate_array_field, validate_array_value};
use crate::engine::field::check_value;
use crate::foundation::{Result, property};
use crate::report::ErrorTree;
use crate::rule::{ObjectRule, Shape, classify};

/// Validates `object` against `rule` and returns the failing branches.
///
/// The rule's keys drive the walk: keys the object has but the rule does not
/// name are never looked at, and keys the rule names but the object lacks
/// are validated as `null`. A missing or non-object `object` behaves like an
/// empty object. `root` is handed unchanged to every rule function.
///
/// Returns `Ok(None)` when nothing failed; a returned tree is never empty.
///
/// # Errors
///
/// Any configuration error (a plain value where a rule belongs, a dynamic
/// rule that builds the wrong kind of rule, a rule function rejecting its
/// input) aborts the walk and is returned as is.
///
/// # Examples
///
/// ```
/// use ruletree_validator::engine::validate_object;
/// use ruletree_validator::rule::{ObjectRule, Rules};
/// use ruletree_validator::rules::required;
/// use serde_json::json;
///
/// let rule = ObjectRule::new().field("name", Rules::new().rule(required()));
///
/// let invalid = json!({ "name": "" });
/// let errors = validate_object(&invalid, &invalid, &rule).unwrap().unwrap();
/// assert!(errors.contains_key("name"));
///
/// let valid = json!({ "name": "Ada", "ignored": 1 });
/// assert!(validate_object(&valid, &valid, &rule).unwrap().is_none());
/// ```
pub fn validate_object(
    object: &Value,
    root: &Value,
    rule: &ObjectRule,
) -> Result<Option<ErrorTree>> {
    let mut tree = ErrorTree::new();

    for (key, node) in rule {
        let shape = classify(node)?;
        tracing::trace!(key = key.as_str(), shape = shape.name(), "validating field");

        match shape {
            Shape::Absent => {}
            Shape::Primitive(rules) => {
                tree.insert_violations(key, check_value(property(object, key), root, rules)?);
            }
            Shape::Object(nested) => {
                tree.insert_object(key, validate_object(property(object, key), root, nested)?);
            }
            Shape::Array(array) => {
                tree.insert_array(key, validate_array_value(property(object, key), root, array)?);
            }
            Shape::Dynamic(_) => {
                tree.insert_array(key, validate_array_field(key, object, root, node)?);
            }
        }
    }

    Ok(tree.into_option())
}
