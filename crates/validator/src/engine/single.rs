//! Validation of a single field, for "validate on blur" callers.

use serde_json::Value;

use crate::engine::array::{validate_array_field, validate_array_value};
use crate::engine::field::check_value;
use crate::engine::object::validate_object;
use crate::foundation::{Result, property};
use crate::report::{FieldErrors, FieldValidation};
use crate::rule::{Rule, Shape, classify};

/// Validates `object[field_name]` with the rule that field would get inside
/// a full [`validate_object`] call. `object` is also the root.
///
/// An absent rule means the field is valid.
///
/// # Errors
///
/// Returns the same configuration errors as [`validate_object`].
///
/// # Examples
///
/// ```
/// use ruletree_validator::engine::validate_field;
/// use ruletree_validator::rule::{Rule, Rules};
/// use ruletree_validator::rules::required;
/// use serde_json::json;
///
/// let rule: Rule = Rules::new().rule(required()).into();
/// let result = validate_field(&json!({ "email": "" }), "email", &rule).unwrap();
/// assert!(!result.is_valid);
/// assert_eq!(result.field_name, "email");
/// ```
pub fn validate_field(object: &Value, field_name: &str, rule: &Rule) -> Result<FieldValidation> {
    let value = property(object, field_name);
    let errors = match classify(rule)? {
        Shape::Absent => return Ok(FieldValidation::valid(field_name)),
        Shape::Primitive(rules) => FieldErrors::Violations(check_value(value, object, rules)?),
        Shape::Array(array) => FieldErrors::Array(validate_array_value(value, object, array)?),
        Shape::Dynamic(_) => {
            FieldErrors::Array(validate_array_field(field_name, object, object, rule)?)
        }
        Shape::Object(nested) => match validate_object(value, object, nested)? {
            Some(tree) => FieldErrors::Object(tree),
            None => return Ok(FieldValidation::valid(field_name)),
        },
    };
    Ok(FieldValidation::from_errors(field_name, errors))
}
