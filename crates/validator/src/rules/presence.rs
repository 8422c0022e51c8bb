//! Presence rules

use serde_json::Value;

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn is_empty_container(value: &Value) -> bool {
    match value {
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

// ============================================================================
// REQUIRED
// ============================================================================

crate::rule! {
    /// Fails on `null` and on strings that are empty or only whitespace.
    ///
    /// `false` and `0` are present values.
    pub Required as "required";
    check(value) { !is_blank(value) }
    message(value) { "This field is required." }
    fn required();
}

// ============================================================================
// NOT EMPTY
// ============================================================================

crate::rule! {
    /// Fails on empty strings, arrays and objects. `null` passes; combine with
    /// [`required`] to reject it too.
    pub NotEmpty as "notEmpty";
    check(value) { !is_empty_container(value) }
    message(value) { "This field must not be empty." }
    fn not_empty();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::RuleFn;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!(null), false)]
    #[case(json!(""), false)]
    #[case(json!("   "), false)]
    #[case(json!("x"), true)]
    #[case(json!(0), true)]
    #[case(json!(false), true)]
    #[case(json!([]), true)]
    fn required_cases(#[case] value: Value, #[case] passes: bool) {
        let result = required().check(&value, &json!({})).unwrap();
        assert_eq!(result.is_none(), passes, "value: {value}");
    }

    #[test]
    fn required_message() {
        let violation = required().check(&json!(""), &json!({})).unwrap().unwrap();
        assert_eq!(violation.rule_name, "required");
        assert_eq!(violation.error_message, "This field is required.");
        assert_eq!(violation.attempted_value, json!(""));
    }

    #[rstest]
    #[case(json!(null), true)]
    #[case(json!(""), false)]
    #[case(json!([]), false)]
    #[case(json!({}), false)]
    #[case(json!([0]), true)]
    #[case(json!(" "), true)]
    fn not_empty_cases(#[case] value: Value, #[case] passes: bool) {
        let result = not_empty().check(&value, &json!({})).unwrap();
        assert_eq!(result.is_none(), passes, "value: {value}");
    }
}
