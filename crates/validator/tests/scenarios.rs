//! End-to-end validation scenarios for the synchronous engine.

use pretty_assertions::assert_eq;
use ruletree_validator::prelude::*;
use serde_json::{Value, json};

fn validate(object: &Value, rule: &ObjectRule) -> Option<Value> {
    validate_object(object, object, rule)
        .expect("rule tree is well formed")
        .map(|tree| serde_json::to_value(tree).expect("error trees serialize"))
}

// ============================================================================
// PRIMITIVE FIELDS
// ============================================================================

#[test]
fn required_field_reports_the_empty_string() {
    let rule = object_rule! { "name" => rules![required()] };

    assert_eq!(
        validate(&json!({ "name": "" }), &rule),
        Some(json!({
            "name": [{
                "ruleName": "required",
                "attemptedValue": "",
                "errorMessage": "This field is required.",
            }],
        }))
    );
}

#[test]
fn every_failing_rule_is_reported_in_order() {
    let rule = object_rule! {
        "code" => rules![min_length(5), pattern(r"^\d+$").unwrap(), max_length(1)],
    };

    let errors = validate(&json!({ "code": "ab" }), &rule).unwrap();
    let names: Vec<_> = errors["code"]
        .as_array()
        .unwrap()
        .iter()
        .map(|violation| violation["ruleName"].clone())
        .collect();
    assert_eq!(names, [json!("minLength"), json!("pattern"), json!("maxLength")]);
}

#[test]
fn messages_interpolate_the_attempted_value() {
    let rule = object_rule! { "age" => rules![min_number(18.0)] };

    let errors = validate(&json!({ "age": 16 }), &rule).unwrap();
    assert_eq!(
        errors["age"][0]["errorMessage"],
        json!("Expected a number of at least 18, got 16.")
    );
}

// ============================================================================
// ARRAYS
// ============================================================================

#[test]
fn whole_array_rules_report_array_errors() {
    let rule = object_rule! {
        "orderItems" => object_rule! { "arrayRules" => rules![array_min_len(1)] },
    };

    assert_eq!(
        validate(&json!({ "orderItems": [] }), &rule),
        Some(json!({
            "orderItems": {
                "arrayErrors": [{
                    "ruleName": "arrayMinLen",
                    "attemptedValue": [],
                    "errorMessage": "Expected at least 1 item(s), got 0.",
                }],
            },
        }))
    );
}

#[test]
fn only_failing_elements_are_reported() {
    let rule = object_rule! {
        "orderItems" => object_rule! {
            "arrayElementRule" => object_rule! { "productId" => rules![required()] },
        },
    };

    assert_eq!(
        validate(&json!({ "orderItems": [{ "productId": 1 }, { "productId": "" }] }), &rule),
        Some(json!({
            "orderItems": {
                "arrayElementErrors": [{
                    "index": 1,
                    "errors": {
                        "productId": [{
                            "ruleName": "required",
                            "attemptedValue": "",
                            "errorMessage": "This field is required.",
                        }],
                    },
                    "attemptedValue": { "productId": "" },
                }],
            },
        }))
    );
}

#[test]
fn primitive_elements_report_violation_lists() {
    let rule = object_rule! {
        "tags" => ArrayRule::new().element_rule(rules![required()]),
    };

    let errors = validate(&json!({ "tags": ["a", null, " "] }), &rule).unwrap();
    let elements = errors["tags"]["arrayElementErrors"].as_array().unwrap();
    assert_eq!(elements.len(), 2);
    assert_eq!(elements[0]["index"], json!(1));
    assert_eq!(elements[0]["attemptedValue"], Value::Null);
    assert!(elements[0]["errors"].is_array());
    assert_eq!(elements[1]["index"], json!(2));
}

#[test]
fn element_rules_skip_non_arrays() {
    let rule = object_rule! {
        "tags" => ArrayRule::new()
            .array_rules(rules![required()])
            .element_rule(rules![required()]),
    };

    let errors = validate(&json!({}), &rule).unwrap();
    assert_eq!(
        errors,
        json!({
            "tags": {
                "arrayErrors": [{
                    "ruleName": "required",
                    "attemptedValue": null,
                    "errorMessage": "This field is required.",
                }],
            },
        })
    );
}

#[test]
fn dynamic_array_rules_see_the_value_and_root() {
    let rule = object_rule! {
        "seats" => Rule::dynamic(|_seats, root| {
            let limit = root["capacity"].as_u64().unwrap_or(0) as usize;
            Rule::Array(ArrayRule::new().array_rules(rules![array_max_len(limit)]))
        }),
    };

    assert_eq!(validate(&json!({ "capacity": 2, "seats": ["a", "b"] }), &rule), None);
    let errors = validate(&json!({ "capacity": 1, "seats": ["a", "b"] }), &rule).unwrap();
    assert_eq!(errors["seats"]["arrayErrors"][0]["ruleName"], json!("arrayMaxLen"));
}

#[test]
fn dynamic_element_rules_pick_a_rule_per_element() {
    let rule = object_rule! {
        "contacts" => ArrayRule::new().dynamic_element_rule(|contact, _root| {
            let value_rules = if contact["kind"] == "email" {
                rules![required(), email_address()]
            } else {
                rules![required()]
            };
            Rule::Object(object_rule! { "value" => value_rules })
        }),
    };

    let object = json!({
        "contacts": [
            { "kind": "email", "value": "ada@example.com" },
            { "kind": "email", "value": "not-an-email" },
            { "kind": "phone", "value": "not-an-email" },
        ],
    });
    let errors = validate(&object, &rule).unwrap();
    let elements = errors["contacts"]["arrayElementErrors"].as_array().unwrap();
    assert_eq!(elements.len(), 1);
    assert_eq!(elements[0]["index"], json!(1));
    assert_eq!(
        elements[0]["errors"]["value"][0]["errorMessage"],
        json!("not-an-email is not a valid email address.")
    );
}

// ============================================================================
// NESTING
// ============================================================================

#[test]
fn nested_errors_mirror_the_rule_depth() {
    let rule = object_rule! {
        "level1" => object_rule! {
            "name" => rules![required()],
            "level2" => object_rule! {
                "name" => rules![required()],
                "level3" => object_rule! {
                    "name" => rules![required()],
                },
            },
        },
    };
    let object = json!({
        "level1": {
            "name": "",
            "extra": "",
            "level2": { "name": "", "level3": { "name": "" } },
        },
    });

    let violation = json!([{
        "ruleName": "required",
        "attemptedValue": "",
        "errorMessage": "This field is required.",
    }]);
    assert_eq!(
        validate(&object, &rule),
        Some(json!({
            "level1": {
                "name": violation,
                "level2": {
                    "name": violation,
                    "level3": { "name": violation },
                },
            },
        }))
    );
}

#[test]
fn cross_field_rules_receive_the_root_at_any_depth() {
    let rule = object_rule! {
        "password" => rules![required()],
        "security" => object_rule! {
            "confirm" => rules![equal_to_property("/password")],
        },
    };

    assert_eq!(
        validate(&json!({ "password": "pw", "security": { "confirm": "pw" } }), &rule),
        None
    );
    let errors = validate(&json!({ "password": "pw", "security": { "confirm": "nope" } }), &rule)
        .unwrap();
    assert_eq!(
        errors["security"]["confirm"][0]["errorMessage"],
        json!("Must be equal to password.")
    );
}

#[test]
fn mixed_array_keys_are_an_object_rule() {
    let rule = object_rule! {
        "items" => object_rule! {
            "arrayRules" => rules![array_min_len(1)],
            "label" => rules![required()],
        },
    };

    let errors = validate(&json!({ "items": { "arrayRules": [], "label": "" } }), &rule).unwrap();
    assert!(errors["items"]["label"].is_array());
    assert!(errors["items"]["arrayRules"].is_array());
}

// ============================================================================
// CONFIGURATION ERRORS
// ============================================================================

#[test]
fn string_rules_are_rejected() {
    let rule = match Rule::from(json!({ "children": "not-a-rule" })) {
        Rule::Object(rule) => rule,
        other => panic!("unexpected rule {other:?}"),
    };

    let error = validate_object(&json!({}), &json!({}), &rule).unwrap_err();
    assert!(error.to_string().contains("is not a valid rule"));
}

#[test]
fn literal_list_entries_are_not_functions() {
    let rule = match Rule::from(json!({ "name": [null, "required"] })) {
        Rule::Object(rule) => rule,
        other => panic!("unexpected rule {other:?}"),
    };

    let error = validate_object(&json!({ "name": "x" }), &json!({}), &rule).unwrap_err();
    assert_eq!(error.to_string(), "required is not a function");
}

#[test]
fn rule_input_errors_abort_validation() {
    let rule = object_rule! {
        "tags" => ArrayRule::new().array_rules(rules![array_min_len(1)]),
    };

    let error = validate_object(&json!({ "tags": "a,b" }), &json!({}), &rule).unwrap_err();
    assert_eq!(
        error.to_string(),
        "arrayMinLen: expected an array but received string"
    );
}

#[test]
fn dynamic_element_rules_must_produce_a_rule() {
    let rule = object_rule! {
        "tags" => ArrayRule::new().dynamic_element_rule(|_element, _root| Rule::Absent),
    };

    let error = validate_object(&json!({ "tags": [1] }), &json!({}), &rule).unwrap_err();
    assert_eq!(error.to_string(), "validation rule is null or undefined");
}
