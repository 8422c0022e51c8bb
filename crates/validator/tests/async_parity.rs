//! The asynchronous engine must produce the same trees as the synchronous one.

use pretty_assertions::assert_eq;
use ruletree_validator::prelude::*;
use serde_json::{Value, json};

fn sync_tree() -> ObjectRule {
    object_rule! {
        "name" => rules![required(), min_length(2)],
        "email" => rules![email_address()],
        "address" => object_rule! {
            "zip" => rules![required(), pattern(r"^\d{5}$").unwrap()],
        },
        "orderItems" => ArrayRule::new()
            .array_rules(rules![array_min_len(1), array_max_len(3)])
            .element_rule(object_rule! {
                "productId" => rules![required()],
                "quantity" => rules![min_number(1.0)],
            }),
        "tags" => Rule::dynamic(|_tags, root| {
            if root["tagged"] == true {
                Rule::Array(ArrayRule::new().element_rule(rules![not_empty()]))
            } else {
                Rule::Absent
            }
        }),
    }
}

fn async_tree() -> AsyncObjectRule {
    object_rule! {
        "name" => async_rules![required().into_async(), min_length(2).into_async()],
        "email" => async_rules![email_address().into_async()],
        "address" => object_rule! {
            "zip" => async_rules![
                required().into_async(),
                pattern(r"^\d{5}$").unwrap().into_async(),
            ],
        },
        "orderItems" => ArrayRule::new()
            .array_rules(async_rules![array_min_len(1).into_async(), array_max_len(3).into_async()])
            .element_rule(object_rule! {
                "productId" => async_rules![required().into_async()],
                "quantity" => async_rules![min_number(1.0).into_async()],
            }),
        "tags" => AsyncRule::dynamic(|_tags, root| {
            if root["tagged"] == true {
                Rule::Array(ArrayRule::new().element_rule(async_rules![not_empty().into_async()]))
            } else {
                Rule::Absent
            }
        }),
    }
}

fn samples() -> Vec<Value> {
    vec![
        json!({}),
        json!({
            "name": "Ada",
            "email": "ada@example.com",
            "address": { "zip": "12345" },
            "orderItems": [{ "productId": 7, "quantity": 2 }],
        }),
        json!({
            "name": "A",
            "email": "nope",
            "address": { "zip": "1234" },
            "orderItems": [
                { "productId": "", "quantity": 0 },
                { "productId": 1, "quantity": 5 },
                { "quantity": "3" },
                {},
            ],
            "tagged": true,
            "tags": ["x", "", []],
        }),
        json!({ "address": "not an object", "orderItems": null, "tags": "skipped" }),
    ]
}

#[tokio::test]
async fn object_trees_match() {
    let sync_rule = sync_tree();
    let async_rule = async_tree();

    for sample in samples() {
        let expected = validate_object(&sample, &sample, &sync_rule).unwrap();
        let actual = validate_object_async(&sample, &sample, &async_rule).await.unwrap();
        assert_eq!(actual, expected, "sample: {sample}");
    }
}

#[tokio::test]
async fn single_fields_match() {
    let sync_rule = sync_tree();
    let async_rule = async_tree();

    for sample in samples() {
        for key in ["name", "address", "orderItems", "tags", "unknown"] {
            let sync_result = match sync_rule.get(key) {
                Some(rule) => validate_field(&sample, key, rule).unwrap(),
                None => FieldValidation::valid(key),
            };
            let async_result = match async_rule.get(key) {
                Some(rule) => validate_field_async(&sample, key, rule).await.unwrap(),
                None => FieldValidation::valid(key),
            };
            assert_eq!(async_result, sync_result, "sample: {sample}, key: {key}");
        }
    }
}

#[tokio::test]
async fn validators_report_the_same() {
    let validator = Validator::new(sync_tree());
    let async_validator = AsyncValidator::new(async_tree());

    for sample in samples() {
        let expected = validator.validate_value(&sample).unwrap();
        let actual = async_validator.validate_value(&sample).await.unwrap();
        assert_eq!(actual, expected);
    }
}

#[tokio::test]
async fn async_rules_can_await() {
    let taken = async_rule(|value, _root| async move {
        tokio::task::yield_now().await;
        let taken = value.as_str() == Some("admin");
        Ok(taken.then(|| Violation::new("usernameFree", value, ":value is taken.")))
    });
    let validator = AsyncValidator::new(object_rule! {
        "username" => async_rules![required().into_async(), taken],
    });

    let report = validator.validate_value(&json!({ "username": "admin" })).await.unwrap();
    assert!(!report.is_valid);
    let errors = report.errors.unwrap();
    let violations = errors.get("username").and_then(FieldErrors::as_violations).unwrap();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].error_message, "admin is taken.");

    let report = validator.validate_value(&json!({ "username": "ada" })).await.unwrap();
    assert!(report.is_valid);
}

#[tokio::test]
async fn configuration_errors_match() {
    let sync_rule = object_rule! {
        "items" => ArrayRule::new().array_rules(rules![array_min_len(1)]),
    };
    let async_rule = object_rule! {
        "items" => ArrayRule::new().array_rules(async_rules![array_min_len(1).into_async()]),
    };
    let sample = json!({ "items": 3 });

    let expected = validate_object(&sample, &sample, &sync_rule).unwrap_err();
    let actual = validate_object_async(&sample, &sample, &async_rule)
        .await
        .unwrap_err();
    assert_eq!(actual.to_string(), expected.to_string());
}
