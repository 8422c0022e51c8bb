//! # ruletree-validator
//!
//! Validates nested JSON values against a declarative rule tree and returns a
//! sparse error tree that mirrors the rule's shape. No tree means valid.
//!
//! ## Quick Start
//!
//! ```
//! use ruletree_validator::prelude::*;
//! use serde_json::json;
//!
//! let rule = object_rule! {
//!     "name" => rules![required()],
//!     "orderItems" => ArrayRule::new()
//!         .array_rules(rules![array_min_len(1)])
//!         .element_rule(object_rule! { "productId" => rules![required()] }),
//! };
//!
//! let order = json!({ "name": "Ada", "orderItems": [{ "productId": 1 }, { "productId": "" }] });
//! let errors = validate_object(&order, &order, &rule).unwrap().unwrap();
//!
//! let items = errors.get("orderItems").and_then(FieldErrors::as_array).unwrap();
//! assert_eq!(items.array_element_errors.as_ref().unwrap()[0].index, 1);
//! ```
//!
//! ## Rule Trees
//!
//! - [`Rules`](rule::Rules) - rule functions for a primitive field
//! - [`ObjectRule`](rule::ObjectRule) - rules for a nested object
//! - [`ArrayRule`](rule::ArrayRule) - whole-array rules plus a per-element rule
//! - [`Rule::dynamic`](rule::Rule::dynamic) - a rule built from the value at validation time
//!
//! Rule trees can also be converted from JSON descriptions with `Rule::from`;
//! an object whose only keys are `arrayRules` and/or `arrayElementRule` is
//! read as an array rule.
//!
//! ## Writing Rules
//!
//! Use the [`rule!`] macro for simple value checks, or implement
//! [`RuleFn`](foundation::RuleFn) / [`AsyncRuleFn`](foundation::AsyncRuleFn)
//! by hand when the rule needs the root or can reject its input.
//!
//! ## Errors
//!
//! Failed validation is data ([`ErrorTree`](report::ErrorTree)). A rule tree
//! the engine cannot interpret is an [`Error`] and aborts the call.

pub mod config;
pub mod engine;
pub mod foundation;
mod macros;
pub mod prelude;
pub mod report;
pub mod rule;
pub mod rules;
pub mod validator;

pub use foundation::{Error, Result};
pub use serde_json::Value;
