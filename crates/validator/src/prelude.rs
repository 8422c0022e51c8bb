//! Prelude module for convenient imports.
//!
//! Provides a single `use ruletree_validator::prelude::*;` import that brings
//! in the rule tree types, the engine entry points, the built-in rules and
//! the tree-building macros.
//!
//! # Examples
//!
//! ```
//! use ruletree_validator::prelude::*;
//!
//! let validator = Validator::new(object_rule! {
//!     "email" => rules![required(), email_address()],
//!     "age" => rules![number_range(18.0, 130.0)],
//! });
//! let report = validator.validate_value(&serde_json::json!({ "email": "a@b.co", "age": 40 })).unwrap();
//! assert!(report.is_valid);
//! ```

// ============================================================================
// FOUNDATION: Traits, violations, errors
// ============================================================================

pub use crate::foundation::{
    AsyncRuleFn, DiagnosticSink, Error, RuleFn, RuleFnExt, RuleResult, Violation, async_rule,
};

// ============================================================================
// RULE TREES
// ============================================================================

pub use crate::rule::{
    ArrayRule, AsyncArrayRule, AsyncObjectRule, AsyncRule, AsyncRules, ObjectRule, Rule, Rules,
};

// ============================================================================
// ENGINE AND REPORTS
// ============================================================================

pub use crate::engine::{
    validate_field, validate_field_async, validate_object, validate_object_async,
};
pub use crate::report::{
    ArrayErrors, ElementError, ElementErrors, ErrorTree, FieldErrors, FieldValidation,
};
pub use crate::validator::{AsyncValidator, ValidationReport, Validator};

// ============================================================================
// RULES AND MACROS
// ============================================================================

#[allow(clippy::wildcard_imports)]
pub use crate::rules::*;
pub use crate::{async_rules, object_rule, rule, rules};
