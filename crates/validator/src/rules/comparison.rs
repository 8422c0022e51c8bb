//! Cross-field rules
//!
//! These rules read a second value from the validation root, addressed by a
//! JSON pointer (`/account/password`) or, without a leading slash, by a
//! top-level key (`password`).

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::foundation::value::NULL;
use crate::foundation::{DiagnosticSink, RuleFn, RuleResult, Violation, default_sink};

/// Fails when the value differs from another property of the root.
///
/// A pointer that resolves to nothing is reported to the rule's
/// [`DiagnosticSink`] and the value is compared against `null`.
///
/// # Examples
///
/// ```
/// use ruletree_validator::foundation::RuleFn;
/// use ruletree_validator::rules::equal_to_property;
/// use serde_json::json;
///
/// let root = json!({ "password": "s3cret", "confirm": "secret" });
/// let rule = equal_to_property("/password");
/// let violation = rule.check(&root["confirm"], &root).unwrap().unwrap();
/// assert_eq!(violation.error_message, "Must be equal to password.");
/// ```
#[derive(Clone)]
pub struct EqualToProperty {
    pointer: String,
    sink: Arc<dyn DiagnosticSink>,
}

impl EqualToProperty {
    /// Name reported in violations.
    pub const RULE_NAME: &'static str = "equalToProperty";

    /// Creates the rule for the property at `pointer`.
    pub fn new(pointer: impl Into<String>) -> Self {
        Self {
            pointer: pointer.into(),
            sink: default_sink(),
        }
    }

    /// Sends warnings about unresolvable pointers to `sink`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// The address of the compared property.
    #[must_use]
    pub fn pointer(&self) -> &str {
        &self.pointer
    }

    fn target<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        if self.pointer.starts_with('/') {
            root.pointer(&self.pointer)
        } else {
            root.get(&self.pointer)
        }
    }

    fn label(&self) -> &str {
        self.pointer.trim_start_matches('/')
    }
}

impl fmt::Debug for EqualToProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EqualToProperty")
            .field("pointer", &self.pointer)
            .finish_non_exhaustive()
    }
}

impl RuleFn for EqualToProperty {
    fn check(&self, value: &Value, root: &Value) -> RuleResult {
        let other = self.target(root).unwrap_or_else(|| {
            self.sink.warn(
                Self::RULE_NAME,
                &format!("property {} does not exist on the root object", self.pointer),
            );
            &NULL
        });
        Ok((value != other).then(|| {
            Violation::new(
                Self::RULE_NAME,
                value.clone(),
                format!("Must be equal to {}.", self.label()),
            )
        }))
    }
}

/// Creates an [`EqualToProperty`] rule.
pub fn equal_to_property(pointer: impl Into<String>) -> EqualToProperty {
    EqualToProperty::new(pointer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::CollectingSink;
    use serde_json::json;

    #[test]
    fn compares_with_nested_properties() {
        let root = json!({"account": {"email": "a@b.co"}, "confirm": "a@b.co"});
        let rule = equal_to_property("/account/email");
        assert!(rule.check(&root["confirm"], &root).unwrap().is_none());
        assert!(rule.check(&json!("x@y.co"), &root).unwrap().is_some());
    }

    #[test]
    fn plain_keys_address_the_top_level() {
        let root = json!({"password": "pw"});
        assert!(equal_to_property("password").check(&json!("pw"), &root).unwrap().is_none());
    }

    #[test]
    fn missing_targets_warn() {
        let sink = CollectingSink::shared();
        let rule = equal_to_property("/missing").with_sink(sink.clone());
        let root = json!({});

        assert!(rule.check(&json!(null), &root).unwrap().is_none());
        assert!(rule.check(&json!("x"), &root).unwrap().is_some());

        let entries = sink.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].rule, "equalToProperty");
        assert_eq!(
            entries[0].message,
            "property /missing does not exist on the root object"
        );
    }
}
