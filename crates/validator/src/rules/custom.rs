//! Closure-backed rules

use std::borrow::Cow;
use std::fmt;

use serde_json::Value;

use crate::foundation::{RuleFn, RuleResult, Violation};

/// A rule defined by a name, a message and a `(value, root) -> bool` test.
///
/// See [`predicate`].
#[derive(Clone)]
pub struct Predicate<F> {
    rule_name: Cow<'static, str>,
    message: Cow<'static, str>,
    test: F,
}

impl<F> fmt::Debug for Predicate<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("rule_name", &self.rule_name)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

impl<F> RuleFn for Predicate<F>
where
    F: Fn(&Value, &Value) -> bool + Send + Sync,
{
    fn check(&self, value: &Value, root: &Value) -> RuleResult {
        if (self.test)(value, root) {
            Ok(None)
        } else {
            Ok(Some(Violation::new(
                self.rule_name.clone(),
                value.clone(),
                self.message.clone().into_owned(),
            )))
        }
    }
}

/// Builds a rule that passes when `test(value, root)` returns true.
///
/// # Examples
///
/// ```
/// use ruletree_validator::foundation::RuleFn;
/// use ruletree_validator::rules::predicate;
/// use serde_json::json;
///
/// let after_start = predicate("afterStart", "Must be after the start date.", |value, root| {
///     value.as_str() > root["start"].as_str()
/// });
/// let root = json!({ "start": "2024-01-01", "end": "2023-12-31" });
/// assert!(after_start.check(&root["end"], &root).unwrap().is_some());
/// ```
pub fn predicate<F>(
    rule_name: impl Into<Cow<'static, str>>,
    message: impl Into<Cow<'static, str>>,
    test: F,
) -> Predicate<F>
where
    F: Fn(&Value, &Value) -> bool + Send + Sync,
{
    Predicate {
        rule_name: rule_name.into(),
        message: message.into(),
        test,
    }
}
