//! Numeric rules
//!
//! Numbers and numeric strings (`"42"`, `" 3.5 "`) are compared by value.
//! `null` and the empty string pass. Anything else fails with a violation and
//! a warning to the rule's [`DiagnosticSink`], since it usually means the
//! field is bound to the wrong input.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::foundation::{DiagnosticSink, RuleFn, RuleResult, Violation, default_sink, type_name};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Bound {
    Min(f64),
    Max(f64),
    Range(f64, f64),
}

enum Reading {
    Skip,
    Number(f64),
    NotANumber,
}

fn read_number(value: &Value) -> Reading {
    match value {
        Value::Null => Reading::Skip,
        Value::Number(n) => n.as_f64().map_or(Reading::NotANumber, Reading::Number),
        Value::String(s) if s.trim().is_empty() => Reading::Skip,
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map_or(Reading::NotANumber, Reading::Number),
        _ => Reading::NotANumber,
    }
}

// ============================================================================
// NUMBER RULE
// ============================================================================

/// Compares a numeric value against a lower bound, an upper bound, or both.
///
/// Built by [`min_number`], [`max_number`] and [`number_range`].
///
/// # Examples
///
/// ```
/// use ruletree_validator::foundation::{CollectingSink, RuleFn};
/// use ruletree_validator::rules::min_number;
/// use serde_json::json;
///
/// let sink = CollectingSink::shared();
/// let rule = min_number(18.0).with_sink(sink.clone());
///
/// let violation = rule.check(&json!("16"), &json!({})).unwrap().unwrap();
/// assert_eq!(violation.error_message, "Expected a number of at least 18, got :value.");
///
/// assert!(rule.check(&json!(true), &json!({})).unwrap().is_some());
/// assert_eq!(sink.len(), 1);
/// ```
#[derive(Clone)]
pub struct NumberRule {
    bound: Bound,
    sink: Arc<dyn DiagnosticSink>,
}

impl NumberRule {
    fn new(bound: Bound) -> Self {
        Self {
            bound,
            sink: default_sink(),
        }
    }

    /// Sends warnings about non-numeric input to `sink`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Name reported in violations.
    #[must_use]
    pub fn rule_name(&self) -> &'static str {
        match self.bound {
            Bound::Min(_) => "minNumber",
            Bound::Max(_) => "maxNumber",
            Bound::Range(..) => "numberRange",
        }
    }

    fn accepts(&self, n: f64) -> bool {
        match self.bound {
            Bound::Min(min) => n >= min,
            Bound::Max(max) => n <= max,
            Bound::Range(min, max) => n >= min && n <= max,
        }
    }

    fn message(&self) -> String {
        match self.bound {
            Bound::Min(min) => format!("Expected a number of at least {min}, got :value."),
            Bound::Max(max) => format!("Expected a number of at most {max}, got :value."),
            Bound::Range(min, max) => {
                format!("Expected a number between {min} and {max}, got :value.")
            }
        }
    }
}

impl fmt::Debug for NumberRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NumberRule")
            .field("bound", &self.bound)
            .finish_non_exhaustive()
    }
}

impl RuleFn for NumberRule {
    fn check(&self, value: &Value, _root: &Value) -> RuleResult {
        match read_number(value) {
            Reading::Skip => Ok(None),
            Reading::Number(n) if self.accepts(n) => Ok(None),
            Reading::Number(_) => Ok(Some(Violation::new(
                self.rule_name(),
                value.clone(),
                self.message(),
            ))),
            Reading::NotANumber => {
                self.sink.warn(
                    self.rule_name(),
                    &format!("expected a number but received {}", type_name(value)),
                );
                Ok(Some(Violation::new(
                    self.rule_name(),
                    value.clone(),
                    "Expected a number, got :value.",
                )))
            }
        }
    }
}

/// Fails on numbers below `min`.
#[must_use]
pub fn min_number(min: f64) -> NumberRule {
    NumberRule::new(Bound::Min(min))
}

/// Fails on numbers above `max`.
#[must_use]
pub fn max_number(max: f64) -> NumberRule {
    NumberRule::new(Bound::Max(max))
}

/// Fails on numbers outside `min..=max`.
#[must_use]
pub fn number_range(min: f64, max: f64) -> NumberRule {
    NumberRule::new(Bound::Range(min, max))
}
