//! The atomic unit of validation failure.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::foundation::value::display_value;

/// Placeholder substituted with the attempted value in error messages.
pub const VALUE_PLACEHOLDER: &str = ":value";

// ============================================================================
// VIOLATION
// ============================================================================

/// A single rule failure.
///
/// Serializes as `{ "ruleName", "attemptedValue", "errorMessage" }`.
///
/// # Examples
///
/// ```
/// use ruletree_validator::foundation::Violation;
/// use serde_json::json;
///
/// let violation = Violation::new("minNumber", json!(3), "Expected at least 5, got :value.")
///     .interpolated();
/// assert_eq!(violation.error_message, "Expected at least 5, got 3.");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// Name of the rule that failed, e.g. `required`.
    pub rule_name: Cow<'static, str>,

    /// The value the rule was evaluated against.
    pub attempted_value: Value,

    /// Human-readable message.
    pub error_message: String,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(
        rule_name: impl Into<Cow<'static, str>>,
        attempted_value: Value,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            rule_name: rule_name.into(),
            attempted_value,
            error_message: error_message.into(),
        }
    }

    /// Replaces every `:value` in the message with the attempted value.
    #[must_use = "interpolation returns a new violation"]
    pub fn interpolated(mut self) -> Self {
        if self.error_message.contains(VALUE_PLACEHOLDER) {
            self.error_message = self
                .error_message
                .replace(VALUE_PLACEHOLDER, &display_value(&self.attempted_value));
        }
        self
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.rule_name, self.error_message)
    }
}
