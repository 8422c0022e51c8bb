//! Facade configuration

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Message reported when validation passes.
pub const DEFAULT_VALID_MESSAGE: &str = "Validation passed.";

/// Message reported when validation fails.
pub const DEFAULT_INVALID_MESSAGE: &str = "Validation failed.";

/// Settings of a [`Validator`](crate::validator::Validator).
///
/// Every field has a default, so a partial document deserializes:
///
/// ```
/// use ruletree_validator::config::ValidatorConfig;
///
/// let config: ValidatorConfig =
///     serde_json::from_str(r#"{ "invalidMessage": "Please fix the highlighted fields." }"#).unwrap();
/// assert_eq!(config.valid_message, "Validation passed.");
/// assert_eq!(config.invalid_message, "Please fix the highlighted fields.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidatorConfig {
    /// Report message for a passing object
    pub valid_message: Cow<'static, str>,

    /// Report message for a failing object
    pub invalid_message: Cow<'static, str>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            valid_message: Cow::Borrowed(DEFAULT_VALID_MESSAGE),
            invalid_message: Cow::Borrowed(DEFAULT_INVALID_MESSAGE),
        }
    }
}

impl ValidatorConfig {
    /// Sets the message for a passing object.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_valid_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.valid_message = message.into();
        self
    }

    /// Sets the message for a failing object.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_invalid_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.invalid_message = message.into();
        self
    }

    /// Picks the message for a result.
    #[must_use]
    pub fn message(&self, is_valid: bool) -> &str {
        if is_valid {
            &self.valid_message
        } else {
            &self.invalid_message
        }
    }
}
