//! Configuration errors
//!
//! A failed validation is never an error: violations travel inside the
//! [`ErrorTree`](crate::report::ErrorTree). The variants below describe a
//! broken rule tree or a rule handed input it cannot interpret. They abort
//! the whole validation call and propagate to the caller through `?`.

use std::borrow::Cow;

// ============================================================================
// ERROR
// ============================================================================

/// A programmer or configuration error raised while walking a rule tree.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A rule was required but the tree (or a dynamic rule) produced none.
    #[error("validation rule is null or undefined")]
    MissingRule,

    /// A plain value sits where a rule belongs.
    ///
    /// `kind` is the JavaScript-style `typeof` name of the value
    /// (`string`, `number`, `boolean`).
    #[error("{kind} is not a valid rule.")]
    InvalidRule {
        /// Type name of the offending value.
        kind: &'static str,
    },

    /// A rule list entry is a plain value instead of a rule function.
    #[error("{value} is not a function")]
    NotAFunction {
        /// Display form of the offending entry.
        value: String,
    },

    /// An explicit array rule was used as an array element rule.
    #[error("an array rule is not a valid array element rule; use a rule list or an object rule")]
    InvalidElementRule,

    /// A dynamic rule produced something other than the static rule its
    /// position requires.
    #[error("dynamic {position} rule must resolve to {expected}")]
    UnresolvedDynamicRule {
        /// Where the dynamic rule was found (`field` or `element`).
        position: &'static str,
        /// What the resolved rule had to be.
        expected: &'static str,
    },

    /// The `arrayRules` entry of an array-shaped object rule is not a rule list.
    #[error("arrayRules must be a rule list, found {found}")]
    InvalidArrayRules {
        /// Kind of rule that was found instead.
        found: &'static str,
    },

    /// The array field validator was handed a rule that is not an array rule.
    #[error("expected an array rule but found {found}")]
    ExpectedArrayRule {
        /// Kind of rule that was found instead.
        found: &'static str,
    },

    /// A rule function received structurally wrong input.
    #[error("{rule}: expected {expected} but received {received}")]
    UnexpectedInput {
        /// Name of the rule that rejected the input.
        rule: Cow<'static, str>,
        /// Description of the expected input.
        expected: &'static str,
        /// Type name of the received input.
        received: &'static str,
    },

    /// A pattern rule was built from an invalid regular expression.
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        /// The rejected pattern.
        pattern: String,
        /// Underlying regex error.
        #[source]
        source: regex::Error,
    },

    /// The facade could not turn the input into a JSON value.
    #[error("failed to convert input to JSON: {0}")]
    Serialize(#[from] serde_json::Error),
}

// ============================================================================
// CONSTRUCTOR HELPERS
// ============================================================================

impl Error {
    /// Creates an [`Error::InvalidRule`] for a value of the given type.
    #[must_use]
    pub fn invalid_rule(kind: &'static str) -> Self {
        Self::InvalidRule { kind }
    }

    /// Creates an [`Error::NotAFunction`] from the offending entry.
    pub fn not_a_function(value: impl Into<String>) -> Self {
        Self::NotAFunction {
            value: value.into(),
        }
    }

    /// Creates an [`Error::UnexpectedInput`] for a rule.
    pub fn unexpected_input(
        rule: impl Into<Cow<'static, str>>,
        expected: &'static str,
        received: &'static str,
    ) -> Self {
        Self::UnexpectedInput {
            rule: rule.into(),
            expected,
            received,
        }
    }

    /// Returns true if the error was raised by a rule function rather than
    /// by the shape of the rule tree.
    #[must_use]
    pub fn is_rule_input_error(&self) -> bool {
        matches!(self, Self::UnexpectedInput { .. })
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_the_documented_wording() {
        assert_eq!(
            Error::MissingRule.to_string(),
            "validation rule is null or undefined"
        );
        assert_eq!(
            Error::invalid_rule("string").to_string(),
            "string is not a valid rule."
        );
        assert_eq!(
            Error::not_a_function("42").to_string(),
            "42 is not a function"
        );
    }

    #[test]
    fn unexpected_input_names_the_rule() {
        let error = Error::unexpected_input("arrayMinLen", "an array", "string");
        assert_eq!(
            error.to_string(),
            "arrayMinLen: expected an array but received string"
        );
        assert!(error.is_rule_input_error());
        assert!(!Error::MissingRule.is_rule_input_error());
    }

    #[test]
    fn serde_errors_convert() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = source.into();
        assert!(matches!(error, Error::Serialize(_)));
    }
}
