//! String format rules
//!
//! Both rules ignore `null`, the empty string and non-string values; use
//! [`required`](super::required) to demand a value.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::foundation::{Error, RuleFn, RuleResult, Violation};

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$",
    )
    .expect("email pattern compiles")
});

fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

// ============================================================================
// EMAIL ADDRESS
// ============================================================================

crate::rule! {
    /// Fails on strings that are not an email address with a dotted domain.
    pub EmailAddress as "emailAddress";
    check(value) { non_empty_str(value).is_none_or(|s| EMAIL_REGEX.is_match(s)) }
    message(value) { ":value is not a valid email address." }
    fn email_address();
}

// ============================================================================
// PATTERN
// ============================================================================

/// Fails on strings that do not match a regular expression.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
    message: String,
}

impl Pattern {
    /// Name reported in violations.
    pub const RULE_NAME: &'static str = "pattern";

    /// Compiles `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] if the pattern does not compile.
    pub fn new(pattern: &str) -> Result<Self, Error> {
        let regex = Regex::new(pattern).map_err(|source| Error::InvalidPattern {
            pattern: pattern.to_owned(),
            source,
        })?;
        Ok(Self {
            regex,
            message: String::from(":value does not have the expected format."),
        })
    }

    /// Replaces the violation message.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// The compiled expression.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl RuleFn for Pattern {
    fn check(&self, value: &Value, _root: &Value) -> RuleResult {
        let failed = non_empty_str(value).is_some_and(|s| !self.regex.is_match(s));
        Ok(failed.then(|| Violation::new(Self::RULE_NAME, value.clone(), self.message.clone())))
    }
}

/// Creates a [`Pattern`] rule.
///
/// # Errors
///
/// Returns [`Error::InvalidPattern`] if the pattern does not compile.
///
/// # Examples
///
/// ```
/// use ruletree_validator::rules::pattern;
///
/// assert!(pattern(r"^\d{5}$").is_ok());
/// assert!(pattern(r"(unclosed").is_err());
/// ```
pub fn pattern(pattern: &str) -> Result<Pattern, Error> {
    Pattern::new(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!("ada@example.com"), true)]
    #[case(json!("first.last+tag@mail.example.org"), true)]
    #[case(json!("ada@localhost"), false)]
    #[case(json!("not an email"), false)]
    #[case(json!(""), true)]
    #[case(json!(null), true)]
    fn email_cases(#[case] value: Value, #[case] passes: bool) {
        let result = email_address().check(&value, &json!({})).unwrap();
        assert_eq!(result.is_none(), passes, "value: {value}");
    }

    #[test]
    fn pattern_matches_and_reports() {
        let rule = pattern(r"^\d{5}$").unwrap().with_message("Zip code must be five digits.");
        let root = json!({});
        assert!(rule.check(&json!("12345"), &root).unwrap().is_none());
        let violation = rule.check(&json!("1234"), &root).unwrap().unwrap();
        assert_eq!(violation.rule_name, "pattern");
        assert_eq!(violation.error_message, "Zip code must be five digits.");
    }

    #[test]
    fn invalid_patterns_are_configuration_errors() {
        let error = pattern("(").unwrap_err();
        assert!(matches!(error, Error::InvalidPattern { ref pattern, .. } if pattern == "("));
    }
}
