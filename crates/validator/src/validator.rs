//! Validator facade
//!
//! [`Validator`] and [`AsyncValidator`] own a rule tree and turn the engine's
//! error tree into a [`ValidationReport`]: a valid flag, a human message and
//! the tree itself.
//!
//! # Examples
//!
//! ```
//! use ruletree_validator::rule::{ObjectRule, Rules};
//! use ruletree_validator::rules::{email_address, required};
//! use ruletree_validator::validator::Validator;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct SignUp {
//!     email: String,
//!     name: String,
//! }
//!
//! let validator = Validator::new(
//!     ObjectRule::new()
//!         .field("email", Rules::new().rule(required()).rule(email_address()))
//!         .field("name", Rules::new().rule(required())),
//! );
//!
//! let report = validator
//!     .validate(&SignUp { email: "nope".into(), name: "Ada".into() })
//!     .unwrap();
//! assert!(!report.is_valid);
//! assert_eq!(report.message, "Validation failed.");
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ValidatorConfig;
use crate::engine::{validate_field, validate_field_async, validate_object, validate_object_async};
use crate::foundation::Result;
use crate::report::{ErrorTree, FieldValidation};
use crate::rule::{AsyncObjectRule, ObjectRule};

// ============================================================================
// REPORT
// ============================================================================

/// Outcome of validating a whole object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// True when nothing failed.
    pub is_valid: bool,
    /// The configured pass or fail message.
    pub message: String,
    /// The failing branches, absent when valid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<ErrorTree>,
}

impl ValidationReport {
    /// Builds a report from an engine result.
    #[must_use]
    pub fn new(errors: Option<ErrorTree>, config: &ValidatorConfig) -> Self {
        let is_valid = !errors.as_ref().is_some_and(ErrorTree::has_failures);
        Self {
            is_valid,
            message: config.message(is_valid).to_owned(),
            errors,
        }
    }

    /// `Ok(())` when valid, the error tree otherwise.
    ///
    /// # Errors
    ///
    /// Returns the error tree of an invalid report.
    pub fn into_result(self) -> std::result::Result<(), ErrorTree> {
        match self.errors {
            Some(errors) if !self.is_valid => Err(errors),
            _ => Ok(()),
        }
    }
}

// ============================================================================
// SYNC VALIDATOR
// ============================================================================

/// Validates objects against one object rule.
#[derive(Debug, Clone)]
pub struct Validator {
    rule: ObjectRule,
    config: ValidatorConfig,
}

impl Validator {
    /// Creates a validator with the default configuration.
    #[must_use]
    pub fn new(rule: ObjectRule) -> Self {
        Self {
            rule,
            config: ValidatorConfig::default(),
        }
    }

    /// Replaces the configuration.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    /// The rule tree.
    #[must_use]
    pub fn rule(&self) -> &ObjectRule {
        &self.rule
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Serializes `data` to JSON and validates it.
    ///
    /// # Errors
    ///
    /// Fails when `data` cannot be serialized, or on any configuration error
    /// raised by the rule tree.
    pub fn validate<T: Serialize + ?Sized>(&self, data: &T) -> Result<ValidationReport> {
        let value = serde_json::to_value(data)?;
        self.validate_value(&value)
    }

    /// Validates a JSON value; the value is also the root.
    ///
    /// # Errors
    ///
    /// Fails on any configuration error raised by the rule tree.
    pub fn validate_value(&self, value: &Value) -> Result<ValidationReport> {
        let errors = validate_object(value, value, &self.rule)?;
        let report = ValidationReport::new(errors, &self.config);
        tracing::debug!(
            is_valid = report.is_valid,
            failing_keys = report.errors.as_ref().map_or(0, ErrorTree::len),
            "validated object"
        );
        Ok(report)
    }

    /// Validates a single field of `value`. Fields without a rule are valid.
    ///
    /// # Errors
    ///
    /// Fails on any configuration error raised by the field's rule.
    pub fn validate_field(&self, value: &Value, field: &str) -> Result<FieldValidation> {
        let result = match self.rule.get(field) {
            Some(rule) => validate_field(value, field, rule)?,
            None => FieldValidation::valid(field),
        };
        tracing::debug!(field, is_valid = result.is_valid, "validated field");
        Ok(result)
    }
}

// ============================================================================
// ASYNC VALIDATOR
// ============================================================================

/// Validates objects against one object rule with asynchronous rule functions.
#[derive(Debug, Clone)]
pub struct AsyncValidator {
    rule: AsyncObjectRule,
    config: ValidatorConfig,
}

impl AsyncValidator {
    /// Creates a validator with the default configuration.
    #[must_use]
    pub fn new(rule: AsyncObjectRule) -> Self {
        Self {
            rule,
            config: ValidatorConfig::default(),
        }
    }

    /// Replaces the configuration.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    /// The rule tree.
    #[must_use]
    pub fn rule(&self) -> &AsyncObjectRule {
        &self.rule
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Serializes `data` to JSON and validates it.
    ///
    /// # Errors
    ///
    /// Fails when `data` cannot be serialized, or on any configuration error
    /// raised by the rule tree.
    pub async fn validate<T: Serialize + ?Sized>(&self, data: &T) -> Result<ValidationReport> {
        let value = serde_json::to_value(data)?;
        self.validate_value(&value).await
    }

    /// Validates a JSON value; the value is also the root.
    ///
    /// # Errors
    ///
    /// Fails on any configuration error raised by the rule tree.
    pub async fn validate_value(&self, value: &Value) -> Result<ValidationReport> {
        let errors = validate_object_async(value, value, &self.rule).await?;
        let report = ValidationReport::new(errors, &self.config);
        tracing::debug!(
            is_valid = report.is_valid,
            failing_keys = report.errors.as_ref().map_or(0, ErrorTree::len),
            "validated object"
        );
        Ok(report)
    }

    /// Validates a single field of `value`. Fields without a rule are valid.
    ///
    /// # Errors
    ///
    /// Fails on any configuration error raised by the field's rule.
    pub async fn validate_field(&self, value: &Value, field: &str) -> Result<FieldValidation> {
        let result = match self.rule.get(field) {
            Some(rule) => validate_field_async(value, field, rule).await?,
            None => FieldValidation::valid(field),
        };
        tracing::debug!(field, is_valid = result.is_valid, "validated field");
        Ok(result)
    }
}
