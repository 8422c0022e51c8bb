//! Core validation types and traits
//!
//! This module contains the building blocks every other module leans on:
//!
//! - **Traits**: [`RuleFn`], [`AsyncRuleFn`], [`RuleFnExt`]
//! - **Failures**: [`Violation`], the atomic unit of a failed rule
//! - **Errors**: [`Error`], configuration errors that abort a validation call
//! - **Diagnostics**: [`DiagnosticSink`] and its implementations
//!
//! # Architecture
//!
//! ## 1. One contract for rule functions
//!
//! A rule function receives the value under test and the validation root and
//! answers with one violation or nothing:
//!
//! ```rust,ignore
//! fn check(&self, value: &Value, root: &Value) -> Result<Option<Violation>, Error>;
//! ```
//!
//! The asynchronous variant returns the same answer through a future, and any
//! synchronous rule can be lifted with [`RuleFnExt::into_async`].
//!
//! ## 2. Failures are data, misconfiguration is an error
//!
//! A value that breaks a rule is reported as a [`Violation`] inside the error
//! tree. A rule tree that cannot be interpreted (a string where a rule belongs,
//! a rule list entry that is not a rule) is an [`Error`] and stops the call.
//!
//! ## 3. Messages carry the attempted value
//!
//! Messages may contain the `:value` placeholder; the field validator replaces
//! it before the violation reaches the error tree:
//!
//! ```rust,ignore
//! Violation::new("minNumber", json!(3), "Expected at least 5, got :value.")
//! ```

pub mod diagnostics;
pub mod error;
pub mod traits;
pub mod value;
pub mod violation;

pub use diagnostics::{
    CollectingSink, Diagnostic, DiagnosticSink, NoopSink, TracingSink, default_sink,
};
pub use error::{Error, Result};
pub use traits::{
    AsyncCheck, AsyncFnRule, AsyncRuleFn, Lifted, RuleFn, RuleFnExt, RuleResult, SyncCheck,
    async_rule,
};
pub use value::{display_value, is_falsy, property, type_name};
pub use violation::{VALUE_PLACEHOLDER, Violation};

// ============================================================================
// PRELUDE
// ============================================================================

/// Common imports for writing rule functions.
pub mod prelude {
    pub use super::{
        AsyncRuleFn, DiagnosticSink, Error, RuleFn, RuleFnExt, RuleResult, Violation,
    };
}
