//! Rule function traits
//!
//! A rule function looks at one value (plus the validation root, for
//! cross-field checks) and either reports a single [`Violation`] or nothing.
//! The synchronous and asynchronous variants share that contract exactly;
//! only the way the answer is delivered differs.

use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::Value;

use crate::foundation::{Error, Violation};

/// What a rule function returns.
///
/// * `Ok(None)` - the value passed
/// * `Ok(Some(violation))` - the value failed
/// * `Err(error)` - the rule could not interpret its input (configuration error)
pub type RuleResult = Result<Option<Violation>, Error>;

/// A shared synchronous rule function, as stored in rule lists.
pub type SyncCheck = Arc<dyn RuleFn>;

/// A shared asynchronous rule function, as stored in rule lists.
pub type AsyncCheck = Arc<dyn AsyncRuleFn>;

// ============================================================================
// SYNC RULE FUNCTION
// ============================================================================

/// A synchronous rule function.
///
/// Implementations must not mutate their inputs and should be stateless so a
/// rule tree can be shared across concurrent validation calls.
///
/// Closures of the shape `Fn(&Value, &Value) -> RuleResult` implement this
/// trait automatically.
///
/// # Examples
///
/// ```
/// use ruletree_validator::foundation::{RuleFn, RuleResult, Violation};
/// use serde_json::{Value, json};
///
/// struct Even;
///
/// impl RuleFn for Even {
///     fn check(&self, value: &Value, _root: &Value) -> RuleResult {
///         match value.as_i64() {
///             Some(n) if n % 2 != 0 => Ok(Some(Violation::new("even", value.clone(), "Must be even."))),
///             _ => Ok(None),
///         }
///     }
/// }
///
/// assert!(Even.check(&json!(3), &json!({})).unwrap().is_some());
/// ```
pub trait RuleFn: Send + Sync {
    /// Checks `value`; `root` is the top-level object under validation.
    fn check(&self, value: &Value, root: &Value) -> RuleResult;
}

impl<F> RuleFn for F
where
    F: Fn(&Value, &Value) -> RuleResult + Send + Sync,
{
    fn check(&self, value: &Value, root: &Value) -> RuleResult {
        self(value, root)
    }
}

// ============================================================================
// ASYNC RULE FUNCTION
// ============================================================================

/// An asynchronous rule function with the same contract as [`RuleFn`].
pub trait AsyncRuleFn: Send + Sync {
    /// Checks `value`; `root` is the top-level object under validation.
    fn check<'a>(&'a self, value: &'a Value, root: &'a Value) -> BoxFuture<'a, RuleResult>;
}

/// Extension methods for synchronous rule functions.
pub trait RuleFnExt: RuleFn + Sized {
    /// Lifts the rule into an [`AsyncRuleFn`] that resolves immediately.
    fn into_async(self) -> Lifted<Self> {
        Lifted(self)
    }
}

impl<R: RuleFn> RuleFnExt for R {}

/// A synchronous rule running inside an asynchronous rule list.
#[derive(Debug, Clone, Copy)]
pub struct Lifted<R>(pub R);

impl<R: RuleFn> AsyncRuleFn for Lifted<R> {
    fn check<'a>(&'a self, value: &'a Value, root: &'a Value) -> BoxFuture<'a, RuleResult> {
        futures::future::ready(RuleFn::check(&self.0, value, root)).boxed()
    }
}

/// An asynchronous rule built from a closure over owned values.
///
/// See [`async_rule`].
#[derive(Clone)]
pub struct AsyncFnRule<F> {
    check_fn: F,
}

impl<F> std::fmt::Debug for AsyncFnRule<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncFnRule")
            .field("check_fn", &"<function>")
            .finish()
    }
}

impl<F, Fut> AsyncRuleFn for AsyncFnRule<F>
where
    F: Fn(Value, Value) -> Fut + Send + Sync,
    Fut: Future<Output = RuleResult> + Send + 'static,
{
    fn check<'a>(&'a self, value: &'a Value, root: &'a Value) -> BoxFuture<'a, RuleResult> {
        (self.check_fn)(value.clone(), root.clone()).boxed()
    }
}

/// Builds an asynchronous rule from a closure that receives owned copies of
/// the value and the root.
///
/// # Examples
///
/// ```
/// use ruletree_validator::foundation::{Violation, async_rule};
///
/// let username_free = async_rule(|value, _root| async move {
///     let taken = value.as_str() == Some("admin");
///     Ok(taken.then(|| Violation::new("usernameFree", value, "':value' is taken.")))
/// });
/// # let _ = username_free;
/// ```
pub fn async_rule<F, Fut>(check_fn: F) -> AsyncFnRule<F>
where
    F: Fn(Value, Value) -> Fut + Send + Sync,
    Fut: Future<Output = RuleResult> + Send + 'static,
{
    AsyncFnRule { check_fn }
}

// ============================================================================
// TESTS
// ============================================================================
