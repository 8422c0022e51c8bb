//! Ordered lists of rule functions for primitive fields.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::foundation::{
    AsyncCheck, AsyncRuleFn, Error, Result, RuleFn, SyncCheck, display_value, is_falsy,
};

// ============================================================================
// RULE ENTRY
// ============================================================================

/// One slot of a [`RuleList`].
///
/// Empty slots make conditional lists easy to write
/// (`required()` always, `admin_only()` only for admins); literal slots come
/// from rule trees converted from JSON and are rejected when reached unless
/// they are falsy.
pub enum RuleEntry<C = SyncCheck> {
    /// A rule function.
    Check(C),
    /// Nothing to run; skipped.
    Empty,
    /// A plain value where a rule function belongs.
    Literal(Value),
}

impl<C> RuleEntry<C> {
    /// Returns the rule function to run, `None` for slots that are skipped.
    ///
    /// Truthy literals fail with [`Error::NotAFunction`].
    pub fn as_check(&self) -> Result<Option<&C>> {
        match self {
            Self::Check(check) => Ok(Some(check)),
            Self::Empty => Ok(None),
            Self::Literal(value) if is_falsy(value) => Ok(None),
            Self::Literal(value) => Err(Error::not_a_function(display_value(value))),
        }
    }
}

impl<C: Clone> Clone for RuleEntry<C> {
    fn clone(&self) -> Self {
        match self {
            Self::Check(check) => Self::Check(check.clone()),
            Self::Empty => Self::Empty,
            Self::Literal(value) => Self::Literal(value.clone()),
        }
    }
}

impl<C> fmt::Debug for RuleEntry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Check(_) => f.write_str("Check(<rule>)"),
            Self::Empty => f.write_str("Empty"),
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
        }
    }
}

impl<C> From<Value> for RuleEntry<C> {
    fn from(value: Value) -> Self {
        if is_falsy(&value) {
            Self::Empty
        } else {
            Self::Literal(value)
        }
    }
}

// ============================================================================
// RULE LIST
// ============================================================================

/// The rules of a primitive field, run in declared order.
///
/// Use the [`Rules`] and [`AsyncRules`] aliases (or the `rules!` /
/// `async_rules!` macros) to build one.
///
/// # Examples
///
/// ```
/// use ruletree_validator::rule::Rules;
/// use ruletree_validator::rules::{max_length, required};
///
/// let is_admin = false;
/// let list = Rules::new()
///     .rule(required())
///     .rule_if(is_admin, || max_length(8));
/// assert_eq!(list.len(), 2);
/// ```
pub struct RuleList<C = SyncCheck> {
    entries: Vec<RuleEntry<C>>,
}

/// A list of synchronous rule functions.
pub type Rules = RuleList<SyncCheck>;

/// A list of asynchronous rule functions.
pub type AsyncRules = RuleList<AsyncCheck>;

impl<C> RuleList<C> {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends a raw entry.
    #[must_use = "builder methods must be chained or built"]
    pub fn entry(mut self, entry: RuleEntry<C>) -> Self {
        self.entries.push(entry);
        self
    }

    /// Appends an empty slot.
    #[must_use = "builder methods must be chained or built"]
    pub fn empty(self) -> Self {
        self.entry(RuleEntry::Empty)
    }

    /// Appends a prepared check.
    #[must_use = "builder methods must be chained or built"]
    pub fn check(self, check: C) -> Self {
        self.entry(RuleEntry::Check(check))
    }

    /// Appends a check in place, for lists built in loops.
    pub fn push(&mut self, entry: RuleEntry<C>) {
        self.entries.push(entry);
    }

    /// Entries in declared order.
    pub fn iter(&self) -> std::slice::Iter<'_, RuleEntry<C>> {
        self.entries.iter()
    }

    /// Number of entries, empty slots included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the list has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl RuleList<SyncCheck> {
    /// Appends a synchronous rule function.
    #[must_use = "builder methods must be chained or built"]
    pub fn rule<R: RuleFn + 'static>(self, rule: R) -> Self {
        self.check(Arc::new(rule))
    }

    /// Appends the rule when `condition` holds, an empty slot otherwise.
    #[must_use = "builder methods must be chained or built"]
    pub fn rule_if<R, F>(self, condition: bool, make: F) -> Self
    where
        R: RuleFn + 'static,
        F: FnOnce() -> R,
    {
        if condition {
            self.rule(make())
        } else {
            self.empty()
        }
    }
}

impl RuleList<AsyncCheck> {
    /// Appends an asynchronous rule function.
    #[must_use = "builder methods must be chained or built"]
    pub fn rule<R: AsyncRuleFn + 'static>(self, rule: R) -> Self {
        self.check(Arc::new(rule))
    }

    /// Appends the rule when `condition` holds, an empty slot otherwise.
    #[must_use = "builder methods must be chained or built"]
    pub fn rule_if<R, F>(self, condition: bool, make: F) -> Self
    where
        R: AsyncRuleFn + 'static,
        F: FnOnce() -> R,
    {
        if condition {
            self.rule(make())
        } else {
            self.empty()
        }
    }
}

impl<C> Default for RuleList<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clone> Clone for RuleList<C> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<C> fmt::Debug for RuleList<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.entries).finish()
    }
}

impl<C> FromIterator<RuleEntry<C>> for RuleList<C> {
    fn from_iter<I: IntoIterator<Item = RuleEntry<C>>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a, C> IntoIterator for &'a RuleList<C> {
    type Item = &'a RuleEntry<C>;
    type IntoIter = std::slice::Iter<'a, RuleEntry<C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{RuleFnExt, RuleResult};
    use serde_json::json;

    fn pass(_value: &Value, _root: &Value) -> RuleResult {
        Ok(None)
    }

    #[test]
    fn conditional_rules_leave_empty_slots() {
        let list = Rules::new().rule(pass).rule_if(false, || pass).rule_if(true, || pass);
        let skipped = list
            .iter()
            .filter(|entry| matches!(entry, RuleEntry::Empty))
            .count();
        assert_eq!(list.len(), 3);
        assert_eq!(skipped, 1);
    }

    #[test]
    fn async_lists_accept_lifted_rules() {
        let list = AsyncRules::new().rule(pass.into_async());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn literal_entries() {
        let falsy: RuleEntry = RuleEntry::from(json!(0));
        assert!(matches!(falsy, RuleEntry::Empty));

        let truthy: RuleEntry = RuleEntry::from(json!("oops"));
        let Err(error) = truthy.as_check() else {
            panic!("a truthy literal must not be a rule function");
        };
        assert!(matches!(error, Error::NotAFunction { .. }));
        assert_eq!(error.to_string(), "oops is not a function");

        let raw: RuleEntry = RuleEntry::Literal(json!(false));
        assert!(raw.as_check().unwrap().is_none());
    }
}
