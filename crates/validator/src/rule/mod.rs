//! Rule trees
//!
//! A rule tree mirrors the shape of the object it validates. Every key of an
//! [`ObjectRule`] maps to one [`Rule`] node:
//!
//! | Node | Validates |
//! |------|-----------|
//! | [`Rule::Fields`] | a primitive field with a [`RuleList`] |
//! | [`Rule::Object`] | a nested object with another [`ObjectRule`] |
//! | [`Rule::Array`] | an array field with an [`ArrayRule`] |
//! | [`Rule::Dynamic`] | an array field whose rule is built from `(value, root)` |
//! | [`Rule::Absent`] | nothing; the key is skipped |
//!
//! The tree, not the object, drives traversal: keys that exist only on the
//! object are never looked at, and keys that exist only in the tree are still
//! validated (against `null`).
//!
//! An [`ObjectRule`] whose keys are a non-empty subset of `arrayRules` and
//! `arrayElementRule` is read as an array rule, which lets trees converted
//! from JSON-like descriptions express array fields without the explicit
//! [`ArrayRule`] type. See [`shape`] for the exact classification.
//!
//! # Examples
//!
//! ```
//! use ruletree_validator::rule::{ArrayRule, ObjectRule, Rules};
//! use ruletree_validator::rules::{array_min_len, required};
//!
//! let order = ObjectRule::new()
//!     .field("customer", Rules::new().rule(required()))
//!     .field(
//!         "items",
//!         ArrayRule::new()
//!             .array_rules(Rules::new().rule(array_min_len(1)))
//!             .element_rule(ObjectRule::new().field("productId", Rules::new().rule(required()))),
//!     );
//! assert_eq!(order.len(), 2);
//! ```

pub mod list;
pub mod shape;

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::foundation::{AsyncCheck, SyncCheck, is_falsy, type_name};

pub use list::{AsyncRules, RuleEntry, RuleList, Rules};
pub use shape::{ArrayShape, Shape, classify};

/// Key holding whole-array rules in an array-shaped object rule.
pub const ARRAY_RULES_KEY: &str = "arrayRules";

/// Key holding the per-element rule in an array-shaped object rule.
pub const ARRAY_ELEMENT_RULE_KEY: &str = "arrayElementRule";

// ============================================================================
// RULE NODE
// ============================================================================

/// One node of a rule tree.
pub enum Rule<C = SyncCheck> {
    /// No rule; the key is skipped.
    Absent,
    /// Rule functions for a primitive field.
    Fields(RuleList<C>),
    /// Rules for a nested object.
    Object(ObjectRule<C>),
    /// Rules for an array field.
    Array(ArrayRule<C>),
    /// A rule computed from the value and the root at validation time.
    Dynamic(DynamicRule<C>),
    /// A plain value where a rule belongs; only falsy values are tolerated.
    Literal(Value),
}

/// A rule node holding asynchronous rule functions.
pub type AsyncRule = Rule<AsyncCheck>;

impl<C> Rule<C> {
    /// Creates a dynamic rule node.
    ///
    /// At field level the closure receives the field value and must return an
    /// array rule; as an array element rule it receives each element and must
    /// return a rule list or an object rule.
    pub fn dynamic<F>(build: F) -> Self
    where
        F: Fn(&Value, &Value) -> Rule<C> + Send + Sync + 'static,
    {
        Self::Dynamic(DynamicRule::new(build))
    }

    /// Short description of the node, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Absent => "no rule",
            Self::Fields(_) => "a rule list",
            Self::Object(_) => "an object rule",
            Self::Array(_) => "an array rule",
            Self::Dynamic(_) => "a dynamic rule",
            Self::Literal(value) => type_name(value),
        }
    }

    /// Returns true for [`Rule::Absent`] and falsy literals.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        match self {
            Self::Absent => true,
            Self::Literal(value) => is_falsy(value),
            _ => false,
        }
    }
}

impl<C: Clone> Clone for Rule<C> {
    fn clone(&self) -> Self {
        match self {
            Self::Absent => Self::Absent,
            Self::Fields(list) => Self::Fields(list.clone()),
            Self::Object(object) => Self::Object(object.clone()),
            Self::Array(array) => Self::Array(array.clone()),
            Self::Dynamic(dynamic) => Self::Dynamic(dynamic.clone()),
            Self::Literal(value) => Self::Literal(value.clone()),
        }
    }
}

impl<C> fmt::Debug for Rule<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("Absent"),
            Self::Fields(list) => f.debug_tuple("Fields").field(list).finish(),
            Self::Object(object) => f.debug_tuple("Object").field(object).finish(),
            Self::Array(array) => f.debug_tuple("Array").field(array).finish(),
            Self::Dynamic(dynamic) => f.debug_tuple("Dynamic").field(dynamic).finish(),
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
        }
    }
}

impl<C> Default for Rule<C> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<C> From<RuleList<C>> for Rule<C> {
    fn from(list: RuleList<C>) -> Self {
        Self::Fields(list)
    }
}

impl<C> From<ObjectRule<C>> for Rule<C> {
    fn from(object: ObjectRule<C>) -> Self {
        Self::Object(object)
    }
}

impl<C> From<ArrayRule<C>> for Rule<C> {
    fn from(array: ArrayRule<C>) -> Self {
        Self::Array(array)
    }
}

impl<C> From<DynamicRule<C>> for Rule<C> {
    fn from(dynamic: DynamicRule<C>) -> Self {
        Self::Dynamic(dynamic)
    }
}

impl<C, R> From<Option<R>> for Rule<C>
where
    R: Into<Rule<C>>,
{
    fn from(rule: Option<R>) -> Self {
        rule.map_or(Self::Absent, Into::into)
    }
}

/// Converts a JSON description into a rule tree.
///
/// Falsy values become [`Rule::Absent`], arrays become rule lists of literal
/// entries, objects become object rules, anything else stays a literal.
/// Such a tree carries no rule functions; it is how configuration mistakes
/// (a string assigned to a rule key, a value inside a rule list) surface as
/// errors at validation time.
impl<C> From<Value> for Rule<C> {
    fn from(value: Value) -> Self {
        if is_falsy(&value) {
            return Self::Absent;
        }
        match value {
            Value::Array(items) => Self::Fields(items.into_iter().map(RuleEntry::from).collect()),
            Value::Object(map) => Self::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
            other => Self::Literal(other),
        }
    }
}

// ============================================================================
// OBJECT RULE
// ============================================================================

/// Rules for the keys of an object, walked in insertion order.
pub struct ObjectRule<C = SyncCheck> {
    fields: IndexMap<String, Rule<C>>,
}

/// An object rule holding asynchronous rule functions.
pub type AsyncObjectRule = ObjectRule<AsyncCheck>;

impl<C> ObjectRule<C> {
    /// Creates an object rule with no keys.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
        }
    }

    /// Adds (or replaces) the rule for `key`.
    #[must_use = "builder methods must be chained or built"]
    pub fn field(mut self, key: impl Into<String>, rule: impl Into<Rule<C>>) -> Self {
        self.insert(key, rule);
        self
    }

    /// Adds (or replaces) the rule for `key` in place.
    pub fn insert(&mut self, key: impl Into<String>, rule: impl Into<Rule<C>>) {
        self.fields.insert(key.into(), rule.into());
    }

    /// Returns the rule for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Rule<C>> {
        self.fields.get(key)
    }

    /// Returns true if `key` has a rule (absent or not).
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Keys and rules in traversal order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Rule<C>> {
        self.fields.iter()
    }

    /// Keys in traversal order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the rule has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns true if every key is `arrayRules` or `arrayElementRule` and
    /// there is at least one key.
    ///
    /// Extra keys disqualify the object: `{arrayRules, label}` is an ordinary
    /// nested object rule.
    #[must_use]
    pub fn is_array_shaped(&self) -> bool {
        !self.fields.is_empty() && self.keys().all(is_array_key)
    }

    /// Returns true if the object mixes array-rule keys with other keys.
    ///
    /// Such an object is validated as a nested object rule, which is rarely
    /// what the author meant.
    #[must_use]
    pub fn has_mixed_array_keys(&self) -> bool {
        let array_keys = self.keys().filter(|key| is_array_key(key)).count();
        array_keys > 0 && array_keys < self.fields.len()
    }
}

fn is_array_key(key: &str) -> bool {
    key == ARRAY_RULES_KEY || key == ARRAY_ELEMENT_RULE_KEY
}

impl<C> Default for ObjectRule<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clone> Clone for ObjectRule<C> {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields.clone(),
        }
    }
}

impl<C> fmt::Debug for ObjectRule<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.fields.iter()).finish()
    }
}

impl<C, K: Into<String>> FromIterator<(K, Rule<C>)> for ObjectRule<C> {
    fn from_iter<I: IntoIterator<Item = (K, Rule<C>)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(key, rule)| (key.into(), rule))
                .collect(),
        }
    }
}

impl<'a, C> IntoIterator for &'a ObjectRule<C> {
    type Item = (&'a String, &'a Rule<C>);
    type IntoIter = indexmap::map::Iter<'a, String, Rule<C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

// ============================================================================
// ARRAY RULE
// ============================================================================

/// Rules for an array field.
///
/// `array_rules` run against the whole array (length checks and the like);
/// the element rule runs against every element and may be a rule list, an
/// object rule, or a dynamic rule evaluated per element.
pub struct ArrayRule<C = SyncCheck> {
    array_rules: Option<RuleList<C>>,
    element_rule: Option<Box<Rule<C>>>,
}

/// An array rule holding asynchronous rule functions.
pub type AsyncArrayRule = ArrayRule<AsyncCheck>;

impl<C> ArrayRule<C> {
    /// Creates an array rule that checks nothing.
    #[must_use]
    pub fn new() -> Self {
        Self {
            array_rules: None,
            element_rule: None,
        }
    }

    /// Sets the rules applied to the whole array.
    #[must_use = "builder methods must be chained or built"]
    pub fn array_rules(mut self, rules: RuleList<C>) -> Self {
        self.array_rules = Some(rules);
        self
    }

    /// Sets the rule applied to every element.
    #[must_use = "builder methods must be chained or built"]
    pub fn element_rule(mut self, rule: impl Into<Rule<C>>) -> Self {
        let rule = rule.into();
        self.element_rule = (!rule.is_absent()).then(|| Box::new(rule));
        self
    }

    /// Sets a dynamic element rule built from `(element, root)`.
    #[must_use = "builder methods must be chained or built"]
    pub fn dynamic_element_rule<F>(self, build: F) -> Self
    where
        F: Fn(&Value, &Value) -> Rule<C> + Send + Sync + 'static,
    {
        self.element_rule(Rule::dynamic(build))
    }

    /// The whole-array rules, if any.
    #[must_use]
    pub fn whole_array_rules(&self) -> Option<&RuleList<C>> {
        self.array_rules.as_ref()
    }

    /// The element rule, if any.
    #[must_use]
    pub fn element(&self) -> Option<&Rule<C>> {
        self.element_rule.as_deref()
    }
}

impl<C> Default for ArrayRule<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clone> Clone for ArrayRule<C> {
    fn clone(&self) -> Self {
        Self {
            array_rules: self.array_rules.clone(),
            element_rule: self.element_rule.clone(),
        }
    }
}

impl<C> fmt::Debug for ArrayRule<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayRule")
            .field("array_rules", &self.array_rules)
            .field("element_rule", &self.element_rule)
            .finish()
    }
}

// ============================================================================
// DYNAMIC RULE
// ============================================================================

type BuildFn<C> = dyn Fn(&Value, &Value) -> Rule<C> + Send + Sync;

/// A rule built at validation time from the value under test and the root.
pub struct DynamicRule<C = SyncCheck> {
    build: Arc<BuildFn<C>>,
}

impl<C> DynamicRule<C> {
    /// Wraps a rule-building closure.
    pub fn new<F>(build: F) -> Self
    where
        F: Fn(&Value, &Value) -> Rule<C> + Send + Sync + 'static,
    {
        Self {
            build: Arc::new(build),
        }
    }

    /// Builds the rule for `value`.
    pub fn resolve(&self, value: &Value, root: &Value) -> Rule<C> {
        (self.build)(value, root)
    }
}

impl<C> Clone for DynamicRule<C> {
    fn clone(&self) -> Self {
        Self {
            build: Arc::clone(&self.build),
        }
    }
}

impl<C> fmt::Debug for DynamicRule<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DynamicRule(<function>)")
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_rule_keeps_insertion_order() {
        let rule: ObjectRule = ObjectRule::new()
            .field("zeta", Rules::new())
            .field("alpha", Rules::new())
            .field("mid", Rules::new());
        let keys: Vec<_> = rule.keys().collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn array_shape_is_a_subset_test() {
        let only_rules: ObjectRule = ObjectRule::new().field(ARRAY_RULES_KEY, Rules::new());
        let only_element: ObjectRule =
            ObjectRule::new().field(ARRAY_ELEMENT_RULE_KEY, ObjectRule::new());
        let both: ObjectRule = ObjectRule::new()
            .field(ARRAY_ELEMENT_RULE_KEY, Rules::new())
            .field(ARRAY_RULES_KEY, Rules::new());
        let extra: ObjectRule = ObjectRule::new()
            .field(ARRAY_RULES_KEY, Rules::new())
            .field("somethingElse", Rules::new());
        let empty: ObjectRule = ObjectRule::new();

        assert!(only_rules.is_array_shaped());
        assert!(only_element.is_array_shaped());
        assert!(both.is_array_shaped());
        assert!(!extra.is_array_shaped());
        assert!(extra.has_mixed_array_keys());
        assert!(!empty.is_array_shaped());
        assert!(!both.has_mixed_array_keys());
    }

    #[test]
    fn json_descriptions_convert_to_rule_nodes() {
        let rule: Rule = Rule::from(json!({
            "name": "not-a-rule",
            "skipped": null,
            "tags": ["x", 0],
        }));
        let Rule::Object(object) = rule else {
            panic!("expected an object rule");
        };
        assert!(matches!(object.get("name"), Some(Rule::Literal(_))));
        assert!(matches!(object.get("skipped"), Some(Rule::Absent)));
        let Some(Rule::Fields(list)) = object.get("tags") else {
            panic!("expected a rule list");
        };
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn absent_element_rules_are_dropped() {
        let array: ArrayRule = ArrayRule::new().element_rule(None::<Rules>);
        assert!(array.element().is_none());
    }

    #[test]
    fn dynamic_rules_build_per_value() {
        let dynamic: DynamicRule = DynamicRule::new(|value, _root| {
            if value.is_array() {
                Rule::Array(ArrayRule::new())
            } else {
                Rule::Absent
            }
        });
        assert!(matches!(dynamic.resolve(&json!([]), &json!({})), Rule::Array(_)));
        assert!(dynamic.resolve(&json!(1), &json!({})).is_absent());
    }
}
