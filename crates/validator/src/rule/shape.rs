//! Rule-shape classification
//!
//! The engine never looks at field names or values to decide how to validate
//! a key; it looks at the rule node. [`classify`] turns a node into a
//! [`Shape`] that borrows the parts the validators need.

use std::fmt;

use crate::foundation::{Error, Result, is_falsy, type_name};
use crate::rule::{
    ARRAY_ELEMENT_RULE_KEY, ARRAY_RULES_KEY, ArrayRule, DynamicRule, ObjectRule, Rule, RuleList,
};

// ============================================================================
// SHAPE
// ============================================================================

/// What a rule node asks the engine to do.
pub enum Shape<'a, C> {
    /// Skip the key.
    Absent,
    /// Run a rule list against the field value.
    Primitive(&'a RuleList<C>),
    /// Recurse into a nested object.
    Object(&'a ObjectRule<C>),
    /// Validate an array field.
    Array(ArrayShape<'a, C>),
    /// Build an array rule from the field value, then validate the array.
    Dynamic(&'a DynamicRule<C>),
}

impl<C> Shape<'_, C> {
    /// Short name of the shape, used in trace events.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Primitive(_) => "primitive",
            Self::Object(_) => "object",
            Self::Array(_) => "array",
            Self::Dynamic(_) => "dynamic",
        }
    }
}

impl<C> fmt::Debug for Shape<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The two halves of an array rule, however it was written.
pub struct ArrayShape<'a, C> {
    /// Rules run against the whole array.
    pub array_rules: Option<&'a RuleList<C>>,
    /// Rule run against every element.
    pub element_rule: Option<&'a Rule<C>>,
}

impl<'a, C> ArrayShape<'a, C> {
    /// An array rule that checks nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            array_rules: None,
            element_rule: None,
        }
    }

    /// Borrows an explicit [`ArrayRule`].
    #[must_use]
    pub fn from_array_rule(rule: &'a ArrayRule<C>) -> Self {
        Self {
            array_rules: rule.whole_array_rules(),
            element_rule: rule.element(),
        }
    }

    /// Reads an array-shaped [`ObjectRule`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArrayRules`] when `arrayRules` holds anything
    /// other than a rule list or a falsy value.
    pub fn from_object_rule(rule: &'a ObjectRule<C>) -> Result<Self> {
        let array_rules = match rule.get(ARRAY_RULES_KEY) {
            None => None,
            Some(node) if node.is_absent() => None,
            Some(Rule::Fields(list)) => Some(list),
            Some(other) => {
                return Err(Error::InvalidArrayRules {
                    found: other.kind(),
                });
            }
        };
        let element_rule = rule
            .get(ARRAY_ELEMENT_RULE_KEY)
            .filter(|node| !node.is_absent());
        Ok(Self {
            array_rules,
            element_rule,
        })
    }

    /// Returns true if neither half is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.array_rules.is_none() && self.element_rule.is_none()
    }
}

impl<C> Clone for ArrayShape<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for ArrayShape<'_, C> {}

impl<C> fmt::Debug for ArrayShape<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayShape")
            .field("array_rules", &self.array_rules)
            .field("element_rule", &self.element_rule)
            .finish()
    }
}

// ============================================================================
// CLASSIFIER
// ============================================================================

/// Classifies a rule node.
///
/// An object rule counts as an array rule when its keys are a non-empty
/// subset of `arrayRules` and `arrayElementRule`. An object carrying either
/// key next to other keys stays an object rule.
///
/// # Errors
///
/// Returns [`Error::InvalidRule`] for a truthy literal (a string, number or
/// boolean assigned to a rule key), and [`Error::InvalidArrayRules`] for an
/// array-shaped object whose `arrayRules` is not a rule list.
///
/// # Examples
///
/// ```
/// use ruletree_validator::rule::{ObjectRule, Rule, Rules, Shape, classify};
///
/// let rule: Rule = ObjectRule::new().field("arrayRules", Rules::new()).into();
/// assert!(matches!(classify(&rule).unwrap(), Shape::Array(_)));
///
/// let rule: Rule = serde_json::json!("oops").into();
/// assert_eq!(classify(&rule).unwrap_err().to_string(), "string is not a valid rule.");
/// ```
pub fn classify<C>(rule: &Rule<C>) -> Result<Shape<'_, C>> {
    match rule {
        Rule::Absent => Ok(Shape::Absent),
        Rule::Literal(value) if is_falsy(value) => Ok(Shape::Absent),
        Rule::Literal(value) => Err(Error::invalid_rule(type_name(value))),
        Rule::Fields(list) => Ok(Shape::Primitive(list)),
        Rule::Dynamic(dynamic) => Ok(Shape::Dynamic(dynamic)),
        Rule::Array(array) => Ok(Shape::Array(ArrayShape::from_array_rule(array))),
        Rule::Object(object) if object.is_array_shaped() => {
            ArrayShape::from_object_rule(object).map(Shape::Array)
        }
        Rule::Object(object) => {
            if object.has_mixed_array_keys() {
                tracing::debug!(
                    keys = ?object.keys().collect::<Vec<_>>(),
                    "object rule mixes array rule keys with other keys; validating it as a nested object"
                );
            }
            Ok(Shape::Object(object))
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
