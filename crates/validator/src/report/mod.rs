//! Error trees
//!
//! Validation results mirror the rule tree that produced them, but only the
//! failing branches are kept. A key is present only when something under it
//! failed, so `None` (no tree at all) is the one and only "valid" signal.
//!
//! The serialized form is the stable wire shape:
//!
//! ```json
//! {
//!   "name": [{ "ruleName": "required", "attemptedValue": "", "errorMessage": "This field is required." }],
//!   "orderItems": {
//!     "arrayElementErrors": [
//!       { "index": 1, "errors": { "productId": [ ... ] }, "attemptedValue": { "productId": "" } }
//!     ]
//!   }
//! }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;

use crate::foundation::{Violation, type_name};

const ARRAY_ERRORS_KEY: &str = "arrayErrors";
const ARRAY_ELEMENT_ERRORS_KEY: &str = "arrayElementErrors";

// ============================================================================
// ERROR TREE
// ============================================================================

/// Failures of one object, keyed by field in rule order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorTree {
    entries: IndexMap<String, FieldErrors>,
}

impl ErrorTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts failures for `key`; empty failures are dropped.
    pub fn insert(&mut self, key: impl Into<String>, errors: FieldErrors) {
        if !errors.is_empty() {
            self.entries.insert(key.into(), errors);
        }
    }

    /// Inserts the violations of a primitive field, if there are any.
    pub fn insert_violations(&mut self, key: impl Into<String>, violations: Vec<Violation>) {
        self.insert(key, FieldErrors::Violations(violations));
    }

    /// Inserts the result of a nested object, if it failed.
    pub fn insert_object(&mut self, key: impl Into<String>, nested: Option<ErrorTree>) {
        if let Some(nested) = nested {
            self.insert(key, FieldErrors::Object(nested));
        }
    }

    /// Inserts the result of an array field, if it failed.
    pub fn insert_array(&mut self, key: impl Into<String>, errors: ArrayErrors) {
        self.insert(key, FieldErrors::Array(errors));
    }

    /// Failures recorded for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldErrors> {
        self.entries.get(key)
    }

    /// Returns true if `key` failed.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Failing keys in rule order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Failing keys and their failures in rule order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, FieldErrors> {
        self.entries.iter()
    }

    /// Number of failing keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no key failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if any top-level entry holds a failure.
    ///
    /// Trees built by the engine never hold empty entries; this also covers
    /// trees assembled by hand or deserialized from elsewhere.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.entries.values().any(|errors| !errors.is_empty())
    }

    /// `None` for an empty tree, the tree otherwise.
    #[must_use]
    pub fn into_option(self) -> Option<Self> {
        (!self.is_empty()).then_some(self)
    }

    /// Total number of violations anywhere in the tree.
    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.entries.values().map(FieldErrors::violation_count).sum()
    }
}

impl<'a> IntoIterator for &'a ErrorTree {
    type Item = (&'a String, &'a FieldErrors);
    type IntoIter = indexmap::map::Iter<'a, String, FieldErrors>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ============================================================================
// FIELD ERRORS
// ============================================================================

/// Failures of a single key, shaped like the rule that produced them.
///
/// # Reading the wire form back
///
/// A JSON list reads as [`FieldErrors::Violations`]. A JSON object reads as
/// [`FieldErrors::Array`] only when every key is `arrayErrors` or
/// `arrayElementErrors` and the values have the array-error shape; every
/// other object reads as a nested [`ErrorTree`]. One wire shape cannot be
/// told apart: a nested object whose only failing field is named
/// `arrayErrors` and holds violations serializes exactly like an array
/// field with whole-array violations, and reads back as the latter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldErrors {
    /// Violations of a primitive field.
    Violations(Vec<Violation>),
    /// Failures of an array field.
    Array(ArrayErrors),
    /// Failures of a nested object.
    Object(ErrorTree),
}

impl FieldErrors {
    /// Returns true if nothing failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Violations(violations) => violations.is_empty(),
            Self::Array(errors) => errors.is_empty(),
            Self::Object(tree) => tree.is_empty(),
        }
    }

    /// The violations of a primitive field.
    #[must_use]
    pub fn as_violations(&self) -> Option<&[Violation]> {
        match self {
            Self::Violations(violations) => Some(violations),
            _ => None,
        }
    }

    /// The failures of an array field.
    #[must_use]
    pub fn as_array(&self) -> Option<&ArrayErrors> {
        match self {
            Self::Array(errors) => Some(errors),
            _ => None,
        }
    }

    /// The failures of a nested object.
    #[must_use]
    pub fn as_object(&self) -> Option<&ErrorTree> {
        match self {
            Self::Object(tree) => Some(tree),
            _ => None,
        }
    }

    fn violation_count(&self) -> usize {
        match self {
            Self::Violations(violations) => violations.len(),
            Self::Array(errors) => errors.violation_count(),
            Self::Object(tree) => tree.violation_count(),
        }
    }
}

fn has_only_array_keys(map: &serde_json::Map<String, Value>) -> bool {
    !map.is_empty()
        && map
            .keys()
            .all(|key| key == ARRAY_ERRORS_KEY || key == ARRAY_ELEMENT_ERRORS_KEY)
}

impl<'de> Deserialize<'de> for FieldErrors {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let parsed = match &value {
            Value::Array(_) => Vec::<Violation>::deserialize(&value).map(Self::Violations),
            Value::Object(map) if has_only_array_keys(map) => ArrayErrors::deserialize(&value)
                .map(Self::Array)
                .or_else(|_| ErrorTree::deserialize(&value).map(Self::Object)),
            Value::Object(_) => ErrorTree::deserialize(&value).map(Self::Object),
            other => {
                return Err(de::Error::invalid_type(
                    de::Unexpected::Other(type_name(other)),
                    &"a violation list or an object",
                ));
            }
        };
        parsed.map_err(de::Error::custom)
    }
}

// ============================================================================
// ARRAY ERRORS
// ============================================================================

/// Failures of an array field.
///
/// `array_errors` holds violations of the whole array, `array_element_errors`
/// one entry per failing element in index order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ArrayErrors {
    /// Violations of rules run against the whole array.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub array_errors: Option<Vec<Violation>>,

    /// Failures of individual elements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub array_element_errors: Option<Vec<ElementError>>,
}

impl ArrayErrors {
    /// Records whole-array violations; an empty list records nothing.
    pub fn set_array_errors(&mut self, violations: Vec<Violation>) {
        self.array_errors = (!violations.is_empty()).then_some(violations);
    }

    /// Appends the failure of one element.
    pub fn push_element(&mut self, error: ElementError) {
        self.array_element_errors
            .get_or_insert_with(Vec::new)
            .push(error);
    }

    /// Returns true if neither the array nor any element failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.array_errors.as_ref().is_none_or(Vec::is_empty)
            && self.array_element_errors.as_ref().is_none_or(Vec::is_empty)
    }

    /// `None` when nothing failed.
    #[must_use]
    pub fn into_option(self) -> Option<Self> {
        (!self.is_empty()).then_some(self)
    }

    fn violation_count(&self) -> usize {
        let whole = self.array_errors.as_ref().map_or(0, Vec::len);
        let elements: usize = self
            .array_element_errors
            .iter()
            .flatten()
            .map(|element| element.errors.violation_count())
            .sum();
        whole + elements
    }
}

/// The failure of one array element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementError {
    /// Position of the element in the array.
    pub index: usize,
    /// What failed.
    pub errors: ElementErrors,
    /// The element itself.
    pub attempted_value: Value,
}

impl ElementError {
    /// Creates an element failure.
    #[must_use]
    pub fn new(index: usize, errors: ElementErrors, attempted_value: Value) -> Self {
        Self {
            index,
            errors,
            attempted_value,
        }
    }
}

/// Failures of one element: violations for primitive elements, a nested tree
/// for object elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ElementErrors {
    /// Violations of a primitive element.
    Violations(Vec<Violation>),
    /// Failures of an object element.
    Object(ErrorTree),
}

impl ElementErrors {
    /// Wraps violations, `None` when there are none.
    #[must_use]
    pub fn from_violations(violations: Vec<Violation>) -> Option<Self> {
        (!violations.is_empty()).then_some(Self::Violations(violations))
    }

    fn violation_count(&self) -> usize {
        match self {
            Self::Violations(violations) => violations.len(),
            Self::Object(tree) => tree.violation_count(),
        }
    }
}

// ============================================================================
// SINGLE FIELD
// ============================================================================

/// Result of validating one field on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidation {
    /// True when the field passed.
    pub is_valid: bool,
    /// Name of the validated field.
    pub field_name: String,
    /// Failures of the field, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl FieldValidation {
    /// A passing result.
    pub fn valid(field_name: impl Into<String>) -> Self {
        Self {
            is_valid: true,
            field_name: field_name.into(),
            errors: None,
        }
    }

    /// A result carrying `errors`; empty errors make it a passing result.
    pub fn from_errors(field_name: impl Into<String>, errors: FieldErrors) -> Self {
        let errors = (!errors.is_empty()).then_some(errors);
        Self {
            is_valid: errors.is_none(),
            field_name: field_name.into(),
            errors,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
