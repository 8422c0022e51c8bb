//! Rule resolution shared by the sync and async drivers.
//!
//! Dynamic rules are built into a caller-owned slot so the resolved rule can
//! be borrowed for as long as the validation of the field (or element) runs.

use serde_json::Value;

use crate::foundation::{Error, Result, is_falsy, type_name};
use crate::rule::{ArrayShape, DynamicRule, ObjectRule, Rule, RuleList, Shape, classify};

/// An array field rule before dynamic resolution.
pub(crate) enum ArrayTarget<'a, C> {
    Static(ArrayShape<'a, C>),
    Dynamic(&'a DynamicRule<C>),
}

/// What one array element is validated with.
pub(crate) enum ElementTarget<'a, C> {
    Fields(&'a RuleList<C>),
    Object(&'a ObjectRule<C>),
}

/// Reads a field rule that must be an array rule (or build one).
pub(crate) fn array_target<C>(rule: &Rule<C>) -> Result<ArrayTarget<'_, C>> {
    match classify(rule)? {
        Shape::Array(shape) => Ok(ArrayTarget::Static(shape)),
        Shape::Dynamic(dynamic) => Ok(ArrayTarget::Dynamic(dynamic)),
        Shape::Absent => Ok(ArrayTarget::Static(ArrayShape::empty())),
        Shape::Primitive(_) | Shape::Object(_) => Err(Error::ExpectedArrayRule {
            found: rule.kind(),
        }),
    }
}

/// Turns an array target into a static array shape.
///
/// A dynamic rule is called once with `(value, root)`; its result must be an
/// array rule or nothing.
pub(crate) fn resolve_array<'a, C>(
    target: ArrayTarget<'a, C>,
    value: &Value,
    root: &Value,
    slot: &'a mut Option<Rule<C>>,
) -> Result<ArrayShape<'a, C>> {
    let dynamic = match target {
        ArrayTarget::Static(shape) => return Ok(shape),
        ArrayTarget::Dynamic(dynamic) => dynamic,
    };
    let resolved: &'a Rule<C> = slot.insert(dynamic.resolve(value, root));
    tracing::trace!(resolved = resolved.kind(), "resolved dynamic field rule");
    match resolved {
        Rule::Dynamic(_) => Err(unresolved_field()),
        _ => match classify(resolved)? {
            Shape::Array(shape) => Ok(shape),
            Shape::Absent => Ok(ArrayShape::empty()),
            _ => Err(unresolved_field()),
        },
    }
}

/// Resolves the element rule for one element.
pub(crate) fn resolve_element<'a, C>(
    rule: &'a Rule<C>,
    element: &Value,
    root: &Value,
    slot: &'a mut Option<Rule<C>>,
) -> Result<ElementTarget<'a, C>> {
    match rule {
        Rule::Dynamic(dynamic) => {
            let resolved: &'a Rule<C> = slot.insert(dynamic.resolve(element, root));
            tracing::trace!(resolved = resolved.kind(), "resolved dynamic element rule");
            if matches!(resolved, Rule::Dynamic(_)) {
                return Err(unresolved_element());
            }
            static_element(resolved)
        }
        other => static_element(other),
    }
}

fn static_element<C>(rule: &Rule<C>) -> Result<ElementTarget<'_, C>> {
    match rule {
        Rule::Fields(list) => Ok(ElementTarget::Fields(list)),
        Rule::Object(object) => Ok(ElementTarget::Object(object)),
        Rule::Array(_) => Err(Error::InvalidElementRule),
        Rule::Dynamic(_) => Err(unresolved_element()),
        Rule::Absent => Err(Error::MissingRule),
        Rule::Literal(value) if is_falsy(value) => Err(Error::MissingRule),
        Rule::Literal(value) => Err(Error::invalid_rule(type_name(value))),
    }
}

fn unresolved_field() -> Error {
    Error::UnresolvedDynamicRule {
        position: "field",
        expected: "an array rule",
    }
}

fn unresolved_element() -> Error {
    Error::UnresolvedDynamicRule {
        position: "element",
        expected: "a rule list or an object rule",
    }
}
