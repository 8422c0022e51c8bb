//! Macros for declaring rules and building rule trees with minimal boilerplate.
//!
//! # Available Macros
//!
//! - [`rule!`] - Declare a rule function (struct + `RuleFn` impl + factory fn)
//! - [`rules!`] - Build a synchronous rule list
//! - [`async_rules!`] - Build an asynchronous rule list
//! - [`object_rule!`] - Build an object rule from `key => rule` pairs
//!
//! # Examples
//!
//! ```
//! use ruletree_validator::{object_rule, rule, rules};
//!
//! rule! {
//!     /// Rejects negative numbers.
//!     pub NonNegative as "nonNegative";
//!     check(value) { value.as_f64().is_none_or(|n| n >= 0.0) }
//!     message(value) { "Expected a non-negative number, got :value." }
//!     fn non_negative();
//! }
//!
//! let rule = object_rule! {
//!     "quantity" => rules![non_negative()],
//! };
//! assert_eq!(rule.len(), 1);
//! ```

// ============================================================================
// RULE MACRO
// ============================================================================

/// Declares a rule function: struct definition, `RuleFn` implementation,
/// constructor, and factory function.
///
/// `check` evaluates to `true` when the value passes; `message` builds the
/// error message (anything `Into<String>`, `:value` allowed) for a failing
/// value. The quoted name after `as` becomes the violation's `ruleName`.
///
/// # Variants
///
/// **Unit rule** (zero-sized, no fields):
/// ```rust,ignore
/// rule! {
///     pub Required as "required";
///     check(value) { !value.is_null() }
///     message(value) { "This field is required." }
///     fn required();
/// }
/// ```
///
/// **Rule with fields** (auto `new` from all fields):
/// ```rust,ignore
/// rule! {
///     #[derive(Copy, PartialEq)]
///     pub AtLeast { min: f64 } as "atLeast";
///     check(self, value) { value.as_f64().is_none_or(|n| n >= self.min) }
///     message(self, value) { format!("Expected at least {}, got :value.", self.min) }
///     fn at_least(min: f64);
/// }
/// ```
///
/// **Custom constructor** (overrides auto `new`):
/// ```rust,ignore
/// rule! {
///     pub OneOf { allowed: Vec<Value> } as "oneOf";
///     check(self, value) { self.allowed.contains(value) }
///     message(self, value) { ":value is not allowed." }
///     new(allowed: impl IntoIterator<Item = Value>) { Self { allowed: allowed.into_iter().collect() } }
///     fn one_of(allowed: impl IntoIterator<Item = Value>);
/// }
/// ```
#[macro_export]
macro_rules! rule {
    // ── Variant 1a: Unit rule (no fields) + factory fn ───────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident as $rule_name:literal;
        check($inp:ident) $check:block
        message($minp:ident) $message:block
        fn $factory:ident();
    ) => {
        $crate::rule! {
            $(#[$meta])*
            $vis $name as $rule_name;
            check($inp) $check
            message($minp) $message
        }

        #[must_use]
        $vis const fn $factory() -> $name { $name }
    };

    // ── Variant 1b: Unit rule (no fields), no factory ────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident as $rule_name:literal;
        check($inp:ident) $check:block
        message($minp:ident) $message:block
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $name;

        impl $name {
            /// Name reported in violations.
            pub const RULE_NAME: &'static str = $rule_name;
        }

        impl $crate::foundation::RuleFn for $name {
            #[allow(unused_variables)]
            fn check(
                &self,
                $inp: &$crate::Value,
                _root: &$crate::Value,
            ) -> $crate::foundation::RuleResult {
                if $check {
                    Ok(None)
                } else {
                    let $minp = $inp;
                    Ok(Some($crate::foundation::Violation::new(
                        $rule_name,
                        $minp.clone(),
                        $message,
                    )))
                }
            }
        }
    };

    // ── Variant 2a: Rule with fields + custom new + factory fn ───────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? } as $rule_name:literal;
        check($self_:ident, $inp:ident) $check:block
        message($self2:ident, $minp:ident) $message:block
        new($($narg:ident: $naty:ty),* $(,)?) $new_body:block
        fn $factory:ident($($farg:ident: $faty:ty),* $(,)?);
    ) => {
        $crate::rule! {
            $(#[$meta])*
            $vis $name { $($field: $fty),+ } as $rule_name;
            check($self_, $inp) $check
            message($self2, $minp) $message
            new($($narg: $naty),*) $new_body
        }

        #[must_use]
        $vis fn $factory($($farg: $faty),*) -> $name {
            $name::new($($farg),*)
        }
    };

    // ── Variant 2b: Rule with fields + custom new, no factory ────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? } as $rule_name:literal;
        check($self_:ident, $inp:ident) $check:block
        message($self2:ident, $minp:ident) $message:block
        new($($narg:ident: $naty:ty),* $(,)?) $new_body:block
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            $(pub $field: $fty,)+
        }

        #[allow(clippy::new_without_default)]
        impl $name {
            /// Name reported in violations.
            pub const RULE_NAME: &'static str = $rule_name;

            #[must_use]
            pub fn new($($narg: $naty),*) -> Self $new_body
        }

        impl $crate::foundation::RuleFn for $name {
            #[allow(unused_variables)]
            fn check(
                &$self_,
                $inp: &$crate::Value,
                _root: &$crate::Value,
            ) -> $crate::foundation::RuleResult {
                if $check {
                    Ok(None)
                } else {
                    let $minp = $inp;
                    Ok(Some($crate::foundation::Violation::new(
                        $rule_name,
                        $minp.clone(),
                        $message,
                    )))
                }
            }
        }
    };

    // ── Variant 3a: Rule with fields + auto new + factory fn ─────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? } as $rule_name:literal;
        check($self_:ident, $inp:ident) $check:block
        message($self2:ident, $minp:ident) $message:block
        fn $factory:ident($($farg:ident: $faty:ty),* $(,)?);
    ) => {
        $crate::rule! {
            $(#[$meta])*
            $vis $name { $($field: $fty),+ } as $rule_name;
            check($self_, $inp) $check
            message($self2, $minp) $message
            new($($field: $fty),+) { Self { $($field),+ } }
        }

        #[must_use]
        $vis fn $factory($($farg: $faty),*) -> $name {
            $name::new($($farg),*)
        }
    };

    // ── Variant 3b: Rule with fields + auto new, no factory ──────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? } as $rule_name:literal;
        check($self_:ident, $inp:ident) $check:block
        message($self2:ident, $minp:ident) $message:block
    ) => {
        $crate::rule! {
            $(#[$meta])*
            $vis $name { $($field: $fty),+ } as $rule_name;
            check($self_, $inp) $check
            message($self2, $minp) $message
            new($($field: $fty),+) { Self { $($field),+ } }
        }
    };
}

// ============================================================================
// TREE BUILDING MACROS
// ============================================================================

/// Builds a synchronous [`RuleList`](crate::rule::RuleList).
///
/// ```
/// use ruletree_validator::rules;
/// use ruletree_validator::rules::{max_length, required};
///
/// let list = rules![required(), max_length(32)];
/// assert_eq!(list.len(), 2);
/// ```
#[macro_export]
macro_rules! rules {
    () => {
        $crate::rule::Rules::new()
    };
    ($($rule:expr),+ $(,)?) => {
        $crate::rule::Rules::new()$(.rule($rule))+
    };
}

/// Builds an asynchronous [`RuleList`](crate::rule::RuleList).
///
/// Entries must implement `AsyncRuleFn`; lift synchronous rules with
/// `RuleFnExt::into_async`.
///
/// ```
/// use ruletree_validator::async_rules;
/// use ruletree_validator::foundation::RuleFnExt;
/// use ruletree_validator::rules::required;
///
/// let list = async_rules![required().into_async()];
/// assert_eq!(list.len(), 1);
/// ```
#[macro_export]
macro_rules! async_rules {
    () => {
        $crate::rule::AsyncRules::new()
    };
    ($($rule:expr),+ $(,)?) => {
        $crate::rule::AsyncRules::new()$(.rule($rule))+
    };
}

/// Builds an [`ObjectRule`](crate::rule::ObjectRule) from `key => rule` pairs.
///
/// ```
/// use ruletree_validator::{object_rule, rules};
/// use ruletree_validator::rule::ArrayRule;
/// use ruletree_validator::rules::{array_min_len, required};
///
/// let rule = object_rule! {
///     "name" => rules![required()],
///     "address" => object_rule! { "city" => rules![required()] },
///     "tags" => ArrayRule::new().array_rules(rules![array_min_len(1)]),
/// };
/// assert_eq!(rule.keys().collect::<Vec<_>>(), ["name", "address", "tags"]);
/// ```
#[macro_export]
macro_rules! object_rule {
    () => {
        $crate::rule::ObjectRule::new()
    };
    ($($key:expr => $rule:expr),+ $(,)?) => {
        $crate::rule::ObjectRule::new()$(.field($key, $rule))+
    };
}

#[cfg(test)]
mod tests {
    use crate::foundation::RuleFn;
    use serde_json::{Value, json};

    crate::rule! {
        pub Truthy as "truthy";
        check(value) { value.as_bool() == Some(true) }
        message(value) { "Expected true, got :value." }
        fn truthy();
    }

    crate::rule! {
        #[derive(Copy, PartialEq)]
        pub Above { min: f64 } as "above";
        check(self, value) { value.as_f64().is_none_or(|n| n > self.min) }
        message(self, value) { format!("Expected more than {}.", self.min) }
        fn above(min: f64);
    }

    crate::rule! {
        pub Either { left: Value, right: Value } as "either";
        check(self, value) { value == &self.left || value == &self.right }
        message(self, value) { "Not allowed." }
        new(pair: (Value, Value)) { Self { left: pair.0, right: pair.1 } }
        fn either(pair: (Value, Value));
    }

    #[test]
    fn unit_rule() {
        let root = json!({});
        assert!(truthy().check(&json!(true), &root).unwrap().is_none());
        let violation = truthy().check(&json!(false), &root).unwrap().unwrap();
        assert_eq!(violation.rule_name, Truthy::RULE_NAME);
        assert_eq!(violation.error_message, "Expected true, got :value.");
    }

    #[test]
    fn rule_with_fields() {
        let rule = above(2.0);
        let root = json!({});
        assert!(rule.check(&json!(3), &root).unwrap().is_none());
        assert!(rule.check(&json!("text"), &root).unwrap().is_none());
        let violation = rule.check(&json!(1), &root).unwrap().unwrap();
        assert_eq!(violation.error_message, "Expected more than 2.");
        assert_eq!(violation.attempted_value, json!(1));
    }

    #[test]
    fn rule_with_custom_new() {
        let rule = either((json!("a"), json!("b")));
        let root = json!({});
        assert!(rule.check(&json!("b"), &root).unwrap().is_none());
        assert!(rule.check(&json!("c"), &root).unwrap().is_some());
    }

    #[test]
    fn tree_macros() {
        let list = crate::rules![truthy(), above(1.0)];
        assert_eq!(list.len(), 2);
        let empty = crate::rules![];
        assert!(empty.is_empty());

        let rule = crate::object_rule! {
            "flag" => crate::rules![truthy()],
            "nested" => crate::object_rule! { "n" => crate::rules![above(0.0)] },
        };
        assert_eq!(rule.len(), 2);
    }
}
