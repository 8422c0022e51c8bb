//! Built-in rule functions
//!
//! Every rule is a plain struct implementing [`RuleFn`](crate::foundation::RuleFn),
//! created through a factory function. Lift any of them into an asynchronous
//! rule list with [`RuleFnExt::into_async`](crate::foundation::RuleFnExt::into_async).
//!
//! | Factory | `ruleName` | Checks |
//! |---------|------------|--------|
//! | [`required`] | `required` | value present and not blank |
//! | [`not_empty`] | `notEmpty` | string, array or object not empty |
//! | [`min_length`] / [`max_length`] | `minLength` / `maxLength` | string length |
//! | [`min_number`] / [`max_number`] / [`number_range`] | `minNumber` / `maxNumber` / `numberRange` | numeric bounds |
//! | [`email_address`] | `emailAddress` | email format |
//! | [`pattern`] | `pattern` | regular expression |
//! | [`array_min_len`] / [`array_max_len`] | `arrayMinLen` / `arrayMaxLen` | array length |
//! | [`one_of`] | `oneOf` | membership |
//! | [`equal_to_property`] | `equalToProperty` | equality with another root property |
//! | [`predicate`] | caller-chosen | custom closure |

mod collection;
mod comparison;
mod custom;
mod length;
mod numeric;
mod presence;
mod string;

pub use collection::{ArrayMaxLen, ArrayMinLen, OneOf, array_max_len, array_min_len, one_of};
pub use comparison::{EqualToProperty, equal_to_property};
pub use custom::{Predicate, predicate};
pub use length::{MaxLength, MinLength, max_length, min_length};
pub use numeric::{NumberRule, max_number, min_number, number_range};
pub use presence::{NotEmpty, Required, not_empty, required};
pub use string::{EmailAddress, Pattern, email_address, pattern};
