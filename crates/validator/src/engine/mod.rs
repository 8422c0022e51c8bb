//! The validation engine
//!
//! Walks a value and a rule tree in lockstep and assembles the sparse
//! [`ErrorTree`](crate::report::ErrorTree).
//!
//! | Entry point | Validates |
//! |-------------|-----------|
//! | [`validate_object`] / [`validate_object_async`] | every key a rule names |
//! | [`validate_field`] / [`validate_field_async`] | one key, with the object as root |
//! | [`validate_primitive_field`] | one key against a rule list |
//! | [`validate_array_field`] | one key against an array rule |
//!
//! Both engines share classification and dynamic-rule resolution; only the
//! way rule functions are called differs.

mod array;
mod field;
mod nonblocking;
mod object;
mod resolve;
mod single;

pub use array::validate_array_field;
pub use field::{FieldOutcome, validate_primitive_field};
pub use nonblocking::{
    validate_array_field_async, validate_field_async, validate_object_async,
    validate_primitive_field_async,
};
pub use object::validate_object;
pub use single::validate_field;
