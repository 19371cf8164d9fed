//! Raw string to typed value conversion.
//!
//! Coercion is total: bad data becomes [`CoercedValue::Uncastable`] and is
//! reported later by the `type` rule, it never fails the run.

mod coercer;
mod null;
mod value;

pub use coercer::TypeCoercer;
pub use null::{NullCanonicalizer, DEFAULT_NULL_TOKENS};
pub use value::CoercedValue;
