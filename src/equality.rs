//! Structural equality and hashing of [`Value`]s.
//!
//! The rules are:
//!
//! - `Null` is equal only to `Null`.
//! - Scalars are equal iff they have the same kind and the same value. There
//!   is no numeric widening: `1i32` is not equal to `1i64`. Floating-point
//!   values are compared by their bit patterns, so `NaN` equals itself and
//!   `0.0` differs from `-0.0`.
//! - Arrays are equal iff they have the same length and their elements are
//!   pairwise equal, recursively. Whether either array is primitive or boxed
//!   does not matter.
//! - Nested [`Tuple`]s follow the `Tuple` equality rules.
//! - Objects defer to the wrapped value (or to identity, for resources).
//!
//! [`Hash`] is implemented consistently: `a == b` implies
//! `hash(a) == hash(b)`. In particular, arrays feed their elements to the
//! hasher as boxed `Value`s, so the representation does not leak into the
//! hash.
//!
//! [`Tuple`]: super::Tuple

use std::hash::{Hash, Hasher};

use rustc_hash::{FxHasher};

use super::{Value, Array};

/// Returns `true` if `a` and `b` are structurally equal.
///
/// ```
/// use tuplekit::{Value, equality};
/// assert!(equality::equal(&Value::from(vec![vec![1, 2]]), &Value::from(vec![vec![Some(1), Some(2)]])));
/// assert!(!equality::equal(&Value::Null, &Value::from(0)));
/// ```
pub fn equal(a: &Value, b: &Value) -> bool { a == b }

/// Returns a deterministic hash of `value`, consistent with [`equal()`].
///
/// ```
/// use tuplekit::{Value, equality};
/// assert_eq!(equality::hash(&Value::from(vec![1, 2])), equality::hash(&Value::from(vec![Some(1), Some(2)])));
/// ```
pub fn hash(value: &Value) -> u64 {
    let mut state = FxHasher::default();
    value.hash(&mut state);
    state.finish()
}

/// Returns `true` if `a` and `b` have the same length and are pairwise
/// [`equal()`].
pub fn equal_slices(a: &[Value], b: &[Value]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x == y)
}

/// Feeds the length and then every element of `values` into `state`.
pub fn hash_slice<H: Hasher>(values: &[Value], state: &mut H) {
    state.write_usize(values.len());
    for v in values { v.hash(state); }
}

// ----------------------------------------------------------------------------

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(x), Self::Bool(y)) => x == y,
            (Self::Char(x), Self::Char(y)) => x == y,
            (Self::I8(x), Self::I8(y)) => x == y,
            (Self::I16(x), Self::I16(y)) => x == y,
            (Self::I32(x), Self::I32(y)) => x == y,
            (Self::I64(x), Self::I64(y)) => x == y,
            (Self::F32(x), Self::F32(y)) => x.to_bits() == y.to_bits(),
            (Self::F64(x), Self::F64(y)) => x.to_bits() == y.to_bits(),
            (Self::Str(x), Self::Str(y)) => x == y,
            (Self::Array(x), Self::Array(y)) => x == y,
            (Self::Tuple(x), Self::Tuple(y)) => x == y,
            (Self::Object(x), Self::Object(y)) => x == y,
            _ => false,
        }
    }
}

impl Eq for Value {}

/// Distinguishes the variants of `Value` in the hash.
fn tag(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Char(_) => 2,
        Value::I8(_) => 3,
        Value::I16(_) => 4,
        Value::I32(_) => 5,
        Value::I64(_) => 6,
        Value::F32(_) => 7,
        Value::F64(_) => 8,
        Value::Str(_) => 9,
        Value::Array(_) => 10,
        Value::Tuple(_) => 11,
        Value::Object(_) => 12,
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u8(tag(self));
        match self {
            Self::Null => {},
            Self::Bool(x) => x.hash(state),
            Self::Char(x) => x.hash(state),
            Self::I8(x) => x.hash(state),
            Self::I16(x) => x.hash(state),
            Self::I32(x) => x.hash(state),
            Self::I64(x) => x.hash(state),
            Self::F32(x) => x.to_bits().hash(state),
            Self::F64(x) => x.to_bits().hash(state),
            Self::Str(x) => x.hash(state),
            Self::Array(x) => x.hash(state),
            Self::Tuple(x) => x.hash(state),
            Self::Object(x) => x.hash(state),
        }
    }
}

// ----------------------------------------------------------------------------

impl PartialEq for Array {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            // Same packed representation, no floats: compare the slices.
            (Self::Bool(x), Self::Bool(y)) => x == y,
            (Self::Char(x), Self::Char(y)) => x == y,
            (Self::I8(x), Self::I8(y)) => x == y,
            (Self::I16(x), Self::I16(y)) => x == y,
            (Self::I32(x), Self::I32(y)) => x == y,
            (Self::I64(x), Self::I64(y)) => x == y,
            _ => self.len() == other.len() && self.iter().zip(other.iter()).all(|(x, y)| x == y),
        }
    }
}

impl Eq for Array {}

impl Hash for Array {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for v in self.iter() { v.hash(state); }
    }
}

// ----------------------------------------------------------------------------
