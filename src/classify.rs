//! Decides whether a runtime type is acceptable as a member of a target type.
//!
//! [`predicate_for()`] returns a [`TypePredicate`] for a target
//! [`ValueType`]. Predicates unify the primitive and boxed flavours of each
//! [`Scalar`], and of one-dimensional arrays of each `Scalar`. For every
//! other target type the predicate is ordinary assignability
//! ([`ValueType::is_assignable_from()`]).
//!
//! Predicates live in a process-wide table keyed by target type. The table
//! is created on first use, pre-populated with the unified scalar and array
//! types, and grows by one entry for each new target type. Entries are never
//! evicted.

use std::collections::hash_map::{Entry};
use std::sync::{Arc, Mutex, PoisonError};

use once_cell::sync::{Lazy};
use rustc_hash::{FxHashMap};
use tracing::{trace};

use super::{Scalar, ValueType, Value};

#[derive(Debug, PartialEq)]
enum Rule {
    /// Accepts either flavour of the scalar.
    Scalar(Scalar),
    /// Accepts arrays of either flavour of the scalar.
    ScalarArray(Scalar),
    /// Accepts types assignable to the target.
    Assignable(ValueType),
}

impl Rule {
    fn test(&self, candidate: &ValueType) -> bool {
        match self {
            Self::Scalar(s) => matches!(candidate, ValueType::Primitive(c) | ValueType::Boxed(c) if c == s),
            Self::ScalarArray(s) => match candidate {
                ValueType::Array(e) => matches!(**e, ValueType::Primitive(c) | ValueType::Boxed(c) if c == *s),
                _ => false,
            },
            Self::Assignable(target) => target.is_assignable_from(candidate),
        }
    }
}

/// A reusable compatibility test for a fixed target type.
///
/// ```
/// use tuplekit::{classify, ValueType, Scalar};
/// let ints = classify::predicate_for(&ValueType::array(ValueType::Primitive(Scalar::I32)));
/// assert!(ints.test(Some(&ValueType::array(ValueType::Boxed(Scalar::I32)))));
/// assert!(!ints.test(Some(&ValueType::array(ValueType::Boxed(Scalar::I64)))));
/// assert!(!ints.test(None));
/// ```
#[derive(Debug, Clone)]
pub struct TypePredicate(Arc<Rule>);

impl TypePredicate {
    /// Returns `true` if a value of type `candidate` is acceptable. `None`
    /// (the type of `Null`) is never acceptable.
    pub fn test(&self, candidate: Option<&ValueType>) -> bool {
        candidate.map_or(false, |c| self.0.test(c))
    }

    /// Applies [`test()`] to the runtime type of `value`.
    ///
    /// [`test()`]: Self::test()
    pub fn test_value(&self, value: &Value) -> bool {
        self.test(ValueType::of(value).as_ref())
    }

    /// Returns `true` if `a` and `b` are the same cached predicate.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool { Arc::ptr_eq(&a.0, &b.0) }
}

// ----------------------------------------------------------------------------

type Table = FxHashMap<ValueType, TypePredicate>;

static PREDICATES: Lazy<Mutex<Table>> = Lazy::new(|| Mutex::new(unified_table()));

/// The fixed entries: both flavours of each scalar, and of arrays of each.
fn unified_table() -> Table {
    let mut table = Table::default();
    for &s in Scalar::ALL {
        let scalar = TypePredicate(Arc::new(Rule::Scalar(s)));
        let array = TypePredicate(Arc::new(Rule::ScalarArray(s)));
        table.insert(ValueType::Primitive(s), scalar.clone());
        table.insert(ValueType::Boxed(s), scalar);
        table.insert(ValueType::array(ValueType::Primitive(s)), array.clone());
        table.insert(ValueType::array(ValueType::Boxed(s)), array);
    }
    table
}

/// Returns the [`TypePredicate`] for `target`, computing and caching it on
/// first use.
pub fn predicate_for(target: &ValueType) -> TypePredicate {
    let mut table = PREDICATES.lock().unwrap_or_else(PoisonError::into_inner);
    match table.entry(target.clone()) {
        Entry::Occupied(e) => e.get().clone(),
        Entry::Vacant(e) => {
            trace!(%target, "classifying new target type");
            e.insert(TypePredicate(Arc::new(Rule::Assignable(target.clone())))).clone()
        },
    }
}

/// Returns the number of target types in the process-wide table.
pub fn cached_predicates() -> usize {
    PREDICATES.lock().unwrap_or_else(PoisonError::into_inner).len()
}

/// Shorthand for `predicate_for(target).test(candidate)`.
pub fn is_compatible(target: &ValueType, candidate: Option<&ValueType>) -> bool {
    predicate_for(target).test(candidate)
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ObjectType};

    #[test]
    fn scalars_unify() {
        for &s in Scalar::ALL {
            for target in [ValueType::Primitive(s), ValueType::Boxed(s)] {
                assert!(is_compatible(&target, Some(&ValueType::Primitive(s))));
                assert!(is_compatible(&target, Some(&ValueType::Boxed(s))));
                assert!(!is_compatible(&target, Some(&ValueType::Str)));
                assert!(!is_compatible(&target, None));
            }
        }
        assert!(!is_compatible(&ValueType::Boxed(Scalar::I32), Some(&ValueType::Boxed(Scalar::I64))));
    }

    #[test]
    fn arrays_unify() {
        let ints = ValueType::array(ValueType::Primitive(Scalar::I32));
        let integers = ValueType::array(ValueType::Boxed(Scalar::I32));
        assert!(is_compatible(&ints, Some(&integers)));
        assert!(is_compatible(&integers, Some(&ints)));
        assert!(!is_compatible(&ints, Some(&ValueType::Boxed(Scalar::I32))));
        assert!(!is_compatible(&ints, Some(&ValueType::array(ValueType::Primitive(Scalar::I16)))));
    }

    #[test]
    fn other_types_use_assignability() {
        assert!(is_compatible(&ValueType::Any, Some(&ValueType::Tuple)));
        assert!(is_compatible(&ValueType::Number, Some(&ValueType::Boxed(Scalar::F64))));
        assert!(!is_compatible(&ValueType::Number, Some(&ValueType::Boxed(Scalar::Char))));
        assert!(is_compatible(&ValueType::array(ValueType::Number), Some(&ValueType::array(ValueType::Boxed(Scalar::I8)))));
        let foo = ValueType::Object(ObjectType::of::<std::cell::Cell<u8>>());
        assert!(is_compatible(&foo, Some(&foo)));
        assert!(!is_compatible(&foo, Some(&ValueType::Str)));
        assert!(!is_compatible(&foo, None));
    }

    #[test]
    fn predicates_are_cached() {
        let target = ValueType::array(ValueType::array(ValueType::Str));
        let a = predicate_for(&target);
        let size = cached_predicates();
        let b = predicate_for(&target);
        assert!(TypePredicate::ptr_eq(&a, &b));
        assert!(cached_predicates() >= size);
        assert!(TypePredicate::ptr_eq(&predicate_for(&ValueType::Boxed(Scalar::Bool)), &predicate_for(&ValueType::Primitive(Scalar::Bool))));
        assert!(cached_predicates() >= 4 * Scalar::ALL.len());
    }
}
