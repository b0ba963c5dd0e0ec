//! Extraction of typed subsets of a [`Tuple`].
//!
//! The result of every function in this module is a homogeneous `Tuple`
//! whose declared element type is the target type. It contains, in their
//! original order, the slots that are non-null, whose runtime type passes
//! [`classify::predicate_for()`] for the target, and which satisfy the
//! optional condition. Filtering never fails: a slot for which the condition
//! fails is excluded, and if nothing matches the result is an empty tuple of
//! the right type.
//!
//! ```
//! use tuplekit::{tuple, Value, ValueType, Scalar};
//! let t = tuple!(1, "a", Value::Null, 2i64, 3);
//! let ints = t.subset_of(&ValueType::Boxed(Scalar::I32));
//! assert_eq!(ints.values(), [Value::from(1), Value::from(3)]);
//! assert_eq!(ints.subset_of(&ValueType::Boxed(Scalar::I32)), ints);
//! let numbers = t.subset_of(&ValueType::Number);
//! assert_eq!(numbers.len(), 3);
//! ```

use std::convert::{Infallible};
use std::fmt::{Display};

use tracing::{warn};

use super::{Tuple, Value, ValueType, FromValue, Typed, classify};

/// Returns the compatible non-null values of `tuple`.
pub fn subset_of(tuple: &Tuple, target: &ValueType) -> Tuple {
    subset_where(tuple, target, |_| Ok::<_, Infallible>(true))
}

/// Returns the compatible non-null values of `tuple` for which `condition`
/// returns `Ok(true)`.
pub fn subset_where<E: Display>(
    tuple: &Tuple,
    target: &ValueType,
    mut condition: impl FnMut(&Value) -> Result<bool, E>,
) -> Tuple {
    let predicate = classify::predicate_for(target);
    let mut values = Vec::new();
    for (index, v) in tuple.iter().enumerate() {
        if !predicate.test_value(v) { continue; }
        match condition(v) {
            Ok(true) => values.push(v.clone()),
            Ok(false) => {},
            Err(err) => warn!(index, %target, error = %err, "filter condition failed; excluding value"),
        }
    }
    Tuple::homogeneous_unchecked(target.clone(), values)
}

/// Like [`subset_where()`], but the target type is `T` and `condition`
/// receives each value converted to a `T`. Values that cannot be converted
/// are excluded.
///
/// ```
/// use tuplekit::{tuple, filter};
/// let t = tuple!("apple", 3, "kiwi", "banana");
/// let long = filter::subset_as::<String, _>(&t, |s| Ok::<_, std::convert::Infallible>(s.len() > 4));
/// assert_eq!(long.extract::<String>(), vec!["apple", "banana"]);
/// ```
pub fn subset_as<T: FromValue + Typed, E: Display>(
    tuple: &Tuple,
    mut condition: impl FnMut(T) -> Result<bool, E>,
) -> Tuple {
    subset_where(tuple, &T::value_type(), |v| match T::from_value(v) {
        Some(t) => condition(t),
        None => Ok(false),
    })
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Scalar, tuple};

    #[test]
    fn preserves_order() {
        let t = tuple!("b", 1, "a", Value::Null, "c");
        let s = subset_of(&t, &ValueType::Str);
        assert_eq!(s.values(), [Value::from("b"), Value::from("a"), Value::from("c")]);
        assert_eq!(s.element_type(), Some(&ValueType::Str));
    }

    #[test]
    fn idempotent() {
        let t = tuple!(1, vec![1, 2], vec![Some(3)], "x", 2);
        for target in [ValueType::Boxed(Scalar::I32), ValueType::array(ValueType::Boxed(Scalar::I32)), ValueType::Any, ValueType::Str] {
            let once = t.subset_of(&target);
            assert_eq!(once.subset_of(&target), once);
        }
    }

    #[test]
    fn unifies_arrays() {
        let t = tuple!(vec![1, 2], vec![Some(3), None], vec![1i64]);
        assert_eq!(t.subset_of(&ValueType::array(ValueType::Primitive(Scalar::I32))).len(), 2);
        assert_eq!(t.subset_of(&ValueType::array(ValueType::Boxed(Scalar::I32))).len(), 2);
        assert_eq!(t.subset_of(&ValueType::Any).len(), 3);
    }

    #[test]
    fn empty_result() {
        let s = tuple!(1, 2).subset_of(&ValueType::Str);
        assert!(s.is_empty());
        assert_eq!(s.element_type(), Some(&ValueType::Str));
        assert_eq!(s, Tuple::homogeneous(ValueType::Str, Vec::new()).unwrap());
        assert_ne!(s, tuple!(1).subset_of(&ValueType::Tuple));
    }

    #[test]
    fn excludes_nulls() {
        let t = tuple!(Value::Null, Value::Null);
        assert!(t.subset_of(&ValueType::Any).is_empty());
    }

    #[test]
    fn failing_condition_excludes() {
        let _ = tracing_subscriber::fmt().with_env_filter("warn").with_test_writer().try_init();
        let t = tuple!(1, 2, 3, 4);
        let s = t.subset_where(&ValueType::Boxed(Scalar::I32), |v| match v {
            Value::I32(2) => Err("two is not allowed"),
            Value::I32(x) => Ok(x % 2 == 0 || *x == 3),
            _ => Ok(false),
        });
        assert_eq!(s.values(), [Value::from(3), Value::from(4)]);
    }

    #[test]
    fn typed_condition() {
        let t = tuple!(vec![1, 2, 3], vec![4], "x", vec![Some(5), None]);
        let s = subset_as::<Vec<i32>, Infallible>(&t, |v| Ok(v.len() > 1));
        assert_eq!(s.len(), 1);
        assert_eq!(s.get::<Vec<i32>>(0), Ok(vec![1, 2, 3]));
    }
}
