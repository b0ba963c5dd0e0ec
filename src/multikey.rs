//! Memoization of functions of several arguments.
//!
//! A [`MultiKeyRepository`] wraps a function from a Rust tuple of arguments
//! to a [`Tuple`] of outputs. Each call assembles the arguments into a fresh
//! key `Tuple`; the cached output is found by structural equality, so equal
//! arguments always hit the same entry.
//!
//! ```
//! use tuplekit::{MultiKeyRepository, tuple};
//! let mut stats: MultiKeyRepository<(String,)> = MultiKeyRepository::from_key_function(
//!     |(s,): (String,)| Ok(tuple!(s.len() as i32, s.contains('a'))),
//! );
//! assert_eq!(stats.get_as::<i32>(("abc",), 0).unwrap(), 3);
//! assert_eq!(stats.get_as::<bool>((String::from("abc"),), 1).unwrap(), true);
//! assert_eq!(stats.len(), 1);
//! ```

use std::fmt::{self, Debug, Display};
use std::marker::{PhantomData};

use super::{Tuple, Value, ToTuple, FromTuple, FromValue, Typed, TupleError, Repository};

/// A [`Repository`] keyed by the argument tuple of a function.
///
/// `A` is the Rust tuple type of the arguments, which the function receives
/// decoded from the key. Lookups accept any [`ToTuple`] whose key decodes to
/// an `A`; for instance, a `MultiKeyRepository<(String,)>` can be called with
/// `("abc",)`.
pub struct MultiKeyRepository<A, E = anyhow::Error> {
    repository: Repository<Tuple, Tuple, E>,
    marker: PhantomData<fn(A)>,
}

impl<A, E> MultiKeyRepository<A, E> where
    A: 'static + FromTuple,
    E: 'static + From<TupleError>,
{
    /// Memoizes `f`.
    pub fn from_key_function(f: impl 'static + Fn(A) -> Result<Tuple, E>) -> Self {
        let repository = Repository::new(move |key: &Tuple| f(A::from_tuple(key)?));
        Self {repository, marker: PhantomData}
    }

    /// Returns the outputs for `args`, computing them if necessary.
    pub fn apply(&mut self, args: impl ToTuple) -> Result<Tuple, E> {
        self.repository.apply(args.to_tuple())
    }

    /// Returns the outputs for `args`, computing them if necessary. If the
    /// computation fails, the failure is logged and `default` is returned.
    pub fn get(&mut self, args: impl ToTuple, default: Tuple) -> Tuple where E: Display {
        self.repository.get(args.to_tuple(), default)
    }

    /// Returns output `index` for `args`.
    pub fn value_at(&mut self, args: impl ToTuple, index: usize) -> Result<Value, E> {
        Ok(self.apply(args)?.value_at(index)?.clone())
    }

    /// Returns output `index` for `args`, or `default` if the computation
    /// fails or `index` is out of range.
    pub fn value_or(&mut self, args: impl ToTuple, index: usize, default: Value) -> Value where E: Display {
        let outputs = self.get(args, Tuple::empty());
        outputs.value_at(index).map_or(default, Value::clone)
    }

    /// Returns output `index` for `args`, converted to a `T`.
    pub fn get_as<T: FromValue + Typed>(&mut self, args: impl ToTuple, index: usize) -> Result<T, E> {
        Ok(self.apply(args)?.get::<T>(index)?)
    }

    /// Returns all the outputs for `args`, converted to a Rust tuple.
    ///
    /// ```
    /// use tuplekit::{MultiKeyRepository, tuple};
    /// let mut divmod: MultiKeyRepository<(i32, i32)> = MultiKeyRepository::from_key_function(|(a, b): (i32, i32)| {
    ///     anyhow::ensure!(b != 0, "division by zero");
    ///     Ok(tuple!(a / b, a % b))
    /// });
    /// assert_eq!(divmod.outputs::<(i32, i32)>((7, 2)).unwrap(), (3, 1));
    /// assert!(divmod.outputs::<(i32, i32)>((7, 0)).is_err());
    /// ```
    pub fn outputs<T: FromTuple>(&mut self, args: impl ToTuple) -> Result<T, E> {
        Ok(T::from_tuple(&self.apply(args)?)?)
    }

    /// Returns `true` if the outputs for `args` are cached.
    pub fn contains_key_of(&self, args: impl ToTuple) -> bool {
        self.repository.contains_key(&args.to_tuple())
    }

    /// Returns the cached outputs for `args`, without computing them.
    pub fn retrieve(&self, args: impl ToTuple) -> Option<Tuple> {
        self.repository.retrieve(&args.to_tuple()).cloned()
    }

    /// See [`Repository::update()`].
    pub fn update(&mut self, args: impl ToTuple, expected: Option<&Tuple>, outputs: Option<Tuple>) -> Option<Tuple> {
        self.repository.update(args.to_tuple(), expected, outputs)
    }

    /// Removes every entry for which `predicate(key, outputs)` returns
    /// `true`, closing the removed outputs. See [`Repository::clear()`].
    pub fn clear(&mut self, predicate: impl FnMut(&Tuple, &Tuple) -> bool) -> usize {
        self.repository.clear(predicate)
    }

    pub fn len(&self) -> usize { self.repository.len() }

    pub fn is_empty(&self) -> bool { self.repository.is_empty() }
}

impl<A, E> Debug for MultiKeyRepository<A, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MultiKeyRepository").field(&self.repository).finish()
    }
}

// ----------------------------------------------------------------------------
