//! A pure-Rust library providing immutable heterogeneous tuples with
//! structural equality, and memoization keyed by those tuples.
//!
//! [`Tuple`] represents a fixed-length sequence of [`Value`]s. Each `Value`
//! is a scalar, a string, an [`Array`], a nested `Tuple`, or a user-defined
//! [`Object`]. Tuples compare and hash structurally: two tuples built
//! independently from equal contents are equal, even if one holds a packed
//! `Vec<i32>` where the other holds a `Vec<Option<i32>>`. The rules are
//! described in module [`equality`].
//!
//! Every non-null `Value` has a runtime [`ValueType`]. Module [`classify`]
//! decides whether a runtime type is acceptable for a target type, treating
//! the primitive and boxed flavours of each [`Scalar`] as interchangeable.
//! [`Tuple::subset_of()`] and module [`filter`] use it to extract the
//! values of a given type from a heterogeneous tuple.
//!
//! [`Repository`] is a memoizing cache: each key is computed by a factory at
//! most once, unless the computation fails, in which case it is retried next
//! time. [`MultiKeyRepository`] builds on it to memoize a function of several
//! arguments, assembling the arguments into a key `Tuple` on every call.
//! Because the key is compared structurally, a freshly-constructed key finds
//! the entry stored under any equal key.
//!
//! Tuples and repository values can hold resources that implement
//! [`Close`]. [`Tuple::close()`] closes the resources it holds in reverse
//! order, and a repository closes the values it evicts.
//!
//! Rust tuples of up to twelve elements convert to and from `Tuple` using
//! [`ToTuple`] and [`FromTuple`]. The [`tuple!`] macro builds a `Tuple` from
//! a list of expressions.
//!
//! ```
//! use tuplekit::{tuple, MultiKeyRepository};
//! let mut r: MultiKeyRepository<(String,)> = MultiKeyRepository::from_key_function(
//!     |(s,): (String,)| Ok(tuple!(s.len() as i32, s.contains('a'))),
//! );
//! assert_eq!(r.apply(("abc",)).unwrap(), tuple!(3, true));
//! assert_eq!(r.apply((String::from("abc"),)).unwrap(), tuple!(3, true));
//! assert_eq!(r.apply(("",)).unwrap(), tuple!(0, false));
//! assert_eq!(r.len(), 2);
//! ```
//!
//! All types in this crate are single-threaded.

mod error;
pub use error::{TupleError};

mod types;
pub use types::{Scalar, ObjectType, ValueType};

mod value;
pub use value::{Value, Array, ArrayIter, ArrayElement, FromValue, Typed};

mod object;
pub use object::{Object};

pub mod equality;

mod close;
pub use close::{Close, MaybeClose};

pub mod classify;
pub use classify::{TypePredicate};

mod tuple;
pub use tuple::{Tuple, ToTuple, FromTuple};

pub mod filter;

mod repository;
pub use repository::{Repository, Factory};

mod multikey;
pub use multikey::{MultiKeyRepository};
