//! Immutable, fixed-length, heterogeneous containers.
//!
//! A [`Tuple`] is an ordered sequence of [`Value`]s. Its length is fixed at
//! construction and its slots are never reassigned. Cloning a `Tuple` is
//! cheap: clones share the same slots.
//!
//! Tuples come in two kinds. A *plain* tuple is created by
//! [`Tuple::create()`], [`Tuple::from_values()`] or the [`tuple!`] macro. A
//! *homogeneous* tuple additionally records a declared element type; it is
//! created by [`Tuple::homogeneous()`], [`Tuple::infer_homogeneous()`] or
//! [`Tuple::subset_of()`]. The kind participates in equality.
//!
//! Rust tuples of up to twelve elements convert to and from `Tuple` through
//! the traits [`ToTuple`] and [`FromTuple`]:
//!
//! ```
//! use tuplekit::{Tuple, FromTuple};
//! let t = Tuple::create((3, "abc", vec![1, 2]));
//! assert_eq!(t.len(), 3);
//! let (n, s, v): (i32, String, Vec<i32>) = FromTuple::from_tuple(&t).unwrap();
//! assert_eq!((n, s.as_str(), v), (3, "abc", vec![1, 2]));
//! ```
//!
//! [`tuple!`]: crate::tuple!

use std::cell::{Cell};
use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};
use std::rc::{Rc};

use tracing::{debug, warn};

use super::{Value, ValueType, FromValue, Typed, TupleError, Close, MaybeClose, classify, equality, filter};

#[derive(Debug, Clone)]
enum Kind {
    Plain,
    Homogeneous(ValueType),
}

struct Inner {
    kind: Kind,
    values: Box<[Value]>,
    closed: Cell<bool>,
}

/// An immutable, fixed-length sequence of [`Value`]s.
///
/// Two `Tuple`s are equal iff they have the same kind (and, if homogeneous,
/// the same declared element type up to the primitive/boxed unification of
/// [`ValueType::boxed()`]), the
/// same length, and pairwise equal slots. See [`equality`] for how slots are
/// compared.
///
/// [`equality`]: super::equality
#[derive(Clone)]
pub struct Tuple(Rc<Inner>);

thread_local! {
    static EMPTY: Tuple = Tuple::new_inner(Kind::Plain, Box::new([]));
}

impl Tuple {
    fn new_inner(kind: Kind, values: Box<[Value]>) -> Self {
        Self(Rc::new(Inner {kind, values, closed: Cell::new(false)}))
    }

    /// Returns the empty plain tuple. Every call on a given thread returns
    /// the same instance.
    ///
    /// ```
    /// use tuplekit::{Tuple};
    /// assert!(Tuple::ptr_eq(&Tuple::empty(), &Tuple::create(())));
    /// ```
    pub fn empty() -> Self { EMPTY.with(Tuple::clone) }

    /// Constructs a plain tuple from a Rust tuple, or any other [`ToTuple`].
    pub fn create(args: impl ToTuple) -> Self { args.to_tuple() }

    /// Constructs a plain tuple from a sequence of values.
    pub fn from_values(values: impl IntoIterator<Item=Value>) -> Self {
        let values: Box<[Value]> = values.into_iter().collect();
        if values.is_empty() { return Self::empty(); }
        Self::new_inner(Kind::Plain, values)
    }

    /// Constructs a homogeneous tuple with declared element type
    /// `element_type`.
    ///
    /// Every non-null value must be compatible with `element_type`
    /// according to [`classify`]; otherwise this returns
    /// [`TupleError::TypeMismatch`].
    ///
    /// ```
    /// use tuplekit::{Tuple, Value, ValueType, Scalar};
    /// let bools = Tuple::homogeneous(ValueType::Boxed(Scalar::Bool), [Value::Null, Value::Null]).unwrap();
    /// let strings = Tuple::homogeneous(ValueType::Str, [Value::Null, Value::Null]).unwrap();
    /// assert_ne!(bools, strings);
    /// assert!(Tuple::homogeneous(ValueType::Str, [Value::from(1)]).is_err());
    /// ```
    pub fn homogeneous(
        element_type: ValueType,
        values: impl IntoIterator<Item=Value>,
    ) -> Result<Self, TupleError> {
        let values: Box<[Value]> = values.into_iter().collect();
        let predicate = classify::predicate_for(&element_type);
        if let Some(index) = values.iter().position(|v| !v.is_null() && !predicate.test_value(v)) {
            return Err(TupleError::TypeMismatch {
                index,
                expected: element_type,
                found: values[index].type_name(),
            });
        }
        Ok(Self::new_inner(Kind::Homogeneous(element_type), values))
    }

    /// Constructs a homogeneous tuple, inferring the element type from the
    /// runtime types of the non-null values. Mixed types give their most
    /// specific common ancestor; if there are no non-null values the element
    /// type is [`ValueType::Any`].
    ///
    /// ```
    /// use tuplekit::{Tuple, Value, ValueType, Scalar};
    /// let t = Tuple::infer_homogeneous([Value::from(1), Value::Null, Value::from(2)]);
    /// assert_eq!(t.element_type(), Some(&ValueType::Boxed(Scalar::I32)));
    /// let t = Tuple::infer_homogeneous([Value::from(1), Value::from(2i64)]);
    /// assert_eq!(t.element_type(), Some(&ValueType::Number));
    /// ```
    pub fn infer_homogeneous(values: impl IntoIterator<Item=Value>) -> Self {
        let values: Box<[Value]> = values.into_iter().collect();
        let element_type = values.iter()
            .filter_map(ValueType::of)
            .reduce(|a, b| a.common_ancestor(&b))
            .unwrap_or(ValueType::Any);
        Self::new_inner(Kind::Homogeneous(element_type), values)
    }

    /// Constructs a homogeneous tuple whose element type is known at compile
    /// time.
    pub fn homogeneous_of<T: Typed + Into<Value>>(items: impl IntoIterator<Item=T>) -> Self {
        Self::new_inner(Kind::Homogeneous(T::value_type()), items.into_iter().map(Into::into).collect())
    }

    /// Constructs a homogeneous tuple without checking the values.
    pub(crate) fn homogeneous_unchecked(element_type: ValueType, values: Vec<Value>) -> Self {
        Self::new_inner(Kind::Homogeneous(element_type), values.into())
    }

    /// Returns `true` if `a` and `b` share the same slots.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool { Rc::ptr_eq(&a.0, &b.0) }

    pub fn len(&self) -> usize { self.0.values.len() }

    pub fn is_empty(&self) -> bool { self.0.values.is_empty() }

    /// Returns the declared element type of a homogeneous tuple.
    pub fn element_type(&self) -> Option<&ValueType> {
        match &self.0.kind {
            Kind::Plain => None,
            Kind::Homogeneous(t) => Some(t),
        }
    }

    pub fn is_homogeneous(&self) -> bool { self.element_type().is_some() }

    /// Returns the value in slot `index`.
    pub fn value_at(&self, index: usize) -> Result<&Value, TupleError> {
        self.0.values.get(index).ok_or(TupleError::IndexOutOfBounds {index, length: self.len()})
    }

    /// Returns the value in slot `index`, converted to a `T`.
    ///
    /// ```
    /// use tuplekit::{tuple, TupleError};
    /// let t = tuple!(3, "abc");
    /// assert_eq!(t.get::<i32>(0), Ok(3));
    /// assert!(matches!(t.get::<i32>(1), Err(TupleError::TypeMismatch {index: 1, ..})));
    /// assert!(matches!(t.get::<i32>(2), Err(TupleError::IndexOutOfBounds {index: 2, length: 2})));
    /// ```
    pub fn get<T: FromValue + Typed>(&self, index: usize) -> Result<T, TupleError> {
        let value = self.value_at(index)?;
        T::from_value(value).ok_or_else(|| TupleError::TypeMismatch {
            index,
            expected: T::value_type(),
            found: value.type_name(),
        })
    }

    pub fn values(&self) -> &[Value] { &self.0.values }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> { self.0.values.iter() }

    /// Returns a copy of the slots.
    pub fn to_vec(&self) -> Vec<Value> { self.0.values.to_vec() }

    pub fn contains(&self, value: &Value) -> bool { self.iter().any(|v| v == value) }

    /// Returns a homogeneous tuple containing, in order, the non-null values
    /// whose runtime type is compatible with `target`. See [`filter`].
    ///
    /// [`filter`]: super::filter
    pub fn subset_of(&self, target: &ValueType) -> Tuple { filter::subset_of(self, target) }

    /// Like [`subset_of()`], but also requires `condition` to return
    /// `Ok(true)`. Values for which `condition` fails are excluded.
    ///
    /// [`subset_of()`]: Self::subset_of()
    pub fn subset_where<E: Display>(
        &self,
        target: &ValueType,
        condition: impl FnMut(&Value) -> Result<bool, E>,
    ) -> Tuple {
        filter::subset_where(self, target, condition)
    }

    /// Returns the values that can be read as a `T`, in order.
    ///
    /// ```
    /// use tuplekit::{tuple};
    /// let t = tuple!(1, "a", vec![2, 3], 4, vec![Some(5)]);
    /// assert_eq!(t.extract::<i32>(), vec![1, 4]);
    /// assert_eq!(t.extract::<Vec<i32>>(), vec![vec![2, 3], vec![5]]);
    /// ```
    pub fn extract<T: FromValue + Typed>(&self) -> Vec<T> {
        self.subset_of(&T::value_type()).iter().filter_map(T::from_value).collect()
    }

    pub fn is_closed(&self) -> bool { self.0.closed.get() }

    /// Closes every value that exposes the [`Close`] capability, in reverse
    /// order, including nested tuples.
    ///
    /// Only the first call has any effect; the tuple and its clones are then
    /// marked closed. A failure to close one value is logged and does not
    /// prevent the remaining values from being closed.
    ///
    /// An empty tuple holds nothing to close and is never marked closed,
    /// since the empty plain tuple is shared.
    pub fn close(&self) {
        if self.is_empty() { return; }
        if self.0.closed.replace(true) { return; }
        debug!(length = self.len(), "closing tuple");
        for (index, value) in self.iter().enumerate().rev() {
            if let Some(c) = value.as_close() {
                if let Err(err) = c.close() {
                    warn!(index, error = %err, "failed to close tuple element");
                }
            }
        }
    }
}

impl Close for Tuple {
    fn close(&self) -> anyhow::Result<()> {
        Tuple::close(self);
        Ok(())
    }
}

impl Default for Tuple {
    fn default() -> Self { Self::empty() }
}

impl PartialEq for Tuple {
    fn eq(&self, other: &Self) -> bool {
        if Self::ptr_eq(self, other) { return true; }
        let same_kind = match (&self.0.kind, &other.0.kind) {
            (Kind::Plain, Kind::Plain) => true,
            (Kind::Homogeneous(a), Kind::Homogeneous(b)) => a.boxed() == b.boxed(),
            _ => false,
        };
        same_kind && equality::equal_slices(self.values(), other.values())
    }
}

impl Eq for Tuple {}

impl Hash for Tuple {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &self.0.kind {
            Kind::Plain => state.write_u8(0),
            Kind::Homogeneous(t) => {
                state.write_u8(1);
                t.boxed().hash(state);
            },
        }
        equality::hash_slice(self.values(), state);
    }
}

impl Debug for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_tuple("Tuple");
        if let Kind::Homogeneous(t) = &self.0.kind { d.field(&format_args!("<{}>", t)); }
        for v in self.iter() { d.field(v); }
        d.finish()
    }
}

impl Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, v) in self.iter().enumerate() {
            if i > 0 { write!(f, ", ")?; }
            write!(f, "{}", v)?;
        }
        write!(f, ")")
    }
}

impl<'a> IntoIterator for &'a Tuple {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;
    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

impl FromIterator<Value> for Tuple {
    fn from_iter<I: IntoIterator<Item=Value>>(iter: I) -> Self { Self::from_values(iter) }
}

// ----------------------------------------------------------------------------

/// Implemented by types that can be assembled into a plain [`Tuple`].
///
/// Rust tuples of up to twelve elements implement `ToTuple` if every
/// element is `Clone + Into<Value>`.
pub trait ToTuple {
    fn to_tuple(&self) -> Tuple;
}

/// Implemented by types that can be read out of a [`Tuple`], slot by slot.
///
/// Rust tuples of up to twelve elements implement `FromTuple` if every
/// element implements [`FromValue`] and [`Typed`]. The `Tuple` must have
/// exactly the right length.
pub trait FromTuple: Sized {
    fn from_tuple(tuple: &Tuple) -> Result<Self, TupleError>;
}

impl ToTuple for Tuple {
    fn to_tuple(&self) -> Tuple { self.clone() }
}

impl FromTuple for Tuple {
    fn from_tuple(tuple: &Tuple) -> Result<Self, TupleError> { Ok(tuple.clone()) }
}

impl ToTuple for () {
    fn to_tuple(&self) -> Tuple { Tuple::empty() }
}

impl FromTuple for () {
    fn from_tuple(tuple: &Tuple) -> Result<Self, TupleError> {
        check_length(tuple, 0)
    }
}

fn check_length(tuple: &Tuple, expected: usize) -> Result<(), TupleError> {
    if tuple.len() == expected { return Ok(()); }
    Err(TupleError::LengthMismatch {expected, length: tuple.len()})
}

macro_rules! impl_tuple_conversions {
    ($len:expr; $($index:tt: $t:ident),+) => {
        impl<$($t: Clone + Into<Value>),+> ToTuple for ($($t,)+) {
            fn to_tuple(&self) -> Tuple {
                Tuple::from_values([$(self.$index.clone().into()),+])
            }
        }

        impl<$($t: FromValue + Typed),+> FromTuple for ($($t,)+) {
            fn from_tuple(tuple: &Tuple) -> Result<Self, TupleError> {
                check_length(tuple, $len)?;
                Ok(($(tuple.get::<$t>($index)?,)+))
            }
        }
    };
}

impl_tuple_conversions!(1; 0: A);
impl_tuple_conversions!(2; 0: A, 1: B);
impl_tuple_conversions!(3; 0: A, 1: B, 2: C);
impl_tuple_conversions!(4; 0: A, 1: B, 2: C, 3: D);
impl_tuple_conversions!(5; 0: A, 1: B, 2: C, 3: D, 4: E);
impl_tuple_conversions!(6; 0: A, 1: B, 2: C, 3: D, 4: E, 5: F);
impl_tuple_conversions!(7; 0: A, 1: B, 2: C, 3: D, 4: E, 5: F, 6: G);
impl_tuple_conversions!(8; 0: A, 1: B, 2: C, 3: D, 4: E, 5: F, 6: G, 7: H);
impl_tuple_conversions!(9; 0: A, 1: B, 2: C, 3: D, 4: E, 5: F, 6: G, 7: H, 8: I);
impl_tuple_conversions!(10; 0: A, 1: B, 2: C, 3: D, 4: E, 5: F, 6: G, 7: H, 8: I, 9: J);
impl_tuple_conversions!(11; 0: A, 1: B, 2: C, 3: D, 4: E, 5: F, 6: G, 7: H, 8: I, 9: J, 10: K);
impl_tuple_conversions!(12; 0: A, 1: B, 2: C, 3: D, 4: E, 5: F, 6: G, 7: H, 8: I, 9: J, 10: K, 11: L);

/// Constructs a plain [`Tuple`] from a list of expressions, each of which is
/// converted using [`Value::from()`].
///
/// ```
/// use tuplekit::{tuple, Tuple, Value};
/// let t = tuple!(1, "two", 3.0, vec![4, 5], Value::Null);
/// assert_eq!(t.len(), 5);
/// assert_eq!(tuple!(), Tuple::empty());
/// ```
///
/// [`Tuple`]: super::Tuple
/// [`Value::from()`]: super::Value
#[macro_export]
macro_rules! tuple {
    () => { $crate::Tuple::empty() };
    ($($x:expr),+ $(,)?) => {
        $crate::Tuple::from_values([$($crate::Value::from($x)),+])
    };
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::cell::{RefCell};
    use std::collections::hash_map::{DefaultHasher};

    use super::*;
    use crate::{Scalar, tuple};

    fn hash_of(t: &Tuple) -> u64 {
        let mut state = DefaultHasher::new();
        t.hash(&mut state);
        state.finish()
    }

    #[test]
    fn equality_laws() {
        let a = tuple!(1, "x", vec![1, 2]);
        let b = tuple!(1, "x", vec![1, 2]);
        let c = Tuple::create((1, "x", vec![Some(1), Some(2)]));
        assert_eq!(a, a);
        assert_eq!(a, b);
        assert_eq!(b, a);
        assert_eq!(b, c);
        assert_eq!(a, c);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_eq!(hash_of(&a), hash_of(&c));
        assert_ne!(a, tuple!(1, "x"));
        assert_ne!(a, tuple!(1, "y", vec![1, 2]));
        assert!(a.contains(&Value::from(vec![Some(1), Some(2)])));
        assert!(!a.contains(&Value::from("y")));
        let collected: Tuple = [Value::from(1), Value::from("x"), Value::from(vec![1, 2])].into_iter().collect();
        assert_eq!(collected, a);
        let none: Tuple = std::iter::empty::<Value>().collect();
        assert!(Tuple::ptr_eq(&none, &Tuple::empty()));
    }

    #[derive(Debug, PartialEq, Eq, Hash)]
    struct Port(u32);

    impl Close for Port {
        fn close(&self) -> anyhow::Result<()> { Ok(()) }
    }

    #[test]
    fn object_and_resource_slots() {
        let a = tuple!(Value::object(Port(80)));
        let b = tuple!(Value::resource(Port(80)));
        assert_ne!(a, b);
        assert_ne!(b, a);
        assert_eq!(a, tuple!(Value::object(Port(80))));
        assert_eq!(b, b.clone());
        assert_eq!(hash_of(&b), hash_of(&b.clone()));
    }

    #[test]
    fn primitive_boxed_arrays() {
        let ints = Tuple::create((vec![1, 2, 3],));
        let integers = Tuple::create((vec![Some(1), Some(2), Some(3)],));
        assert_eq!(ints, integers);
        assert_eq!(hash_of(&ints), hash_of(&integers));
    }

    #[test]
    fn kind_discrimination() {
        let bools = Tuple::homogeneous(ValueType::Boxed(Scalar::Bool), [Value::Null, Value::Null]).unwrap();
        let strings = Tuple::homogeneous(ValueType::Str, [Value::Null, Value::Null]).unwrap();
        let plain = tuple!(Value::Null, Value::Null);
        assert_ne!(bools, strings);
        assert_ne!(bools, plain);
        assert_ne!(plain, bools);
        let raw = Tuple::homogeneous(ValueType::Primitive(Scalar::Bool), [Value::Null, Value::Null]).unwrap();
        assert_eq!(bools, raw);
        assert_eq!(hash_of(&bools), hash_of(&raw));
        let int = ValueType::Primitive(Scalar::I32);
        let integer = ValueType::Boxed(Scalar::I32);
        let ints = Tuple::homogeneous(ValueType::array(int.clone()), Vec::new()).unwrap();
        let integers = Tuple::homogeneous(ValueType::array(integer.clone()), Vec::new()).unwrap();
        assert_eq!(ints, integers);
        assert_eq!(hash_of(&ints), hash_of(&integers));
        let nested_ints = Tuple::homogeneous(ValueType::array(ValueType::array(int)), Vec::new()).unwrap();
        let nested_integers = Tuple::homogeneous(ValueType::array(ValueType::array(integer)), Vec::new()).unwrap();
        assert_ne!(nested_ints, nested_integers);
        assert_ne!(nested_integers, nested_ints);
    }

    #[test]
    fn empty_singleton() {
        let a = Tuple::create(());
        let b = Tuple::from_values(Vec::new());
        assert!(Tuple::ptr_eq(&a, &b));
        assert!(Tuple::ptr_eq(&a, &Tuple::empty()));
        assert_eq!(a, tuple!());
        assert_eq!(a, Tuple::default());
        assert!(a.is_empty());
        let homogeneous = Tuple::homogeneous(ValueType::Any, Vec::new()).unwrap();
        assert_ne!(a, homogeneous);
        Tuple::from_values(Vec::new()).close();
        homogeneous.close();
        assert!(!Tuple::create(()).is_closed());
        assert!(!homogeneous.is_closed());
    }

    #[test]
    fn value_at() {
        let t = tuple!(1, Value::Null);
        assert_eq!(t.value_at(0), Ok(&Value::I32(1)));
        assert_eq!(t.value_at(1), Ok(&Value::Null));
        assert_eq!(t.value_at(2), Err(TupleError::IndexOutOfBounds {index: 2, length: 2}));
        assert_eq!(t.get::<Option<i32>>(1), Ok(None));
    }

    #[test]
    fn infer_homogeneous() {
        let t = Tuple::infer_homogeneous([Value::Null, Value::Null]);
        assert_eq!(t.element_type(), Some(&ValueType::Any));
        let t = Tuple::infer_homogeneous(Vec::new());
        assert_eq!(t.element_type(), Some(&ValueType::Any));
        let t = Tuple::infer_homogeneous([Value::from("a"), Value::from(1)]);
        assert_eq!(t.element_type(), Some(&ValueType::Any));
        let t = Tuple::infer_homogeneous([Value::from("a"), Value::from("b")]);
        assert_eq!(t.element_type(), Some(&ValueType::Str));
        let t = Tuple::homogeneous_of(vec![1.0, 2.0]);
        assert_eq!(t.element_type(), Some(&ValueType::Boxed(Scalar::F64)));
        assert!(!tuple!(1).is_homogeneous());
    }

    #[test]
    fn defensive_copy() {
        let t = Tuple::homogeneous_of(vec!["a", "b"].into_iter().map(String::from));
        let mut copy = t.to_vec();
        copy[0] = Value::from("z");
        assert_eq!(t.value_at(0), Ok(&Value::from("a")));
    }

    #[test]
    fn conversions() {
        let t = Tuple::create((1i8, 'c', Some(2.5f32), String::from("s")));
        let (a, b, c, d): (i8, char, Option<f32>, String) = FromTuple::from_tuple(&t).unwrap();
        assert_eq!((a, b, c, d.as_str()), (1, 'c', Some(2.5), "s"));
        assert_eq!(<(i8, char)>::from_tuple(&t), Err(TupleError::LengthMismatch {expected: 2, length: 4}));
        assert!(<(i8, i8, Option<f32>, String)>::from_tuple(&t).is_err());
        assert_eq!(<()>::from_tuple(&Tuple::empty()), Ok(()));
        let t12 = Tuple::create((1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12));
        assert_eq!(t12.len(), 12);
        assert_eq!(t12.get::<i32>(11), Ok(12));
    }

    #[test]
    fn display() {
        assert_eq!(tuple!(1, "abc", vec![1, 2], Value::Null).to_string(), "(1, abc, [1, 2], null)");
        assert_eq!(Tuple::empty().to_string(), "()");
        assert_eq!(tuple!(tuple!(true)).to_string(), "((true))");
    }

    #[derive(Debug)]
    struct Logged {
        name: &'static str,
        log: Rc<RefCell<Vec<&'static str>>>,
        fail: bool,
    }

    impl Close for Logged {
        fn close(&self) -> anyhow::Result<()> {
            self.log.borrow_mut().push(self.name);
            if self.fail { anyhow::bail!("{} failed to close", self.name); }
            Ok(())
        }
    }

    fn logged(name: &'static str, log: &Rc<RefCell<Vec<&'static str>>>, fail: bool) -> Value {
        Value::resource(Logged {name, log: log.clone(), fail})
    }

    #[test]
    fn close_in_reverse_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let t = tuple!(logged("a", &log, false), 7, logged("b", &log, false), logged("c", &log, false));
        t.close();
        assert_eq!(*log.borrow(), vec!["c", "b", "a"]);
        assert!(t.is_closed());
        t.close();
        t.clone().close();
        assert_eq!(log.borrow().len(), 3);
    }

    #[test]
    fn close_is_total() {
        let _ = tracing_subscriber::fmt().with_env_filter("warn").with_test_writer().try_init();
        let log = Rc::new(RefCell::new(Vec::new()));
        let inner = tuple!(logged("x", &log, false), logged("y", &log, true));
        let t = tuple!(logged("a", &log, false), inner.clone(), logged("b", &log, true));
        t.close();
        assert_eq!(*log.borrow(), vec!["b", "y", "x", "a"]);
        assert!(inner.is_closed());
    }

    #[test]
    fn never_closed() {
        let log = Rc::new(RefCell::new(Vec::new()));
        drop(tuple!(logged("a", &log, false)));
        assert!(log.borrow().is_empty());
    }
}
