//! The contents of a single [`Tuple`] slot.
//!
//! [`Value`] is a tagged variant covering the scalar kinds, strings, arrays,
//! nested tuples and user-defined objects. Conversions in and out of `Value`
//! are provided by [`From`] and [`FromValue`] respectively.
//!
//! [`Tuple`]: super::Tuple

use std::fmt::{self, Debug, Display};
use std::rc::{Rc};

use super::{Scalar, ValueType, Tuple, Object};

/// One slot of a [`Tuple`].
///
/// Equality and hashing are structural; see [`equality`].
///
/// [`Tuple`]: super::Tuple
/// [`equality`]: super::equality
#[derive(Debug, Default, Clone)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Char(char),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Str(Rc<str>),
    Array(Array),
    Tuple(Tuple),
    Object(Object),
}

impl Value {
    pub fn is_null(&self) -> bool { matches!(self, Self::Null) }

    /// Returns the runtime type of `self`, or `None` if `self` is `Null`.
    pub fn value_type(&self) -> Option<ValueType> { ValueType::of(self) }

    /// A short description of the runtime type, for error messages.
    pub(crate) fn type_name(&self) -> String {
        self.value_type().map_or_else(|| "null".into(), |t| t.to_string())
    }

    /// Stores a user-defined value with value semantics: two objects are
    /// equal iff they have the same type and compare equal with `==`.
    ///
    /// ```
    /// use tuplekit::{Value};
    /// #[derive(Debug, PartialEq, Eq, Hash)]
    /// struct Point(i32, i32);
    /// assert_eq!(Value::object(Point(1, 2)), Value::object(Point(1, 2)));
    /// assert_eq!(Value::object(Point(1, 2)).downcast_ref::<Point>(), Some(&Point(1, 2)));
    /// ```
    pub fn object<T>(t: T) -> Self where
        T: 'static + Debug + Eq + std::hash::Hash,
    {
        Self::Object(Object::new(t))
    }

    /// Stores a resource that exposes the [`Close`] capability. Resources
    /// have identity semantics: a resource is only equal to itself (and to
    /// clones of the same `Value`).
    ///
    /// [`Close`]: super::Close
    pub fn resource<T>(t: T) -> Self where
        T: 'static + Debug + super::Close,
    {
        Self::Object(Object::resource(t))
    }

    /// Returns the user-defined value stored by [`Value::object()`] or
    /// [`Value::resource()`], if it has type `T`.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        match self {
            Self::Object(o) => o.downcast_ref(),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&Tuple> {
        match self {
            Self::Tuple(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(x) => write!(f, "{}", x),
            Self::Char(x) => write!(f, "{}", x),
            Self::I8(x) => write!(f, "{}", x),
            Self::I16(x) => write!(f, "{}", x),
            Self::I32(x) => write!(f, "{}", x),
            Self::I64(x) => write!(f, "{}", x),
            Self::F32(x) => write!(f, "{}", x),
            Self::F64(x) => write!(f, "{}", x),
            Self::Str(x) => write!(f, "{}", x),
            Self::Array(x) => write!(f, "{}", x),
            Self::Tuple(x) => write!(f, "{}", x),
            Self::Object(x) => write!(f, "{:?}", x),
        }
    }
}

// ----------------------------------------------------------------------------

/// An immutable array stored in a [`Value`].
///
/// Primitive arrays are packed and cannot contain [`Value::Null`]. Boxed
/// arrays hold arbitrary `Value`s and record a declared element type. A
/// primitive array and a boxed array with the same contents are equal.
///
/// ```
/// use tuplekit::{Value};
/// assert_eq!(Value::from(vec![1, 2, 3]), Value::from(vec![Some(1), Some(2), Some(3)]));
/// assert_ne!(Value::from(vec![1, 0]), Value::from(vec![Some(1), None]));
/// ```
#[derive(Debug, Clone)]
pub enum Array {
    Bool(Rc<[bool]>),
    Char(Rc<[char]>),
    I8(Rc<[i8]>),
    I16(Rc<[i16]>),
    I32(Rc<[i32]>),
    I64(Rc<[i64]>),
    F32(Rc<[f32]>),
    F64(Rc<[f64]>),
    Boxed(ValueType, Rc<[Value]>),
}

impl Array {
    /// Constructs a boxed array with declared element type `element`.
    pub fn boxed(element: ValueType, items: impl IntoIterator<Item=Value>) -> Self {
        Self::Boxed(element, items.into_iter().collect())
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Bool(a) => a.len(),
            Self::Char(a) => a.len(),
            Self::I8(a) => a.len(),
            Self::I16(a) => a.len(),
            Self::I32(a) => a.len(),
            Self::I64(a) => a.len(),
            Self::F32(a) => a.len(),
            Self::F64(a) => a.len(),
            Self::Boxed(_, a) => a.len(),
        }
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn is_primitive(&self) -> bool { !matches!(self, Self::Boxed(..)) }

    /// The element type: [`ValueType::Primitive`] for packed arrays, or the
    /// declared type for boxed arrays.
    pub fn element_type(&self) -> ValueType {
        match self {
            Self::Bool(_) => ValueType::Primitive(Scalar::Bool),
            Self::Char(_) => ValueType::Primitive(Scalar::Char),
            Self::I8(_) => ValueType::Primitive(Scalar::I8),
            Self::I16(_) => ValueType::Primitive(Scalar::I16),
            Self::I32(_) => ValueType::Primitive(Scalar::I32),
            Self::I64(_) => ValueType::Primitive(Scalar::I64),
            Self::F32(_) => ValueType::Primitive(Scalar::F32),
            Self::F64(_) => ValueType::Primitive(Scalar::F64),
            Self::Boxed(t, _) => t.clone(),
        }
    }

    /// Returns element `index` as a `Value`, boxing primitives.
    pub fn get(&self, index: usize) -> Option<Value> {
        Some(match self {
            Self::Bool(a) => Value::Bool(*a.get(index)?),
            Self::Char(a) => Value::Char(*a.get(index)?),
            Self::I8(a) => Value::I8(*a.get(index)?),
            Self::I16(a) => Value::I16(*a.get(index)?),
            Self::I32(a) => Value::I32(*a.get(index)?),
            Self::I64(a) => Value::I64(*a.get(index)?),
            Self::F32(a) => Value::F32(*a.get(index)?),
            Self::F64(a) => Value::F64(*a.get(index)?),
            Self::Boxed(_, a) => a.get(index)?.clone(),
        })
    }

    /// Iterates over the elements as `Value`s, boxing primitives.
    pub fn iter(&self) -> ArrayIter<'_> { ArrayIter {array: self, index: 0} }
}

impl Display for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.iter().enumerate() {
            if i > 0 { write!(f, ", ")?; }
            write!(f, "{}", v)?;
        }
        write!(f, "]")
    }
}

/// The return type of [`Array::iter()`].
#[derive(Debug, Clone)]
pub struct ArrayIter<'a> {
    array: &'a Array,
    index: usize,
}

impl<'a> Iterator for ArrayIter<'a> {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        let value = self.array.get(self.index)?;
        self.index += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.array.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for ArrayIter<'a> {}

// ----------------------------------------------------------------------------

/// Implemented by types that can be the elements of an [`Array`].
///
/// Scalars produce primitive arrays; everything else (including
/// `Option<scalar>`) produces boxed arrays.
pub trait ArrayElement: Sized {
    /// The element type of an array of `Self`.
    fn element_type() -> ValueType;

    fn into_array(items: Vec<Self>) -> Array;
}

macro_rules! impl_scalar {
    ($t:ty, $variant:ident) => {
        impl From<$t> for Value {
            fn from(x: $t) -> Self { Self::$variant(x) }
        }

        impl ArrayElement for $t {
            fn element_type() -> ValueType { ValueType::Primitive(Scalar::$variant) }
            fn into_array(items: Vec<Self>) -> Array { Array::$variant(items.into()) }
        }

        impl FromValue for $t {
            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::$variant(x) => Some(*x),
                    _ => None,
                }
            }
        }

        impl Typed for $t {
            fn value_type() -> ValueType { ValueType::Boxed(Scalar::$variant) }
        }
    };
}

impl_scalar!(bool, Bool);
impl_scalar!(char, Char);
impl_scalar!(i8, I8);
impl_scalar!(i16, I16);
impl_scalar!(i32, I32);
impl_scalar!(i64, I64);
impl_scalar!(f32, F32);
impl_scalar!(f64, F64);

impl From<&str> for Value {
    fn from(s: &str) -> Self { Self::Str(s.into()) }
}

impl From<String> for Value {
    fn from(s: String) -> Self { Self::Str(s.into()) }
}

impl From<Rc<str>> for Value {
    fn from(s: Rc<str>) -> Self { Self::Str(s) }
}

impl From<Array> for Value {
    fn from(a: Array) -> Self { Self::Array(a) }
}

impl From<Tuple> for Value {
    fn from(t: Tuple) -> Self { Self::Tuple(t) }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self { Self::Object(o) }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(x: Option<T>) -> Self { x.map_or(Self::Null, Into::into) }
}

impl<T: ArrayElement> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self { Self::Array(T::into_array(items)) }
}

impl<T: ArrayElement + Clone> From<&[T]> for Value {
    fn from(items: &[T]) -> Self { Self::Array(T::into_array(items.to_vec())) }
}

impl<T: ArrayElement, const N: usize> From<[T; N]> for Value {
    fn from(items: [T; N]) -> Self { Self::Array(T::into_array(items.into())) }
}

fn boxed_array<T: Into<Value>>(element: ValueType, items: Vec<T>) -> Array {
    Array::boxed(element, items.into_iter().map(Into::into))
}

impl<T: ArrayElement + Into<Value>> ArrayElement for Option<T> {
    fn element_type() -> ValueType {
        match T::element_type() {
            ValueType::Primitive(s) => ValueType::Boxed(s),
            other => other,
        }
    }

    fn into_array(items: Vec<Self>) -> Array { boxed_array(Self::element_type(), items) }
}

impl ArrayElement for String {
    fn element_type() -> ValueType { ValueType::Str }
    fn into_array(items: Vec<Self>) -> Array { boxed_array(ValueType::Str, items) }
}

impl<'a> ArrayElement for &'a str {
    fn element_type() -> ValueType { ValueType::Str }
    fn into_array(items: Vec<Self>) -> Array { boxed_array(ValueType::Str, items) }
}

impl ArrayElement for Tuple {
    fn element_type() -> ValueType { ValueType::Tuple }
    fn into_array(items: Vec<Self>) -> Array { boxed_array(ValueType::Tuple, items) }
}

impl ArrayElement for Value {
    fn element_type() -> ValueType { ValueType::Any }
    fn into_array(items: Vec<Self>) -> Array { Array::boxed(ValueType::Any, items) }
}

impl<T: ArrayElement> ArrayElement for Vec<T> {
    fn element_type() -> ValueType { ValueType::array(T::element_type()) }

    fn into_array(items: Vec<Self>) -> Array {
        Array::boxed(Self::element_type(), items.into_iter().map(Value::from))
    }
}

// ----------------------------------------------------------------------------

/// Implemented by types that can be read out of a [`Value`].
///
/// Scalars convert only from the matching variant; there is no numeric
/// widening. Arrays convert from either representation.
///
/// ```
/// use tuplekit::{Value, FromValue};
/// assert_eq!(i32::from_value(&Value::I32(3)), Some(3));
/// assert_eq!(i64::from_value(&Value::I32(3)), None);
/// assert_eq!(Vec::<i32>::from_value(&Value::from(vec![Some(1), Some(2)])), Some(vec![1, 2]));
/// assert_eq!(Option::<i32>::from_value(&Value::Null), Some(None));
/// ```
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Option<Self> { Some(value.clone()) }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> { value.as_str().map(String::from) }
}

impl FromValue for Rc<str> {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Str(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FromValue for Tuple {
    fn from_value(value: &Value) -> Option<Self> { value.as_tuple().cloned() }
}

impl FromValue for Array {
    fn from_value(value: &Value) -> Option<Self> { value.as_array().cloned() }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Option<Self> {
        if value.is_null() { return Some(None); }
        T::from_value(value).map(Some)
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_array()?.iter().map(|v| T::from_value(&v)).collect()
    }
}

// ----------------------------------------------------------------------------

/// Implemented by types that correspond to a [`ValueType`] known at
/// compile time. Used to extract typed subsets of a [`Tuple`].
///
/// [`Tuple`]: super::Tuple
pub trait Typed {
    fn value_type() -> ValueType;
}

impl Typed for Value {
    fn value_type() -> ValueType { ValueType::Any }
}

impl Typed for String {
    fn value_type() -> ValueType { ValueType::Str }
}

impl Typed for Rc<str> {
    fn value_type() -> ValueType { ValueType::Str }
}

impl Typed for Tuple {
    fn value_type() -> ValueType { ValueType::Tuple }
}

impl<T: Typed> Typed for Option<T> {
    fn value_type() -> ValueType { T::value_type() }
}

impl<T: ArrayElement> Typed for Vec<T> {
    fn value_type() -> ValueType { ValueType::array(T::element_type()) }
}

// ----------------------------------------------------------------------------
