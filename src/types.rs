//! Runtime type tags for the values stored in a [`Tuple`].
//!
//! Every non-null [`Value`] has a [`ValueType`], returned by
//! [`ValueType::of()`]. Scalars stored in a slot are always reported as
//! [`ValueType::Boxed`]; [`ValueType::Primitive`] only occurs as the element
//! type of a packed array such as `Vec<i32>`. The distinction matters for
//! arrays: a `Vec<i32>` and a `Vec<Option<i32>>` have different types, but
//! [`classify`] treats them as interchangeable.
//!
//! [`Tuple`]: super::Tuple
//! [`Value`]: super::Value
//! [`classify`]: super::classify

use std::any::{Any, TypeId};
use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};

use super::{Value};

/// The eight scalar kinds that come in a primitive and a boxed flavour.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Scalar {
    Bool,
    Char,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
}

impl Scalar {
    /// Every `Scalar`, in declaration order.
    pub const ALL: &'static [Self] = &[
        Self::Bool, Self::Char,
        Self::I8, Self::I16, Self::I32, Self::I64,
        Self::F32, Self::F64,
    ];

    /// Returns `true` for the six kinds that are [`ValueType::Number`]s.
    pub fn is_numeric(self) -> bool { !matches!(self, Self::Bool | Self::Char) }

    /// The Rust name of the primitive flavour.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }
}

// ----------------------------------------------------------------------------

/// Identifies a user-defined type stored via [`Value::object()`] or
/// [`Value::resource()`].
///
/// Two `ObjectType`s are equal iff they describe the same Rust type.
#[derive(Debug, Copy, Clone)]
pub struct ObjectType {
    id: TypeId,
    name: &'static str,
}

impl ObjectType {
    pub fn of<T: Any>() -> Self {
        Self {id: TypeId::of::<T>(), name: std::any::type_name::<T>()}
    }

    pub fn type_id(&self) -> TypeId { self.id }

    pub fn name(&self) -> &'static str { self.name }
}

impl PartialEq for ObjectType {
    fn eq(&self, other: &Self) -> bool { self.id == other.id }
}

impl Eq for ObjectType {}

impl Hash for ObjectType {
    fn hash<H: Hasher>(&self, state: &mut H) { self.id.hash(state); }
}

// ----------------------------------------------------------------------------

/// The runtime type of a [`Value`].
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum ValueType {
    /// The top type. Every type is assignable to `Any`.
    Any,
    /// The common supertype of the numeric [`ValueType::Boxed`] scalars.
    Number,
    /// A packed scalar, such as the elements of a `Vec<i32>`.
    Primitive(Scalar),
    /// A nullable scalar. Scalars stored in tuple slots have this type.
    Boxed(Scalar),
    Str,
    /// A [`Tuple`] of either kind.
    ///
    /// [`Tuple`]: super::Tuple
    Tuple,
    /// An array with the given element type.
    Array(Box<ValueType>),
    Object(ObjectType),
}

impl ValueType {
    /// Returns the runtime type of `value`, or `None` for [`Value::Null`].
    ///
    /// ```
    /// use tuplekit::{Value, ValueType, Scalar};
    /// assert_eq!(ValueType::of(&Value::from(3)), Some(ValueType::Boxed(Scalar::I32)));
    /// assert_eq!(ValueType::of(&Value::from(vec![1, 2])), Some(ValueType::array(ValueType::Primitive(Scalar::I32))));
    /// assert_eq!(ValueType::of(&Value::Null), None);
    /// ```
    pub fn of(value: &Value) -> Option<Self> {
        Some(match value {
            Value::Null => return None,
            Value::Bool(_) => Self::Boxed(Scalar::Bool),
            Value::Char(_) => Self::Boxed(Scalar::Char),
            Value::I8(_) => Self::Boxed(Scalar::I8),
            Value::I16(_) => Self::Boxed(Scalar::I16),
            Value::I32(_) => Self::Boxed(Scalar::I32),
            Value::I64(_) => Self::Boxed(Scalar::I64),
            Value::F32(_) => Self::Boxed(Scalar::F32),
            Value::F64(_) => Self::Boxed(Scalar::F64),
            Value::Str(_) => Self::Str,
            Value::Array(a) => Self::array(a.element_type()),
            Value::Tuple(_) => Self::Tuple,
            Value::Object(o) => Self::Object(o.object_type()),
        })
    }

    pub fn array(element: ValueType) -> Self { Self::Array(Box::new(element)) }

    /// Returns the boxed flavour of a primitive scalar, and of a
    /// one-dimensional array of a primitive scalar. Other types, including
    /// nested arrays, are returned unchanged.
    ///
    /// Two types with the same `boxed()` form are indistinguishable to
    /// [`classify`].
    ///
    /// [`classify`]: super::classify
    pub fn boxed(&self) -> Self {
        match self {
            Self::Primitive(s) => Self::Boxed(*s),
            Self::Array(e) => match **e {
                Self::Primitive(s) => Self::array(Self::Boxed(s)),
                _ => self.clone(),
            },
            other => other.clone(),
        }
    }

    /// Ordinary assignability, without primitive/boxed unification: can a
    /// value of type `candidate` be used where `self` is expected?
    ///
    /// ```
    /// use tuplekit::{ValueType, Scalar};
    /// let integer = ValueType::Boxed(Scalar::I32);
    /// assert!(ValueType::Number.is_assignable_from(&integer));
    /// assert!(ValueType::array(ValueType::Number).is_assignable_from(&ValueType::array(integer)));
    /// assert!(!ValueType::array(ValueType::Number).is_assignable_from(&ValueType::array(ValueType::Primitive(Scalar::I32))));
    /// ```
    pub fn is_assignable_from(&self, candidate: &ValueType) -> bool {
        if self == candidate { return true; }
        match (self, candidate) {
            (Self::Any, _) => true,
            (Self::Number, Self::Boxed(s)) => s.is_numeric(),
            (Self::Array(_), Self::Array(c)) if c.is_primitive() => false,
            (Self::Array(t), Self::Array(c)) => t.is_assignable_from(c),
            _ => false,
        }
    }

    /// The most specific type to which both `self` and `other` are
    /// assignable.
    pub fn common_ancestor(&self, other: &ValueType) -> Self {
        if self.is_assignable_from(other) { return self.clone(); }
        if other.is_assignable_from(self) { return other.clone(); }
        if Self::Number.is_assignable_from(self) && Self::Number.is_assignable_from(other) {
            return Self::Number;
        }
        match (self, other) {
            (Self::Array(a), Self::Array(b)) if !a.is_primitive() && !b.is_primitive() => {
                Self::array(a.common_ancestor(b))
            },
            _ => Self::Any,
        }
    }

    fn is_primitive(&self) -> bool { matches!(self, Self::Primitive(_)) }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "any"),
            Self::Number => write!(f, "number"),
            Self::Primitive(s) => write!(f, "unboxed {}", s.name()),
            Self::Boxed(s) => write!(f, "{}", s.name()),
            Self::Str => write!(f, "string"),
            Self::Tuple => write!(f, "tuple"),
            Self::Array(e) => write!(f, "[{}]", e),
            Self::Object(o) => write!(f, "{}", o.name()),
        }
    }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boxed() {
        let int = ValueType::Primitive(Scalar::I32);
        let integer = ValueType::Boxed(Scalar::I32);
        assert_eq!(int.boxed(), integer);
        assert_eq!(integer.boxed(), integer);
        assert_eq!(ValueType::array(int.clone()).boxed(), ValueType::array(integer.clone()));
        let nested = ValueType::array(ValueType::array(int.clone()));
        assert_eq!(nested.boxed(), nested);
        assert_ne!(nested.boxed(), ValueType::array(ValueType::array(integer)));
        assert_eq!(ValueType::Str.boxed(), ValueType::Str);
    }

    #[test]
    fn assignable() {
        let integer = ValueType::Boxed(Scalar::I32);
        let boolean = ValueType::Boxed(Scalar::Bool);
        let ints = ValueType::array(ValueType::Primitive(Scalar::I32));
        assert!(ValueType::Any.is_assignable_from(&ints));
        assert!(ValueType::Number.is_assignable_from(&integer));
        assert!(!ValueType::Number.is_assignable_from(&boolean));
        assert!(!integer.is_assignable_from(&ValueType::Number));
        assert!(ValueType::array(ValueType::Any).is_assignable_from(&ValueType::array(ValueType::Str)));
        assert!(!ValueType::array(ValueType::Any).is_assignable_from(&ints));
        assert!(!ValueType::Str.is_assignable_from(&ValueType::Tuple));
    }

    #[test]
    fn common_ancestor() {
        let integer = ValueType::Boxed(Scalar::I32);
        let long = ValueType::Boxed(Scalar::I64);
        assert_eq!(integer.common_ancestor(&integer), integer);
        assert_eq!(integer.common_ancestor(&long), ValueType::Number);
        assert_eq!(ValueType::Number.common_ancestor(&long), ValueType::Number);
        assert_eq!(integer.common_ancestor(&ValueType::Str), ValueType::Any);
        assert_eq!(ValueType::array(integer.clone()).common_ancestor(&ValueType::array(long)), ValueType::array(ValueType::Number));
    }

    #[test]
    fn object_type() {
        struct Foo;
        struct Bar;
        assert_eq!(ObjectType::of::<Foo>(), ObjectType::of::<Foo>());
        assert_ne!(ObjectType::of::<Foo>(), ObjectType::of::<Bar>());
        assert!(ObjectType::of::<Foo>().name().ends_with("Foo"));
    }
}
