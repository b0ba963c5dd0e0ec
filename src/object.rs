//! User-defined values stored in a [`Value::Object`].
//!
//! [`Value::Object`]: super::Value::Object

use std::any::{Any};
use std::fmt::{self, Debug};
use std::hash::{Hash, Hasher};
use std::rc::{Rc};

use super::{ObjectType, Close};

/// The object-safe operations that [`Object`] needs from the value it wraps.
trait DynObject: Debug {
    fn object_type(&self) -> ObjectType;
    fn as_any(&self) -> &dyn Any;
    /// The wrapper itself, so that a `Plain<T>` never equals a `Resource<T>`.
    fn as_wrapper(&self) -> &dyn Any;
    fn dyn_eq(&self, other: &dyn DynObject) -> bool;
    fn dyn_hash(&self, state: &mut dyn Hasher);
    fn as_close(&self) -> Option<&dyn Close>;
}

/// Wraps a `T` with value semantics.
struct Plain<T>(T);

impl<T: Debug> Debug for Plain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

impl<T: 'static + Debug + Eq + Hash> DynObject for Plain<T> {
    fn object_type(&self) -> ObjectType { ObjectType::of::<T>() }

    fn as_any(&self) -> &dyn Any { &self.0 }

    fn as_wrapper(&self) -> &dyn Any { self }

    fn dyn_eq(&self, other: &dyn DynObject) -> bool {
        other.as_wrapper().downcast_ref::<Self>().map_or(false, |other| self.0 == other.0)
    }

    fn dyn_hash(&self, mut state: &mut dyn Hasher) {
        self.object_type().hash(&mut state);
        self.0.hash(&mut state);
    }

    fn as_close(&self) -> Option<&dyn Close> { None }
}

/// Wraps a `T` with identity semantics and the close capability.
struct Resource<T>(T);

impl<T: Debug> Debug for Resource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

impl<T> Resource<T> {
    fn address(&self) -> usize { &self.0 as *const T as usize }
}

impl<T: 'static + Debug + Close> DynObject for Resource<T> {
    fn object_type(&self) -> ObjectType { ObjectType::of::<T>() }

    fn as_any(&self) -> &dyn Any { &self.0 }

    fn as_wrapper(&self) -> &dyn Any { self }

    fn dyn_eq(&self, other: &dyn DynObject) -> bool {
        other.as_wrapper().downcast_ref::<Self>().map_or(false, |other| std::ptr::eq(self, other))
    }

    fn dyn_hash(&self, mut state: &mut dyn Hasher) {
        self.object_type().hash(&mut state);
        state.write_usize(self.address());
    }

    fn as_close(&self) -> Option<&dyn Close> { Some(&self.0) }
}

// ----------------------------------------------------------------------------

/// A shared, immutable, user-defined value.
///
/// Construct one using [`Value::object()`] or [`Value::resource()`].
///
/// [`Value::object()`]: super::Value::object()
/// [`Value::resource()`]: super::Value::resource()
#[derive(Clone)]
pub struct Object(Rc<dyn DynObject>);

impl Object {
    pub(crate) fn new<T: 'static + Debug + Eq + Hash>(t: T) -> Self { Self(Rc::new(Plain(t))) }

    pub(crate) fn resource<T: 'static + Debug + Close>(t: T) -> Self { Self(Rc::new(Resource(t))) }

    pub fn object_type(&self) -> ObjectType { self.0.object_type() }

    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> { self.0.as_any().downcast_ref() }

    /// Returns the close capability, if this `Object` was constructed as a
    /// resource.
    pub fn as_close(&self) -> Option<&dyn Close> { self.0.as_close() }
}

impl Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool { self.0.dyn_eq(&*other.0) }
}

impl Eq for Object {}

impl Hash for Object {
    fn hash<H: Hasher>(&self, state: &mut H) { self.0.dyn_hash(state); }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Eq, Hash)]
    struct Name(&'static str);

    #[derive(Debug)]
    struct Handle;

    impl Close for Handle {
        fn close(&self) -> anyhow::Result<()> { Ok(()) }
    }

    #[test]
    fn plain_equality() {
        assert_eq!(Object::new(Name("a")), Object::new(Name("a")));
        assert_ne!(Object::new(Name("a")), Object::new(Name("b")));
        assert_ne!(Object::new(Name("a")), Object::new(String::from("a")));
        assert!(Object::new(Name("a")).as_close().is_none());
    }

    #[test]
    fn resource_identity() {
        let a = Object::resource(Handle);
        let b = Object::resource(Handle);
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert!(a.as_close().is_some());
        assert_eq!(a.object_type(), ObjectType::of::<Handle>());
        assert!(a.downcast_ref::<Handle>().is_some());
        assert!(a.downcast_ref::<Name>().is_none());
    }

    #[derive(Debug, PartialEq, Eq, Hash)]
    struct Port(u32);

    impl Close for Port {
        fn close(&self) -> anyhow::Result<()> { Ok(()) }
    }

    #[test]
    fn plain_never_equals_resource() {
        let plain = Object::new(Port(80));
        let resource = Object::resource(Port(80));
        assert_ne!(plain, resource);
        assert_ne!(resource, plain);
        assert_eq!(plain, Object::new(Port(80)));
        assert_eq!(resource, resource.clone());
    }
}
