//! The close capability, used for cascading release of tuple contents.

use std::rc::{Rc};

use tracing::{warn};

use super::{Value, Tuple, Array, Object};

/// A resource that can be released explicitly.
///
/// `close()` takes `&self`, because resources are usually shared between
/// the [`Tuple`]s and repositories that refer to them. Implementations that
/// need to record that they have been closed should use interior mutability.
pub trait Close {
    fn close(&self) -> anyhow::Result<()>;
}

/// Implemented by types that might expose the [`Close`] capability.
///
/// This is the capability check performed before closing a tuple element or
/// a superseded repository value. Types that never own a resource return
/// `None`.
pub trait MaybeClose {
    fn as_close(&self) -> Option<&dyn Close>;
}

/// Closes `value` if it exposes the [`Close`] capability, logging (not
/// returning) any failure.
pub(crate) fn release<V: MaybeClose + ?Sized>(value: &V) {
    if let Some(c) = value.as_close() {
        if let Err(err) = c.close() {
            warn!(error = %err, "failed to close value");
        }
    }
}

impl MaybeClose for Value {
    fn as_close(&self) -> Option<&dyn Close> {
        match self {
            Self::Tuple(t) => t.as_close(),
            Self::Object(o) => o.as_close(),
            _ => None,
        }
    }
}

impl MaybeClose for Tuple {
    fn as_close(&self) -> Option<&dyn Close> { Some(self) }
}

impl MaybeClose for Object {
    fn as_close(&self) -> Option<&dyn Close> { Object::as_close(self) }
}

impl<T: MaybeClose> MaybeClose for Option<T> {
    fn as_close(&self) -> Option<&dyn Close> { self.as_ref()?.as_close() }
}

impl<T: MaybeClose + ?Sized> MaybeClose for Rc<T> {
    fn as_close(&self) -> Option<&dyn Close> { (**self).as_close() }
}

impl<T: MaybeClose + ?Sized> MaybeClose for Box<T> {
    fn as_close(&self) -> Option<&dyn Close> { (**self).as_close() }
}

macro_rules! impl_never_close {
    ($($t:ty),*) => {
        $(
            impl MaybeClose for $t {
                fn as_close(&self) -> Option<&dyn Close> { None }
            }
        )*
    };
}

impl_never_close!((), bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);
impl_never_close!(String, str, Array);

impl<T> MaybeClose for Vec<T> {
    fn as_close(&self) -> Option<&dyn Close> { None }
}

// ----------------------------------------------------------------------------
