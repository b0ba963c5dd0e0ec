//! A memoizing cache that computes each value at most once.
//!
//! A [`Repository`] maps keys to values computed by a factory function.
//! Each key is either absent or cached. Looking up an absent key calls the
//! factory; if the factory succeeds the result is cached, and if it fails
//! the key stays absent, so the next lookup calls the factory again.
//!
//! Keys are compared with [`Eq`] and [`Hash`]. When the keys are
//! [`Tuple`]s this is structural equality, so a freshly-constructed key
//! finds the entry cached under any equal key.
//!
//! The repository is single-threaded: it is mutated only through `&mut self`
//! and offers no atomicity beyond that. [`Repository::update()`] is a
//! compare-and-replace in the logical sense only.
//!
//! [`Tuple`]: super::Tuple

use std::fmt::{self, Debug, Display};
use std::hash::{Hash};

use rustc_hash::{FxHashMap};
use tracing::{debug, trace, warn};

use super::{MaybeClose, close::{release}};

/// A factory computing the value for a key.
pub type Factory<K, V, E> = Box<dyn Fn(&K) -> Result<V, E>>;

/// A cache of values computed by a factory, keyed by `K`.
///
/// Lookups return clones of the cached values, so `V` should be cheap to
/// clone, e.g. a [`Tuple`] or an [`Rc`].
///
/// ```
/// use tuplekit::{Repository};
/// let mut squares: Repository<i32, i32, String> = Repository::new(|&k| {
///     if k < 0 { Err(format!("negative key {}", k)) } else { Ok(k * k) }
/// });
/// assert_eq!(squares.get(3, -1), 9);
/// assert_eq!(squares.get(-3, -1), -1);
/// assert_eq!(squares.apply(-3), Err("negative key -3".to_string()));
/// assert_eq!(squares.len(), 1);
/// ```
///
/// [`Tuple`]: super::Tuple
/// [`Rc`]: std::rc::Rc
pub struct Repository<K, V, E = anyhow::Error> {
    factory: Factory<K, V, E>,
    entries: FxHashMap<K, V>,
}

impl<K, V, E> Repository<K, V, E> where
    K: Eq + Hash,
    V: Clone + PartialEq + MaybeClose,
{
    pub fn new(factory: impl 'static + Fn(&K) -> Result<V, E>) -> Self {
        Self {factory: Box::new(factory), entries: FxHashMap::default()}
    }

    /// Returns the value for `key`, computing it if necessary. If the
    /// factory fails, the failure is logged and `default` is returned.
    pub fn get(&mut self, key: K, default: V) -> V where E: Display {
        match self.apply(key) {
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, "repository factory failed; returning the default");
                default
            },
        }
    }

    /// Returns the value for `key`, computing it if necessary. If the
    /// factory fails, its error is returned.
    pub fn apply(&mut self, key: K) -> Result<V, E> {
        if let Some(value) = self.entries.get(&key) {
            trace!("repository hit");
            return Ok(value.clone());
        }
        let value = (self.factory)(&key)?;
        self.entries.insert(key, value.clone());
        debug!(size = self.entries.len(), "repository cached a new value");
        Ok(value)
    }

    /// Replaces the value for `key`, but only if the current value equals
    /// `expected`. `None` means "absent", both for `expected` and for
    /// `value`; passing `value = None` therefore removes the entry.
    ///
    /// Returns the value in effect afterwards: `value` if the update
    /// happened, otherwise the unchanged current value. A superseded value is
    /// closed if it exposes the [`Close`] capability, unless it equals its
    /// replacement.
    ///
    /// ```
    /// use tuplekit::{Repository};
    /// let mut r: Repository<&str, i32> = Repository::new(|_| Ok(0));
    /// assert_eq!(r.update("a", None, Some(1)), Some(1));
    /// assert_eq!(r.update("a", Some(&5), Some(2)), Some(1));
    /// assert_eq!(r.update("a", Some(&1), Some(2)), Some(2));
    /// assert_eq!(r.update("a", Some(&2), None), None);
    /// assert!(!r.contains_key(&"a"));
    /// ```
    ///
    /// [`Close`]: super::Close
    pub fn update(&mut self, key: K, expected: Option<&V>, value: Option<V>) -> Option<V> {
        let current = self.entries.get(&key);
        if current != expected {
            debug!("repository update rejected: current value differs from the expected value");
            return current.cloned();
        }
        let old = match value.clone() {
            Some(v) => self.entries.insert(key, v),
            None => self.entries.remove(&key),
        };
        if let Some(old) = old {
            if value.as_ref() != Some(&old) { release(&old); }
        }
        value
    }

    /// Removes every entry for which `predicate` returns `true`, closing the
    /// removed values, and returns the number removed.
    pub fn clear(&mut self, mut predicate: impl FnMut(&K, &V) -> bool) -> usize {
        let mut removed = Vec::new();
        self.entries.retain(|k, v| {
            if !predicate(k, v) { return true; }
            removed.push(v.clone());
            false
        });
        debug!(removed = removed.len(), size = self.entries.len(), "repository cleared entries");
        for v in &removed { release(v); }
        removed.len()
    }

    /// Removes and returns the value for `key` without closing it.
    pub fn remove(&mut self, key: &K) -> Option<V> { self.entries.remove(key) }

    /// Returns the cached value for `key`, without computing it.
    pub fn retrieve(&self, key: &K) -> Option<&V> { self.entries.get(key) }

    pub fn contains_key(&self, key: &K) -> bool { self.entries.contains_key(key) }

    /// The number of cached entries.
    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

impl<K: Debug, V: Debug, E> Debug for Repository<K, V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository").field("entries", &self.entries).finish_non_exhaustive()
    }
}

// ----------------------------------------------------------------------------
