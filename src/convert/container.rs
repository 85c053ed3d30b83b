//! Container converters.
//!
//! | foreign tag | combinator | default targets |
//! |---|---|---|
//! | `list` | [`SeqOf`] | `Vec<T>` |
//! | `set` | [`SetOf`] | `BTreeSet<T>`, `HashSet<T, S>` |
//! | `dict` | [`MapOf`] | `BTreeMap<K, V>`, `HashMap<K, V, S>` |
//!
//! The combinators are generic over their element converters, so nesting is
//! plain type composition: `SeqOf<MapOf<Native<String>, PositionalBuilder<P>>>`.
//!
//! Sets cannot be indexed. [`SetOf`] pops every element to visit it and a
//! [`SetRestore`] guard adds each one back when the conversion ends, whether
//! it returned a value, returned an error, or unwound.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::{BuildHasher, Hash};
use std::marker::PhantomData;

use nativize_object::{Object, Tag};
use tracing::debug;

use crate::error::{ConversionError, ConvertResult, Location};
use crate::registry::{Converter, FromForeign, Native};

// ============================================================================
// Sequences
// ============================================================================

/// Converts a foreign `list` element by element, preserving order.
#[derive(Debug, Clone, Default)]
pub struct SeqOf<C> {
    element: C,
}

impl<C> SeqOf<C> {
    /// Create a sequence converter using `element` for every item.
    pub fn new(element: C) -> Self {
        Self { element }
    }
}

impl<C: Converter> Converter for SeqOf<C> {
    type Output = Vec<C::Output>;

    fn convert(&self, value: &Object) -> ConvertResult<Self::Output> {
        let items = value
            .list_items()
            .ok_or_else(|| ConversionError::type_mismatch("list", value))?;
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                self.element
                    .convert(item)
                    .map_err(|e| e.at(Location::Index(i)))
            })
            .collect()
    }

    fn eligible(&self, value: &Object) -> bool {
        value
            .list_items()
            .is_some_and(|items| items.iter().all(|item| self.element.eligible(item)))
    }
}

impl<T: FromForeign> FromForeign for Vec<T> {
    fn from_foreign(value: &Object) -> ConvertResult<Self> {
        SeqOf::new(Native::<T>::new()).convert(value)
    }

    fn eligible(value: &Object) -> bool {
        SeqOf::new(Native::<T>::new()).eligible(value)
    }
}

// ============================================================================
// Sets
// ============================================================================

/// Puts popped elements back into a foreign set when dropped.
///
/// Elements move out of the set into the guard and back again, so their
/// reference counts are the same after the guard is gone as before it was
/// created.
pub(crate) struct SetRestore<'a> {
    set: &'a Object,
    popped: Vec<Object>,
}

impl<'a> SetRestore<'a> {
    pub(crate) fn new(set: &'a Object) -> Self {
        Self {
            set,
            popped: Vec::with_capacity(set.len().unwrap_or(0)),
        }
    }

    /// Pop the next element; it stays owned by the guard.
    pub(crate) fn pop(&mut self) -> Option<&Object> {
        let item = self.set.set_pop().ok().flatten()?;
        self.popped.push(item);
        self.popped.last()
    }
}

impl Drop for SetRestore<'_> {
    fn drop(&mut self) {
        let count = self.popped.len();
        for item in self.popped.drain(..) {
            // Popped elements are hashable and the set has no equal member.
            let _ = self.set.set_add(item);
        }
        debug!(restored = count, "foreign set restored");
    }
}

/// Converts a foreign `set` into a native collection `S`.
#[derive(Debug)]
pub struct SetOf<C, S> {
    element: C,
    _marker: PhantomData<fn() -> S>,
}

impl<C: Converter> SetOf<C, BTreeSet<C::Output>> {
    /// Create a set converter collecting into a `BTreeSet`.
    pub fn new(element: C) -> Self {
        Self::collecting(element)
    }
}

impl<C, S> SetOf<C, S> {
    /// Create a set converter collecting into any `S`, e.g. an `FxHashSet`.
    pub fn collecting(element: C) -> Self {
        Self {
            element,
            _marker: PhantomData,
        }
    }
}

impl<C: Clone, S> Clone for SetOf<C, S> {
    fn clone(&self) -> Self {
        Self::collecting(self.element.clone())
    }
}

impl<C, S> Converter for SetOf<C, S>
where
    C: Converter,
    S: Default + Extend<C::Output>,
{
    type Output = S;

    fn convert(&self, value: &Object) -> ConvertResult<S> {
        if value.tag() != Tag::Set {
            return Err(ConversionError::type_mismatch("set", value));
        }
        let mut out = S::default();
        let mut restore = SetRestore::new(value);
        let mut index = 0;
        while let Some(item) = restore.pop() {
            let converted = self
                .element
                .convert(item)
                .map_err(|e| e.at(Location::Index(index)))?;
            out.extend(Some(converted));
            index += 1;
        }
        Ok(out)
    }

    fn eligible(&self, value: &Object) -> bool {
        value
            .set_elements()
            .is_some_and(|items| items.iter().all(|item| self.element.eligible(item)))
    }
}

impl<T: FromForeign + Ord> FromForeign for BTreeSet<T> {
    fn from_foreign(value: &Object) -> ConvertResult<Self> {
        SetOf::new(Native::<T>::new()).convert(value)
    }

    fn eligible(value: &Object) -> bool {
        SetOf::new(Native::<T>::new()).eligible(value)
    }
}

impl<T, S> FromForeign for HashSet<T, S>
where
    T: FromForeign + Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_foreign(value: &Object) -> ConvertResult<Self> {
        SetOf::<_, Self>::collecting(Native::<T>::new()).convert(value)
    }

    fn eligible(value: &Object) -> bool {
        SetOf::<_, Self>::collecting(Native::<T>::new()).eligible(value)
    }
}

// ============================================================================
// Maps
// ============================================================================

/// Converts a foreign `dict` into a native map `M`, in the dict's order.
#[derive(Debug)]
pub struct MapOf<K, V, M> {
    key: K,
    value: V,
    _marker: PhantomData<fn() -> M>,
}

impl<K: Converter, V: Converter> MapOf<K, V, BTreeMap<K::Output, V::Output>> {
    /// Create a map converter collecting into a `BTreeMap`.
    pub fn new(key: K, value: V) -> Self {
        Self::collecting(key, value)
    }
}

impl<K, V, M> MapOf<K, V, M> {
    /// Create a map converter collecting into any `M`, e.g. an `FxHashMap`.
    pub fn collecting(key: K, value: V) -> Self {
        Self {
            key,
            value,
            _marker: PhantomData,
        }
    }
}

impl<K: Clone, V: Clone, M> Clone for MapOf<K, V, M> {
    fn clone(&self) -> Self {
        Self::collecting(self.key.clone(), self.value.clone())
    }
}

impl<K, V, M> Converter for MapOf<K, V, M>
where
    K: Converter,
    V: Converter,
    M: Default + Extend<(K::Output, V::Output)>,
{
    type Output = M;

    fn convert(&self, value: &Object) -> ConvertResult<M> {
        let entries = value
            .dict_entries()
            .ok_or_else(|| ConversionError::type_mismatch("dict", value))?;
        let mut out = M::default();
        for (i, (key, item)) in entries.iter().enumerate() {
            let k = self.key.convert(key).map_err(|e| e.at(Location::Key(i)))?;
            let v = self
                .value
                .convert(item)
                .map_err(|e| e.at(Location::Value(format!("{:?}", key))))?;
            out.extend(Some((k, v)));
        }
        Ok(out)
    }

    fn eligible(&self, value: &Object) -> bool {
        value.dict_entries().is_some_and(|entries| {
            entries
                .iter()
                .all(|(key, item)| self.key.eligible(key) && self.value.eligible(item))
        })
    }
}

impl<K: FromForeign + Ord, V: FromForeign> FromForeign for BTreeMap<K, V> {
    fn from_foreign(value: &Object) -> ConvertResult<Self> {
        MapOf::new(Native::<K>::new(), Native::<V>::new()).convert(value)
    }

    fn eligible(value: &Object) -> bool {
        MapOf::new(Native::<K>::new(), Native::<V>::new()).eligible(value)
    }
}

impl<K, V, S> FromForeign for HashMap<K, V, S>
where
    K: FromForeign + Eq + Hash,
    V: FromForeign,
    S: BuildHasher + Default,
{
    fn from_foreign(value: &Object) -> ConvertResult<Self> {
        MapOf::<_, _, Self>::collecting(Native::<K>::new(), Native::<V>::new()).convert(value)
    }

    fn eligible(value: &Object) -> bool {
        MapOf::<_, _, Self>::collecting(Native::<K>::new(), Native::<V>::new()).eligible(value)
    }
}
