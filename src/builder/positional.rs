//! Builder reading a foreign tuple by position.

use std::fmt;

use nativize_object::Object;
use tracing::trace;

use super::{Assign, FieldMapping};
use crate::convert::fixed_items;
use crate::error::{ConvertResult, Location};
use crate::registry::{Converter, FromForeign, Native};

/// Builds a `T` from a foreign `tuple` whose length equals the number of
/// mappings. Mapping i converts element i.
///
/// The tuple length is checked before any element is converted, so a
/// length mismatch is reported even if an element would also fail.
pub struct PositionalBuilder<T> {
    mappings: Vec<FieldMapping<T, usize>>,
}

impl<T: Default + 'static> PositionalBuilder<T> {
    /// Create a builder with no mappings; it accepts the empty tuple.
    pub fn new() -> Self {
        Self {
            mappings: Vec::new(),
        }
    }

    /// Append a mapping for the next position.
    pub fn field<C>(mut self, converter: C, assign: Assign<T, C::Output>) -> Self
    where
        C: Converter + 'static,
        C::Output: 'static,
    {
        let position = self.mappings.len();
        self.mappings
            .push(FieldMapping::new(position, converter, assign));
        self
    }

    /// Append a field of a [`FromForeign`] type, stored through `accessor`.
    pub fn member<V, M>(self, accessor: M) -> Self
    where
        V: FromForeign + 'static,
        M: Fn(&mut T) -> &mut V + 'static,
    {
        self.field(Native::<V>::new(), Assign::member(accessor))
    }

    /// Append a field of a [`FromForeign`] type, stored by calling `method`.
    pub fn setter<V>(self, method: fn(&mut T, V)) -> Self
    where
        V: FromForeign + 'static,
    {
        self.field(Native::<V>::new(), Assign::setter(method))
    }

    /// Append a field of a [`FromForeign`] type, stored by calling `f`.
    pub fn custom<V, F>(self, f: F) -> Self
    where
        V: FromForeign + 'static,
        F: Fn(&mut T, V) + 'static,
    {
        self.field(Native::<V>::new(), Assign::custom(f))
    }
}

impl<T> PositionalBuilder<T> {
    /// Number of tuple elements this builder expects.
    pub fn arity(&self) -> usize {
        self.mappings.len()
    }

    /// The mappings, in position order.
    pub fn mappings(&self) -> &[FieldMapping<T, usize>] {
        &self.mappings
    }
}

impl<T: Default + 'static> Default for PositionalBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for PositionalBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PositionalBuilder")
            .field("type", &std::any::type_name::<T>())
            .field("arity", &self.mappings.len())
            .finish()
    }
}

impl<T: Default> Converter for PositionalBuilder<T> {
    type Output = T;

    #[cfg_attr(feature = "profiling", profiling::function)]
    fn convert(&self, value: &Object) -> ConvertResult<T> {
        let items = fixed_items(value, self.mappings.len(), "positional aggregate")?;
        let mut out = T::default();
        for (mapping, item) in self.mappings.iter().zip(items) {
            let position = *mapping.key();
            trace!(position, foreign_type = item.type_name(), "populating field");
            mapping
                .apply(&mut out, item)
                .map_err(|e| e.at(Location::Index(position)))?;
        }
        Ok(out)
    }

    fn eligible(&self, value: &Object) -> bool {
        match value.tuple_items() {
            Some(items) if items.len() == self.mappings.len() => self
                .mappings
                .iter()
                .zip(items)
                .all(|(mapping, item)| mapping.eligible(item)),
            _ => false,
        }
    }
}
