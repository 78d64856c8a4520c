//! Row access boundary between materialization and key construction.

use crate::{
    model::{Property, PropertyId},
    value::Value,
};
use std::{
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
};

///
/// RowAccessor
///
/// Read-only mapping from property to raw value for one materialized row.
///

pub trait RowAccessor {
    /// Raw value for `property`, or `None` if the row does not carry it.
    fn value(&self, property: &Property) -> Option<&Value>;
}

///
/// ValueBuffer
///
/// Ordinal row layout: slot `i` holds the value of the property whose
/// `index()` is `i`.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ValueBuffer {
    values: Vec<Value>,
}

impl ValueBuffer {
    #[must_use]
    pub const fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

impl<V: Into<Value>> FromIterator<V> for ValueBuffer {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

impl RowAccessor for ValueBuffer {
    fn value(&self, property: &Property) -> Option<&Value> {
        self.values.get(property.index())
    }
}

impl RowAccessor for BTreeMap<PropertyId, Value> {
    fn value(&self, property: &Property) -> Option<&Value> {
        self.get(&property.id())
    }
}

impl<S: BuildHasher> RowAccessor for HashMap<PropertyId, Value, S> {
    fn value(&self, property: &Property) -> Option<&Value> {
        self.get(&property.id())
    }
}

///
/// TESTS
///
