use crate::{
    error::InternalError,
    key::{CompositeKeyFactory, KeyError, KeyFactory, KeyScalar, SimpleKeyFactory},
    model::{Property, PropertyId, ValueKind},
    obs::sink::{self, MetricsEvent},
    value::{Float32, Float64},
};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::{
    collections::HashMap,
    slice,
    sync::{Arc, OnceLock, PoisonError, RwLock},
};
use ulid::Ulid;

// Process-wide source; entries live for the rest of the process.
static GLOBAL: OnceLock<KeyFactorySource> = OnceLock::new();

///
/// KeyFactorySource
///
/// Append-only cache from key shape (ordered property identities) to the one
/// factory built for it. Lookups take a shared lock; only first resolution of
/// a shape takes the exclusive lock.
///

#[derive(Debug, Default)]
pub struct KeyFactorySource {
    factories: RwLock<HashMap<Box<[PropertyId]>, Arc<dyn KeyFactory>>>,
}

impl KeyFactorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide source shared by all sessions.
    #[must_use]
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(Self::new)
    }

    /// Resolve the factory for `properties`, building and caching it on first
    /// request. Repeated calls with the same descriptors in the same order
    /// return the same `Arc`.
    pub fn get_key_factory(
        &self,
        properties: &[Arc<Property>],
    ) -> Result<Arc<dyn KeyFactory>, InternalError> {
        if properties.is_empty() {
            return Err(KeyError::EmptyShape.into());
        }

        let shape: Vec<PropertyId> = properties.iter().map(|p| p.id()).collect();

        // fast path: shared lock
        let cached = self
            .factories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(shape.as_slice())
            .cloned();
        if let Some(factory) = cached {
            sink::record(MetricsEvent::FactoryResolved {
                kind: factory.kind(),
                cached: true,
            });

            return Ok(factory);
        }

        // the map is append-only, so a poisoned guard still holds consistent entries
        let mut factories = self
            .factories
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let mut created = false;
        let factory = factories
            .entry(shape.into_boxed_slice())
            .or_insert_with(|| {
                created = true;
                build_factory(properties)
            })
            .clone();
        drop(factories);

        if created {
            tracing::debug!(
                shape = %describe(properties),
                kind = %factory.kind(),
                "created key factory"
            );
        }
        sink::record(MetricsEvent::FactoryResolved {
            kind: factory.kind(),
            cached: !created,
        });

        Ok(factory)
    }

    /// Number of distinct key shapes resolved so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// Choose the factory variant for a non-empty key shape.
fn build_factory(properties: &[Arc<Property>]) -> Arc<dyn KeyFactory> {
    match properties {
        [property] => simple_factory(property),
        _ => Arc::new(CompositeKeyFactory::new(properties)),
    }
}

// Closed dispatch from value kind to the concrete simple specialization.
// Structural kinds fall back to the composite variant.
fn simple_factory(property: &Arc<Property>) -> Arc<dyn KeyFactory> {
    fn simple<T: KeyScalar>(property: &Arc<Property>) -> Arc<dyn KeyFactory> {
        Arc::new(SimpleKeyFactory::<T>::new(Arc::clone(property)))
    }

    match property.property_type().underlying() {
        ValueKind::Bool => simple::<bool>(property),
        ValueKind::Int8 => simple::<i8>(property),
        ValueKind::Int16 => simple::<i16>(property),
        ValueKind::Int32 => simple::<i32>(property),
        ValueKind::Int64 => simple::<i64>(property),
        ValueKind::Uint8 => simple::<u8>(property),
        ValueKind::Uint16 => simple::<u16>(property),
        ValueKind::Uint32 => simple::<u32>(property),
        ValueKind::Uint64 => simple::<u64>(property),
        ValueKind::Float32 => simple::<Float32>(property),
        ValueKind::Float64 => simple::<Float64>(property),
        ValueKind::Decimal => simple::<Decimal>(property),
        ValueKind::Text => simple::<String>(property),
        ValueKind::Date => simple::<NaiveDate>(property),
        ValueKind::DateTime => simple::<NaiveDateTime>(property),
        ValueKind::Ulid => simple::<Ulid>(property),
        ValueKind::Blob => Arc::new(CompositeKeyFactory::new(slice::from_ref(property))),
    }
}

fn describe(properties: &[Arc<Property>]) -> String {
    properties
        .iter()
        .map(|p| format!("{}{}", p.name(), p.id()))
        .collect::<Vec<_>>()
        .join(", ")
}
