use crate::{
    error::InternalError,
    key::{EntityKey, KeyError, KeyFactory, KeyFactoryKind, KeyScalar},
    model::Property,
    row::RowAccessor,
};
use std::{marker::PhantomData, sync::Arc};

///
/// SimpleKeyFactory
///
/// Single-property key factory specialized on the property's non-nullable
/// scalar type `T`. Nullable and required properties of the same kind share
/// the same specialization.
///

#[derive(Debug)]
pub struct SimpleKeyFactory<T: KeyScalar> {
    property: [Arc<Property>; 1],
    _marker: PhantomData<fn() -> T>,
}

impl<T: KeyScalar> SimpleKeyFactory<T> {
    #[must_use]
    pub fn new(property: Arc<Property>) -> Self {
        Self {
            property: [property],
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub fn property(&self) -> &Arc<Property> {
        &self.property[0]
    }

    /// Read the key value as `T` without wrapping it in an `EntityKey`.
    pub fn create_typed(&self, row: &dyn RowAccessor) -> Result<T, InternalError> {
        let property = self.property();
        let value = row
            .value(property)
            .ok_or_else(|| KeyError::MissingValue {
                property: property.name().to_string(),
            })?;

        // key columns are non-null by model invariant; fail fast if violated
        if value.is_null() {
            return Err(KeyError::NullValue {
                property: property.name().to_string(),
            }
            .into());
        }

        T::from_value(value).ok_or_else(|| {
            KeyError::TypeMismatch {
                property: property.name().to_string(),
                expected: T::KIND,
                found: value.label(),
            }
            .into()
        })
    }
}

impl<T: KeyScalar> KeyFactory for SimpleKeyFactory<T> {
    fn create_key(&self, row: &dyn RowAccessor) -> Result<EntityKey, InternalError> {
        self.create_typed(row).map(EntityKey::simple)
    }

    fn kind(&self) -> KeyFactoryKind {
        KeyFactoryKind::Simple(T::KIND)
    }

    fn properties(&self) -> &[Arc<Property>] {
        &self.property
    }
}
