use crate::{
    error::InternalError,
    key::{CompositeKey, EntityKey, KeyError, KeyFactory, KeyFactoryKind},
    model::Property,
    row::RowAccessor,
};
use std::sync::Arc;

///
/// CompositeKeyFactory
///
/// Key factory for multi-property shapes and for single structural
/// properties. Values are captured in shape order and compared element-wise.
///

#[derive(Debug)]
pub struct CompositeKeyFactory {
    properties: Box<[Arc<Property>]>,
}

impl CompositeKeyFactory {
    #[must_use]
    pub fn new(properties: &[Arc<Property>]) -> Self {
        Self {
            properties: properties.into(),
        }
    }
}

impl KeyFactory for CompositeKeyFactory {
    fn create_key(&self, row: &dyn RowAccessor) -> Result<EntityKey, InternalError> {
        let values = self
            .properties
            .iter()
            .map(|property| {
                row.value(property)
                    .cloned()
                    .ok_or_else(|| KeyError::MissingValue {
                        property: property.name().to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(EntityKey::Composite(CompositeKey::new(values)))
    }

    fn kind(&self) -> KeyFactoryKind {
        KeyFactoryKind::Composite
    }

    fn properties(&self) -> &[Arc<Property>] {
        &self.properties
    }
}
