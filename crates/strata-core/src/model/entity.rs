use crate::{
    error::InternalError,
    key::{KeyFactory, KeyFactorySource},
    model::{ModelError, Property, PropertyType},
};
use std::sync::Arc;

///
/// PrimaryKey
///
/// Ordered key shape identifying rows of one entity type.
///

#[derive(Clone, Debug)]
pub struct PrimaryKey {
    properties: Vec<Arc<Property>>,
}

impl PrimaryKey {
    #[must_use]
    pub fn properties(&self) -> &[Arc<Property>] {
        &self.properties
    }

    #[must_use]
    pub fn is_composite(&self) -> bool {
        self.properties.len() > 1
    }

    /// Position of `property` within this key, if it participates.
    #[must_use]
    pub fn ordinal_of(&self, property: &Property) -> Option<usize> {
        self.properties.iter().position(|p| p.id() == property.id())
    }
}

///
/// ForeignKey
///
/// Dependent-side key shape referencing the primary key of a principal entity.
///

#[derive(Clone, Debug)]
pub struct ForeignKey {
    properties: Vec<Arc<Property>>,
    principal_entity: String,
}

impl ForeignKey {
    #[must_use]
    pub fn properties(&self) -> &[Arc<Property>] {
        &self.properties
    }

    #[must_use]
    pub fn principal_entity(&self) -> &str {
        &self.principal_entity
    }

    /// Resolve the key factory for values read through this foreign key.
    pub fn key_factory(
        &self,
        source: &KeyFactorySource,
    ) -> Result<Arc<dyn KeyFactory>, InternalError> {
        source.get_key_factory(&self.properties)
    }
}

///
/// EntityType
///
/// One mapped entity: ordered properties, optional primary key and the
/// foreign keys it declares.
///

#[derive(Clone, Debug)]
pub struct EntityType {
    name: String,
    properties: Vec<Arc<Property>>,
    primary_key: Option<PrimaryKey>,
    foreign_keys: Vec<ForeignKey>,
}

impl EntityType {
    #[must_use]
    pub fn builder(name: impl Into<String>) -> EntityTypeBuilder {
        EntityTypeBuilder::new(name)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn properties(&self) -> &[Arc<Property>] {
        &self.properties
    }

    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Arc<Property>> {
        self.properties.iter().find(|p| p.name() == name)
    }

    #[must_use]
    pub const fn primary_key(&self) -> Option<&PrimaryKey> {
        self.primary_key.as_ref()
    }

    #[must_use]
    pub fn foreign_keys(&self) -> &[ForeignKey] {
        &self.foreign_keys
    }

    /// Resolve the key factory for this entity's primary key.
    pub fn key_factory(
        &self,
        source: &KeyFactorySource,
    ) -> Result<Arc<dyn KeyFactory>, InternalError> {
        let key = self
            .primary_key
            .as_ref()
            .ok_or_else(|| ModelError::MissingPrimaryKey(self.name.clone()))?;

        source.get_key_factory(key.properties())
    }
}

///
/// EntityTypeBuilder
///
/// Collects property declarations, then resolves key property names into
/// shared descriptors on `build`.
///

#[derive(Debug)]
pub struct EntityTypeBuilder {
    name: String,
    properties: Vec<Arc<Property>>,
    primary_key: Option<Vec<String>>,
    foreign_keys: Vec<(Vec<String>, String)>,
}

impl EntityTypeBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
            primary_key: None,
            foreign_keys: Vec::new(),
        }
    }

    /// Declare the next property; ordinals follow declaration order.
    #[must_use]
    pub fn property(mut self, name: impl Into<String>, ty: PropertyType) -> Self {
        let index = self.properties.len();
        self.properties
            .push(Arc::new(Property::new(name, ty).with_index(index)));
        self
    }

    #[must_use]
    pub fn primary_key(mut self, names: &[&str]) -> Self {
        self.primary_key = Some(names.iter().map(ToString::to_string).collect());
        self
    }

    #[must_use]
    pub fn foreign_key(mut self, names: &[&str], principal_entity: impl Into<String>) -> Self {
        self.foreign_keys.push((
            names.iter().map(ToString::to_string).collect(),
            principal_entity.into(),
        ));
        self
    }

    pub fn build(self) -> Result<EntityType, InternalError> {
        if self.name.is_empty() {
            return Err(ModelError::EmptyEntityName.into());
        }

        for (i, property) in self.properties.iter().enumerate() {
            if self.properties[..i]
                .iter()
                .any(|p| p.name() == property.name())
            {
                return Err(ModelError::DuplicateProperty {
                    entity: self.name.clone(),
                    property: property.name().to_string(),
                }
                .into());
            }
        }

        let primary_key = match &self.primary_key {
            Some(names) => Some(PrimaryKey {
                properties: self.resolve(names)?,
            }),
            None => None,
        };

        let mut foreign_keys = Vec::with_capacity(self.foreign_keys.len());
        for (names, principal_entity) in &self.foreign_keys {
            foreign_keys.push(ForeignKey {
                properties: self.resolve(names)?,
                principal_entity: principal_entity.clone(),
            });
        }

        Ok(EntityType {
            name: self.name,
            properties: self.properties,
            primary_key,
            foreign_keys,
        })
    }

    fn resolve(&self, names: &[String]) -> Result<Vec<Arc<Property>>, ModelError> {
        if names.is_empty() {
            return Err(ModelError::EmptyKey(self.name.clone()));
        }

        names
            .iter()
            .map(|name| {
                self.properties
                    .iter()
                    .find(|p| p.name() == name)
                    .cloned()
                    .ok_or_else(|| ModelError::UnknownKeyProperty {
                        entity: self.name.clone(),
                        property: name.clone(),
                    })
            })
            .collect()
    }
}
