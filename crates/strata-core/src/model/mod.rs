//! Runtime schema model.
//!
//! Descriptors here are read-only once built and are shared by reference
//! (`Arc<Property>`), so key factories can key their caches on property
//! identity rather than on descriptor contents.
//!
//! In general:
//! - the model defines *what exists*
//! - `key` defines *how rows are identified*
mod entity;
mod property;

#[cfg(test)]
mod tests;

use crate::error::InternalError;
use thiserror::Error as ThisError;

// re-exports
pub use entity::{EntityType, EntityTypeBuilder, ForeignKey, PrimaryKey};
pub use property::{Property, PropertyId, PropertyType, ValueKind};

///
/// ModelError
///
/// Construction-time failures for entity types and models.
///

#[derive(Debug, ThisError)]
pub enum ModelError {
    #[error("entity name is empty")]
    EmptyEntityName,

    #[error("entity '{0}' declared more than once")]
    DuplicateEntity(String),

    #[error("entity '{entity}' declares property '{property}' more than once")]
    DuplicateProperty { entity: String, property: String },

    #[error("entity '{0}' declares a key with no properties")]
    EmptyKey(String),

    #[error("entity '{entity}' has no property '{property}' for its key")]
    UnknownKeyProperty { entity: String, property: String },

    #[error("entity '{0}' has no primary key")]
    MissingPrimaryKey(String),

    #[error("entity '{entity}' references unknown principal '{principal}'")]
    UnknownPrincipal { entity: String, principal: String },

    #[error(
        "foreign key on '{entity}' has {found} properties but principal '{principal}' key has {expected}"
    )]
    ForeignKeyArityMismatch {
        entity: String,
        principal: String,
        expected: usize,
        found: usize,
    },
}

impl From<ModelError> for InternalError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::DuplicateEntity(_) | ModelError::DuplicateProperty { .. } => {
                Self::model_conflict(err.to_string())
            }
            ModelError::MissingPrimaryKey(_)
            | ModelError::UnknownKeyProperty { .. }
            | ModelError::UnknownPrincipal { .. } => Self::model_not_found(err.to_string()),
            ModelError::EmptyEntityName
            | ModelError::EmptyKey(_)
            | ModelError::ForeignKeyArityMismatch { .. } => Self::model_invariant(err.to_string()),
        }
    }
}

///
/// Model
///
/// Validated set of entity types; foreign keys always point at a principal
/// that exists and whose primary key has the same arity.
///

#[derive(Clone, Debug, Default)]
pub struct Model {
    entity_types: Vec<EntityType>,
}

impl Model {
    pub fn new(entity_types: Vec<EntityType>) -> Result<Self, InternalError> {
        for (i, entity) in entity_types.iter().enumerate() {
            if entity_types[..i].iter().any(|e| e.name() == entity.name()) {
                return Err(ModelError::DuplicateEntity(entity.name().to_string()).into());
            }
        }

        let model = Self { entity_types };
        for entity in &model.entity_types {
            for fk in entity.foreign_keys() {
                let principal_key = model.principal_key(fk).ok_or_else(|| {
                    ModelError::UnknownPrincipal {
                        entity: entity.name().to_string(),
                        principal: fk.principal_entity().to_string(),
                    }
                })?;

                let expected = principal_key.properties().len();
                let found = fk.properties().len();
                if expected != found {
                    return Err(ModelError::ForeignKeyArityMismatch {
                        entity: entity.name().to_string(),
                        principal: fk.principal_entity().to_string(),
                        expected,
                        found,
                    }
                    .into());
                }
            }
        }

        Ok(model)
    }

    #[must_use]
    pub fn entity_types(&self) -> &[EntityType] {
        &self.entity_types
    }

    #[must_use]
    pub fn entity_type(&self, name: &str) -> Option<&EntityType> {
        self.entity_types.iter().find(|e| e.name() == name)
    }

    /// Primary key of the principal entity referenced by `fk`.
    #[must_use]
    pub fn principal_key(&self, fk: &ForeignKey) -> Option<&PrimaryKey> {
        self.entity_type(fk.principal_entity())?.primary_key()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entity_types.is_empty()
    }
}
