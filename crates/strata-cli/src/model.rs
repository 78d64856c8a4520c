use crate::error::CliError;
use convert_case::{Case, Casing};
use serde::Deserialize;
use std::{fs, path::Path};
use strata_core::model::{EntityType, Model, PropertyType, ValueKind};

///
/// ModelFile
///
/// JSON description of a relational model, as produced by schema readers.
///

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelFile {
    pub entities: Vec<EntityDef>,
}

///
/// EntityDef
///

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntityDef {
    pub name: String,

    /// Generated type name; derived from `name` when absent.
    #[serde(default)]
    pub type_name: Option<String>,

    pub properties: Vec<PropertyDef>,

    #[serde(default)]
    pub primary_key: Vec<String>,

    #[serde(default)]
    pub foreign_keys: Vec<ForeignKeyDef>,
}

impl EntityDef {
    #[must_use]
    pub fn type_name(&self) -> String {
        self.type_name
            .clone()
            .unwrap_or_else(|| derive_type_name(&self.name))
    }

    fn to_entity_type(&self) -> Result<EntityType, CliError> {
        let mut builder = EntityType::builder(&self.name);

        for property in &self.properties {
            let kind =
                ValueKind::from_label(&property.kind).ok_or_else(|| CliError::UnknownKind {
                    entity: self.name.clone(),
                    property: property.name.clone(),
                    kind: property.kind.clone(),
                })?;
            let ty = if property.nullable {
                PropertyType::nullable(kind)
            } else {
                PropertyType::required(kind)
            };

            builder = builder.property(&property.name, ty);
        }

        if !self.primary_key.is_empty() {
            builder = builder.primary_key(&names(&self.primary_key));
        }
        for fk in &self.foreign_keys {
            builder = builder.foreign_key(&names(&fk.properties), &fk.principal);
        }

        Ok(builder.build()?)
    }
}

///
/// PropertyDef
///

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertyDef {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub nullable: bool,
}

///
/// ForeignKeyDef
///

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForeignKeyDef {
    pub properties: Vec<String>,
    pub principal: String,
}

impl ModelFile {
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = fs::read_to_string(path).map_err(|source| CliError::Io {
            context: "failed to read model",
            path: path.display().to_string(),
            source,
        })?;

        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, CliError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Build and validate the runtime model.
    pub fn to_model(&self) -> Result<Model, CliError> {
        let entity_types = self
            .entities
            .iter()
            .map(EntityDef::to_entity_type)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Model::new(entity_types)?)
    }

    /// Entity name to generated type name.
    #[must_use]
    pub fn type_names(&self) -> Vec<(String, String)> {
        self.entities
            .iter()
            .map(|e| (e.name.clone(), e.type_name()))
            .collect()
    }
}

/// `dbo.blog_posts` becomes `BlogPosts`: schema prefix dropped, then
/// upper camel case.
#[must_use]
pub fn derive_type_name(entity: &str) -> String {
    let simple = entity.rsplit_once('.').map_or(entity, |(_, name)| name);

    simple.to_case(Case::Pascal)
}

fn names(values: &[String]) -> Vec<&str> {
    values.iter().map(String::as_str).collect()
}

///
/// TESTS
///
