use crate::{config::KeysArgs, error::CliError, model::ModelFile};
use std::sync::Arc;
use strata_core::{
    key::KeyFactorySource,
    model::{Model, Property},
    obs,
};

pub fn run(args: &KeysArgs) -> Result<(), CliError> {
    let model = ModelFile::load(&args.model)?.to_model()?;

    for line in describe(&model, KeyFactorySource::global())? {
        println!("{line}");
    }

    let report = obs::metrics_report();
    tracing::debug!(
        hits = report.factory_hits,
        misses = report.factory_misses,
        "key factory cache"
    );

    Ok(())
}

/// One line per entity key and foreign key naming the resolved factory.
pub fn describe(model: &Model, source: &KeyFactorySource) -> Result<Vec<String>, CliError> {
    let mut lines = Vec::new();

    for entity in model.entity_types() {
        match entity.primary_key() {
            Some(key) => {
                let factory = entity.key_factory(source)?;
                lines.push(format!(
                    "{} key ({}): {}",
                    entity.name(),
                    shape(key.properties()),
                    factory.kind()
                ));
            }
            None => lines.push(format!("{} key: none", entity.name())),
        }

        for fk in entity.foreign_keys() {
            let factory = fk.key_factory(source)?;
            lines.push(format!(
                "{} -> {} ({}): {}",
                entity.name(),
                fk.principal_entity(),
                shape(fk.properties()),
                factory.kind()
            ));
        }
    }

    Ok(lines)
}

fn shape(properties: &[Arc<Property>]) -> String {
    properties
        .iter()
        .map(|p| p.name())
        .collect::<Vec<_>>()
        .join(", ")
}

///
/// TESTS
///
