use strata_build::CodegenError;
use strata_config_build::ConfigError;
use strata_core::error::InternalError;
use thiserror::Error as ThisError;

///
/// CliError
///

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error("{context} '{path}': {source}")]
    Io {
        context: &'static str,
        path: String,
        source: std::io::Error,
    },

    #[error("invalid model file: {0}")]
    ModelFile(#[from] serde_json::Error),

    #[error("property '{entity}.{property}' has unknown type '{kind}'")]
    UnknownKind {
        entity: String,
        property: String,
        kind: String,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{}", .0.display_with_class())]
    Core(#[from] InternalError),

    #[error(transparent)]
    Codegen(#[from] CodegenError),
}
