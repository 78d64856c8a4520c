use crate::{config::ScaffoldArgs, error::CliError, model::ModelFile};
use std::{fs, io::Write};
use strata_build::{ContextGenerator, ScaffoldRequest, SqlServerContextGenerator};
use strata_config_build::{Dialect, StrataConfig, load_config};
use strata_core::db::ConnectionOptions;

pub fn run(args: &ScaffoldArgs) -> Result<(), CliError> {
    let config = load_config(&args.config)?;
    let file = ModelFile::load(&args.model)?;

    let source = render(&config, &file)?;

    match &args.out {
        Some(path) => {
            fs::write(path, &source).map_err(|source| CliError::Io {
                context: "failed to write",
                path: path.display().to_string(),
                source,
            })?;
            tracing::info!(path = %path.display(), "wrote context source");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(source.as_bytes())
                .map_err(|source| CliError::Io {
                    context: "failed to write",
                    path: "<stdout>".to_string(),
                    source,
                })?;
        }
    }

    Ok(())
}

/// Generate the context source for `file` as configured.
pub fn render(config: &StrataConfig, file: &ModelFile) -> Result<String, CliError> {
    let mut options = ConnectionOptions::new(&config.connection.connection_string)?;
    if let Some(timeout) = config.connection.command_timeout() {
        options = options.with_command_timeout(timeout);
    }

    let model = file.to_model()?;
    tracing::info!(
        entities = model.entity_types().len(),
        dialect = %config.scaffold.dialect,
        connection = %options.connection_string().redacted(),
        timeout = ?options.command_timeout(),
        "scaffolding context"
    );

    let request = ScaffoldRequest::new(
        &model,
        &config.scaffold.module,
        &config.scaffold.context,
        &config.connection.connection_string,
    )
    .with_type_names(file.type_names());

    let source = match config.scaffold.dialect {
        Dialect::SqlServer => SqlServerContextGenerator.generate(&request)?,
    };

    Ok(source)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use strata_config_build::parse_config;

    const CONFIG: &str = r#"
        [connection]
        connection_string = "Server=.;Database=Shop"
        command_timeout_secs = 5

        [scaffold]
        module = "shop"
        context = "ShopContext"
    "#;

    const MODEL: &str = r#"{
        "entities": [
            {
                "name": "sales.order_line",
                "properties": [
                    { "name": "OrderId", "type": "ulid" },
                    { "name": "LineNo", "type": "int16" }
                ],
                "primary_key": ["OrderId", "LineNo"],
                "foreign_keys": [{ "properties": ["OrderId"], "principal": "sales.order" }]
            },
            {
                "name": "sales.order",
                "properties": [{ "name": "OrderId", "type": "ulid" }],
                "primary_key": ["OrderId"]
            }
        ]
    }"#;

    #[test]
    fn renders_context_for_model() {
        let config = parse_config(CONFIG).unwrap();
        let file = ModelFile::parse(MODEL).unwrap();

        let source = render(&config, &file).unwrap();

        assert!(source.starts_with("//\n// Generated using Connection String: Server=.;Database=Shop\n"));
        assert!(source.contains("pub mod shop"));
        assert!(source.contains("pub struct ShopContext"));

        let order = source.find("EntitySet < Order >").unwrap();
        let line = source.find("EntitySet < OrderLine >").unwrap();
        assert!(order < line);
        assert!(source.contains("foreign_key :: < Order >"));
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn logs_never_carry_passwords() {
        let config = parse_config(&CONFIG.replace(
            "Server=.;Database=Shop",
            "Server=db;User ID=sa;Password=Hunter2",
        ))
        .unwrap();
        let file = ModelFile::parse(MODEL).unwrap();

        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let source = tracing::subscriber::with_default(subscriber, || render(&config, &file))
            .unwrap();

        let logs = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("Password=***"));
        assert!(!logs.contains("Hunter2"));
        assert!(source.contains("Hunter2"));
    }

    #[test]
    fn rejects_malformed_connection_string() {
        let config = parse_config(&CONFIG.replace("Server=.;Database=Shop", "Server")).unwrap();
        let file = ModelFile::parse(MODEL).unwrap();

        let err = render(&config, &file).unwrap_err();

        assert!(matches!(err, CliError::Core(_)));
    }
}
