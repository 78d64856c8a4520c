use crate::{
    db::{ConnectionOptions, RelationalConnection},
    error::InternalError,
};
use derive_more::{Deref, DerefMut};

const CATALOG_KEYS: [&str; 2] = ["Initial Catalog", "Database"];
const MASTER_CATALOG: &str = "master";

///
/// SqlServerConnection
///
/// SQL Server flavour of [`RelationalConnection`].
///

#[derive(Debug, Deref, DerefMut)]
pub struct SqlServerConnection(RelationalConnection);

impl SqlServerConnection {
    #[must_use]
    pub const fn new(options: ConnectionOptions) -> Self {
        Self(RelationalConnection::new(options))
    }

    pub fn from_connection_string(connection_string: &str) -> Result<Self, InternalError> {
        ConnectionOptions::new(connection_string).map(Self::new)
    }

    /// A closed connection to the `master` catalog of the same server,
    /// keeping this connection's command timeout.
    #[must_use]
    pub fn create_master_connection(&self) -> Self {
        let mut connection_string = self.connection_string().clone();

        let mut rewritten = false;
        for key in CATALOG_KEYS {
            if connection_string.contains_key(key) {
                connection_string.set(key, MASTER_CATALOG);
                rewritten = true;
            }
        }
        if !rewritten {
            connection_string.set(CATALOG_KEYS[0], MASTER_CATALOG);
        }

        tracing::info!(
            connection = %connection_string.redacted(),
            "created master connection"
        );

        // the source string was non-empty and only gained keys
        Self::new(
            self.options()
                .clone()
                .with_connection_string(connection_string),
        )
    }
}

impl From<RelationalConnection> for SqlServerConnection {
    fn from(connection: RelationalConnection) -> Self {
        Self(connection)
    }
}
