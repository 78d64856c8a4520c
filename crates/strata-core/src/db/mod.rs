//! Relational collaborators: connection handles and SQL statements.
//!
//! Nothing here performs network I/O; connections only track lifecycle
//! state and the options a provider would be opened with.
mod connection;
mod connection_string;
mod sql_server;
mod statement;


use crate::error::InternalError;
use thiserror::Error as ThisError;

// re-exports
pub use connection::{ConnectionOptions, ConnectionState, RelationalConnection};
pub use connection_string::{ConnectionString, RedactedConnectionString};
pub use sql_server::SqlServerConnection;
pub use statement::SqlStatement;

///
/// ConnectionError
///

#[derive(Debug, ThisError)]
pub enum ConnectionError {
    #[error("connection string is empty")]
    EmptyConnectionString,

    #[error("connection string segment '{segment}' is not a key=value pair")]
    MalformedSegment { segment: String },

    #[error("connection string segment '{segment}' has an empty key")]
    EmptyKey { segment: String },

    #[error("connection closed more times than it was opened")]
    NotOpen,
}

impl From<ConnectionError> for InternalError {
    fn from(err: ConnectionError) -> Self {
        Self::connection_invariant(err.to_string())
    }
}
